use regex::Regex;
use std::sync::LazyLock;

/// Heuristic for "this payload looks like a link". Not a URL parser: it only
/// decides whether an open-link action is offered.
///
/// The single wildcard excludes line terminators, as a JavaScript `.` does.
pub const URL_PATTERN: &str =
    r"(?i)^(https?://|ftp://|www\.)[^\s/$.?#][^\n\r\x{2028}\x{2029}][^\s]*$";

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(URL_PATTERN).expect("URL pattern is a valid regex"));

pub fn is_url(text: &str) -> bool {
    URL_REGEX.is_match(text)
}
