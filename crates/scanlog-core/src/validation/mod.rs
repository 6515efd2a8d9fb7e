//! Validation modules

pub mod link;

pub use link::{is_url, URL_PATTERN};
