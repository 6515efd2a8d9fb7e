//! Formatting helpers for presenting scan records.

use chrono::{DateTime, Utc};

/// Label used when a record carries no position.
pub const LOCATION_NOT_RECORDED: &str = "Location not recorded";

/// "Lat: 40.4168, Lon: -3.7038", or the not-recorded label.
pub fn format_location(latitude: Option<f64>, longitude: Option<f64>) -> String {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => format!("Lat: {:.4}, Lon: {:.4}", lat, lon),
        _ => LOCATION_NOT_RECORDED.to_string(),
    }
}

/// Render a capture timestamp (ms since epoch) as `YYYY-MM-DD HH:MM:SS` UTC.
pub fn format_timestamp(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Header line for the history list.
pub fn scan_count_summary(count: usize) -> String {
    match count {
        1 => "1 saved scan".to_string(),
        n => format!("{} saved scans", n),
    }
}
