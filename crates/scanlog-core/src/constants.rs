//! Application-wide constants.

use std::time::Duration;

/// Base URL of the scan service when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://192.168.1.112:3000";

/// Collection path of the scan resource.
pub const SCANS_PATH: &str = "/scans";

/// How long decode events are dropped after a capture starts.
pub const SCAN_COOLDOWN: Duration = Duration::from_millis(3000);

/// Upper bound for a single position read during a capture.
pub const LOCATION_TIMEOUT: Duration = Duration::from_millis(5000);

/// Default per-request timeout for the HTTP client.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Success notification animation
pub const NOTIFICATION_FADE_IN: Duration = Duration::from_millis(300);
pub const NOTIFICATION_HOLD: Duration = Duration::from_millis(2500);
pub const NOTIFICATION_FADE_OUT: Duration = Duration::from_millis(400);
