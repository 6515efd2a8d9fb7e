//! Error types module
//!
//! All failures that can reach a user-facing action are unified under
//! [`ScanError`]. The HTTP client maps transport and status failures into
//! [`ScanError::Network`]; device seams report [`ScanError::Device`]. Callers
//! catch at the action boundary and use [`ErrorMetadata`] to decide how to log
//! and what to show.

use std::fmt;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected conditions like a refused permission
    Debug,
    /// Warning level - for degraded but non-fatal outcomes
    Warn,
    /// Error level - for failed operations
    Error,
}

/// Device capability guarded by a user permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Camera,
    Location,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::Camera => f.write_str("camera"),
            Permission::Location => f.write_str("location"),
        }
    }
}

/// Metadata describing how an error should be presented
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "NETWORK_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether the user can reasonably try the action again
    fn is_recoverable(&self) -> bool;

    /// Message suitable for a blocking alert
    fn user_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

pub type ScanResult<T> = Result<T, ScanError>;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Non-success HTTP status (`status` set) or transport failure (`status` is `None`).
    #[error("{}", network_display(.status, .message))]
    Network {
        status: Option<u16>,
        message: String,
    },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(Permission),

    #[error("Device error: {0}")]
    Device(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn network_display(status: &Option<u16>, message: &str) -> String {
    match *status {
        Some(status) if message.is_empty() => format!("HTTP error! status: {}", status),
        Some(status) => format!("HTTP error! status: {}, body: {}", status, message),
        None => format!("Network request failed: {}", message),
    }
}

impl ScanError {
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        ScanError::Network {
            status: Some(status),
            message: body.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ScanError::Network {
            status: None,
            message: message.into(),
        }
    }

    /// HTTP status carried by a network error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ScanError::Network { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ScanError::Network { .. } | ScanError::Decode(_))
    }
}

impl From<serde_json::Error> for ScanError {
    fn from(err: serde_json::Error) -> Self {
        ScanError::Decode(err.to_string())
    }
}

impl ErrorMetadata for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            ScanError::Network { .. } => "NETWORK_ERROR",
            ScanError::Decode(_) => "DECODE_ERROR",
            ScanError::PermissionDenied(_) => "PERMISSION_DENIED",
            ScanError::Device(_) => "DEVICE_ERROR",
            ScanError::Config(_) => "CONFIG_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        !matches!(self, ScanError::Config(_))
    }

    fn user_message(&self) -> String {
        match self {
            ScanError::Network { status: Some(status), .. } => {
                format!("The scan service answered with status {}.", status)
            }
            ScanError::Network { status: None, .. } | ScanError::Decode(_) => {
                "Could not reach the scan service.".to_string()
            }
            ScanError::PermissionDenied(permission) => {
                format!("Access to the {} was not granted.", permission)
            }
            ScanError::Device(_) => "The device could not complete the request.".to_string(),
            ScanError::Config(msg) => format!("Invalid configuration: {}", msg),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            ScanError::PermissionDenied(_) => LogLevel::Debug,
            ScanError::Device(_) => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}
