//! Device seams
//!
//! Camera, GPS, dialogs and link handling belong to the host platform. The
//! workflow only sees these traits, so a mobile shell, a terminal front-end and
//! tests can each plug in their own implementation.

use async_trait::async_trait;
use scanlog_core::{GeoFix, Permission, ScanError, ScanResult};

use crate::notification::Notification;

/// Outcome of a permission prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        self == PermissionStatus::Granted
    }
}

/// Camera access. Decoding itself happens on the platform side and arrives as
/// payload strings passed to the capture workflow.
#[async_trait]
pub trait CameraAccess: Send + Sync {
    async fn request_permission(&self) -> ScanResult<PermissionStatus>;
}

/// Foreground location access
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_permission(&self) -> ScanResult<PermissionStatus>;

    /// A single fresh position reading. May take arbitrarily long; callers bound it.
    async fn current_position(&self) -> ScanResult<GeoFix>;
}

/// User-facing dialogs and transient notifications
#[async_trait]
pub trait UserFeedback: Send + Sync {
    /// Show a modal alert. Presentation is fire-and-forget for the caller.
    fn alert(&self, title: &str, message: &str);

    /// Ask for explicit confirmation of a destructive action.
    async fn confirm(&self, title: &str, message: &str) -> bool;

    /// Show a transient notification that animates on its own timeline.
    fn notify(&self, notification: Notification);
}

/// Opening payload links in an external handler
#[async_trait]
pub trait LinkOpener: Send + Sync {
    async fn can_open(&self, url: &str) -> ScanResult<bool>;
    async fn open(&self, url: &str) -> ScanResult<()>;
}

/// Camera whose permission is always granted (stdin-driven front-ends).
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysGranted;

#[async_trait]
impl CameraAccess for AlwaysGranted {
    async fn request_permission(&self) -> ScanResult<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }
}

/// Location provider that always reports the same fix.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub GeoFix);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn request_permission(&self) -> ScanResult<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    async fn current_position(&self) -> ScanResult<GeoFix> {
        Ok(self.0)
    }
}

/// Location provider for devices without location access.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    async fn request_permission(&self) -> ScanResult<PermissionStatus> {
        Ok(PermissionStatus::Denied)
    }

    async fn current_position(&self) -> ScanResult<GeoFix> {
        Err(ScanError::PermissionDenied(Permission::Location))
    }
}
