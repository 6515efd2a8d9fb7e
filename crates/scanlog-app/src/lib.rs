//! Scanlog application layer
//!
//! The capture workflow and history list, written against injected seams:
//! a [`ScanApi`](scanlog_api_client::ScanApi) for persistence and the traits in
//! [`device`] for camera, location, user feedback and link opening. A platform
//! front-end implements the device traits; the CLI ships terminal versions.

pub mod bounded;
pub mod capture;
pub mod device;
pub mod history;
pub mod notification;

pub use bounded::{run_bounded, Bounded};
pub use capture::{CaptureSettings, CaptureState, DecodeOutcome, ScanCapture, StartupStatus};
pub use device::{
    AlwaysGranted, CameraAccess, FixedLocation, LinkOpener, LocationProvider, NoLocation,
    PermissionStatus, UserFeedback,
};
pub use history::{DeleteOutcome, HistoryEntry, HistoryList, LinkOutcome};
pub use notification::{Notification, NotificationTimeline};

// Test helpers (only available in test mode)
#[cfg(test)]
pub mod test_helpers;
