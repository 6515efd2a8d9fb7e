//! Scan capture workflow
//!
//! Turns decoded barcode payloads into persisted scan records. A two-state gate
//! (`Scanning` / `CoolingDown`) guarantees at most one capture sequence in
//! flight: a decode event flips the gate to `CoolingDown` before anything else
//! happens, and any event arriving while it is closed is dropped.
//!
//! Sequence per accepted event:
//! 1. read the position (bounded by the location timeout, failures downgrade to
//!    "no location"),
//! 2. build the record and persist it,
//! 3. refresh the scan counter from the full list,
//! 4. show the success notification and re-arm once the cooldown has elapsed
//!    since the event.
//!
//! A persistence failure alerts the user and re-arms immediately.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use scanlog_api_client::ScanApi;
use scanlog_core::constants::{LOCATION_TIMEOUT, SCAN_COOLDOWN};
use scanlog_core::{
    ClientConfig, ErrorMetadata, GeoFix, NewScan, Permission, ScanError, ScanResult,
};
use tokio::sync::watch;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::bounded::{run_bounded, Bounded};
use crate::device::{CameraAccess, LocationProvider, PermissionStatus, UserFeedback};
use crate::notification::{Notification, NotificationTimeline};

/// Whether decode events are currently accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Scanning,
    CoolingDown,
}

/// Result of handing one decode event to the workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// Dropped: gate closed, camera not granted, or workflow shut down.
    Ignored,
    Saved { id: i64 },
    Failed,
}

/// Timing knobs of the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSettings {
    pub cooldown: Duration,
    pub location_timeout: Duration,
    pub notification: NotificationTimeline,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            cooldown: SCAN_COOLDOWN,
            location_timeout: LOCATION_TIMEOUT,
            notification: NotificationTimeline::default(),
        }
    }
}

impl From<&ClientConfig> for CaptureSettings {
    fn from(config: &ClientConfig) -> Self {
        Self {
            cooldown: config.scan_cooldown,
            location_timeout: config.location_timeout,
            notification: NotificationTimeline::default(),
        }
    }
}

/// What startup found out about the device and the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupStatus {
    pub camera: PermissionStatus,
    pub location: PermissionStatus,
    /// `None` when the initial count could not be fetched.
    pub scan_count: Option<usize>,
}

#[derive(Debug)]
struct Inner {
    camera: PermissionStatus,
    location: PermissionStatus,
    scan_count: usize,
    last_scan: Option<NewScan>,
    last_location: Option<GeoFix>,
}

pub struct ScanCapture {
    api: Arc<dyn ScanApi>,
    camera: Arc<dyn CameraAccess>,
    location: Arc<dyn LocationProvider>,
    feedback: Arc<dyn UserFeedback>,
    settings: CaptureSettings,
    state: Arc<watch::Sender<CaptureState>>,
    inner: Mutex<Inner>,
    shutdown: CancellationToken,
}

impl ScanCapture {
    pub fn new(
        api: Arc<dyn ScanApi>,
        camera: Arc<dyn CameraAccess>,
        location: Arc<dyn LocationProvider>,
        feedback: Arc<dyn UserFeedback>,
        settings: CaptureSettings,
    ) -> Self {
        let (state, _) = watch::channel(CaptureState::Scanning);
        Self {
            api,
            camera,
            location,
            feedback,
            settings,
            state: Arc::new(state),
            inner: Mutex::new(Inner {
                camera: PermissionStatus::Denied,
                location: PermissionStatus::Denied,
                scan_count: 0,
                last_scan: None,
                last_location: None,
            }),
            shutdown: CancellationToken::new(),
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// One-time startup: initialize the client, prompt for camera and location
    /// access, take a first position reading and load the scan counter.
    pub async fn start(&self) -> StartupStatus {
        if let Err(e) = self.api.initialize().await {
            tracing::error!(error = %e, "Error initializing API client");
        }

        let camera = self.request_camera_permission().await;
        let location = self.request_location_permission().await;

        if location.is_granted() {
            let fix = self.read_location().await;
            self.inner().last_location = fix;
        }

        let scan_count = match self.api.list_scans().await {
            Ok(scans) => {
                let count = scans.len();
                self.inner().scan_count = count;
                Some(count)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error initializing app");
                self.feedback.alert(
                    "Startup Error",
                    "Could not initialize the app. Try restarting it.",
                );
                None
            }
        };

        tracing::info!(
            camera = ?camera,
            location = ?location,
            scan_count = ?scan_count,
            "Scan capture started"
        );

        StartupStatus {
            camera,
            location,
            scan_count,
        }
    }

    /// Prompt for camera access. Can be called again after a denial.
    pub async fn request_camera_permission(&self) -> PermissionStatus {
        let status = match self.camera.request_permission().await {
            Ok(status) => status,
            Err(e) => {
                tracing::error!(error = %e, "Error requesting camera permission");
                PermissionStatus::Denied
            }
        };
        if !status.is_granted() {
            tracing::debug!("Camera permission not granted; decode events will be ignored");
        }
        self.inner().camera = status;
        status
    }

    async fn request_location_permission(&self) -> PermissionStatus {
        let status = match self.location.request_permission().await {
            Ok(PermissionStatus::Granted) => PermissionStatus::Granted,
            Ok(PermissionStatus::Denied) => {
                self.feedback.alert(
                    "Location Permission Needed",
                    "To record where your scans happen we need access to your location. \
                     You can enable it in your device settings.",
                );
                PermissionStatus::Denied
            }
            Err(e) => {
                tracing::error!(error = %e, "Error requesting location permission");
                self.feedback.alert(
                    "Permission Error",
                    "Could not request location permission.",
                );
                PermissionStatus::Denied
            }
        };
        self.inner().location = status;
        status
    }

    /// Read the current position, bounded by the location timeout. Any failure
    /// means "no location" for this scan.
    async fn read_location(&self) -> Option<GeoFix> {
        let read = self.location.current_position();
        match run_bounded(read, self.settings.location_timeout, &self.shutdown).await {
            Bounded::Completed(Ok(fix)) if fix.is_finite() => Some(fix),
            Bounded::Completed(Ok(_)) => {
                tracing::warn!("Discarding location reading with non-finite values");
                None
            }
            Bounded::Completed(Err(e)) => {
                tracing::warn!(error = %e, "Error getting location during scan");
                None
            }
            Bounded::TimedOut => {
                tracing::warn!(
                    timeout_ms = self.settings.location_timeout.as_millis() as u64,
                    "Location read timed out during scan"
                );
                None
            }
            Bounded::Cancelled => None,
        }
    }

    /// Handle one decoded payload from the camera. Dropping the future midway
    /// abandons the capture and re-opens the gate.
    pub async fn handle_decode(&self, payload: &str) -> DecodeOutcome {
        if self.shutdown.is_cancelled() || !self.inner().camera.is_granted() {
            return DecodeOutcome::Ignored;
        }

        let accepted = self.state.send_if_modified(|state| {
            if *state == CaptureState::Scanning {
                *state = CaptureState::CoolingDown;
                true
            } else {
                false
            }
        });
        if !accepted {
            tracing::debug!("Decode event dropped while cooling down");
            return DecodeOutcome::Ignored;
        }
        let entered_at = Instant::now();
        let guard = RearmOnDrop::new(&self.state);

        let location_enabled = self.inner().location.is_granted();
        let location = if location_enabled {
            let fix = self.read_location().await;
            self.inner().last_location = fix;
            fix
        } else {
            None
        };

        let scan = NewScan::captured_now(payload, location);
        self.inner().last_scan = Some(scan.clone());

        match self.persist(&scan).await {
            Ok((id, count)) => {
                guard.disarm();
                self.inner().scan_count = count;
                self.feedback
                    .notify(Notification::scan_saved(self.settings.notification));
                self.schedule_rearm(entered_at + self.settings.cooldown);
                DecodeOutcome::Saved { id }
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    code = e.error_code(),
                    qr_len = payload.len(),
                    "Error handling scan"
                );
                guard.disarm();
                self.rearm();
                self.feedback.alert(
                    "Scan Error",
                    "There was a problem processing the QR code. Please try again.",
                );
                DecodeOutcome::Failed
            }
        }
    }

    /// Store the scan, then recount from the full list.
    async fn persist(&self, scan: &NewScan) -> ScanResult<(i64, usize)> {
        let id = self.api.create_scan(scan).await?;
        tracing::info!(scan_id = id, has_location = scan.location.is_some(), "Scan saved");
        let count = self.api.list_scans().await?.len();
        Ok((id, count))
    }

    fn rearm(&self) {
        self.state.send_replace(CaptureState::Scanning);
    }

    fn schedule_rearm(&self, deadline: Instant) {
        let state = Arc::clone(&self.state);
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {}
                _ = tokio::time::sleep_until(deadline) => {
                    state.send_replace(CaptureState::Scanning);
                    tracing::debug!("Scanning re-armed");
                }
            }
        });
    }

    /// Tear down: pending re-arms and in-flight location reads are abandoned
    /// and later decode events are ignored.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn state(&self) -> CaptureState {
        *self.state.borrow()
    }

    /// Watch gate transitions (e.g. to toggle a camera overlay).
    pub fn subscribe(&self) -> watch::Receiver<CaptureState> {
        self.state.subscribe()
    }

    pub fn scan_count(&self) -> usize {
        self.inner().scan_count
    }

    pub fn last_scan(&self) -> Option<NewScan> {
        self.inner().last_scan.clone()
    }

    pub fn last_location(&self) -> Option<GeoFix> {
        self.inner().last_location
    }

    pub fn camera_granted(&self) -> bool {
        self.inner().camera.is_granted()
    }

    pub fn location_enabled(&self) -> bool {
        self.inner().location.is_granted()
    }

    /// Permission condition that currently limits the workflow, if any.
    pub fn permission_problem(&self) -> Option<ScanError> {
        let inner = self.inner();
        if !inner.camera.is_granted() {
            Some(ScanError::PermissionDenied(Permission::Camera))
        } else if !inner.location.is_granted() {
            Some(ScanError::PermissionDenied(Permission::Location))
        } else {
            None
        }
    }
}

/// Re-opens the gate if a capture sequence is dropped before it finishes.
struct RearmOnDrop<'a> {
    state: &'a watch::Sender<CaptureState>,
    armed: bool,
}

impl<'a> RearmOnDrop<'a> {
    fn new(state: &'a watch::Sender<CaptureState>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for RearmOnDrop<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::debug!("Capture sequence abandoned; re-arming");
            self.state.send_replace(CaptureState::Scanning);
        }
    }
}

impl Drop for ScanCapture {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
