//! Mock device seams for testing

use async_trait::async_trait;
use scanlog_core::{GeoFix, ScanError, ScanResult};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::device::{CameraAccess, LinkOpener, LocationProvider, PermissionStatus, UserFeedback};
use crate::notification::Notification;

pub const TEST_FIX: GeoFix = GeoFix {
    latitude: 40.4168,
    longitude: -3.7038,
    altitude: 650.0,
    accuracy: 10.0,
};

/// Camera with a fixed permission answer
pub struct MockCamera {
    status: Mutex<PermissionStatus>,
}

impl MockCamera {
    pub fn new(status: PermissionStatus) -> Self {
        Self {
            status: Mutex::new(status),
        }
    }

    pub fn set_status(&self, status: PermissionStatus) {
        *self.status.lock().unwrap() = status;
    }
}

#[async_trait]
impl CameraAccess for MockCamera {
    async fn request_permission(&self) -> ScanResult<PermissionStatus> {
        Ok(*self.status.lock().unwrap())
    }
}

/// What a position read does
#[derive(Debug, Clone, Copy)]
pub enum PositionBehavior {
    Fix(GeoFix),
    Fail,
    Delay(Duration, GeoFix),
    Hang,
}

pub struct MockLocation {
    permission: PermissionStatus,
    behavior: Mutex<PositionBehavior>,
    reads: AtomicUsize,
    permission_requests: AtomicUsize,
}

impl MockLocation {
    pub fn new(permission: PermissionStatus, behavior: PositionBehavior) -> Self {
        Self {
            permission,
            behavior: Mutex::new(behavior),
            reads: AtomicUsize::new(0),
            permission_requests: AtomicUsize::new(0),
        }
    }

    pub fn granted() -> Self {
        Self::new(PermissionStatus::Granted, PositionBehavior::Fix(TEST_FIX))
    }

    pub fn denied() -> Self {
        Self::new(PermissionStatus::Denied, PositionBehavior::Fix(TEST_FIX))
    }

    pub fn set_behavior(&self, behavior: PositionBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn permission_requests(&self) -> usize {
        self.permission_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationProvider for MockLocation {
    async fn request_permission(&self) -> ScanResult<PermissionStatus> {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        Ok(self.permission)
    }

    async fn current_position(&self) -> ScanResult<GeoFix> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let behavior = *self.behavior.lock().unwrap();
        match behavior {
            PositionBehavior::Fix(fix) => Ok(fix),
            PositionBehavior::Fail => Err(ScanError::Device("GPS unavailable".into())),
            PositionBehavior::Delay(delay, fix) => {
                tokio::time::sleep(delay).await;
                Ok(fix)
            }
            PositionBehavior::Hang => std::future::pending().await,
        }
    }
}

/// Records every alert and notification; answers confirmations with a preset value
#[derive(Default)]
pub struct RecordingFeedback {
    alerts: Mutex<Vec<(String, String)>>,
    notifications: Mutex<Vec<Notification>>,
    confirm_answer: AtomicBool,
    confirm_calls: AtomicUsize,
}

impl RecordingFeedback {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.store(answer, Ordering::SeqCst);
    }

    pub fn alerts(&self) -> Vec<(String, String)> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn alert_titles(&self) -> Vec<String> {
        self.alerts().into_iter().map(|(title, _)| title).collect()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn confirm_calls(&self) -> usize {
        self.confirm_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserFeedback for RecordingFeedback {
    fn alert(&self, title: &str, message: &str) {
        self.alerts
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }

    async fn confirm(&self, _title: &str, _message: &str) -> bool {
        self.confirm_calls.fetch_add(1, Ordering::SeqCst);
        self.confirm_answer.load(Ordering::SeqCst)
    }

    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

#[derive(Default)]
pub struct MockLinkOpener {
    pub supported: bool,
    pub fail: bool,
    opened: Mutex<Vec<String>>,
}

impl MockLinkOpener {
    pub fn supporting(supported: bool) -> Self {
        Self {
            supported,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl LinkOpener for MockLinkOpener {
    async fn can_open(&self, _url: &str) -> ScanResult<bool> {
        if self.fail {
            return Err(ScanError::Device("no handler".into()));
        }
        Ok(self.supported)
    }

    async fn open(&self, url: &str) -> ScanResult<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
