//! Transient success notification.
//!
//! The notification runs on its own timeline (fade in, hold, fade out) and is
//! not tied to the scan cooldown; it may end before or after scanning re-arms.

use std::time::Duration;

use scanlog_core::constants::{NOTIFICATION_FADE_IN, NOTIFICATION_FADE_OUT, NOTIFICATION_HOLD};

pub const SCAN_SAVED_MESSAGE: &str = "QR code scanned successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTimeline {
    pub fade_in: Duration,
    pub hold: Duration,
    pub fade_out: Duration,
}

impl Default for NotificationTimeline {
    fn default() -> Self {
        Self {
            fade_in: NOTIFICATION_FADE_IN,
            hold: NOTIFICATION_HOLD,
            fade_out: NOTIFICATION_FADE_OUT,
        }
    }
}

impl NotificationTimeline {
    pub fn total(&self) -> Duration {
        self.fade_in + self.hold + self.fade_out
    }

    /// Opacity in `[0, 1]` at `elapsed` since the notification started.
    pub fn opacity_at(&self, elapsed: Duration) -> f32 {
        if elapsed < self.fade_in {
            return ratio(elapsed, self.fade_in);
        }
        let held = self.fade_in + self.hold;
        if elapsed < held {
            return 1.0;
        }
        if elapsed < self.total() {
            return 1.0 - ratio(elapsed - held, self.fade_out);
        }
        0.0
    }

    pub fn is_visible_at(&self, elapsed: Duration) -> bool {
        self.opacity_at(elapsed) > 0.0
    }
}

fn ratio(part: Duration, whole: Duration) -> f32 {
    if whole.is_zero() {
        1.0
    } else {
        (part.as_secs_f32() / whole.as_secs_f32()).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub timeline: NotificationTimeline,
}

impl Notification {
    pub fn scan_saved(timeline: NotificationTimeline) -> Self {
        Self {
            message: SCAN_SAVED_MESSAGE.to_string(),
            timeline,
        }
    }
}
