//! History list
//!
//! Screen-local copy of the stored scans. Every focus reloads the whole list
//! from the service; deletes are confirmed by the user, sent to the service,
//! and only then applied locally.

use std::sync::Arc;

use scanlog_api_client::ScanApi;
use scanlog_core::display::{format_location, scan_count_summary};
use scanlog_core::{is_url, ScanRecord};

use crate::device::{LinkOpener, UserFeedback};

pub const DELETE_CONFIRM_TITLE: &str = "Delete Scan";
pub const DELETE_CONFIRM_MESSAGE: &str =
    "Are you sure you want to permanently delete this scan record?";

/// One row of the history list
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub record: ScanRecord,
    /// Whether an "open link" action is offered for this payload
    pub open_link: bool,
    pub location_label: String,
}

impl From<&ScanRecord> for HistoryEntry {
    fn from(record: &ScanRecord) -> Self {
        HistoryEntry {
            record: record.clone(),
            open_link: is_url(&record.qr_data),
            location_label: format_location(record.latitude, record.longitude),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined the confirmation.
    Cancelled,
    Deleted,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Opened,
    Unsupported,
    Failed,
}

pub struct HistoryList {
    api: Arc<dyn ScanApi>,
    feedback: Arc<dyn UserFeedback>,
    links: Arc<dyn LinkOpener>,
    scans: Vec<ScanRecord>,
    loading: bool,
    refreshing: bool,
}

impl HistoryList {
    pub fn new(
        api: Arc<dyn ScanApi>,
        feedback: Arc<dyn UserFeedback>,
        links: Arc<dyn LinkOpener>,
    ) -> Self {
        Self {
            api,
            feedback,
            links,
            scans: Vec::new(),
            loading: true,
            refreshing: false,
        }
    }

    /// Screen gained focus: reload everything.
    pub async fn on_focus(&mut self) -> bool {
        self.load().await
    }

    /// Pull-to-refresh.
    pub async fn refresh(&mut self) -> bool {
        self.load().await
    }

    /// Replace local state with the service's list. On failure the previous
    /// list is kept and the user is alerted.
    async fn load(&mut self) -> bool {
        self.refreshing = true;
        let result = match self.api.initialize().await {
            Ok(()) => self.api.list_scans().await,
            Err(e) => Err(e),
        };
        let loaded = match result {
            Ok(scans) => {
                tracing::debug!(count = scans.len(), "History loaded");
                self.scans = scans;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load scans");
                self.feedback
                    .alert("Error", "Failed to load scans. Please try again later.");
                false
            }
        };
        self.refreshing = false;
        self.loading = false;
        loaded
    }

    /// Confirm, delete on the service, then drop the record locally.
    pub async fn delete(&mut self, id: i64) -> DeleteOutcome {
        if !self
            .feedback
            .confirm(DELETE_CONFIRM_TITLE, DELETE_CONFIRM_MESSAGE)
            .await
        {
            return DeleteOutcome::Cancelled;
        }

        match self.api.delete_scan(id).await {
            Ok(true) => {
                self.scans.retain(|scan| scan.id != id);
                tracing::info!(scan_id = id, "Scan deleted");
                self.feedback
                    .alert("Success", "Scan record deleted successfully.");
                DeleteOutcome::Deleted
            }
            Ok(false) => {
                self.feedback
                    .alert("Error", "Failed to delete scan record. Please try again.");
                DeleteOutcome::Failed
            }
            Err(e) => {
                tracing::error!(scan_id = id, error = %e, "Error deleting scan");
                self.feedback.alert(
                    "Error",
                    "There was a problem trying to delete the scan record.",
                );
                DeleteOutcome::Failed
            }
        }
    }

    /// Hand a payload link to the platform's link handler.
    pub async fn open_link(&self, url: &str) -> LinkOutcome {
        let supported = match self.links.can_open(url).await {
            Ok(supported) => supported,
            Err(e) => {
                tracing::error!(error = %e, "Error opening URL");
                self.feedback
                    .alert("Error", "An error occurred while trying to open the link.");
                return LinkOutcome::Failed;
            }
        };
        if !supported {
            self.feedback
                .alert("Invalid Link", &format!("Cannot open this link: {}", url));
            return LinkOutcome::Unsupported;
        }
        match self.links.open(url).await {
            Ok(()) => LinkOutcome::Opened,
            Err(e) => {
                tracing::error!(error = %e, "Error opening URL");
                self.feedback
                    .alert("Error", "An error occurred while trying to open the link.");
                LinkOutcome::Failed
            }
        }
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.scans.iter().map(HistoryEntry::from).collect()
    }

    pub fn scans(&self) -> &[ScanRecord] {
        &self.scans
    }

    pub fn len(&self) -> usize {
        self.scans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }

    pub fn summary(&self) -> String {
        scan_count_summary(self.scans.len())
    }

    /// True until the first load attempt has finished.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }
}
