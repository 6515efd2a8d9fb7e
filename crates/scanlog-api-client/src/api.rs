//! Domain methods for the scan service client.
//!
//! [`ScanApi`] is the seam the capture workflow and history list depend on;
//! [`ApiClient`] is the HTTP implementation.

use async_trait::async_trait;
use scanlog_core::constants::SCANS_PATH;
use scanlog_core::models::{sort_newest_first, CreateScanRequest};
use scanlog_core::{NewScan, ScanRecord, ScanResult};
use serde::Deserialize;

use crate::ApiClient;

/// Data access operations on scan records.
#[async_trait]
pub trait ScanApi: Send + Sync {
    /// One-time setup. Idempotent, never touches the network.
    async fn initialize(&self) -> ScanResult<()>;

    /// All records, newest `created_at` first.
    async fn list_scans(&self) -> ScanResult<Vec<ScanRecord>>;

    /// Persist a scan and return the id the service assigned.
    async fn create_scan(&self, scan: &NewScan) -> ScanResult<i64>;

    /// Hard delete. Returns `true` on success; failures are errors.
    async fn delete_scan(&self, id: i64) -> ScanResult<bool>;

    /// Lookup by id. A 404 is `None`, not an error.
    async fn get_scan_by_id(&self, id: i64) -> ScanResult<Option<ScanRecord>>;
}

/// Reply to `POST /scans`. Only the assigned id is read; other fields may be
/// missing.
#[derive(Debug, Deserialize)]
struct CreatedScan {
    id: i64,
}

fn scan_path(id: i64) -> String {
    format!("{}/{}", SCANS_PATH, id)
}

#[async_trait]
impl ScanApi for ApiClient {
    async fn initialize(&self) -> ScanResult<()> {
        if self.mark_initialized() {
            tracing::info!(base_url = %self.base_url(), "API client initialized");
        }
        Ok(())
    }

    async fn list_scans(&self) -> ScanResult<Vec<ScanRecord>> {
        let mut scans: Vec<ScanRecord> = self.get(SCANS_PATH).await.map_err(|e| {
            tracing::error!(error = %e, "Error fetching scans");
            e
        })?;
        sort_newest_first(&mut scans);
        tracing::debug!(count = scans.len(), "Fetched scans");
        Ok(scans)
    }

    async fn create_scan(&self, scan: &NewScan) -> ScanResult<i64> {
        let body = CreateScanRequest::from(scan);
        let created: CreatedScan = self.post_json(SCANS_PATH, &body).await.map_err(|e| {
            tracing::error!(error = %e, "Error adding scan");
            e
        })?;
        tracing::debug!(scan_id = created.id, "Scan created");
        Ok(created.id)
    }

    async fn delete_scan(&self, id: i64) -> ScanResult<bool> {
        self.delete(&scan_path(id)).await.map_err(|e| {
            tracing::error!(scan_id = id, error = %e, "Error deleting scan");
            e
        })?;
        Ok(true)
    }

    async fn get_scan_by_id(&self, id: i64) -> ScanResult<Option<ScanRecord>> {
        self.get_optional(&scan_path(id)).await.map_err(|e| {
            tracing::error!(scan_id = id, error = %e, "Error fetching scan by id");
            e
        })
    }
}
