//! Mock ScanApi implementation for testing

use async_trait::async_trait;
use scanlog_api_client::ScanApi;
use scanlog_core::models::sort_newest_first;
use scanlog_core::{NewScan, ScanError, ScanRecord, ScanResult};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct State {
    records: Vec<ScanRecord>,
    next_id: i64,
    created: Vec<NewScan>,
    fail_create_status: Option<u16>,
    fail_list_status: Option<u16>,
    fail_delete_status: Option<u16>,
    list_calls: usize,
    initialize_calls: usize,
}

/// Mock scan service that stores records in memory
#[derive(Clone, Default)]
pub struct MockScanApi {
    state: Arc<Mutex<State>>,
}

impl MockScanApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a stored record with an explicit creation instant
    pub fn insert(&self, qr_data: &str, created_at: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.records.push(ScanRecord {
            id,
            qr_data: qr_data.to_string(),
            latitude: None,
            longitude: None,
            altitude: None,
            accuracy: None,
            timestamp: 0,
            created_at: created_at.to_string(),
        });
        id
    }

    pub fn fail_create_with(&self, status: Option<u16>) {
        self.state.lock().unwrap().fail_create_status = status;
    }

    pub fn fail_list_with(&self, status: Option<u16>) {
        self.state.lock().unwrap().fail_list_status = status;
    }

    pub fn fail_delete_with(&self, status: Option<u16>) {
        self.state.lock().unwrap().fail_delete_status = status;
    }

    /// Scans received by `create_scan`, in call order (for test assertions)
    pub fn created(&self) -> Vec<NewScan> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn stored_ids(&self) -> Vec<i64> {
        self.state.lock().unwrap().records.iter().map(|r| r.id).collect()
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn initialize_calls(&self) -> usize {
        self.state.lock().unwrap().initialize_calls
    }
}

#[async_trait]
impl ScanApi for MockScanApi {
    async fn initialize(&self) -> ScanResult<()> {
        self.state.lock().unwrap().initialize_calls += 1;
        Ok(())
    }

    async fn list_scans(&self) -> ScanResult<Vec<ScanRecord>> {
        let mut state = self.state.lock().unwrap();
        state.list_calls += 1;
        if let Some(status) = state.fail_list_status {
            return Err(ScanError::http_status(status, "list failed"));
        }
        let mut records = state.records.clone();
        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn create_scan(&self, scan: &NewScan) -> ScanResult<i64> {
        let mut state = self.state.lock().unwrap();
        if let Some(status) = state.fail_create_status {
            return Err(ScanError::http_status(status, "create failed"));
        }
        state.next_id += 1;
        let id = state.next_id;
        let location = scan.location;
        state.records.push(ScanRecord {
            id,
            qr_data: scan.qr_data.clone(),
            latitude: location.map(|l| l.latitude),
            longitude: location.map(|l| l.longitude),
            altitude: location.map(|l| l.altitude),
            accuracy: location.map(|l| l.accuracy),
            timestamp: scan.timestamp,
            created_at: format!("2030-01-01T00:00:{:02}Z", id % 60),
        });
        state.created.push(scan.clone());
        Ok(id)
    }

    async fn delete_scan(&self, id: i64) -> ScanResult<bool> {
        let mut state = self.state.lock().unwrap();
        if let Some(status) = state.fail_delete_status {
            return Err(ScanError::http_status(status, "delete failed"));
        }
        let before = state.records.len();
        state.records.retain(|r| r.id != id);
        if state.records.len() == before {
            return Err(ScanError::http_status(404, "not found"));
        }
        Ok(true)
    }

    async fn get_scan_by_id(&self, id: i64) -> ScanResult<Option<ScanRecord>> {
        let state = self.state.lock().unwrap();
        Ok(state.records.iter().find(|r| r.id == id).cloned())
    }
}
