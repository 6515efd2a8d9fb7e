//! Domain models
//!
//! A scan record is the only persisted entity. `ScanRecord` is what the service
//! returns; `NewScan` is what the client is allowed to send.

pub mod scan;

pub use scan::{sort_newest_first, CreateScanRequest, GeoFix, NewScan, ScanRecord};
