//! In-memory fakes for the persistence and device seams.

pub mod mock_api;
pub mod mock_device;

pub use mock_api::MockScanApi;
pub use mock_device::{MockCamera, MockLinkOpener, MockLocation, RecordingFeedback};
