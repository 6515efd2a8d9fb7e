use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scan record as stored by the scan service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: i64,
    pub qr_data: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    pub accuracy: Option<f64>,
    /// Client capture instant, milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Server creation instant, the canonical display order key
    pub created_at: String,
}

/// A single position reading. All four values come from the same fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub accuracy: f64,
}

impl GeoFix {
    /// False when any value is NaN or infinite. Such a fix would serialize
    /// with some fields as `null`.
    pub fn is_finite(&self) -> bool {
        [self.latitude, self.longitude, self.altitude, self.accuracy]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Client-side input for a new record. `id` and `created_at` are server-owned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewScan {
    pub qr_data: String,
    pub location: Option<GeoFix>,
    pub timestamp: i64,
}

/// Request DTO for `POST /scans`. Serializes exactly six fields, nulls included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateScanRequest {
    pub qr_data: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    pub accuracy: Option<f64>,
    pub timestamp: i64,
}

impl NewScan {
    pub fn new(qr_data: impl Into<String>, location: Option<GeoFix>, timestamp: i64) -> Self {
        Self {
            qr_data: qr_data.into(),
            location,
            timestamp,
        }
    }

    /// Build a scan stamped with the current wall-clock time.
    pub fn captured_now(qr_data: impl Into<String>, location: Option<GeoFix>) -> Self {
        Self::new(qr_data, location, Utc::now().timestamp_millis())
    }
}

impl From<&NewScan> for CreateScanRequest {
    fn from(scan: &NewScan) -> Self {
        let location = scan.location.filter(GeoFix::is_finite);
        CreateScanRequest {
            qr_data: scan.qr_data.clone(),
            latitude: location.map(|l| l.latitude),
            longitude: location.map(|l| l.longitude),
            altitude: location.map(|l| l.altitude),
            accuracy: location.map(|l| l.accuracy),
            timestamp: scan.timestamp,
        }
    }
}

impl ScanRecord {
    /// The recorded position, present only when all four fields are populated.
    pub fn location(&self) -> Option<GeoFix> {
        Some(GeoFix {
            latitude: self.latitude?,
            longitude: self.longitude?,
            altitude: self.altitude?,
            accuracy: self.accuracy?,
        })
    }

    pub fn has_location(&self) -> bool {
        self.location().is_some()
    }

    /// Parse `created_at` as RFC 3339, falling back to a naive
    /// `YYYY-MM-DD HH:MM:SS[.f]` timestamp taken as UTC.
    pub fn created_at_instant(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }
}

/// Sort records by `created_at` descending. Stable; unparseable instants go last.
pub fn sort_newest_first(records: &mut [ScanRecord]) {
    records.sort_by_cached_key(|r| std::cmp::Reverse(r.created_at_instant()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: i64, created_at: &str) -> ScanRecord {
        ScanRecord {
            id,
            qr_data: format!("scan-{}", id),
            latitude: None,
            longitude: None,
            altitude: None,
            accuracy: None,
            timestamp: 0,
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn create_request_has_exactly_six_fields() {
        let scan = NewScan::new(
            "https://example.com",
            Some(GeoFix {
                latitude: 40.4168,
                longitude: -3.7038,
                altitude: 650.0,
                accuracy: 12.5,
            }),
            1_700_000_000_000,
        );
        let body = serde_json::to_value(CreateScanRequest::from(&scan)).unwrap();
        assert_eq!(
            body,
            json!({
                "qr_data": "https://example.com",
                "latitude": 40.4168,
                "longitude": -3.7038,
                "altitude": 650.0,
                "accuracy": 12.5,
                "timestamp": 1_700_000_000_000i64
            })
        );
    }

    #[test]
    fn create_request_without_location_serializes_nulls() {
        let scan = NewScan::new("hello world", None, 42);
        let body = serde_json::to_value(CreateScanRequest::from(&scan)).unwrap();
        let obj = body.as_object().unwrap();
        assert_eq!(obj.len(), 6);
        for field in ["latitude", "longitude", "altitude", "accuracy"] {
            assert!(obj[field].is_null(), "{} should be null", field);
        }
    }

    #[test]
    fn non_finite_fix_is_sent_as_no_location() {
        let scan = NewScan::new(
            "x",
            Some(GeoFix {
                latitude: 1.0,
                longitude: 2.0,
                altitude: f64::NAN,
                accuracy: f64::INFINITY,
            }),
            1,
        );
        let body = serde_json::to_value(CreateScanRequest::from(&scan)).unwrap();
        for field in ["latitude", "longitude", "altitude", "accuracy"] {
            assert!(body[field].is_null(), "{} should be null", field);
        }
    }

    #[test]
    fn location_requires_all_fields() {
        let mut r = record(1, "2024-01-01T00:00:00Z");
        assert_eq!(r.location(), None);

        r.latitude = Some(1.0);
        r.longitude = Some(2.0);
        r.altitude = Some(3.0);
        assert_eq!(r.location(), None);

        r.accuracy = Some(4.0);
        assert!(r.has_location());
        assert_eq!(r.location().unwrap().altitude, 3.0);
    }

    #[test]
    fn deserializes_service_payload() {
        let r: ScanRecord = serde_json::from_value(json!({
            "id": 7,
            "qr_data": "abc",
            "latitude": null,
            "longitude": null,
            "altitude": null,
            "accuracy": null,
            "timestamp": 1700000000000i64,
            "created_at": "2024-05-01 10:00:00"
        }))
        .unwrap();
        assert_eq!(r.id, 7);
        assert!(r.created_at_instant().is_some());
    }

    #[test]
    fn parses_rfc3339_and_sql_timestamps() {
        assert!(record(1, "2024-05-01T10:00:00.123Z").created_at_instant().is_some());
        assert!(record(1, "2024-05-01T12:00:00+02:00").created_at_instant().is_some());
        assert!(record(1, "2024-05-01 10:00:00").created_at_instant().is_some());
        assert!(record(1, "2024-05-01 10:00:00.5").created_at_instant().is_some());
        assert!(record(1, "yesterday").created_at_instant().is_none());
    }

    #[test]
    fn sorts_newest_first() {
        let mut records = vec![
            record(1, "2024-01-01T00:00:00Z"),
            record(2, "2024-03-01T00:00:00Z"),
            record(3, "2024-02-01 00:00:00"),
        ];
        sort_newest_first(&mut records);
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn unparseable_created_at_sorts_last() {
        let mut records = vec![
            record(1, "garbage"),
            record(2, "2024-01-01T00:00:00Z"),
            record(3, "2025-01-01T00:00:00Z"),
        ];
        sort_newest_first(&mut records);
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn equal_instants_keep_service_order() {
        let mut records = vec![
            record(5, "2024-01-01T00:00:00Z"),
            record(4, "2024-01-01T00:00:00Z"),
        ];
        sort_newest_first(&mut records);
        assert_eq!(records[0].id, 5);
        assert_eq!(records[1].id, 4);
    }
}
