// Attendance record entity
// Immutable once appended to an event

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::lenient_instant;
use crate::value_objects::StudentId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub student_id: StudentId,
    pub student_name: String,
    pub course: String,
    pub year_level: String,
    pub block: String,
    pub gender: String,
    pub scanned_at: DateTime<Utc>,
    #[serde(default, with = "lenient_instant", skip_serializing_if = "Option::is_none")]
    pub qr_issued_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient_instant", skip_serializing_if = "Option::is_none")]
    pub qr_expires_at: Option<DateTime<Utc>>,
    pub uses_manual_expiration: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<RecordedLocation>,
}

/// The location evidence embedded in a record. Distance and the
/// within-radius flag are recomputed against the live geofence at commit
/// time and stay `None` when the event has no geofence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_event: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_within_radius: Option<bool>,
}
