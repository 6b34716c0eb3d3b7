// Event entity
// The authoritative record a scan is validated against

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::AttendanceRecord;
use crate::utils::lenient_instant;
use crate::value_objects::{EventId, Geofence, StudentId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    #[serde(default, with = "lenient_instant", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geofence: Option<Geofence>,
    #[serde(default, with = "lenient_instant", skip_serializing_if = "Option::is_none")]
    pub qr_manual_expiration: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient_instant", skip_serializing_if = "Option::is_none")]
    pub attendance_deadline: Option<DateTime<Utc>>,
    /// Append-only, unique by student id. Mutated only through
    /// `EventRepository::append_attendee_if_absent`.
    #[serde(default)]
    pub attendees: Vec<AttendanceRecord>,
    /// Bumped on every committed append; backs the conditional-update
    /// contract of the store.
    #[serde(default)]
    pub version: u64,
}

impl EventRecord {
    pub fn has_attendee(&self, student_id: &StudentId) -> bool {
        self.attendees
            .iter()
            .any(|record| &record.student_id == student_id)
    }

    pub fn attendee_count(&self) -> usize {
        self.attendees.len()
    }
}
