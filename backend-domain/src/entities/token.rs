// Attendance token entity
// Typed form of the QR payload plus the raw wire shape

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{EventId, Geofence};

pub const TOKEN_KIND: &str = "attendance";

/// The decoded, boundary-parsed token the pipeline works with. Instants
/// that failed to parse are `None`; the rules treat them as "not valid"
/// rather than erroring.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceToken {
    pub event_id: EventId,
    /// Display only; the live event record is authoritative.
    pub event_title: String,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub uses_manual_expiration: bool,
    /// Copy of the event geofence at generation time, for display and
    /// consistency checks only — never the authority.
    pub geofence_snapshot: Option<Geofence>,
}

/// Wire shape of the QR payload. Field names are stable and shared with
/// the mobile clients; timestamps travel as ISO-8601 strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPayload {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "eventId")]
    pub event_id: String,
    #[serde(rename = "eventTitle", default)]
    pub event_title: String,
    #[serde(rename = "timestamp", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(rename = "expiresAt", default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(rename = "usesManualExpiration", default)]
    pub uses_manual_expiration: bool,
    #[serde(rename = "eventLocation", default, skip_serializing_if = "Option::is_none")]
    pub event_location: Option<Geofence>,
}

/// What the admin surface gets back from token issuance: the typed token
/// plus the exact JSON string to render as a QR image.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub event_id: EventId,
    pub payload: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub uses_manual_expiration: bool,
}
