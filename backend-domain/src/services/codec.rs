// Token codec
// Parses and serializes the QR payload; structural validity only, no
// cryptography

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::entities::{AttendanceToken, EventRecord, TokenPayload, TOKEN_KIND};
use crate::utils::parse_instant;
use crate::value_objects::EventId;

#[derive(Debug, Error)]
pub enum TokenDecodeError {
    #[error("malformed token: {0}")]
    Malformed(String),
}

/// Decode a raw scanned string into a typed token. Required structure:
/// valid JSON, `type == "attendance"`, non-empty `eventId`. Timestamps are
/// boundary-parsed; unparseable ones become `None` and the validation
/// rules treat them as "not valid".
pub fn decode(raw: &str) -> Result<AttendanceToken, TokenDecodeError> {
    let payload: TokenPayload = serde_json::from_str(raw)
        .map_err(|err| TokenDecodeError::Malformed(err.to_string()))?;

    if payload.kind != TOKEN_KIND {
        return Err(TokenDecodeError::Malformed(format!(
            "unsupported token type '{}'",
            payload.kind
        )));
    }
    let event_id = payload.event_id.trim();
    if event_id.is_empty() {
        return Err(TokenDecodeError::Malformed("missing eventId".to_string()));
    }

    Ok(AttendanceToken {
        event_id: EventId(event_id.to_string()),
        event_title: payload.event_title,
        issued_at: payload.timestamp.as_deref().and_then(parse_instant),
        expires_at: payload.expires_at.as_deref().and_then(parse_instant),
        uses_manual_expiration: payload.uses_manual_expiration,
        geofence_snapshot: payload.event_location,
    })
}

/// Build a token for an event at QR-display time. The expiration is the
/// event's manual expiration when one is set and still ahead of `now`,
/// otherwise `now + validity_hours`. The flag records whether the event is
/// in manual-expiration mode at all — rule evaluation against the live
/// event does the actual rejecting.
pub fn encode(event: &EventRecord, now: DateTime<Utc>, validity_hours: i64) -> AttendanceToken {
    let manual = event.qr_manual_expiration;
    let expires_at = match manual {
        Some(expiration) if expiration > now => expiration,
        _ => now + Duration::hours(validity_hours),
    };

    AttendanceToken {
        event_id: event.id.clone(),
        event_title: event.title.clone(),
        issued_at: Some(now),
        expires_at: Some(expires_at),
        uses_manual_expiration: manual.is_some(),
        geofence_snapshot: event.geofence.clone(),
    }
}

pub fn to_payload(token: &AttendanceToken) -> TokenPayload {
    TokenPayload {
        kind: TOKEN_KIND.to_string(),
        event_id: token.event_id.as_str().to_string(),
        event_title: token.event_title.clone(),
        timestamp: token.issued_at.map(|instant| instant.to_rfc3339()),
        expires_at: token.expires_at.map(|instant| instant.to_rfc3339()),
        uses_manual_expiration: token.uses_manual_expiration,
        event_location: token.geofence_snapshot.clone(),
    }
}

/// The exact JSON string rendered into the QR image.
pub fn payload_json(token: &AttendanceToken) -> anyhow::Result<String> {
    Ok(serde_json::to_string(&to_payload(token))?)
}
