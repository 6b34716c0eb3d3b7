use std::time::Duration;

use anyhow::anyhow;
use chrono::Utc;
use tokio::time::timeout;
use tracing::info;

use backend_domain::services::codec;
use backend_domain::{EventId, IssuedToken};

use crate::{AppError, AppState};

/// Issue the QR token for an event — what the admin surface renders at
/// QR-display time.
pub async fn issue_event_token(state: &AppState, event_id: &str) -> Result<IssuedToken, AppError> {
    let trimmed = event_id.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("event id must not be empty".to_string()));
    }

    let id = EventId(trimmed.to_string());
    let window = Duration::from_secs(state.config.repository_timeout_seconds);
    let event = match timeout(window, state.event_repo.get(&id)).await {
        Ok(Ok(Some(event))) => event,
        Ok(Ok(None)) => {
            return Err(AppError::NotFound(format!("event '{}' not found", trimmed)))
        }
        Ok(Err(err)) => return Err(AppError::Internal(err)),
        Err(_) => {
            return Err(AppError::Internal(anyhow!(
                "event load timed out after {}s",
                window.as_secs()
            )))
        }
    };

    let token = codec::encode(&event, Utc::now(), state.config.token_validity_hours);
    let payload = codec::payload_json(&token)?;
    info!(
        event_id = %token.event_id.as_str(),
        uses_manual_expiration = token.uses_manual_expiration,
        "attendance token issued"
    );

    Ok(IssuedToken {
        event_id: token.event_id.clone(),
        payload,
        expires_at: token.expires_at,
        uses_manual_expiration: token.uses_manual_expiration,
    })
}
