use std::time::Duration;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::timeout;

use backend_domain::{AttendanceRecord, EventId};

use crate::{AppError, AppState};

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceSummary {
    pub event_id: EventId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    pub total_attendees: usize,
    pub attendees: Vec<AttendanceRecord>,
}

/// The admin attendees view for one event.
pub async fn event_attendance(
    state: &AppState,
    event_id: &str,
) -> Result<AttendanceSummary, AppError> {
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

    Ok(AttendanceSummary {
        event_id: event.id.clone(),
        title: event.title.clone(),
        start_time: event.start_time,
        total_attendees: event.attendee_count(),
        attendees: event.attendees,
    })
}
