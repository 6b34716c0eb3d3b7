use std::time::Duration;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use tokio::time::timeout;

use backend_domain::services::geo;
use backend_domain::{
    AppendOutcome, AttendanceRecord, AttendanceToken, EventRecord, LocationFix, RecordedLocation,
    StudentProfile,
};

use crate::{AppError, AppState};

/// Assemble the immutable attendance record. Distance and the
/// within-radius flag are recomputed here against the live geofence —
/// the validation step's numbers are not trusted across the window
/// between validation and commit.
pub fn build_attendance_record(
    event: &EventRecord,
    student: &StudentProfile,
    token: &AttendanceToken,
    fix: Option<&LocationFix>,
    scanned_at: DateTime<Utc>,
) -> AttendanceRecord {
    let location = fix.map(|fix| {
        let (distance_from_event, is_within_radius) = match &event.geofence {
            Some(geofence)
                if geofence.center().is_usable() && fix.coordinate().is_usable() =>
            {
                let (within, distance) = geo::is_within_radius(fix, geofence);
                (Some(distance), Some(within))
            }
            _ => (None, None),
        };
        RecordedLocation {
            latitude: fix.latitude,
            longitude: fix.longitude,
            accuracy_meters: fix.accuracy_meters,
            distance_from_event,
            is_within_radius,
        }
    });

    AttendanceRecord {
        student_id: student.student_id.clone(),
        student_name: student.name.clone(),
        course: student.course.clone(),
        year_level: student.year_level.clone(),
        block: student.block.clone(),
        gender: student.gender.clone(),
        scanned_at,
        qr_issued_at: token.issued_at,
        qr_expires_at: token.expires_at,
        uses_manual_expiration: token.uses_manual_expiration,
        location,
    }
}

/// Commit one attendance record through the repository's set-union append.
/// An error here is a retryable commit failure; the caller decides whether
/// to retry the commit alone or re-run the whole pipeline.
pub async fn record_attendance(
    state: &AppState,
    event: &EventRecord,
    student: &StudentProfile,
    token: &AttendanceToken,
    fix: Option<&LocationFix>,
) -> Result<AppendOutcome, AppError> {
    let record = build_attendance_record(event, student, token, fix, Utc::now());
    let window = Duration::from_secs(state.config.repository_timeout_seconds);

    match timeout(
        window,
        state.event_repo.append_attendee_if_absent(&event.id, record),
    )
    .await
    {
        Ok(Ok(outcome)) => Ok(outcome),
        Ok(Err(err)) => Err(AppError::Internal(err)),
        Err(_) => Err(AppError::Internal(anyhow!(
            "attendance commit timed out after {}s",
            window.as_secs()
        ))),
    }
}
