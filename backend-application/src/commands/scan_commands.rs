use std::time::Duration;

use chrono::Utc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use backend_domain::services::codec;
use backend_domain::{
    AppendOutcome, EventRecord, FixOutcome, LocationFix, RejectReason, ValidationRules, Verdict,
};

use crate::commands::attendance_commands::record_attendance;
use crate::AppState;

/// Run the full verification pipeline for one decoded QR payload and, on
/// approval, commit the attendance record. Every failure mode folds into
/// the verdict; nothing here is fatal beyond the single scan attempt.
pub async fn process_scan(state: &AppState, raw_payload: &str) -> Verdict {
    state.metrics.record_scan();

    let token = match codec::decode(raw_payload) {
        Ok(token) => token,
        Err(err) => {
            warn!(error = %err, "scan rejected before validation");
            return reject(state, RejectReason::MalformedToken, None);
        }
    };

    let student = match state.identity.current_student().await {
        Ok(Some(profile)) if profile.is_complete() => profile,
        Ok(_) => return reject(state, RejectReason::ProfileIncomplete, None),
        Err(err) => {
            warn!(error = %err, "identity provider failed");
            return reject(state, RejectReason::ProfileIncomplete, None);
        }
    };

    let repo_window = Duration::from_secs(state.config.repository_timeout_seconds);
    let event = match timeout(repo_window, state.event_repo.get(&token.event_id)).await {
        Ok(Ok(Some(event))) => event,
        Ok(Ok(None)) => return reject(state, RejectReason::EventNotFound, None),
        Ok(Err(err)) => {
            warn!(event_id = %token.event_id.as_str(), error = %err, "event load failed");
            return reject(state, RejectReason::ValidationError, None);
        }
        Err(_) => {
            warn!(event_id = %token.event_id.as_str(), "event load timed out");
            return reject(state, RejectReason::ValidationError, None);
        }
    };

    let fix = match acquire_fix(state, event.geofence.is_some()).await {
        FixAcquisition::Fix(fix) => Some(fix),
        FixAcquisition::Degraded => None,
        FixAcquisition::Reject(reason) => return reject(state, reason, Some(event)),
    };

    let rules = ValidationRules {
        accuracy_threshold_meters: state.config.accuracy_threshold_meters,
    };
    let approval = match rules.evaluate(&event, &token, fix.as_ref(), &student.student_id, Utc::now())
    {
        Verdict::Approved(approval) => approval,
        Verdict::Rejected(rejection) => {
            state
                .metrics
                .record_rejection(rejection.reason.is_retryable());
            info!(
                event_id = %token.event_id.as_str(),
                reason = rejection.reason.code(),
                "scan rejected"
            );
            return Verdict::Rejected(rejection);
        }
    };

    match record_attendance(state, &approval.event, &student, &token, fix.as_ref()).await {
        Ok(AppendOutcome::Committed) => {
            state.metrics.record_approval();
            info!(
                event_id = %approval.event.id.as_str(),
                student_id = %student.student_id.as_str(),
                location_verified = approval.location_verified,
                "attendance recorded"
            );
            Verdict::Approved(approval)
        }
        Ok(AppendOutcome::AlreadyPresent) => {
            // Lost the race to a concurrent scan by the same student; the
            // set-union append kept exactly one record.
            reject(state, RejectReason::AlreadyAttended, Some(approval.event))
        }
        Err(err) => {
            warn!(event_id = %approval.event.id.as_str(), error = %err, "attendance commit failed");
            reject(state, RejectReason::CommitFailed, Some(approval.event))
        }
    }
}

fn reject(state: &AppState, reason: RejectReason, event: Option<EventRecord>) -> Verdict {
    state.metrics.record_rejection(reason.is_retryable());
    Verdict::rejected(reason, event)
}

enum FixAcquisition {
    Fix(LocationFix),
    Degraded,
    Reject(RejectReason),
}

/// Acquire a location fix under the configured timeout. For geofenced
/// events a missing or denied fix is a rejection — the degraded
/// "proceed without location" path exists only where no geofence demands
/// verification.
async fn acquire_fix(state: &AppState, geofenced: bool) -> FixAcquisition {
    let window = Duration::from_secs(state.config.location_timeout_seconds);
    let outcome = match timeout(window, state.location.current_fix()).await {
        Ok(outcome) => outcome,
        Err(_) => {
            warn!("location acquisition timed out");
            FixOutcome::Unavailable
        }
    };

    match outcome {
        FixOutcome::Fix(fix) => FixAcquisition::Fix(fix),
        FixOutcome::Unavailable if geofenced => {
            FixAcquisition::Reject(RejectReason::LocationUnavailable)
        }
        FixOutcome::PermissionDenied if geofenced => {
            FixAcquisition::Reject(RejectReason::PermissionDenied)
        }
        FixOutcome::Unavailable | FixOutcome::PermissionDenied => {
            debug!("proceeding without a location fix");
            FixAcquisition::Degraded
        }
    }
}
