// Rejection reason value object
// One variant per way a scan can fail, carrying the reason-specific data
// the caller renders

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RejectReason {
    MalformedToken,
    EventNotFound,
    LocationMismatch {
        distance_meters: f64,
        allowed_radius_meters: f64,
    },
    LocationInaccurate {
        accuracy_meters: f64,
        threshold_meters: f64,
    },
    LocationUnavailable,
    PermissionDenied,
    QrCodeExpired {
        expired_at: DateTime<Utc>,
    },
    AttendanceDeadlinePassed {
        deadline: DateTime<Utc>,
    },
    EventNotStarted {
        minutes_until_start: i64,
    },
    AlreadyAttended,
    ProfileIncomplete,
    ValidationError,
    CommitFailed,
}

impl RejectReason {
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::MalformedToken => "MALFORMED_TOKEN",
            RejectReason::EventNotFound => "EVENT_NOT_FOUND",
            RejectReason::LocationMismatch { .. } => "LOCATION_MISMATCH",
            RejectReason::LocationInaccurate { .. } => "LOCATION_INACCURATE",
            RejectReason::LocationUnavailable => "LOCATION_UNAVAILABLE",
            RejectReason::PermissionDenied => "PERMISSION_DENIED",
            RejectReason::QrCodeExpired { .. } => "QR_CODE_EXPIRED",
            RejectReason::AttendanceDeadlinePassed { .. } => "ATTENDANCE_DEADLINE_PASSED",
            RejectReason::EventNotStarted { .. } => "EVENT_NOT_STARTED",
            RejectReason::AlreadyAttended => "ALREADY_ATTENDED",
            RejectReason::ProfileIncomplete => "PROFILE_INCOMPLETE",
            RejectReason::ValidationError => "VALIDATION_ERROR",
            RejectReason::CommitFailed => "COMMIT_FAILED",
        }
    }

    /// Whether the same scan attempt may be retried as-is. Terminal rule
    /// failures stay terminal; only transient infrastructure outcomes
    /// qualify.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RejectReason::LocationUnavailable
                | RejectReason::ValidationError
                | RejectReason::CommitFailed
        )
    }

    pub fn user_message(&self) -> String {
        match self {
            RejectReason::MalformedToken => {
                "This QR code is not a valid attendance code.".to_string()
            }
            RejectReason::EventNotFound => {
                "The event for this QR code no longer exists.".to_string()
            }
            RejectReason::LocationMismatch {
                distance_meters,
                allowed_radius_meters,
            } => format!(
                "You are {:.0} m from the event location (allowed radius {:.0} m).",
                distance_meters, allowed_radius_meters
            ),
            RejectReason::LocationInaccurate { accuracy_meters, .. } => format!(
                "Your location reading is too imprecise ({:.0} m). Move to open sky and try again.",
                accuracy_meters
            ),
            RejectReason::LocationUnavailable => {
                "Your location could not be verified. Try again.".to_string()
            }
            RejectReason::PermissionDenied => {
                "Location permission is required to check in to this event.".to_string()
            }
            RejectReason::QrCodeExpired { expired_at } => {
                format!("This QR code expired at {}.", expired_at.to_rfc3339())
            }
            RejectReason::AttendanceDeadlinePassed { deadline } => {
                format!(
                    "The attendance deadline for this event passed at {}.",
                    deadline.to_rfc3339()
                )
            }
            RejectReason::EventNotStarted { minutes_until_start } => format!(
                "This event has not started yet. Check in opens in {} minute(s).",
                minutes_until_start
            ),
            RejectReason::AlreadyAttended => {
                "Your attendance for this event is already recorded.".to_string()
            }
            RejectReason::ProfileIncomplete => {
                "Complete your student profile before checking in.".to_string()
            }
            RejectReason::ValidationError => {
                "Attendance could not be verified right now. Try again.".to_string()
            }
            RejectReason::CommitFailed => {
                "Attendance could not be saved right now. Try again.".to_string()
            }
        }
    }
}
