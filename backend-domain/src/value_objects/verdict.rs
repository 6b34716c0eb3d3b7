// Verdict value object
// The single approve/reject outcome of one validation pipeline run

use serde::{Deserialize, Serialize};

use crate::entities::EventRecord;
use crate::value_objects::RejectReason;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Verdict {
    Approved(Approval),
    Rejected(Rejection),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Approval {
    pub event: EventRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,
    pub location_verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    pub reason: RejectReason,
    pub message: String,
    /// Whatever event snapshot was loaded before the failure, so callers
    /// can still render event context on a rejection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<EventRecord>,
}

impl Verdict {
    pub fn rejected(reason: RejectReason, event: Option<EventRecord>) -> Self {
        let message = reason.user_message();
        Verdict::Rejected(Rejection {
            reason,
            message,
            event,
        })
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Verdict::Approved(_))
    }

    pub fn reject_reason(&self) -> Option<&RejectReason> {
        match self {
            Verdict::Approved(_) => None,
            Verdict::Rejected(rejection) => Some(&rejection.reason),
        }
    }
}
