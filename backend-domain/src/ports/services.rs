use async_trait::async_trait;

use crate::entities::StudentProfile;
use crate::value_objects::LocationFix;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The student performing the scan. `None` (or an incomplete profile)
    /// means the pipeline must reject with a profile error rather than
    /// proceed with a null identity.
    async fn current_student(&self) -> anyhow::Result<Option<StudentProfile>>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum FixOutcome {
    Fix(LocationFix),
    Unavailable,
    PermissionDenied,
}

#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// One position sample for the current scan. The caller bounds this
    /// with a timeout; a timeout counts as `Unavailable`.
    async fn current_fix(&self) -> FixOutcome;
}
