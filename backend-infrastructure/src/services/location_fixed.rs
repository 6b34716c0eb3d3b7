use async_trait::async_trait;
use chrono::Utc;

use backend_domain::ports::{FixOutcome, LocationProvider};
use backend_domain::LocationFix;

/// Location collaborator fed a caller-supplied position — the CLI's
/// stand-in for the device GPS. `None` reads as no fix available;
/// `denied` models the user refusing the location permission.
pub struct FixedLocationProvider {
    position: Option<(f64, f64, f64)>,
    denied: bool,
}

impl FixedLocationProvider {
    pub fn with_position(latitude: f64, longitude: f64, accuracy_meters: f64) -> Self {
        Self {
            position: Some((latitude, longitude, accuracy_meters)),
            denied: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            position: None,
            denied: false,
        }
    }

    pub fn denied() -> Self {
        Self {
            position: None,
            denied: true,
        }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn current_fix(&self) -> FixOutcome {
        if self.denied {
            return FixOutcome::PermissionDenied;
        }
        match self.position {
            Some((latitude, longitude, accuracy_meters)) => FixOutcome::Fix(LocationFix {
                latitude,
                longitude,
                accuracy_meters,
                captured_at: Utc::now(),
            }),
            None => FixOutcome::Unavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_supplied_position() {
        let provider = FixedLocationProvider::with_position(14.5995, 120.9842, 8.0);
        match provider.current_fix().await {
            FixOutcome::Fix(fix) => {
                assert_eq!(fix.latitude, 14.5995);
                assert_eq!(fix.accuracy_meters, 8.0);
            }
            other => panic!("expected fix, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reports_unavailable_and_denied() {
        assert_eq!(
            FixedLocationProvider::unavailable().current_fix().await,
            FixOutcome::Unavailable
        );
        assert_eq!(
            FixedLocationProvider::denied().current_fix().await,
            FixOutcome::PermissionDenied
        );
    }
}
