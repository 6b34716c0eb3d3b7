// Device location fix value object

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Coordinate;

/// One position sample from the device location collaborator. Ephemeral:
/// produced per scan and only ever persisted embedded in an attendance
/// record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: f64,
    pub captured_at: DateTime<Utc>,
}

impl LocationFix {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
