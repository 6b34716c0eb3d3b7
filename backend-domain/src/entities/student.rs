// Student profile entity
// Produced by the identity collaborator, never stored by this engine

use serde::{Deserialize, Serialize};

use crate::value_objects::StudentId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub student_id: StudentId,
    pub name: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub year_level: String,
    #[serde(default)]
    pub block: String,
    #[serde(default)]
    pub gender: String,
}

impl StudentProfile {
    /// A profile missing its id or name cannot be recorded and is treated
    /// the same as no profile at all.
    pub fn is_complete(&self) -> bool {
        !self.student_id.as_str().trim().is_empty() && !self.name.trim().is_empty()
    }
}
