use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;
use tracing::warn;

use backend_domain::ports::IdentityProvider;
use backend_domain::StudentProfile;

/// Identity collaborator backed by a YAML profile document — the stand-in
/// for the campus identity service. A missing file or an incomplete
/// profile reads as "no student", which the pipeline rejects explicitly.
pub struct FileIdentityProvider {
    path: PathBuf,
}

impl FileIdentityProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl IdentityProvider for FileIdentityProvider {
    async fn current_student(&self) -> Result<Option<StudentProfile>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let profile: StudentProfile = serde_yaml::from_str(&content)?;
        if !profile.is_complete() {
            warn!(path = %self.path.display(), "student profile is incomplete");
            return Ok(None);
        }
        Ok(Some(profile))
    }
}
