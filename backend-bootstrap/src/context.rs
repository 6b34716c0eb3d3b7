use std::sync::Arc;

use anyhow::Result;

use backend_application::{AppState, Metrics};
use backend_domain::ports::LocationProvider;
use backend_infrastructure::{AppConfig, FileEventRepository, FileIdentityProvider};

pub struct AppContext {
    pub state: AppState,
    /// Concrete store handle for admin-side seeding, which is not part of
    /// the repository port.
    pub store: Arc<FileEventRepository>,
}

impl AppContext {
    pub async fn new(location: Arc<dyn LocationProvider>) -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();
        let store_config = config.to_store_config();

        let store = Arc::new(FileEventRepository::new(&store_config));
        store.ensure_dir().await?;

        let identity = Arc::new(FileIdentityProvider::new(&runtime_config.profile_path));

        let state = AppState {
            config: runtime_config,
            event_repo: store.clone(),
            identity,
            location,
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state, store })
    }
}
