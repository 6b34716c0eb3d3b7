use std::sync::Arc;

use backend_domain::ports::{EventRepository, IdentityProvider, LocationProvider};
use backend_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub event_repo: Arc<dyn EventRepository>,
    pub identity: Arc<dyn IdentityProvider>,
    pub location: Arc<dyn LocationProvider>,
    pub metrics: Arc<Metrics>,
}
