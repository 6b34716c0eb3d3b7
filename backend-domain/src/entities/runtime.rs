// Runtime configuration handed from the config loader to the engine

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub accuracy_threshold_meters: f64,
    pub token_validity_hours: i64,
    pub location_timeout_seconds: u64,
    pub repository_timeout_seconds: u64,
    pub profile_path: String,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub events_dir: String,
}
