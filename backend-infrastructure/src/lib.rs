// Backend Infrastructure Layer

pub mod config;
pub mod repositories;
pub mod services;

pub use config::AppConfig;
pub use repositories::FileEventRepository;
pub use services::{FileIdentityProvider, FixedLocationProvider};
