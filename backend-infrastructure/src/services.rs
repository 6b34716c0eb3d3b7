pub mod identity_files;
pub mod location_fixed;

pub use identity_files::FileIdentityProvider;
pub use location_fixed::FixedLocationProvider;
