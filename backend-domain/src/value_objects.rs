// Domain value objects

pub mod geofence;
pub mod identifiers;
pub mod location;
pub mod reject_reason;
pub mod verdict;

pub use geofence::*;
pub use identifiers::*;
pub use location::*;
pub use reject_reason::*;
pub use verdict::*;
