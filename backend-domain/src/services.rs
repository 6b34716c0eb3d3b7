// Domain services
// Pure logic only; ports provide the outside world

pub mod codec;
pub mod geo;
pub mod rules;

pub use rules::ValidationRules;
