pub mod auth;
pub mod dashboard;
pub mod feedback;
pub mod health_checks;

pub use health_checks::*;
