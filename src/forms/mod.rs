pub mod auth;
pub mod feedback;
mod field_errors;

pub use feedback::*;
pub use field_errors::*;
