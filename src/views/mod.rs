pub mod auth;
pub mod dashboard;
pub mod feedback;

pub use dashboard::Overview;
pub use feedback::{Receipt, Row};
pub use auth::AuthResult;
