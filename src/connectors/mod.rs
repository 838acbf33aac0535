//! External Service Connectors
//!
//! Adapters for the hosted backend this application delegates to: the auth
//! service (accounts, sessions) and the data API (the `feedbacks` table).
//! Nothing in routes or services talks HTTP directly.
//!
//! ## Architecture Pattern
//!
//! 1. Define the trait in `backend/mod.rs` so it can be mocked in tests
//! 2. HTTP client in `backend/{auth,store}.rs`, in-memory twin in `backend/mock.rs`
//! 3. Configuration in `config.rs`; an empty url selects the mocks
//! 4. Inject trait objects into routes; routes never depend on the HTTP implementation
//!
//! ## Usage in Routes
//!
//! ```ignore
//! pub async fn add_handler(
//!     store: web::Data<Arc<dyn FeedbackStore>>,
//! ) -> Result<impl Responder> {
//!     store.insert(&feedback).await?;
//! }
//! ```

pub mod backend;
pub mod config;
pub mod errors;

pub use backend::{
    init as init_backend, AuthConnector, Backend, Credentials, FeedbackStore, HttpAuthConnector,
    HttpFeedbackStore, SignUpOutcome, UserMetadata,
};
pub use config::BackendConfig;
pub use errors::ConnectorError;
