//! Hosted backend connectors: the auth API (sign-up, sign-in, token refresh,
//! sign-out, user lookup) and the data API holding the `feedbacks` table.
//!
//! Routes and services only see the two traits below; the HTTP clients and
//! the in-memory mocks are interchangeable behind `Arc<dyn ...>`.

pub mod auth;
pub mod init;
pub mod mock;
pub mod store;
pub mod types;


pub use auth::HttpAuthConnector;
pub use init::{init, Backend};
pub use store::HttpFeedbackStore;
pub use types::{Credentials, SignUpOutcome, UserMetadata};

use crate::connectors::errors::ConnectorError;
use crate::models::{FeedbackRecord, NewFeedback, Session, SessionUser};

/// Stateless operations of the hosted auth service. Every call is a single
/// request; nothing is retried.
#[async_trait::async_trait]
pub trait AuthConnector: Send + Sync {
    /// Create an account. `metadata` is stored with the user profile.
    async fn sign_up(
        &self,
        credentials: &Credentials,
        metadata: &UserMetadata,
    ) -> Result<SignUpOutcome, ConnectorError>;

    /// Exchange email + password for a session.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, ConnectorError>;

    /// Exchange a refresh token for a new session.
    async fn refresh(&self, refresh_token: &str) -> Result<Session, ConnectorError>;

    /// Revoke the session behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), ConnectorError>;

    /// Resolve the user owning `access_token`.
    async fn get_user(&self, access_token: &str) -> Result<SessionUser, ConnectorError>;
}

/// The external `feedbacks` table.
#[async_trait::async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Insert one new row. The store assigns `id` and `created_at`.
    async fn insert(&self, feedback: &NewFeedback) -> Result<(), ConnectorError>;

    /// All rows visible to `access_token`, newest first.
    async fn list(&self, access_token: &str) -> Result<Vec<FeedbackRecord>, ConnectorError>;
}
