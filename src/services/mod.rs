pub mod aggregation;
pub mod auth_client;
pub mod dashboard;
pub mod session_gate;
pub mod session_store;
pub mod submission;

pub use aggregation::{aggregate, FeedbackStats, Sentiment, SentimentShare, TypeCounts};
pub use auth_client::{AuthClient, AuthClientError, SessionEvent, SessionSubscription};
pub use dashboard::DashboardSnapshot;
pub use session_gate::{GateState, SessionGate};
pub use session_store::{FileSessionStore, MemorySessionStore, SessionStore, SessionStoreError};
pub use submission::{SubmissionFlow, SubmissionState, SubmitError};
