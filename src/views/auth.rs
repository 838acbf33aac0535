use crate::connectors::SignUpOutcome;
use crate::models::{Session, SessionUser};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const CONFIRMATION_TEXT: &str = "Check your email for confirmation!";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuthResult {
    Authenticated {
        user: SessionUser,
        access_token: String,
        expires_at: DateTime<Utc>,
    },
    ConfirmationPending {
        email: String,
        message: &'static str,
    },
}

impl From<Session> for AuthResult {
    fn from(session: Session) -> Self {
        Self::Authenticated {
            user: session.user,
            access_token: session.access_token,
            expires_at: session.expires_at,
        }
    }
}

impl From<SignUpOutcome> for AuthResult {
    fn from(outcome: SignUpOutcome) -> Self {
        match outcome {
            SignUpOutcome::SignedIn(session) => session.into(),
            SignUpOutcome::ConfirmationPending { email } => Self::ConfirmationPending {
                email,
                message: CONFIRMATION_TEXT,
            },
        }
    }
}
