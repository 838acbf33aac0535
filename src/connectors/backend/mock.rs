use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{Duration, Utc};
use uuid::Uuid;

use super::{AuthConnector, Credentials, FeedbackStore, SignUpOutcome, UserMetadata};
use crate::connectors::errors::ConnectorError;
use crate::models::{FeedbackId, FeedbackRecord, NewFeedback, Session, SessionUser};

const MOCK_SESSION_SECS: i64 = 3600;

struct Account {
    password: String,
    user: SessionUser,
}

#[derive(Default)]
struct AuthState {
    accounts: HashMap<String, Account>,
    access_tokens: HashMap<String, SessionUser>,
    refresh_tokens: HashMap<String, SessionUser>,
}

/// In-memory auth service. Used when no backend url is configured and in tests.
#[derive(Default)]
pub struct MockAuthConnector {
    state: Mutex<AuthState>,
    require_confirmation: bool,
}

impl MockAuthConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign-ups answer with `ConfirmationPending` instead of a session.
    pub fn requiring_confirmation() -> Self {
        Self {
            require_confirmation: true,
            ..Self::default()
        }
    }

    /// Seed an account.
    pub fn with_user(self, email: &str, password: &str) -> Self {
        self.register(email, password, UserMetadata::default());
        self
    }

    fn register(&self, email: &str, password: &str, metadata: UserMetadata) -> SessionUser {
        let user = SessionUser {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            phone: metadata.phone,
        };
        if let Ok(mut state) = self.state.lock() {
            state.accounts.insert(
                email.to_lowercase(),
                Account {
                    password: password.to_string(),
                    user: user.clone(),
                },
            );
        }
        user
    }

    fn issue(&self, user: SessionUser) -> Result<Session, ConnectorError> {
        let mut state = self.lock()?;
        let access_token = format!("mock-access-{}", Uuid::new_v4());
        let refresh_token = format!("mock-refresh-{}", Uuid::new_v4());
        state.access_tokens.insert(access_token.clone(), user.clone());
        state.refresh_tokens.insert(refresh_token.clone(), user.clone());

        Ok(Session {
            access_token,
            refresh_token: Some(refresh_token),
            token_type: "bearer".to_string(),
            expires_at: Utc::now() + Duration::seconds(MOCK_SESSION_SECS),
            user,
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, AuthState>, ConnectorError> {
        self.state
            .lock()
            .map_err(|_| ConnectorError::Internal("mock auth state poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl AuthConnector for MockAuthConnector {
    async fn sign_up(
        &self,
        credentials: &Credentials,
        metadata: &UserMetadata,
    ) -> Result<SignUpOutcome, ConnectorError> {
        if self
            .lock()?
            .accounts
            .contains_key(&credentials.email.to_lowercase())
        {
            return Err(ConnectorError::Rejected("User already registered".to_string()));
        }

        let user = self.register(&credentials.email, &credentials.password, metadata.clone());
        if self.require_confirmation {
            return Ok(SignUpOutcome::ConfirmationPending { email: user.email });
        }

        Ok(SignUpOutcome::SignedIn(self.issue(user)?))
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, ConnectorError> {
        let user = {
            let state = self.lock()?;
            state
                .accounts
                .get(&credentials.email.to_lowercase())
                .filter(|account| account.password == credentials.password)
                .map(|account| account.user.clone())
        };

        match user {
            Some(user) => self.issue(user),
            None => Err(ConnectorError::Rejected("Invalid login credentials".to_string())),
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, ConnectorError> {
        let user = self.lock()?.refresh_tokens.remove(refresh_token);
        match user {
            Some(user) => self.issue(user),
            None => Err(ConnectorError::Rejected(
                "Invalid Refresh Token: Refresh Token Not Found".to_string(),
            )),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ConnectorError> {
        self.lock()?.access_tokens.remove(access_token);
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<SessionUser, ConnectorError> {
        self.lock()?
            .access_tokens
            .get(access_token)
            .cloned()
            .ok_or_else(|| ConnectorError::Unauthorized("invalid JWT".to_string()))
    }
}

#[derive(Default)]
struct StoreState {
    records: Vec<FeedbackRecord>,
    next_id: i64,
    fail_next: Option<String>,
    inserts: usize,
}

/// In-memory `feedbacks` table.
#[derive(Default)]
pub struct MockFeedbackStore {
    state: Mutex<StoreState>,
}

impl MockFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<FeedbackRecord>) -> Self {
        let store = Self::default();
        if let Ok(mut state) = store.state.lock() {
            state.next_id = records.len() as i64;
            state.records = records;
        }
        store
    }

    /// Make the next `insert` fail with a `Rejected(message)` error.
    pub fn fail_next(&self, message: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.fail_next = Some(message.to_string());
        }
    }

    /// Number of insert attempts that reached the store.
    pub fn insert_count(&self) -> usize {
        self.state.lock().map(|state| state.inserts).unwrap_or(0)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, StoreState>, ConnectorError> {
        self.state
            .lock()
            .map_err(|_| ConnectorError::Internal("mock store state poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl FeedbackStore for MockFeedbackStore {
    async fn insert(&self, feedback: &NewFeedback) -> Result<(), ConnectorError> {
        let mut state = self.lock()?;
        state.inserts += 1;
        if let Some(message) = state.fail_next.take() {
            return Err(ConnectorError::Rejected(message));
        }

        state.next_id += 1;
        let id = FeedbackId::Number(state.next_id);
        state.records.push(feedback.clone().into_record(id, Utc::now()));
        Ok(())
    }

    async fn list(&self, _access_token: &str) -> Result<Vec<FeedbackRecord>, ConnectorError> {
        let mut records = self.lock()?.records.clone();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
