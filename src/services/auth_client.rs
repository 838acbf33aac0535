//! Stateful auth client: the current session, kept in a `SessionStore` and
//! refreshed on demand, plus a broadcast of every session change.

use std::sync::Arc;

use chrono::Duration;
use tokio::sync::broadcast;

use crate::connectors::{AuthConnector, ConnectorError, Credentials, SignUpOutcome, UserMetadata};
use crate::models::Session;
use crate::services::session_store::{SessionStore, SessionStoreError};

const EVENT_CAPACITY: usize = 16;

/// Refresh a little before the token actually runs out.
const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SignedIn(Session),
    TokenRefreshed(Session),
    SignedOut,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthClientError {
    #[error(transparent)]
    Connector(#[from] ConnectorError),
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

/// Receiving end of the session change feed. Dropping it unsubscribes.
pub struct SessionSubscription {
    receiver: Option<broadcast::Receiver<SessionEvent>>,
}

impl SessionSubscription {
    /// Next queued event, without waiting.
    pub fn try_next(&mut self) -> Option<SessionEvent> {
        let receiver = self.receiver.as_mut()?;
        loop {
            match receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Session subscriber lagged, {} events skipped", skipped);
                }
                Err(_) => return None,
            }
        }
    }

    /// Wait for the next event. `None` once unsubscribed or the client is gone.
    pub async fn next(&mut self) -> Option<SessionEvent> {
        let receiver = self.receiver.as_mut()?;
        loop {
            match receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Session subscriber lagged, {} events skipped", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    pub fn unsubscribe(&mut self) {
        if self.receiver.take().is_some() {
            tracing::debug!("Session subscription released");
        }
    }

    pub fn is_active(&self) -> bool {
        self.receiver.is_some()
    }
}

pub struct AuthClient {
    connector: Arc<dyn AuthConnector>,
    store: Arc<dyn SessionStore>,
    events: broadcast::Sender<SessionEvent>,
}

impl AuthClient {
    pub fn new(connector: Arc<dyn AuthConnector>, store: Arc<dyn SessionStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            connector,
            store,
            events,
        }
    }

    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            receiver: Some(self.events.subscribe()),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }

    fn emit(&self, event: SessionEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }

    fn end_session(&self) -> Result<(), AuthClientError> {
        self.store.delete()?;
        self.emit(SessionEvent::SignedOut);
        Ok(())
    }

    /// The current session, refreshed if it is about to expire.
    ///
    /// The session is dropped only when the auth service rejects the refresh
    /// token. When the service cannot be reached the stored session is kept:
    /// it is returned while still valid, otherwise the error is.
    #[tracing::instrument(name = "Resolve session.", skip(self))]
    pub async fn get_session(&self) -> Result<Option<Session>, AuthClientError> {
        let session = match self.store.load()? {
            Some(session) => session,
            None => return Ok(None),
        };

        if !session.expires_within(Duration::seconds(REFRESH_MARGIN_SECS)) {
            return Ok(Some(session));
        }

        let refresh_token = match session.refresh_token.as_deref() {
            Some(token) => token,
            None if session.is_expired() => {
                tracing::info!("Session expired and cannot be refreshed");
                self.end_session()?;
                return Ok(None);
            }
            None => return Ok(Some(session)),
        };

        match self.connector.refresh(refresh_token).await {
            Ok(refreshed) => {
                self.store.save(&refreshed)?;
                self.emit(SessionEvent::TokenRefreshed(refreshed.clone()));
                Ok(Some(refreshed))
            }
            Err(err @ (ConnectorError::Rejected(_) | ConnectorError::Unauthorized(_))) => {
                tracing::warn!("Session refresh rejected, signing out: {}", err);
                self.end_session()?;
                Ok(None)
            }
            Err(err) if !session.is_expired() => {
                tracing::warn!("Session refresh failed, keeping current session: {}", err);
                Ok(Some(session))
            }
            Err(err) => {
                tracing::warn!("Session refresh failed, session kept for a later retry: {}", err);
                Err(err.into())
            }
        }
    }

    #[tracing::instrument(name = "Sign in.", skip(self, credentials))]
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthClientError> {
        let session = self.connector.sign_in(credentials).await?;
        self.store.save(&session)?;
        self.emit(SessionEvent::SignedIn(session.clone()));
        Ok(session)
    }

    #[tracing::instrument(name = "Sign up.", skip(self, credentials, metadata))]
    pub async fn sign_up(
        &self,
        credentials: &Credentials,
        metadata: &UserMetadata,
    ) -> Result<SignUpOutcome, AuthClientError> {
        let outcome = self.connector.sign_up(credentials, metadata).await?;
        if let SignUpOutcome::SignedIn(session) = &outcome {
            self.store.save(session)?;
            self.emit(SessionEvent::SignedIn(session.clone()));
        }
        Ok(outcome)
    }

    /// Ends the local session even when the service cannot be reached.
    #[tracing::instrument(name = "Sign out.", skip(self))]
    pub async fn sign_out(&self) -> Result<(), AuthClientError> {
        match self.store.load() {
            Ok(Some(session)) => {
                if let Err(err) = self.connector.sign_out(&session.access_token).await {
                    tracing::warn!("Remote sign out failed, clearing local session anyway: {}", err);
                }
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!("Stored session unreadable, removing it: {}", err);
            }
        }

        self.end_session()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::backend::mock::MockAuthConnector;
    use crate::models::SessionUser;
    use crate::services::session_store::{FileSessionStore, MemorySessionStore};
    use chrono::Utc;

    /// Auth service that cannot be reached.
    struct OfflineConnector;

    #[async_trait::async_trait]
    impl AuthConnector for OfflineConnector {
        async fn sign_up(
            &self,
            _credentials: &Credentials,
            _metadata: &UserMetadata,
        ) -> Result<SignUpOutcome, ConnectorError> {
            Err(offline())
        }

        async fn sign_in(&self, _credentials: &Credentials) -> Result<Session, ConnectorError> {
            Err(offline())
        }

        async fn refresh(&self, _refresh_token: &str) -> Result<Session, ConnectorError> {
            Err(offline())
        }

        async fn sign_out(&self, _access_token: &str) -> Result<(), ConnectorError> {
            Err(offline())
        }

        async fn get_user(&self, _access_token: &str) -> Result<SessionUser, ConnectorError> {
            Err(offline())
        }
    }

    fn offline() -> ConnectorError {
        ConnectorError::ServiceUnavailable("error sending request: connection refused".to_string())
    }

    fn session_expiring_in(seconds: i64) -> Session {
        Session {
            access_token: "access".to_string(),
            refresh_token: Some("refresh".to_string()),
            token_type: "bearer".to_string(),
            expires_at: Utc::now() + Duration::seconds(seconds),
            user: SessionUser {
                id: "u-1".to_string(),
                email: "jane@example.com".to_string(),
                phone: None,
            },
        }
    }

    fn client(store: Arc<MemorySessionStore>) -> AuthClient {
        let auth = MockAuthConnector::new().with_user("jane@example.com", "hunter22");
        AuthClient::new(Arc::new(auth), store)
    }

    fn credentials() -> Credentials {
        Credentials::new("jane@example.com", "hunter22")
    }

    #[tokio::test]
    async fn sign_in_persists_and_notifies() {
        let store = Arc::new(MemorySessionStore::new());
        let client = client(store.clone());
        let mut events = client.subscribe();

        let session = client.sign_in(&credentials()).await.unwrap();
        assert_eq!(store.load().unwrap(), Some(session.clone()));
        assert_eq!(events.try_next(), Some(SessionEvent::SignedIn(session.clone())));
        assert_eq!(client.get_session().await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn failed_sign_in_keeps_no_session() {
        let store = Arc::new(MemorySessionStore::new());
        let client = client(store.clone());

        let err = client
            .sign_in(&Credentials::new("jane@example.com", "wrong"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");
        assert!(client.get_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_session_without_valid_refresh_ends() {
        let expired = Session {
            access_token: "old".to_string(),
            refresh_token: Some("unknown-refresh".to_string()),
            token_type: "bearer".to_string(),
            expires_at: Utc::now() - Duration::minutes(5),
            user: SessionUser {
                id: "u-1".to_string(),
                email: "jane@example.com".to_string(),
                phone: None,
            },
        };
        let store = Arc::new(MemorySessionStore::with_session(expired));
        let client = client(store.clone());
        let mut events = client.subscribe();

        assert!(client.get_session().await.unwrap().is_none());
        assert!(store.load().unwrap().is_none());
        assert_eq!(events.try_next(), Some(SessionEvent::SignedOut));
    }

    #[tokio::test]
    async fn expiring_session_is_refreshed() {
        let store = Arc::new(MemorySessionStore::new());
        let client = client(store.clone());
        let session = client.sign_in(&credentials()).await.unwrap();

        let expiring = Session {
            expires_at: Utc::now() + Duration::seconds(10),
            ..session.clone()
        };
        store.save(&expiring).unwrap();
        let mut events = client.subscribe();

        let refreshed = client.get_session().await.unwrap().unwrap();
        assert_ne!(refreshed.access_token, session.access_token);
        assert!(matches!(events.try_next(), Some(SessionEvent::TokenRefreshed(_))));
    }

    #[tokio::test]
    async fn unreachable_service_keeps_a_valid_session() {
        let session = session_expiring_in(30);
        let store = Arc::new(MemorySessionStore::with_session(session.clone()));
        let client = AuthClient::new(Arc::new(OfflineConnector), store.clone());
        let mut events = client.subscribe();

        assert_eq!(client.get_session().await.unwrap(), Some(session.clone()));
        assert_eq!(store.load().unwrap(), Some(session));
        assert_eq!(events.try_next(), None);
    }

    #[tokio::test]
    async fn unreachable_service_keeps_an_expired_session_for_later() {
        let session = session_expiring_in(-30);
        let store = Arc::new(MemorySessionStore::with_session(session.clone()));
        let client = AuthClient::new(Arc::new(OfflineConnector), store.clone());
        let mut events = client.subscribe();

        let err = client.get_session().await.unwrap_err();
        assert!(matches!(
            err,
            AuthClientError::Connector(ConnectorError::ServiceUnavailable(_))
        ));
        assert_eq!(store.load().unwrap(), Some(session));
        assert_eq!(events.try_next(), None);
    }

    #[tokio::test]
    async fn sign_out_removes_an_unreadable_session_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = Arc::new(FileSessionStore::new(path.clone()));
        let client = AuthClient::new(Arc::new(OfflineConnector), store);
        let mut events = client.subscribe();

        client.sign_out().await.unwrap();
        assert!(!path.exists());
        assert_eq!(events.try_next(), Some(SessionEvent::SignedOut));
    }

    #[tokio::test]
    async fn sign_out_clears_and_notifies() {
        let store = Arc::new(MemorySessionStore::new());
        let client = client(store.clone());
        client.sign_in(&credentials()).await.unwrap();
        let mut events = client.subscribe();

        client.sign_out().await.unwrap();
        assert!(store.load().unwrap().is_none());
        assert_eq!(events.next().await, Some(SessionEvent::SignedOut));
    }

    #[test]
    fn unsubscribe_releases_the_receiver() {
        let client = client(Arc::new(MemorySessionStore::new()));
        let mut subscription = client.subscribe();
        assert_eq!(client.subscriber_count(), 1);

        subscription.unsubscribe();
        subscription.unsubscribe();
        assert!(!subscription.is_active());
        assert_eq!(client.subscriber_count(), 0);
        assert_eq!(subscription.try_next(), None);
    }
}
