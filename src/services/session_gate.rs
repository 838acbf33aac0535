//! Session/auth gate. Decides whether the dashboard or the landing screen is
//! shown, following session changes for as long as it is subscribed.

use serde::Serialize;

use crate::models::SessionUser;
use crate::services::auth_client::{AuthClient, SessionEvent, SessionSubscription};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "user", rename_all = "lowercase")]
pub enum GateState {
    Loading,
    Anonymous,
    Authenticated(SessionUser),
}

impl GateState {
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Owned by the top-level component and lent out as `&GateState`.
pub struct SessionGate {
    state: GateState,
    subscription: Option<SessionSubscription>,
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Loading,
            subscription: None,
        }
    }

    /// Subscribe to session changes, then resolve the current session.
    pub async fn start(&mut self, client: &AuthClient) -> &GateState {
        if self.subscription.is_none() {
            self.subscription = Some(client.subscribe());
        }

        self.state = match client.get_session().await {
            Ok(Some(session)) => GateState::Authenticated(session.user),
            Ok(None) => GateState::Anonymous,
            Err(err) => {
                tracing::warn!("Could not resolve the current session: {}", err);
                GateState::Anonymous
            }
        };

        &self.state
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.state.user()
    }

    pub fn apply(&mut self, event: SessionEvent) {
        self.state = match event {
            SessionEvent::SignedIn(session) | SessionEvent::TokenRefreshed(session) => {
                GateState::Authenticated(session.user)
            }
            SessionEvent::SignedOut => GateState::Anonymous,
        };
    }

    /// Direct transition after a sign-in or sign-up that returned a session.
    pub fn signed_in(&mut self, user: SessionUser) {
        self.state = GateState::Authenticated(user);
    }

    /// Apply every queued notification in arrival order. Returns whether any
    /// were applied.
    pub fn sync(&mut self) -> bool {
        let mut events = Vec::new();
        if let Some(subscription) = self.subscription.as_mut() {
            while let Some(event) = subscription.try_next() {
                events.push(event);
            }
        }

        let applied = !events.is_empty();
        for event in events {
            self.apply(event);
        }
        applied
    }

    /// Wait for the next notification and apply it.
    pub async fn changed(&mut self) -> Option<&GateState> {
        let event = self.subscription.as_mut()?.next().await?;
        self.apply(event);
        Some(&self.state)
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription
            .as_ref()
            .map_or(false, SessionSubscription::is_active)
    }

    /// Release the subscription. Safe to call more than once.
    pub fn stop(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl Drop for SessionGate {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::backend::mock::MockAuthConnector;
    use crate::connectors::Credentials;
    use crate::services::session_store::MemorySessionStore;
    use std::sync::Arc;

    fn client() -> AuthClient {
        let auth = MockAuthConnector::new().with_user("jane@example.com", "hunter22");
        AuthClient::new(Arc::new(auth), Arc::new(MemorySessionStore::new()))
    }

    fn credentials() -> Credentials {
        Credentials::new("jane@example.com", "hunter22")
    }

    #[tokio::test]
    async fn starts_loading_then_anonymous_without_session() {
        let client = client();
        let mut gate = SessionGate::new();
        assert_eq!(gate.state(), &GateState::Loading);

        assert_eq!(gate.start(&client).await, &GateState::Anonymous);
        assert!(gate.is_subscribed());
    }

    #[tokio::test]
    async fn existing_session_authenticates() {
        let client = client();
        client.sign_in(&credentials()).await.unwrap();

        let mut gate = SessionGate::new();
        gate.start(&client).await;
        assert_eq!(gate.user().map(|u| u.email.as_str()), Some("jane@example.com"));
    }

    #[tokio::test]
    async fn follows_sign_in_notifications() {
        let client = client();
        let mut gate = SessionGate::new();
        gate.start(&client).await;

        client.sign_in(&credentials()).await.unwrap();
        assert!(gate.sync());
        assert!(matches!(gate.state(), GateState::Authenticated(_)));
    }

    #[tokio::test]
    async fn after_sign_out_the_gate_is_anonymous() {
        let client = client();
        client.sign_in(&credentials()).await.unwrap();
        let mut gate = SessionGate::new();
        gate.start(&client).await;

        client.sign_out().await.unwrap();
        assert_eq!(gate.changed().await, Some(&GateState::Anonymous));
        assert!(gate.user().is_none());
    }

    #[tokio::test]
    async fn direct_sign_in_transition() {
        let client = client();
        let mut gate = SessionGate::new();
        gate.start(&client).await;

        let session = client.sign_in(&credentials()).await.unwrap();
        gate.signed_in(session.user.clone());
        assert_eq!(gate.user(), Some(&session.user));

        // the queued notification lands on the same state
        gate.sync();
        assert_eq!(gate.user(), Some(&session.user));
    }

    #[tokio::test]
    async fn stop_releases_the_subscription_once() {
        let client = client();
        let mut gate = SessionGate::new();
        gate.start(&client).await;
        assert_eq!(client.subscriber_count(), 1);

        gate.stop();
        gate.stop();
        assert!(!gate.is_subscribed());
        assert_eq!(client.subscriber_count(), 0);

        // no longer follows changes
        client.sign_in(&credentials()).await.unwrap();
        assert!(!gate.sync());
        assert_eq!(gate.state(), &GateState::Anonymous);
    }

    #[tokio::test]
    async fn drop_unsubscribes() {
        let client = client();
        {
            let mut gate = SessionGate::new();
            gate.start(&client).await;
            assert_eq!(client.subscriber_count(), 1);
        }
        assert_eq!(client.subscriber_count(), 0);
    }

    #[test]
    fn state_serializes_tagged() {
        let state = GateState::Authenticated(SessionUser {
            id: "u-1".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
        });
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["state"], "authenticated");
        assert_eq!(json["user"]["email"], "jane@example.com");

        let json = serde_json::to_value(GateState::Anonymous).unwrap();
        assert_eq!(json, serde_json::json!({"state": "anonymous"}));
    }
}
