use crate::models::SessionUser;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Access token -> user, so a page load does not hit the auth service on
/// every request. Entries live for `ttl`; expired ones are pruned on every
/// insert, so tokens that are never presented again do not pile up.
pub struct TokenCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CachedUser>>,
}

struct CachedUser {
    user: SessionUser,
    expires_at: Instant,
}

impl TokenCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, token: &str) -> Option<SessionUser> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(token) {
                if entry.expires_at > now {
                    return Some(entry.user.clone());
                }
            }
        }

        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(token) {
            if entry.expires_at <= now {
                entries.remove(token);
            } else {
                return Some(entry.user.clone());
            }
        }

        None
    }

    pub async fn insert(&self, token: String, user: SessionUser) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            token,
            CachedUser {
                user,
                expires_at: now + self.ttl,
            },
        );
    }

    pub(crate) async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Forget a token, e.g. after sign-out.
    pub async fn remove(&self, token: &str) {
        self.entries.write().await.remove(token);
    }
}
