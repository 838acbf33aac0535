use crate::models::SessionUser;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A logged-in session issued by the hosted auth service.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub user: SessionUser,
}

impl Session {
    /// True when the access token's expiry has passed.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// True when the token will expire within the given duration.
    pub fn expires_within(&self, margin: Duration) -> bool {
        Utc::now() + margin >= self.expires_at
    }

    /// Seconds until expiry, never negative.
    pub fn expires_in(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signed in as {}", self.user.email)?;
        if self.is_expired() {
            write!(f, " (session expired)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires_at: DateTime<Utc>) -> Session {
        Session {
            access_token: "secret-token".to_string(),
            refresh_token: Some("refresh".to_string()),
            token_type: "bearer".to_string(),
            expires_at,
            user: SessionUser {
                id: "u-1".to_string(),
                email: "jane@example.com".to_string(),
                phone: None,
            },
        }
    }

    #[test]
    fn expiry_checks() {
        let fresh = session(Utc::now() + Duration::hours(1));
        assert!(!fresh.is_expired());
        assert!(!fresh.expires_within(Duration::minutes(5)));
        assert!(fresh.expires_within(Duration::hours(2)));

        let stale = session(Utc::now() - Duration::seconds(1));
        assert!(stale.is_expired());
        assert_eq!(stale.expires_in(), 0);
    }

    #[test]
    fn debug_output_hides_tokens() {
        let fresh = session(Utc::now() + Duration::hours(1));
        let debug = format!("{:?}", fresh);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("jane@example.com"));
    }
}
