use crate::connectors::errors::ConnectorError;
use crate::models::{Session, SessionUser};
use chrono::{Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Email + password pair for sign-in and sign-up.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Extra profile data stored with the account at sign-up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Result of a sign-up: either a live session, or an account that still has
/// to be confirmed through the emailed link.
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    SignedIn(Session),
    ConfirmationPending { email: String },
}

/// User object as the auth API returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteUser {
    pub id: String,
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<UserMetadata>,
}

impl TryFrom<RemoteUser> for SessionUser {
    type Error = ConnectorError;

    fn try_from(user: RemoteUser) -> Result<Self, Self::Error> {
        let email = user
            .email
            .filter(|email| !email.is_empty())
            .ok_or_else(|| ConnectorError::InvalidResponse(format!("user {} has no email", user.id)))?;

        let phone = user
            .user_metadata
            .and_then(|meta| meta.phone)
            .or(user.phone)
            .filter(|phone| !phone.is_empty());

        Ok(SessionUser {
            id: user.id,
            email,
            phone,
        })
    }
}

/// Raw JSON returned by `POST /auth/v1/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<i64>,
    pub expires_at: Option<i64>, // unix seconds
    pub refresh_token: Option<String>,
    pub user: RemoteUser,
}

impl TryFrom<TokenResponse> for Session {
    type Error = ConnectorError;

    fn try_from(resp: TokenResponse) -> Result<Self, Self::Error> {
        let expires_at = resp
            .expires_at
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .unwrap_or_else(|| Utc::now() + Duration::seconds(resp.expires_in.unwrap_or(3600)));

        Ok(Session {
            access_token: resp.access_token,
            refresh_token: resp.refresh_token,
            token_type: resp.token_type.unwrap_or_else(|| "bearer".to_string()),
            expires_at,
            user: resp.user.try_into()?,
        })
    }
}

/// Pulls the human readable message out of an error body. The auth API and
/// the data API use different keys, so try them in order and fall back to
/// the raw text.
pub fn service_message(body: &str, fallback: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error_description", "msg", "message", "error"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                if !msg.trim().is_empty() {
                    return msg.to_string();
                }
            }
        }
    }

    let body = body.trim();
    if body.is_empty() {
        fallback.to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn picks_the_most_specific_message() {
        let body = json!({"error": "invalid_grant", "error_description": "Invalid login credentials"});
        assert_eq!(
            service_message(&body.to_string(), "fallback"),
            "Invalid login credentials"
        );

        let body = json!({"code": 422, "msg": "User already registered"});
        assert_eq!(service_message(&body.to_string(), "fallback"), "User already registered");

        let body = json!({"code": "42501", "message": "new row violates row-level security policy"});
        assert_eq!(
            service_message(&body.to_string(), "fallback"),
            "new row violates row-level security policy"
        );
    }

    #[test]
    fn falls_back_to_raw_text_then_default() {
        assert_eq!(service_message("upstream down", "fallback"), "upstream down");
        assert_eq!(service_message("  ", "fallback"), "fallback");
    }

    #[test]
    fn token_response_becomes_a_session() {
        let raw = json!({
            "access_token": "jwt",
            "token_type": "bearer",
            "expires_in": 3600,
            "expires_at": 1_900_000_000i64,
            "refresh_token": "r1",
            "user": {
                "id": "u-1",
                "email": "jane@example.com",
                "user_metadata": {"phone": "+1 555 0100"}
            }
        });

        let resp: TokenResponse = serde_json::from_value(raw).unwrap();
        let session = Session::try_from(resp).unwrap();
        assert_eq!(session.expires_at.timestamp(), 1_900_000_000);
        assert_eq!(session.user.phone.as_deref(), Some("+1 555 0100"));
        assert_eq!(session.refresh_token.as_deref(), Some("r1"));
    }

    #[test]
    fn user_without_email_is_rejected() {
        let user = RemoteUser {
            id: "u-1".to_string(),
            email: None,
            phone: None,
            user_metadata: None,
        };
        assert!(matches!(
            SessionUser::try_from(user),
            Err(ConnectorError::InvalidResponse(_))
        ));
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new("jane@example.com", "hunter22");
        assert!(!format!("{:?}", creds).contains("hunter22"));
    }
}
