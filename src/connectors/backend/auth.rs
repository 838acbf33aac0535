use super::types::{service_message, RemoteUser, TokenResponse};
use super::{AuthConnector, Credentials, SignUpOutcome, UserMetadata};
use crate::connectors::config::BackendConfig;
use crate::connectors::errors::ConnectorError;
use crate::models::{Session, SessionUser};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde_json::json;
use tracing::Instrument;

/// HTTP client for the hosted auth API (`/auth/v1`).
pub struct HttpAuthConnector {
    base_url: String,
    anon_key: String,
    http_client: reqwest::Client,
}

impl HttpAuthConnector {
    pub fn new(config: &BackendConfig) -> Result<Self, ConnectorError> {
        let timeout = std::time::Duration::from_secs(config.timeout_secs);
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConnectorError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url().to_string(),
            anon_key: config.anon_key.clone(),
            http_client,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/auth/v1/{}", self.base_url, path);
        self.http_client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
    }

    /// Turns a non-success response into a `ConnectorError` carrying the
    /// service's own message.
    async fn check(resp: Response) -> Result<Response, ConnectorError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let fallback = format!("Auth request failed with status {}", status.as_u16());
        Err(ConnectorError::from_status(status, service_message(&body, &fallback)))
    }

    async fn token(&self, grant_type: &str, payload: serde_json::Value) -> Result<Session, ConnectorError> {
        let span = tracing::info_span!("auth_token", grant_type = %grant_type);
        let resp = self
            .request(Method::POST, &format!("token?grant_type={}", grant_type))
            .json(&payload)
            .send()
            .instrument(span)
            .await
            .map_err(ConnectorError::from)?;

        let resp = Self::check(resp).await?;
        let text = resp
            .text()
            .await
            .map_err(|e| ConnectorError::HttpError(e.to_string()))?;
        let token = serde_json::from_str::<TokenResponse>(&text)
            .map_err(|_| ConnectorError::InvalidResponse(text))?;

        token.try_into()
    }
}

#[async_trait::async_trait]
impl AuthConnector for HttpAuthConnector {
    #[tracing::instrument(name = "Auth sign up.", skip(self, credentials), fields(email = %credentials.email))]
    async fn sign_up(
        &self,
        credentials: &Credentials,
        metadata: &UserMetadata,
    ) -> Result<SignUpOutcome, ConnectorError> {
        let payload = json!({
            "email": credentials.email,
            "password": credentials.password,
            "data": metadata,
        });

        let resp = self
            .request(Method::POST, "signup")
            .json(&payload)
            .send()
            .await
            .map_err(ConnectorError::from)?;

        let resp = Self::check(resp).await?;
        let text = resp
            .text()
            .await
            .map_err(|e| ConnectorError::HttpError(e.to_string()))?;

        // With email confirmation enabled the service answers with the bare
        // user object; otherwise it signs the account in straight away.
        let value: serde_json::Value = serde_json::from_str(&text)
            .map_err(|_| ConnectorError::InvalidResponse(text.clone()))?;

        if value.get("access_token").is_some() {
            let token = serde_json::from_value::<TokenResponse>(value)
                .map_err(|_| ConnectorError::InvalidResponse(text))?;
            return Ok(SignUpOutcome::SignedIn(token.try_into()?));
        }

        let email = value
            .get("email")
            .and_then(|email| email.as_str())
            .unwrap_or(credentials.email.as_str())
            .to_string();

        tracing::info!("Sign up for {} awaits email confirmation", email);
        Ok(SignUpOutcome::ConfirmationPending { email })
    }

    #[tracing::instrument(name = "Auth sign in.", skip(self, credentials), fields(email = %credentials.email))]
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, ConnectorError> {
        self.token(
            "password",
            json!({
                "email": credentials.email,
                "password": credentials.password,
            }),
        )
        .await
    }

    #[tracing::instrument(name = "Auth refresh session.", skip(self, refresh_token))]
    async fn refresh(&self, refresh_token: &str) -> Result<Session, ConnectorError> {
        self.token("refresh_token", json!({ "refresh_token": refresh_token }))
            .await
    }

    #[tracing::instrument(name = "Auth sign out.", skip(self, access_token))]
    async fn sign_out(&self, access_token: &str) -> Result<(), ConnectorError> {
        let resp = self
            .request(Method::POST, "logout")
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(ConnectorError::from)?;

        // a token that is already gone means the session is already over
        match resp.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                tracing::debug!("Session was already invalid on sign out");
                Ok(())
            }
            _ => Self::check(resp).await.map(|_| ()),
        }
    }

    #[tracing::instrument(name = "Auth fetch user.", skip(self, access_token))]
    async fn get_user(&self, access_token: &str) -> Result<SessionUser, ConnectorError> {
        let resp = self
            .request(Method::GET, "user")
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(ConnectorError::from)?;

        let resp = Self::check(resp).await?;
        let text = resp
            .text()
            .await
            .map_err(|e| ConnectorError::HttpError(e.to_string()))?;
        let user = serde_json::from_str::<RemoteUser>(&text)
            .map_err(|_| ConnectorError::InvalidResponse(text))?;

        user.try_into()
    }
}
