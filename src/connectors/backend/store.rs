use super::types::service_message;
use super::FeedbackStore;
use crate::connectors::config::BackendConfig;
use crate::connectors::errors::ConnectorError;
use crate::models::{FeedbackRecord, NewFeedback};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use tracing::Instrument;

/// HTTP client for the data API (`/rest/v1/{table}`).
pub struct HttpFeedbackStore {
    base_url: String,
    anon_key: String,
    table: String,
    http_client: reqwest::Client,
}

impl HttpFeedbackStore {
    pub fn new(config: &BackendConfig) -> Result<Self, ConnectorError> {
        let timeout = std::time::Duration::from_secs(config.timeout_secs);
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConnectorError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url().to_string(),
            anon_key: config.anon_key.clone(),
            table: config.table.clone(),
            http_client,
        })
    }

    fn request(&self, method: Method, query: &str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}{}", self.base_url, self.table, query);
        self.http_client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header(ACCEPT, "application/json")
    }

    async fn check(resp: Response) -> Result<Response, ConnectorError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let fallback = format!("Data request failed with status {}", status.as_u16());
        Err(ConnectorError::from_status(status, service_message(&body, &fallback)))
    }
}

#[async_trait::async_trait]
impl FeedbackStore for HttpFeedbackStore {
    async fn insert(&self, feedback: &NewFeedback) -> Result<(), ConnectorError> {
        let span = tracing::info_span!(
            "insert_feedback",
            table = %self.table,
            kind = %feedback.kind(),
            rating = feedback.rating()
        );

        // anonymous visitors insert with the public key as bearer
        let resp = self
            .request(Method::POST, "")
            .bearer_auth(&self.anon_key)
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "return=minimal")
            .json(&[feedback])
            .send()
            .instrument(span)
            .await
            .map_err(ConnectorError::from)?;

        Self::check(resp).await?;
        tracing::info!("Feedback row inserted");
        Ok(())
    }

    async fn list(&self, access_token: &str) -> Result<Vec<FeedbackRecord>, ConnectorError> {
        let span = tracing::info_span!("list_feedback", table = %self.table);
        let resp = self
            .request(Method::GET, "?select=*&order=created_at.desc")
            .bearer_auth(access_token)
            .send()
            .instrument(span)
            .await
            .map_err(ConnectorError::from)?;

        let resp = Self::check(resp).await?;
        let text = resp
            .text()
            .await
            .map_err(|e| ConnectorError::HttpError(e.to_string()))?;

        serde_json::from_str::<Vec<FeedbackRecord>>(&text).map_err(|err| {
            tracing::error!("Failed to parse feedback rows: {:?}", err);
            ConnectorError::InvalidResponse(err.to_string())
        })
    }
}
