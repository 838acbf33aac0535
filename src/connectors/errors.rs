use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;

/// Errors that can occur while talking to the hosted backend.
///
/// Variants that originate from the service carry its message unchanged so
/// it can be shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConnectorError {
    /// The service answered with an error (4xx) and a message
    #[error("{0}")]
    Rejected(String),
    /// The service refused the token or credentials (401/403)
    #[error("{0}")]
    Unauthorized(String),
    /// Service unreachable, timed out or failing (5xx)
    #[error("{0}")]
    ServiceUnavailable(String),
    /// The service answered with something we cannot parse
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    /// Transport level failure
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Internal error in connector
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConnectorError {
    /// Maps a non-success HTTP status and the message mined from its body.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status.as_u16() {
            401 | 403 => Self::Unauthorized(message),
            400..=499 => Self::Rejected(message),
            _ => Self::ServiceUnavailable(message),
        }
    }
}

impl ResponseError for ConnectorError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "status": "Error",
            "code": self.status_code().as_u16(),
            "message": self.to_string(),
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Rejected(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
            Self::HttpError(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::ServiceUnavailable(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            Self::ServiceUnavailable(format!("Connection failed: {}", err))
        } else {
            Self::HttpError(err.to_string())
        }
    }
}
