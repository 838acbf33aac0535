use crate::connectors::ConnectorError;
use crate::forms::FieldErrors;
use crate::services::{AuthClientError, SessionStoreError, SubmitError};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CliError: everything a command can fail with
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Login required to {feature}. Run: feedback login")]
    LoginRequired { feature: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Please fix the following fields: {0}")]
    Invalid(FieldErrors),

    #[error("{0}")]
    Submission(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Service messages are passed through untouched
    #[error("{0}")]
    Connector(#[from] ConnectorError),

    #[error(transparent)]
    Session(#[from] SessionStoreError),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<AuthClientError> for CliError {
    fn from(err: AuthClientError) -> Self {
        match err {
            AuthClientError::Connector(err) => Self::Connector(err),
            AuthClientError::Store(err) => Self::Session(err),
        }
    }
}

impl From<SubmitError> for CliError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Invalid(errors) => Self::Invalid(errors),
            SubmitError::Service(msg) => Self::Connector(ConnectorError::Rejected(msg)),
            other => Self::Submission(other.to_string()),
        }
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
