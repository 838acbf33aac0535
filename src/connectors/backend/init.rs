use std::sync::Arc;

use crate::connectors::backend::{mock, AuthConnector, FeedbackStore, HttpAuthConnector, HttpFeedbackStore};
use crate::connectors::config::BackendConfig;
use crate::connectors::errors::ConnectorError;

/// Both connectors to the hosted backend, ready to be shared.
#[derive(Clone)]
pub struct Backend {
    pub auth: Arc<dyn AuthConnector>,
    pub store: Arc<dyn FeedbackStore>,
}

impl Backend {
    /// In-memory auth service and table.
    pub fn mock() -> Self {
        Self {
            auth: Arc::new(mock::MockAuthConnector::new()),
            store: Arc::new(mock::MockFeedbackStore::new()),
        }
    }
}

/// Initialize the backend connectors from config.
///
/// With no backend url configured the in-memory mocks are used instead.
///
/// # Example
/// ```ignore
/// let backend = connectors::backend::init(&settings.backend)?;
/// App::new().app_data(web::Data::new(backend.auth.clone()))
/// ```
pub fn init(config: &BackendConfig) -> Result<Backend, ConnectorError> {
    if !config.is_configured() {
        tracing::warn!("Backend url not configured - using in-memory mock connectors");
        return Ok(Backend::mock());
    }

    if config.anon_key.is_empty() {
        tracing::warn!("Backend anon key is empty; requests will likely be rejected");
    }

    tracing::info!("Initializing backend connectors: {}", config.base_url());
    Ok(Backend {
        auth: Arc::new(HttpAuthConnector::new(config)?),
        store: Arc::new(HttpFeedbackStore::new(config)?),
    })
}
