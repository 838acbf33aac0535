use serde::{Deserialize, Serialize};

/// Connection settings for the hosted auth + data backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Project URL, e.g. https://xyzcompany.supabase.co. Empty disables the
    /// HTTP connectors and the server falls back to in-memory mocks.
    #[serde(default)]
    pub url: String,
    /// Public (anon) API key sent as `apikey` on every request
    #[serde(default)]
    pub anon_key: String,
    /// HTTP request timeout in seconds
    #[serde(default = "BackendConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    /// Table holding the feedback rows
    #[serde(default = "BackendConfig::default_table")]
    pub table: String,
}

impl BackendConfig {
    const fn default_timeout_secs() -> u64 {
        10
    }

    fn default_table() -> String {
        "feedbacks".to_string()
    }

    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Override credentials from FEEDBACK_BACKEND_URL / FEEDBACK_BACKEND_ANON_KEY.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("FEEDBACK_BACKEND_URL") {
            self.url = url;
        }
        if let Ok(anon_key) = std::env::var("FEEDBACK_BACKEND_ANON_KEY") {
            self.anon_key = anon_key;
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            timeout_secs: Self::default_timeout_secs(),
            table: Self::default_table(),
        }
    }
}
