use crate::connectors::BackendConfig;
use serde;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    #[serde(default = "Settings::default_host")]
    pub app_host: String,
    #[serde(default = "Settings::default_port")]
    pub app_port: u16,
    #[serde(default)]
    pub backend: BackendConfig,
    /// How long a verified access token is trusted without asking the auth service again
    #[serde(default = "Settings::default_auth_cache_ttl")]
    pub auth_cache_ttl_secs: u64,
}

impl Settings {
    fn default_host() -> String {
        "127.0.0.1".to_string()
    }

    const fn default_port() -> u16 {
        8000
    }

    const fn default_auth_cache_ttl() -> u64 {
        60
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_host: Self::default_host(),
            app_port: Self::default_port(),
            backend: BackendConfig::default(),
            auth_cache_ttl_secs: Self::default_auth_cache_ttl(),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // `configuration.yaml` (or .json, .toml) in the working directory; every
    // key has a default so the file itself is optional
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration").required(false))
        .build()?;

    let mut config: Settings = settings.try_deserialize()?;

    // Backend credentials from the environment win over the file
    config.backend.apply_env();

    Ok(config)
}
