use std::path::PathBuf;
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::cli::CliError;
use crate::configuration::{get_configuration, Settings};
use crate::connectors::{init_backend, Backend, BackendConfig};
use crate::services::{AuthClient, FileSessionStore, MemorySessionStore, SessionStore};

/// Backend settings given on the command line; they win over config and env.
#[derive(Debug, Clone, Default)]
pub struct BackendOverrides {
    pub url: Option<String>,
    pub anon_key: Option<String>,
}

impl BackendOverrides {
    fn apply(&self, settings: &mut Settings) {
        if let Some(url) = &self.url {
            settings.backend.url = url.clone();
        }
        if let Some(key) = &self.anon_key {
            settings.backend.anon_key = key.clone();
        }
    }
}

pub fn runtime() -> Result<Runtime, CliError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(rt)
}

/// Everything a command needs to talk to the backend.
pub struct CliContext {
    pub settings: Settings,
    pub backend: Backend,
    pub auth: AuthClient,
}

impl CliContext {
    pub fn load(overrides: &BackendOverrides) -> Result<Self, CliError> {
        let mut settings = get_configuration()?;
        overrides.apply(&mut settings);

        if !settings.backend.is_configured() {
            eprintln!("Warning: no backend configured, data is kept in memory for this run only.");
        }

        let store = session_store_for(&settings.backend, FileSessionStore::default_path());
        Self::with_session_store(settings, store)
    }

    pub fn with_session_store(
        settings: Settings,
        sessions: Arc<dyn SessionStore>,
    ) -> Result<Self, CliError> {
        let backend = init_backend(&settings.backend)?;
        let auth = AuthClient::new(backend.auth.clone(), sessions);

        Ok(Self {
            settings,
            backend,
            auth,
        })
    }
}

/// Sessions persist in `path` only against a real backend. Mock sessions
/// stay in memory so they never replace a real one on disk.
pub fn session_store_for(backend: &BackendConfig, path: PathBuf) -> Arc<dyn SessionStore> {
    if backend.is_configured() {
        Arc::new(FileSessionStore::new(path))
    } else {
        Arc::new(MemorySessionStore::new())
    }
}
