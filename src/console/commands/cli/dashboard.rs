use tokio::runtime::Runtime;

use crate::cli::progress::spinner;
use crate::cli::render::print_overview;
use crate::cli::{runtime, BackendOverrides, CliContext, CliError};
use crate::console::commands::CallableTrait;
use crate::services::{dashboard, AuthClient};
use crate::connectors::FeedbackStore;
use crate::views::Overview;

/// `feedback dashboard [--query <text>] [--json]`
///
/// Stats over every submission plus the list, newest first. Needs a
/// signed-in session.
pub struct DashboardCommand {
    pub query: Option<String>,
    pub json: bool,
    pub overrides: BackendOverrides,
}

impl DashboardCommand {
    pub fn new(query: Option<String>, json: bool, overrides: BackendOverrides) -> Self {
        Self {
            query,
            json,
            overrides,
        }
    }
}

impl CallableTrait for DashboardCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let ctx = CliContext::load(&self.overrides)?;
        let rt = runtime()?;

        let overview = load_overview(&rt, &ctx.auth, ctx.backend.store.as_ref(), self.query.as_deref())?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&overview)?);
        } else {
            print_overview(&overview);
        }
        Ok(())
    }
}

pub fn load_overview(
    rt: &Runtime,
    auth: &AuthClient,
    store: &dyn FeedbackStore,
    query: Option<&str>,
) -> Result<Overview, CliError> {
    let session = rt
        .block_on(auth.get_session())?
        .ok_or_else(|| CliError::LoginRequired {
            feature: "view the dashboard".to_string(),
        })?;

    let pb = spinner("Loading feedback...");
    let snapshot = rt.block_on(dashboard::load(store, &session.user, &session.access_token));
    pb.finish_and_clear();

    Ok(Overview::new(&snapshot?, query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::backend::mock::{MockAuthConnector, MockFeedbackStore};
    use crate::connectors::Credentials;
    use crate::services::MemorySessionStore;
    use std::sync::Arc;

    fn auth() -> AuthClient {
        let connector = MockAuthConnector::new().with_user("jane@example.com", "hunter22");
        AuthClient::new(Arc::new(connector), Arc::new(MemorySessionStore::new()))
    }

    #[test]
    fn test_dashboard_requires_login() {
        let rt = runtime().unwrap();
        let err = load_overview(&rt, &auth(), &MockFeedbackStore::new(), None).unwrap_err();
        assert!(matches!(err, CliError::LoginRequired { .. }));
    }

    #[test]
    fn test_dashboard_after_login_shows_empty_text() {
        let rt = runtime().unwrap();
        let auth = auth();
        rt.block_on(auth.sign_in(&Credentials::new("jane@example.com", "hunter22")))
            .unwrap();

        let overview = load_overview(&rt, &auth, &MockFeedbackStore::new(), Some("  ")).unwrap();
        assert_eq!(overview.stats.total, 0);
        assert_eq!(overview.empty_text, Some("No feedback submissions found yet."));
        assert!(overview.query.is_none());
    }
}
