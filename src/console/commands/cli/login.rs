use serde_valid::Validate;
use tokio::runtime::Runtime;

use crate::cli::progress::{finish_error, finish_success, spinner};
use crate::cli::{prompts, runtime, BackendOverrides, CliContext, CliError};
use crate::connectors::Credentials;
use crate::console::commands::CallableTrait;
use crate::forms::auth::SignIn;
use crate::models::Session;
use crate::services::AuthClient;

/// `feedback login [--email <email>]`
///
/// Signs in with email and password and keeps the session in
/// `~/.config/feedback-desk/session.json`.
pub struct LoginCommand {
    pub email: Option<String>,
    pub overrides: BackendOverrides,
}

impl LoginCommand {
    pub fn new(email: Option<String>, overrides: BackendOverrides) -> Self {
        Self { email, overrides }
    }
}

impl CallableTrait for LoginCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let ctx = CliContext::load(&self.overrides)?;
        let rt = runtime()?;
        sign_in_interactive(&rt, &ctx.auth, self.email.clone())?;
        Ok(())
    }
}

pub fn sign_in_interactive(
    rt: &Runtime,
    auth: &AuthClient,
    email: Option<String>,
) -> Result<Session, CliError> {
    let email = match email {
        Some(email) => email,
        None => prompts::text("Email", "")?,
    };
    let form = SignIn {
        email: email.trim().to_string(),
        password: prompts::password("Password")?,
    };
    form.validate()
        .map_err(|err| CliError::InvalidInput(err.to_string()))?;

    let pb = spinner("Signing in...");
    match rt.block_on(auth.sign_in(&Credentials::from(&form))) {
        Ok(session) => {
            finish_success(&pb, &format!("Signed in as {}", session.user.email));
            Ok(session)
        }
        Err(err) => {
            finish_error(&pb, &err.to_string());
            Err(err.into())
        }
    }
}
