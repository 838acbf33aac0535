use serde_valid::Validate;
use tokio::runtime::Runtime;

use crate::cli::progress::{finish_error, finish_success, spinner};
use crate::cli::{prompts, runtime, BackendOverrides, CliContext, CliError};
use crate::connectors::SignUpOutcome;
use crate::console::commands::CallableTrait;
use crate::forms::auth::SignUp;
use crate::services::AuthClient;
use crate::views::auth::CONFIRMATION_TEXT;

/// `feedback signup [--email <email>] [--phone <number>]`
pub struct SignUpCommand {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub overrides: BackendOverrides,
}

impl SignUpCommand {
    pub fn new(email: Option<String>, phone: Option<String>, overrides: BackendOverrides) -> Self {
        Self {
            email,
            phone,
            overrides,
        }
    }
}

impl CallableTrait for SignUpCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let ctx = CliContext::load(&self.overrides)?;
        let rt = runtime()?;
        sign_up_interactive(&rt, &ctx.auth, self.email.clone(), self.phone.clone())?;
        Ok(())
    }
}

pub fn sign_up_interactive(
    rt: &Runtime,
    auth: &AuthClient,
    email: Option<String>,
    phone: Option<String>,
) -> Result<SignUpOutcome, CliError> {
    let email = match email {
        Some(email) => email,
        None => prompts::text("Email", "")?,
    };
    let password = prompts::new_password()?;
    let phone = match phone {
        Some(phone) => Some(phone),
        None => Some(prompts::text("Phone (optional)", "")?),
    };

    let form = SignUp {
        email: email.trim().to_string(),
        password,
        phone,
    };
    form.validate()
        .map_err(|err| CliError::InvalidInput(err.to_string()))?;

    let pb = spinner("Creating account...");
    match rt.block_on(auth.sign_up(&form.credentials(), &form.metadata())) {
        Ok(outcome) => {
            match &outcome {
                SignUpOutcome::SignedIn(session) => {
                    finish_success(&pb, &format!("Signed in as {}", session.user.email))
                }
                SignUpOutcome::ConfirmationPending { .. } => finish_success(&pb, CONFIRMATION_TEXT),
            }
            Ok(outcome)
        }
        Err(err) => {
            finish_error(&pb, &err.to_string());
            Err(err.into())
        }
    }
}
