use crate::cli::{runtime, BackendOverrides, CliContext};
use crate::console::commands::CallableTrait;
use crate::services::{GateState, SessionGate};

/// `feedback whoami [--json]`
pub struct SessionCommand {
    pub json: bool,
    pub overrides: BackendOverrides,
}

impl SessionCommand {
    pub fn new(json: bool, overrides: BackendOverrides) -> Self {
        Self { json, overrides }
    }
}

pub fn describe(state: &GateState) -> String {
    match state {
        GateState::Loading => "Checking session...".to_string(),
        GateState::Anonymous => "Not signed in. Run: feedback login".to_string(),
        GateState::Authenticated(user) => match &user.phone {
            Some(phone) => format!("[{}] Signed in as {} ({})", user.initial(), user.email, phone),
            None => format!("[{}] Signed in as {}", user.initial(), user.email),
        },
    }
}

impl CallableTrait for SessionCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let ctx = CliContext::load(&self.overrides)?;
        let rt = runtime()?;

        let mut gate = SessionGate::new();
        let state = rt.block_on(gate.start(&ctx.auth)).clone();
        gate.stop();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&state)?);
        } else {
            println!("{}", describe(&state));
        }
        Ok(())
    }
}
