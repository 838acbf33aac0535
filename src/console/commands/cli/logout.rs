use crate::cli::progress::{finish_success, spinner};
use crate::cli::{runtime, BackendOverrides, CliContext};
use crate::console::commands::CallableTrait;

/// `feedback logout`
///
/// The local session is removed even if the backend cannot be reached.
pub struct LogoutCommand {
    pub overrides: BackendOverrides,
}

impl LogoutCommand {
    pub fn new(overrides: BackendOverrides) -> Self {
        Self { overrides }
    }
}

impl CallableTrait for LogoutCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let ctx = CliContext::load(&self.overrides)?;
        let rt = runtime()?;

        let pb = spinner("Signing out...");
        rt.block_on(ctx.auth.sign_out())?;
        finish_success(&pb, "Signed out");
        Ok(())
    }
}
