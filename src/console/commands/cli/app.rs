use crate::cli::render::print_overview;
use crate::cli::{prompts, runtime, BackendOverrides, CliContext, CliError};
use crate::console::commands::cli::{dashboard, login, session, signup, submit};
use crate::console::commands::CallableTrait;
use crate::connectors::SignUpOutcome;
use crate::services::{GateState, SessionGate, SubmissionFlow};

const QUIT: &str = "Quit";

/// Menu entries for the current gate state: the landing screen when
/// anonymous, the dashboard when signed in.
pub fn menu(state: &GateState) -> Vec<&'static str> {
    match state {
        GateState::Authenticated(_) => vec![
            "View dashboard",
            "Search submissions",
            "Submit feedback",
            "Sign out",
            QUIT,
        ],
        _ => vec!["Submit feedback", "Sign in", "Create account", QUIT],
    }
}

/// `feedback` with no subcommand: the interactive app.
pub struct AppCommand {
    pub overrides: BackendOverrides,
}

impl AppCommand {
    pub fn new(overrides: BackendOverrides) -> Self {
        Self { overrides }
    }
}

impl CallableTrait for AppCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let ctx = CliContext::load(&self.overrides)?;
        let rt = runtime()?;

        let mut gate = SessionGate::new();
        rt.block_on(gate.start(&ctx.auth));

        let result = run_loop(&rt, &ctx, &mut gate);
        gate.stop();
        result.map_err(Into::into)
    }
}

fn run_loop(
    rt: &tokio::runtime::Runtime,
    ctx: &CliContext,
    gate: &mut SessionGate,
) -> Result<(), CliError> {
    loop {
        // pick up sign-in, refresh and sign-out notifications
        gate.sync();
        println!("\n{}", session::describe(gate.state()));

        let items = menu(gate.state());
        let choice = items[prompts::choose("What would you like to do?", &items)?];

        let outcome = match choice {
            "Submit feedback" => {
                submit::run_interactive(rt, ctx.backend.store.as_ref(), SubmissionFlow::new())
            }
            "Sign in" => login::sign_in_interactive(rt, &ctx.auth, None)
                .map(|session| gate.signed_in(session.user)),
            "Create account" => {
                signup::sign_up_interactive(rt, &ctx.auth, None, None).map(|outcome| {
                    if let SignUpOutcome::SignedIn(session) = outcome {
                        gate.signed_in(session.user);
                    }
                })
            }
            "View dashboard" => {
                dashboard::load_overview(rt, &ctx.auth, ctx.backend.store.as_ref(), None)
                    .map(|overview| print_overview(&overview))
            }
            "Search submissions" => prompts::text("Search", "").and_then(|query| {
                dashboard::load_overview(rt, &ctx.auth, ctx.backend.store.as_ref(), Some(&query))
                    .map(|overview| print_overview(&overview))
            }),
            "Sign out" => rt.block_on(ctx.auth.sign_out()).map_err(CliError::from),
            _ => return Ok(()),
        };

        match outcome {
            Ok(()) => {}
            // the prompt itself is gone, nothing left to drive
            Err(err @ CliError::Prompt(_)) => return Err(err),
            Err(err) => eprintln!("Error: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionUser;

    #[test]
    fn test_menu_follows_the_gate() {
        let anonymous = menu(&GateState::Anonymous);
        assert!(anonymous.contains(&"Sign in"));
        assert!(!anonymous.contains(&"View dashboard"));
        assert_eq!(menu(&GateState::Loading), anonymous);

        let user = SessionUser {
            id: "u-1".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
        };
        let signed_in = menu(&GateState::Authenticated(user));
        assert!(signed_in.contains(&"View dashboard"));
        assert!(signed_in.contains(&"Sign out"));
        assert_eq!(signed_in.last(), Some(&QUIT));
    }
}
