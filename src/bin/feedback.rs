//! `feedback` CLI binary.
//!
//! ```text
//! feedback                      # interactive app
//! feedback submit --rating 5 --message "Great support team"
//! feedback login
//! feedback dashboard --query checkout
//! feedback logout
//! ```

use clap::{Parser, Subcommand};
use feedback_desk::cli::BackendOverrides;
use feedback_desk::console::commands::cli::{app, dashboard, login, logout, session, signup, submit};
use feedback_desk::console::commands::CallableTrait;
use feedback_desk::models::FeedbackType;
use feedback_desk::telemetry::{get_cli_subscriber, init_subscriber};

#[derive(Parser, Debug)]
#[command(
    name = "feedback",
    version,
    about = "Collect customer feedback and review it on a dashboard"
)]
struct Cli {
    /// Backend project URL (empty runs on in-memory data)
    #[arg(long, global = true, env = "FEEDBACK_BACKEND_URL", hide_env_values = true)]
    backend_url: Option<String>,
    /// Public anon key of the backend project
    #[arg(long, global = true, env = "FEEDBACK_BACKEND_ANON_KEY", hide_env_values = true)]
    anon_key: Option<String>,
    #[command(subcommand)]
    command: Option<FeedbackCommands>,
}

#[derive(Debug, Subcommand)]
enum FeedbackCommands {
    /// Interactive app (default)
    App,
    /// Send a feedback submission
    Submit {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// bug, feature, general or other
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<FeedbackType>,
        /// 1 to 5
        #[arg(long)]
        rating: Option<i32>,
        #[arg(long)]
        message: Option<String>,
        /// Submit the flags as given, never prompt
        #[arg(long)]
        no_input: bool,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        email: Option<String>,
        /// Contact number stored with the account
        #[arg(long)]
        phone: Option<String>,
    },
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// End the current session
    Logout,
    /// Show who is signed in
    Whoami {
        #[arg(long)]
        json: bool,
    },
    /// Feedback stats and recent submissions
    Dashboard {
        /// Only list submissions whose name, email or message contains this text
        #[arg(long, short)]
        query: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = get_cli_subscriber("warn".into());
    init_subscriber(subscriber);

    let cli = Cli::parse();
    let command = get_command(cli)?;
    if let Err(err) = command.call() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
    Ok(())
}

fn get_command(cli: Cli) -> Result<Box<dyn CallableTrait>, Box<dyn std::error::Error>> {
    let overrides = BackendOverrides {
        url: cli.backend_url,
        anon_key: cli.anon_key,
    };

    let cmd: Box<dyn CallableTrait> = match cli.command.unwrap_or(FeedbackCommands::App) {
        FeedbackCommands::App => Box::new(app::AppCommand::new(overrides)),
        FeedbackCommands::Submit {
            name,
            email,
            kind,
            rating,
            message,
            no_input,
        } => Box::new(submit::SubmitCommand::new(
            name, email, kind, rating, message, no_input, overrides,
        )),
        FeedbackCommands::Signup { email, phone } => {
            Box::new(signup::SignUpCommand::new(email, phone, overrides))
        }
        FeedbackCommands::Login { email } => Box::new(login::LoginCommand::new(email, overrides)),
        FeedbackCommands::Logout => Box::new(logout::LogoutCommand::new(overrides)),
        FeedbackCommands::Whoami { json } => Box::new(session::SessionCommand::new(json, overrides)),
        FeedbackCommands::Dashboard { query, json } => {
            Box::new(dashboard::DashboardCommand::new(query, json, overrides))
        }
    };

    Ok(cmd)
}
