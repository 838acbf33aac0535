//! Building blocks of the `feedback` terminal client: error type, backend
//! wiring, prompts, spinners and table rendering.

pub mod context;
pub mod error;
pub mod progress;
pub mod prompts;
pub mod render;

pub use context::{runtime, BackendOverrides, CliContext};
pub use error::CliError;
