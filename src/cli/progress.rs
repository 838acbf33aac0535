//! Terminal progress helpers: spinners and status indicators.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Braille dots
const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Animated spinner on stderr. Finish it with `finish_success` or `finish_error`.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars(TICK_CHARS)
        .template("{spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn finish(pb: &ProgressBar, msg: String) {
    if let Ok(style) = ProgressStyle::default_spinner().template("  {msg}") {
        pb.set_style(style);
    }
    pb.finish_with_message(msg);
}

/// Finish a spinner with a check-mark.
pub fn finish_success(pb: &ProgressBar, msg: &str) {
    finish(pb, format!("✓ {}", msg));
}

/// Finish a spinner with a cross.
pub fn finish_error(pb: &ProgressBar, msg: &str) {
    finish(pb, format!("✗ {}", msg));
}

/// Icon for a feedback status pill.
pub fn status_icon(status_class: &str) -> &'static str {
    match status_class {
        "resolved" => "✓",
        "in-progress" => "⟳",
        "pending" => "◷",
        "escalated" => "!",
        _ => "?",
    }
}
