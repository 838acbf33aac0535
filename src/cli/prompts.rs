//! Interactive prompts. Every function blocks on the terminal.

use crate::cli::CliError;
use crate::models::FeedbackType;
use dialoguer::{Confirm, Input, Password, Select};

pub fn text(prompt: &str, initial: &str) -> Result<String, CliError> {
    let value = Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

pub fn password(prompt: &str) -> Result<String, CliError> {
    Ok(Password::new().with_prompt(prompt).interact()?)
}

/// Password typed twice.
pub fn new_password() -> Result<String, CliError> {
    let value = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;
    Ok(value)
}

pub fn feedback_type(current: FeedbackType) -> Result<FeedbackType, CliError> {
    let labels: Vec<&str> = FeedbackType::ALL.iter().map(FeedbackType::label).collect();
    let default = FeedbackType::ALL
        .iter()
        .position(|kind| *kind == current)
        .unwrap_or(0);

    let index = Select::new()
        .with_prompt("Feedback type")
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(FeedbackType::ALL[index])
}

/// 0 means nothing picked yet.
pub fn rating(current: i32) -> Result<i32, CliError> {
    let items: Vec<String> = (1..=5).map(|stars| crate::cli::render::stars(stars)).collect();
    let mut select = Select::new().with_prompt("Rating").items(&items);
    if (1..=5).contains(&current) {
        select = select.default((current - 1) as usize);
    }

    let picked = select.interact_opt()?;
    Ok(picked.map_or(0, |index| index as i32 + 1))
}

pub fn confirm(prompt: &str, default: bool) -> Result<bool, CliError> {
    Ok(Confirm::new().with_prompt(prompt).default(default).interact()?)
}

pub fn choose(prompt: &str, items: &[&str]) -> Result<usize, CliError> {
    Ok(Select::new().with_prompt(prompt).items(items).default(0).interact()?)
}
