use tokio::runtime::Runtime;

use crate::cli::progress::{finish_error, finish_success, spinner};
use crate::cli::render::print_field_errors;
use crate::cli::{prompts, runtime, BackendOverrides, CliContext, CliError};
use crate::connectors::FeedbackStore;
use crate::forms::{Field, FieldErrors, FeedbackForm};
use crate::models::FeedbackType;
use crate::services::{SubmissionFlow, SubmitError};
use crate::views::feedback::{RECEIVED_TEXT, RECEIVED_TITLE};
use crate::console::commands::CallableTrait;

/// `feedback submit [--name ..] [--email ..] [--type ..] [--rating ..] [--message ..] [--no-input]`
///
/// Anything not given as a flag is asked for. With `--no-input` the flags
/// are submitted as they are and invalid fields are reported instead.
pub struct SubmitCommand {
    pub form: FeedbackForm,
    pub no_input: bool,
    pub overrides: BackendOverrides,
}

impl SubmitCommand {
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        kind: Option<FeedbackType>,
        rating: Option<i32>,
        message: Option<String>,
        no_input: bool,
        overrides: BackendOverrides,
    ) -> Self {
        let form = FeedbackForm {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            kind: kind.unwrap_or_default(),
            rating: rating.unwrap_or(0),
            message: message.unwrap_or_default(),
        };
        Self {
            form,
            no_input,
            overrides,
        }
    }
}

impl CallableTrait for SubmitCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let ctx = CliContext::load(&self.overrides)?;
        let rt = runtime()?;
        let flow = SubmissionFlow::with_form(self.form.clone());

        if self.no_input {
            submit_once(&rt, ctx.backend.store.as_ref(), flow)?;
        } else {
            run_interactive(&rt, ctx.backend.store.as_ref(), flow)?;
        }
        Ok(())
    }
}

/// Single write, no prompting.
pub fn submit_once(
    rt: &Runtime,
    store: &dyn FeedbackStore,
    mut flow: SubmissionFlow,
) -> Result<(), CliError> {
    let pb = spinner("Sending feedback...");
    match rt.block_on(flow.submit(store)) {
        Ok(()) => {
            finish_success(&pb, RECEIVED_TITLE);
            eprintln!("  {}", RECEIVED_TEXT);
            Ok(())
        }
        Err(SubmitError::Invalid(errors)) => {
            pb.finish_and_clear();
            print_field_errors(&errors);
            Err(CliError::Invalid(errors))
        }
        Err(err) => {
            finish_error(&pb, &err.to_string());
            Err(err.into())
        }
    }
}

/// Prompt, submit, and on failure ask again for just what went wrong.
pub fn run_interactive(
    rt: &Runtime,
    store: &dyn FeedbackStore,
    mut flow: SubmissionFlow,
) -> Result<(), CliError> {
    prompt_fields(&mut flow, None)?;

    loop {
        let pb = spinner("Sending feedback...");
        match rt.block_on(flow.submit(store)) {
            Ok(()) => {
                finish_success(&pb, RECEIVED_TITLE);
                eprintln!("  {}", RECEIVED_TEXT);

                if !prompts::confirm("Send another?", false)? {
                    return Ok(());
                }
                flow.reset();
                prompt_fields(&mut flow, None)?;
            }
            Err(SubmitError::Invalid(errors)) => {
                pb.finish_and_clear();
                print_field_errors(&errors);
                prompt_fields(&mut flow, Some(&errors))?;
            }
            Err(SubmitError::Service(msg)) => {
                finish_error(&pb, &msg);
                // form keeps its values for the retry
                if !prompts::confirm("Try again?", true)? {
                    return Err(CliError::Submission(msg));
                }
            }
            Err(err) => {
                finish_error(&pb, &err.to_string());
                return Err(err.into());
            }
        }
    }
}

/// Ask for every field, or only for the failing ones when `failing` is given.
fn prompt_fields(flow: &mut SubmissionFlow, failing: Option<&FieldErrors>) -> Result<(), CliError> {
    let wanted = |field: Field| failing.map_or(true, |errors| errors.contains(field));

    if wanted(Field::Name) {
        let name = prompts::text("Name", &flow.form().name)?;
        flow.set_name(name);
    }
    if wanted(Field::Email) {
        let email = prompts::text("Email", &flow.form().email)?;
        flow.set_email(email);
    }
    if failing.is_none() {
        let kind = prompts::feedback_type(flow.form().kind)?;
        flow.set_kind(kind);
    }
    if wanted(Field::Rating) {
        let rating = prompts::rating(flow.form().rating)?;
        flow.set_rating(rating);
    }
    if wanted(Field::Message) {
        let message = prompts::text("Message", &flow.form().message)?;
        flow.set_message(message);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::backend::mock::MockFeedbackStore;

    fn form() -> FeedbackForm {
        FeedbackForm {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            kind: FeedbackType::Bug,
            rating: 2,
            message: "Export to CSV fails".to_string(),
        }
    }

    #[test]
    fn test_flags_fill_the_form() {
        let cmd = SubmitCommand::new(
            Some("Jane".to_string()),
            None,
            Some(FeedbackType::Feature),
            Some(5),
            None,
            true,
            BackendOverrides::default(),
        );
        assert_eq!(cmd.form.name, "Jane");
        assert_eq!(cmd.form.kind, FeedbackType::Feature);
        assert_eq!(cmd.form.rating, 5);
        assert!(cmd.form.email.is_empty());
    }

    #[test]
    fn test_submit_once_writes_a_valid_form() {
        let rt = runtime().unwrap();
        let store = MockFeedbackStore::new();
        submit_once(&rt, &store, SubmissionFlow::with_form(form())).unwrap();
        assert_eq!(store.insert_count(), 1);
    }

    #[test]
    fn test_submit_once_reports_invalid_fields_without_writing() {
        let rt = runtime().unwrap();
        let store = MockFeedbackStore::new();
        let mut invalid = form();
        invalid.message = "short".to_string();

        let err = submit_once(&rt, &store, SubmissionFlow::with_form(invalid)).unwrap_err();
        match err {
            CliError::Invalid(errors) => assert!(errors.contains(Field::Message)),
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(store.insert_count(), 0);
    }

    #[test]
    fn test_submit_once_takes_the_email_as_typed() {
        let rt = runtime().unwrap();
        let store = MockFeedbackStore::new();
        let mut flow = SubmissionFlow::with_form(form());
        flow.set_email(" jane@example.com ");

        let err = submit_once(&rt, &store, flow).unwrap_err();
        match err {
            CliError::Invalid(errors) => {
                assert_eq!(errors.get(Field::Email), Some("Invalid email address"))
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(store.insert_count(), 0);
    }

    #[test]
    fn test_submit_once_passes_service_message_through() {
        let rt = runtime().unwrap();
        let store = MockFeedbackStore::new();
        store.fail_next("new row violates row-level security policy");

        let err = submit_once(&rt, &store, SubmissionFlow::with_form(form())).unwrap_err();
        assert_eq!(err.to_string(), "new row violates row-level security policy");
        assert_eq!(store.insert_count(), 1);
    }
}
