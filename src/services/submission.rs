//! Feedback submission flow: a form being edited, one write in flight at a
//! time, and a confirmation once the store accepted the row.

use crate::connectors::{ConnectorError, FeedbackStore};
use crate::forms::{Field, FieldErrors, FeedbackForm};
use crate::models::{FeedbackType, NewFeedback};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    Editing,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error("Please correct the highlighted fields ({0})")]
    Invalid(FieldErrors),
    #[error("A submission is already in progress")]
    InFlight,
    #[error("This feedback was already submitted")]
    AlreadySubmitted,
    /// The store refused or failed the write; message shown as is
    #[error("{0}")]
    Service(String),
}

impl From<ConnectorError> for SubmitError {
    fn from(err: ConnectorError) -> Self {
        Self::Service(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct SubmissionFlow {
    form: FeedbackForm,
    errors: FieldErrors,
    state: SubmissionState,
    submit_error: Option<String>,
}

impl Default for SubmissionFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionFlow {
    pub fn new() -> Self {
        Self::with_form(FeedbackForm::default())
    }

    pub fn with_form(form: FeedbackForm) -> Self {
        Self {
            form,
            errors: FieldErrors::new(),
            state: SubmissionState::Editing,
            submit_error: None,
        }
    }

    pub fn form(&self) -> &FeedbackForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.name = name.into();
        self.errors.remove(Field::Name);
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
        self.errors.remove(Field::Email);
    }

    pub fn set_kind(&mut self, kind: FeedbackType) {
        self.form.kind = kind;
    }

    pub fn set_rating(&mut self, rating: i32) {
        self.form.rating = rating;
        self.errors.remove(Field::Rating);
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.form.message = message.into();
        self.errors.remove(Field::Message);
    }

    /// Validates the form and moves to `Submitting`. The returned payload must
    /// be written once and the outcome reported through `finish`.
    pub fn begin(&mut self) -> Result<NewFeedback, SubmitError> {
        match self.state {
            SubmissionState::Submitting => return Err(SubmitError::InFlight),
            SubmissionState::Submitted => return Err(SubmitError::AlreadySubmitted),
            SubmissionState::Editing => {}
        }

        self.submit_error = None;
        match NewFeedback::try_from(self.form.clone()) {
            Ok(feedback) => {
                self.errors.clear();
                self.state = SubmissionState::Submitting;
                Ok(feedback)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(SubmitError::Invalid(errors))
            }
        }
    }

    /// Records the outcome of the write started by `begin`.
    pub fn finish(&mut self, result: Result<(), ConnectorError>) -> Result<(), SubmitError> {
        if self.state != SubmissionState::Submitting {
            tracing::warn!("Submission outcome reported with no write in flight");
        }

        match result {
            Ok(()) => {
                self.state = SubmissionState::Submitted;
                Ok(())
            }
            Err(err) => {
                tracing::error!("Failed to store feedback: {}", err);
                let err = SubmitError::from(err);
                self.submit_error = Some(err.to_string());
                self.state = SubmissionState::Editing;
                Err(err)
            }
        }
    }

    /// Validate, write once, record the outcome. Never retries.
    #[tracing::instrument(name = "Submit feedback.", skip_all)]
    pub async fn submit(&mut self, store: &dyn FeedbackStore) -> Result<(), SubmitError> {
        let feedback = self.begin()?;
        let result = store.insert(&feedback).await;
        self.finish(result)
    }

    /// Empty form, back to editing ("Send another").
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::backend::mock::MockFeedbackStore;

    fn filled() -> SubmissionFlow {
        let mut flow = SubmissionFlow::new();
        flow.set_name("Jane");
        flow.set_email("jane@example.com");
        flow.set_kind(FeedbackType::Feature);
        flow.set_rating(4);
        flow.set_message("Please add a dark mode");
        flow
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_store() {
        let store = MockFeedbackStore::new();
        let mut flow = SubmissionFlow::new();
        flow.set_email("bad-email");

        let err = flow.submit(&store).await.unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(_)));
        assert_eq!(flow.state(), SubmissionState::Editing);
        assert_eq!(flow.errors().get(Field::Email), Some("Invalid email address"));
        assert_eq!(store.insert_count(), 0);
    }

    #[tokio::test]
    async fn editing_a_field_clears_its_error() {
        let store = MockFeedbackStore::new();
        let mut flow = SubmissionFlow::new();
        let _ = flow.submit(&store).await;
        assert!(flow.errors().contains(Field::Name));

        flow.set_name("Jane");
        assert!(!flow.errors().contains(Field::Name));
        assert!(flow.errors().contains(Field::Message));
    }

    #[tokio::test]
    async fn valid_form_is_written_once() {
        let store = MockFeedbackStore::new();
        let mut flow = filled();

        flow.submit(&store).await.unwrap();
        assert_eq!(flow.state(), SubmissionState::Submitted);
        assert_eq!(store.insert_count(), 1);

        let records = store.list("token").await.unwrap();
        assert!(records[0].status.is(&crate::models::FeedbackStatus::Pending));

        assert_eq!(flow.submit(&store).await, Err(SubmitError::AlreadySubmitted));
        assert_eq!(store.insert_count(), 1);
    }

    #[tokio::test]
    async fn store_failure_keeps_the_form_and_the_message() {
        let store = MockFeedbackStore::new();
        store.fail_next("permission denied for table feedbacks");
        let mut flow = filled();

        let err = flow.submit(&store).await.unwrap_err();
        assert_eq!(err, SubmitError::Service("permission denied for table feedbacks".to_string()));
        assert_eq!(flow.state(), SubmissionState::Editing);
        assert_eq!(flow.submit_error(), Some("permission denied for table feedbacks"));
        assert_eq!(flow.form().name, "Jane");

        // manual retry
        flow.submit(&store).await.unwrap();
        assert_eq!(flow.submit_error(), None);
        assert_eq!(store.insert_count(), 2);
    }

    #[test]
    fn second_submit_while_in_flight_is_refused() {
        let mut flow = filled();
        let _payload = flow.begin().unwrap();
        assert_eq!(flow.state(), SubmissionState::Submitting);
        assert_eq!(flow.begin(), Err(SubmitError::InFlight));

        flow.finish(Ok(())).unwrap();
        assert_eq!(flow.state(), SubmissionState::Submitted);
    }

    #[test]
    fn reset_returns_to_an_empty_form() {
        let mut flow = filled();
        flow.begin().unwrap();
        flow.finish(Ok(())).unwrap();

        flow.reset();
        assert_eq!(flow.state(), SubmissionState::Editing);
        assert_eq!(flow.form(), &FeedbackForm::default());
        assert_eq!(flow.form().kind, FeedbackType::General);
        assert_eq!(flow.form().rating, 0);
    }
}
