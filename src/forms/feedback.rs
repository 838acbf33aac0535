use crate::forms::{Field, FieldErrors};
use crate::models;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

pub const MIN_MESSAGE_CHARS: usize = 10;
pub const MAX_RATING: i32 = 5;

lazy_static! {
    // local@domain.tld, no whitespace and no extra @ in any part
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Candidate feedback as typed into the form. Missing fields deserialize to
/// their empty values so they are reported by `validate` instead of being
/// rejected as malformed JSON.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FeedbackForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "type", default)]
    pub kind: models::FeedbackType,
    #[serde(default)]
    pub rating: i32, // 0 = no star selected
    #[serde(default)]
    pub message: String,
}

impl FeedbackForm {
    /// Checks every rule, never stopping at the first failure.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.add(Field::Name, "Name is required");
        }

        if self.email.is_empty() {
            errors.add(Field::Email, "Email is required");
        } else if !EMAIL_RE.is_match(&self.email) {
            errors.add(Field::Email, "Invalid email address");
        }

        // anything outside 1..=5 cannot come from the star picker and counts as unset
        if !(1..=MAX_RATING).contains(&self.rating) {
            errors.add(Field::Rating, "Please select a rating");
        }

        if self.message.is_empty() {
            errors.add(Field::Message, "Message is required");
        } else if self.message.chars().count() < MIN_MESSAGE_CHARS {
            errors.add(
                Field::Message,
                format!("Message must be at least {} characters", MIN_MESSAGE_CHARS),
            );
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

impl TryFrom<FeedbackForm> for models::NewFeedback {
    type Error = FieldErrors;

    fn try_from(form: FeedbackForm) -> Result<Self, Self::Error> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(models::NewFeedback::validated(
            form.name,
            form.email,
            form.kind,
            form.rating,
            form.message,
        ))
    }
}
