use crate::models::{FeedbackStatus, FeedbackType, NewFeedback};
use serde::Serialize;

pub const RECEIVED_TITLE: &str = "Feedback Received!";
pub const RECEIVED_TEXT: &str =
    "Thank you for helping us improve. We've received your submission and saved it to our database.";

/// Confirmation shown once a submission was stored.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub title: &'static str,
    pub text: &'static str,
    #[serde(rename = "type")]
    pub kind: FeedbackType,
    pub rating: i32,
    pub status: FeedbackStatus,
}

impl From<&NewFeedback> for Receipt {
    fn from(feedback: &NewFeedback) -> Self {
        Self {
            title: RECEIVED_TITLE,
            text: RECEIVED_TEXT,
            kind: feedback.kind(),
            rating: feedback.rating(),
            status: feedback.status(),
        }
    }
}
