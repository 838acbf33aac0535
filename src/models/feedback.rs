use crate::models::{FeedbackStatus, FeedbackType, Lenient};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned by the store. Depending on the table definition it is
/// either a bigint or a uuid/text column, so it is kept opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedbackId {
    Number(i64),
    Text(String),
}

impl fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{}", id),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// A row of the `feedbacks` table as the store returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: FeedbackId,
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: Lenient<FeedbackType>,
    pub rating: i32,
    pub message: String,
    pub status: Lenient<FeedbackStatus>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new feedback row. The store assigns `id` and
/// `created_at`; `status` is always `pending`.
///
/// Only a form that passed validation can be turned into a `NewFeedback`
/// (see `forms::FeedbackForm`), so nothing invalid reaches the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewFeedback {
    name: String,
    email: String,
    #[serde(rename = "type")]
    kind: FeedbackType,
    rating: i32,
    message: String,
    status: FeedbackStatus,
}

impl NewFeedback {
    pub(crate) fn validated(
        name: String,
        email: String,
        kind: FeedbackType,
        rating: i32,
        message: String,
    ) -> Self {
        Self {
            name,
            email,
            kind,
            rating,
            message,
            status: FeedbackStatus::Pending,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn kind(&self) -> FeedbackType {
        self.kind
    }

    pub fn rating(&self) -> i32 {
        self.rating
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> FeedbackStatus {
        self.status
    }

    /// The row the store would hold after inserting this payload.
    pub fn into_record(self, id: FeedbackId, created_at: DateTime<Utc>) -> FeedbackRecord {
        FeedbackRecord {
            id,
            name: self.name,
            email: self.email,
            kind: self.kind.into(),
            rating: self.rating,
            message: self.message,
            status: self.status.into(),
            created_at,
        }
    }
}
