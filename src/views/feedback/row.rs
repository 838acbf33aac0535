use crate::models::{self, FeedbackStatus, Lenient};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One line of the "Recent Submissions" table.
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub type_label: String,
    pub rating: i32,
    pub message: String,
    pub status: String,
    pub status_label: String,
    /// css-style class of the status pill, e.g. `in-progress`
    pub status_class: String,
    pub date: String,
    pub created_at: DateTime<Utc>,
}

pub fn status_class(status: &Lenient<FeedbackStatus>) -> String {
    match status {
        Lenient::Known(status) => status.as_str().to_string(),
        Lenient::Unrecognized(raw) => raw.to_lowercase().replacen(' ', "-", 1),
    }
}

impl From<&models::FeedbackRecord> for Row {
    fn from(record: &models::FeedbackRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            email: record.email.clone(),
            kind: record.kind.to_string(),
            type_label: record
                .kind
                .known()
                .map_or_else(|| record.kind.to_string(), |kind| kind.label().to_string()),
            rating: record.rating,
            message: record.message.clone(),
            status: record.status.to_string(),
            status_label: record
                .status
                .known()
                .map_or_else(|| record.status.to_string(), |status| status.label().to_string()),
            status_class: status_class(&record.status),
            date: record.created_at.format("%Y-%m-%d").to_string(),
            created_at: record.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeedbackId, FeedbackRecord};
    use chrono::TimeZone;

    fn record(kind: &str, status: &str) -> FeedbackRecord {
        FeedbackRecord {
            id: FeedbackId::Number(9),
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            kind: Lenient::parse(kind),
            rating: 4,
            message: "Works well for us".to_string(),
            status: Lenient::parse(status),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn known_values_use_labels() {
        let row = Row::from(&record("Feature", "In Progress"));
        assert_eq!(row.kind, "feature");
        assert_eq!(row.type_label, "Feature Request");
        assert_eq!(row.status_class, "in-progress");
        assert_eq!(row.date, "2024-03-01");
        assert_eq!(row.id, "9");
    }

    #[test]
    fn unknown_values_are_shown_raw() {
        let row = Row::from(&record("Praise", "On Hold"));
        assert_eq!(row.type_label, "Praise");
        assert_eq!(row.status_label, "On Hold");
        assert_eq!(row.status_class, "on-hold");
    }
}
