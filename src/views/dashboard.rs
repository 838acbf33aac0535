use crate::services::{DashboardSnapshot, FeedbackStats, SentimentShare};
use crate::views::feedback::Row;
use serde::Serialize;

pub const EMPTY_LIST_TEXT: &str = "No feedback submissions found yet.";

/// `GET /dashboard` payload: stats over the whole snapshot plus the
/// (possibly filtered) list.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub stats: FeedbackStats,
    pub avg_rating: String,
    pub sentiment_share: SentimentShare,
    pub records: Vec<Row>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_text: Option<&'static str>,
}

impl Overview {
    pub fn new(snapshot: &DashboardSnapshot, query: Option<&str>) -> Self {
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        let records: Vec<Row> = snapshot
            .matching(query.unwrap_or(""))
            .into_iter()
            .map(Row::from)
            .collect();

        Self {
            stats: snapshot.stats.clone(),
            avg_rating: snapshot.stats.avg_rating_display(),
            sentiment_share: snapshot.stats.sentiment_share(),
            empty_text: snapshot.records.is_empty().then_some(EMPTY_LIST_TEXT),
            records,
            query: query.map(str::to_string),
        }
    }
}
