//! Dashboard statistics over a snapshot of feedback records.
//!
//! `aggregate` is pure: the same snapshot always yields the same stats, and
//! nothing is kept between calls. Every refresh recomputes from scratch.

use crate::models::{FeedbackRecord, FeedbackStatus, FeedbackType, Lenient};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Counts per feedback type. Values the app does not know land in `unrecognized`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    pub bug: usize,
    pub feature: usize,
    pub general: usize,
    pub other: usize,
    pub unrecognized: usize,
}

impl TypeCounts {
    pub fn get(&self, kind: FeedbackType) -> usize {
        match kind {
            FeedbackType::Bug => self.bug,
            FeedbackType::Feature => self.feature,
            FeedbackType::General => self.general,
            FeedbackType::Other => self.other,
        }
    }

    fn count(&mut self, kind: &Lenient<FeedbackType>) {
        match kind {
            Lenient::Known(FeedbackType::Bug) => self.bug += 1,
            Lenient::Known(FeedbackType::Feature) => self.feature += 1,
            Lenient::Known(FeedbackType::General) => self.general += 1,
            Lenient::Known(FeedbackType::Other) => self.other += 1,
            Lenient::Unrecognized(_) => self.unrecognized += 1,
        }
    }
}

/// Rating buckets: positive >= 4, neutral == 3, negative <= 2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentiment {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

/// Share of each sentiment bucket in whole percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentShare {
    pub positive: u32,
    pub neutral: u32,
    pub negative: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackStats {
    pub total: usize,
    /// Mean rating rounded to one decimal, 0.0 when there is nothing to average
    pub avg_rating: f64,
    /// Resolved / total in whole percent
    pub resolution_rate: u32,
    pub types: TypeCounts,
    pub sentiment: Sentiment,
}

impl FeedbackStats {
    pub fn sentiment_share(&self) -> SentimentShare {
        SentimentShare {
            positive: percent(self.sentiment.positive, self.total),
            neutral: percent(self.sentiment.neutral, self.total),
            negative: percent(self.sentiment.negative, self.total),
        }
    }

    /// Average as the dashboard prints it, always with one decimal.
    pub fn avg_rating_display(&self) -> String {
        format!("{:.1}", self.avg_rating)
    }
}

impl fmt::Display for FeedbackStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} submissions, average {}/5, {}% resolved",
            self.total,
            self.avg_rating_display(),
            self.resolution_rate
        )
    }
}

fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}

pub fn aggregate(records: &[FeedbackRecord]) -> FeedbackStats {
    let total = records.len();
    if total == 0 {
        return FeedbackStats::default();
    }

    let mut types = TypeCounts::default();
    let mut sentiment = Sentiment::default();
    let mut rating_sum: i64 = 0;
    let mut resolved = 0;

    for record in records {
        types.count(&record.kind);
        rating_sum += i64::from(record.rating);

        if record.status.is(&FeedbackStatus::Resolved) {
            resolved += 1;
        }

        match record.rating {
            r if r >= 4 => sentiment.positive += 1,
            3 => sentiment.neutral += 1,
            _ => sentiment.negative += 1,
        }
    }

    if types.unrecognized > 0 {
        tracing::warn!(
            unrecognized = types.unrecognized,
            "Feedback records with an unknown type were left out of the type breakdown"
        );
    }

    let mean = rating_sum as f64 / total as f64;

    FeedbackStats {
        total,
        avg_rating: (mean * 10.0).round() / 10.0,
        resolution_rate: percent(resolved, total),
        types,
        sentiment,
    }
}
