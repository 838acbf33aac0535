use crate::connectors::{ConnectorError, FeedbackStore};
use crate::models::{FeedbackRecord, SessionUser};
use crate::services::aggregation::{aggregate, FeedbackStats};

/// Everything the dashboard shows, computed from one fetch.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub stats: FeedbackStats,
    /// Newest first
    pub records: Vec<FeedbackRecord>,
}

impl DashboardSnapshot {
    pub fn from_records(records: Vec<FeedbackRecord>) -> Self {
        Self {
            stats: aggregate(&records),
            records,
        }
    }

    /// Records whose name, email or message contains `query`, ignoring case.
    /// A blank query matches everything. Stats are not affected.
    pub fn matching(&self, query: &str) -> Vec<&FeedbackRecord> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.records.iter().collect();
        }

        self.records
            .iter()
            .filter(|record| {
                record.name.to_lowercase().contains(&query)
                    || record.email.to_lowercase().contains(&query)
                    || record.message.to_lowercase().contains(&query)
            })
            .collect()
    }
}

/// Fetch every record visible to `user` and aggregate. Only reachable with
/// a signed-in user.
#[tracing::instrument(name = "Load dashboard.", skip(store, access_token), fields(user = %user.email))]
pub async fn load(
    store: &dyn FeedbackStore,
    user: &SessionUser,
    access_token: &str,
) -> Result<DashboardSnapshot, ConnectorError> {
    let records = store.list(access_token).await?;
    tracing::debug!("Fetched {} feedback records", records.len());
    Ok(DashboardSnapshot::from_records(records))
}
