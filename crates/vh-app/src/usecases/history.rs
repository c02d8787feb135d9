use std::sync::Arc;

use anyhow::Result;
use tracing::{info_span, Instrument};
use vh_core::history::CommHistory;
use vh_core::ports::CommHistoryRepositoryPort;

pub const DEFAULT_HISTORY_LIMIT: i64 = 100;

/// Most recent communication history rows, newest first.
pub struct ListCommHistory {
    history: Arc<dyn CommHistoryRepositoryPort>,
}

impl ListCommHistory {
    pub fn new(history: Arc<dyn CommHistoryRepositoryPort>) -> Self {
        Self { history }
    }

    pub async fn execute(&self, limit: i64) -> Result<Vec<CommHistory>> {
        let span = info_span!("usecase.list_comm_history.execute", limit);

        async { self.history.list_recent(limit.max(1)).await }
            .instrument(span)
            .await
    }
}
