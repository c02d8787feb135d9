use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::history::{CommHistory, NewCommHistory};

#[async_trait]
pub trait CommHistoryRepositoryPort: Send + Sync {
    /// Stores a row under the next log id of its start day and returns the id.
    async fn append(&self, entry: NewCommHistory) -> Result<String>;

    /// Newest first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<CommHistory>>;

    async fn delete_started_before(&self, threshold: NaiveDateTime) -> Result<usize>;
}
