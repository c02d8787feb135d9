use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::shipment::{BundleKey, WorkBundle, WorkSummary};

/// Staging table of the bundle selection in progress.
#[async_trait]
pub trait ShipmentWorkRepositoryPort: Send + Sync {
    /// Staged bundles joined with their lines, in staging order.
    async fn list_staged(&self) -> Result<Vec<WorkBundle>>;

    async fn summary(&self) -> Result<WorkSummary>;

    async fn stage(&self, key: &BundleKey, now: NaiveDateTime) -> Result<()>;

    async fn unstage(&self, key: &BundleKey) -> Result<()>;

    async fn clear(&self) -> Result<()>;

    async fn has_work(&self) -> Result<bool>;
}
