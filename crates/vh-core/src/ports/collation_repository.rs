use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::collation::{KakuninContainer, KakuninMeisai};
use crate::shipment::BundleKey;
use crate::wire::SyougoData;

#[async_trait]
pub trait CollationRepositoryPort: Send + Sync {
    /// Containers not yet collated, ordered by id.
    async fn list_uncollated(&self) -> Result<Vec<KakuninContainer>>;

    /// Collated containers whose result has not been sent, ordered by id.
    async fn list_unsent_completed(&self) -> Result<Vec<KakuninContainer>>;

    async fn find_container(&self, container_id: &str) -> Result<Option<KakuninContainer>>;

    async fn container_details(&self, container_id: &str) -> Result<Vec<KakuninMeisai>>;

    /// Resets the work table from one container's lines and returns it.
    async fn load_work(&self, container_id: &str, now: NaiveDateTime) -> Result<Vec<KakuninMeisai>>;

    /// Work rows ordered by packing no, bundle no and sokuban.
    async fn list_work(&self) -> Result<Vec<KakuninMeisai>>;

    async fn find_work(&self, key: &BundleKey) -> Result<Option<KakuninMeisai>>;

    /// Marks a work row confirmed. Returns whether a row matched.
    async fn confirm_work(&self, key: &BundleKey, now: NaiveDateTime) -> Result<bool>;

    /// Copies the work confirmations onto the container's lines and flags
    /// the container collated and unsent, in one transaction.
    async fn complete_container(&self, container_id: &str, now: NaiveDateTime) -> Result<()>;

    async fn mark_sent(&self, container_id: &str, sent_at: NaiveDateTime) -> Result<()>;

    /// Replaces all collation containers and lines with a server snapshot.
    async fn apply_syougo_snapshot(&self, data: &SyougoData, now: NaiveDateTime) -> Result<()>;
}
