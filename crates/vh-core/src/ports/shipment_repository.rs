use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::shipment::{BundleKey, SyukkaContainer, SyukkaMeisai, Yotei};
use crate::vanning::RegistrationPlan;
use crate::wire::SyukkaData;

/// Shipment plans (予定), registered containers and bundle lines.
#[async_trait]
pub trait ShipmentRepositoryPort: Send + Sync {
    async fn list_plans(&self) -> Result<Vec<Yotei>>;

    /// The plan row the work date is read from.
    async fn first_plan(&self) -> Result<Option<Yotei>>;

    /// Plans the server has not stamped with an update time yet.
    async fn plans_without_update_stamp(&self) -> Result<Vec<Yotei>>;

    /// Containers with no send stamp, ordered by id.
    async fn list_unsent_containers(&self) -> Result<Vec<SyukkaContainer>>;

    async fn find_container(&self, container_id: i32) -> Result<Option<SyukkaContainer>>;

    async fn container_bundles(&self, container_id: i32) -> Result<Vec<SyukkaMeisai>>;

    async fn mark_container_sent(&self, container_id: i32, sent_at: NaiveDateTime) -> Result<()>;

    async fn find_bundle(&self, key: &BundleKey) -> Result<Option<SyukkaMeisai>>;

    /// A bundle line that is not loaded into any container yet.
    async fn find_addable_bundle(&self, key: &BundleKey) -> Result<Option<SyukkaMeisai>>;

    /// Writes `bundle_no` only when the stored value is blank. Returns
    /// whether a row was updated.
    async fn set_bundle_no_if_empty(&self, key: &BundleKey, bundle_no: &str) -> Result<bool>;

    /// Replaces plans and unshipped lines with a server snapshot in one
    /// transaction.
    ///
    /// Sent containers and their lines are dropped; lines already loaded
    /// into an unsent container keep their container id.
    async fn apply_syukka_snapshot(&self, data: &SyukkaData, now: NaiveDateTime) -> Result<()>;

    /// Registers a container from the staged work rows in one transaction
    /// and returns the new container id.
    async fn register_container(&self, plan: &RegistrationPlan, now: NaiveDateTime) -> Result<i32>;
}
