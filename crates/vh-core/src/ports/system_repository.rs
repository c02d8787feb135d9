use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::system::SystemSetting;

#[async_trait]
pub trait SystemRepositoryPort: Send + Sync {
    async fn load(&self) -> Result<Option<SystemSetting>>;

    async fn save(&self, setting: &SystemSetting, now: NaiveDateTime) -> Result<()>;

    /// Stamps the plan confirmation time, creating the row when absent.
    async fn stamp_data_conf(&self, at: NaiveDateTime) -> Result<()>;
}
