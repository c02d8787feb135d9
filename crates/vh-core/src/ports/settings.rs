use async_trait::async_trait;

use crate::settings::TerminalSettings;

#[async_trait]
pub trait SettingsPort: Send + Sync {
    async fn load(&self) -> anyhow::Result<TerminalSettings>;
    async fn save(&self, settings: &TerminalSettings) -> anyhow::Result<()>;
}
