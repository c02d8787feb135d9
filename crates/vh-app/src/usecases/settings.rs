//! Terminal settings: buzzer, vibrator, camera, modem and web service URLs.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use serde_json::Value;
use tracing::{info, info_span, Instrument};
use vh_core::ports::SettingsPort;
use vh_core::settings::{TerminalSettings, CURRENT_SCHEMA_VERSION};

/// Keys whose values never reach the log.
const MASKED_KEYS: &[&str] = &["CommPasswd"];

pub struct GetSettings {
    settings: Arc<dyn SettingsPort>,
}

impl GetSettings {
    pub fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self { settings }
    }

    pub async fn execute(&self) -> Result<TerminalSettings> {
        let span = info_span!("usecase.get_settings.execute");

        async { self.settings.load().await }.instrument(span).await
    }
}

/// Validates and persists terminal settings, logging each changed field
/// with its old and new value.
pub struct UpdateSettings {
    settings: Arc<dyn SettingsPort>,
}

impl UpdateSettings {
    pub fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self { settings }
    }

    pub async fn execute(&self, settings: TerminalSettings) -> Result<()> {
        let span = info_span!("usecase.update_settings.execute");

        async {
            if settings.schema_version != CURRENT_SCHEMA_VERSION {
                return Err(anyhow!(
                    "Invalid schema version: expected {}, got {}",
                    CURRENT_SCHEMA_VERSION,
                    settings.schema_version
                ));
            }

            let old_settings = self.settings.load().await?;
            let changes = settings_diff(&old_settings, &settings)?;
            if changes.is_empty() {
                info!("Updating terminal settings (no changes detected)");
            } else {
                info!(changed_fields = %changes.join(", "), "Updating terminal settings");
            }

            self.settings.save(&settings).await?;
            info!(changed = changes.len(), "Settings updated successfully");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

/// `section.Key: old → new` for every leaf that differs.
fn settings_diff(old: &TerminalSettings, new: &TerminalSettings) -> Result<Vec<String>> {
    let old = serde_json::to_value(old)?;
    let new = serde_json::to_value(new)?;
    let mut changes = Vec::new();
    collect_changes("", &old, &new, &mut changes);
    changes.sort();
    Ok(changes)
}

fn collect_changes(path: &str, old: &Value, new: &Value, out: &mut Vec<String>) {
    match (old, new) {
        (Value::Object(old_map), Value::Object(new_map)) => {
            for (key, new_value) in new_map {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                let old_value = old_map.get(key).unwrap_or(&Value::Null);
                collect_changes(&child, old_value, new_value, out);
            }
        }
        _ if old == new => {}
        _ => {
            let masked = MASKED_KEYS.iter().any(|k| path.ends_with(k));
            if masked {
                out.push(format!("{path}: *** → ***"));
            } else {
                out.push(format!("{path}: {old} → {new}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockSettings {
        stored: Mutex<TerminalSettings>,
        saves: Mutex<usize>,
    }

    #[async_trait]
    impl SettingsPort for MockSettings {
        async fn load(&self) -> Result<TerminalSettings> {
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn save(&self, settings: &TerminalSettings) -> Result<()> {
            *self.stored.lock().unwrap() = settings.clone();
            *self.saves.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn saves_valid_settings() {
        let port = Arc::new(MockSettings::default());
        let mut settings = TerminalSettings::default();
        settings.buzzer.volume = 8;

        UpdateSettings::new(port.clone()).execute(settings).await.unwrap();

        let loaded = GetSettings::new(port.clone()).execute().await.unwrap();
        assert_eq!(loaded.buzzer.volume, 8);
        assert_eq!(*port.saves.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn refuses_unknown_schema_version() {
        let port = Arc::new(MockSettings::default());
        let settings = TerminalSettings {
            schema_version: CURRENT_SCHEMA_VERSION + 1,
            ..TerminalSettings::default()
        };

        let err = UpdateSettings::new(port.clone())
            .execute(settings)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Invalid schema version"));
        assert_eq!(*port.saves.lock().unwrap(), 0);
    }

    #[test]
    fn diff_lists_changed_leaves_and_masks_passwords() {
        let old = TerminalSettings::default();
        let mut new = old.clone();
        new.vibrator.count = 3;
        new.comm.password = "secret".into();

        let changes = settings_diff(&old, &new).unwrap();

        assert_eq!(
            changes,
            vec![
                "comm.CommPasswd: *** → ***".to_string(),
                "vibrator.VibratorCount: 2 → 3".to_string(),
            ]
        );
        assert!(settings_diff(&old, &old).unwrap().is_empty());
    }
}
