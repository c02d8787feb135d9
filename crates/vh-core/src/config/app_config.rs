use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Web service endpoint used when the system table has none.
    pub endpoint: String,
    pub storage: StorageConfig,
    pub http: HttpConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub database_path: PathBuf,
    /// Directory holding container and seal photos.
    pub image_dir: PathBuf,
    /// JSON file with buzzer, vibrator, camera and comm settings.
    pub settings_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    pub dir: PathBuf,
    /// Default filter directives; `RUST_LOG` takes precedence.
    pub level: String,
}
