//! # Configuration Loader
//!
//! Layers, lowest first:
//!
//! 1. defaults derived from the platform data directory
//! 2. an optional TOML file
//! 3. `VANNING__*` environment variables (`VANNING__HTTP__REQUEST_TIMEOUT_SECS=60`)
//!
//! Pure data loading; whether the values make sense is decided later.

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use vh_app::AppPaths;
use vh_core::config::AppConfig;
use vh_infra::fs::app_data_dir;
use vh_infra::soap::DEFAULT_ENDPOINT;

pub const ENV_PREFIX: &str = "VANNING";

const DEFAULT_CONNECT_TIMEOUT_SECS: i64 = 20;
const DEFAULT_REQUEST_TIMEOUT_SECS: i64 = 120;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Loads the terminal configuration.
///
/// `config_path` may point at a missing file; only a file that exists
/// and does not parse is an error.
pub fn load_config(config_path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let data_root = app_data_dir()?;
    let env = Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true);
    build_config(&data_root, config_path, env)
}

fn build_config(
    data_root: &Path,
    config_path: Option<&Path>,
    env: Environment,
) -> anyhow::Result<AppConfig> {
    let mut builder = with_defaults(Config::builder(), data_root)?;
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(false));
    }

    builder
        .add_source(env)
        .build()
        .context("Failed to read configuration")?
        .try_deserialize::<AppConfig>()
        .context("Failed to map configuration")
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
    data_root: &Path,
) -> anyhow::Result<ConfigBuilder<DefaultState>> {
    let paths = AppPaths::from_data_root(data_root);

    Ok(builder
        .set_default("endpoint", DEFAULT_ENDPOINT)?
        .set_default("storage.database_path", path_text(paths.db_path))?
        .set_default("storage.image_dir", path_text(paths.image_dir))?
        .set_default("storage.settings_path", path_text(paths.settings_path))?
        .set_default("http.connect_timeout_secs", DEFAULT_CONNECT_TIMEOUT_SECS)?
        .set_default("http.request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)?
        .set_default("log.dir", path_text(paths.logs_dir))?
        .set_default("log.level", DEFAULT_LOG_LEVEL)?)
}

fn path_text(path: PathBuf) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .source(Some(source))
    }

    #[test]
    fn defaults_live_under_the_data_root() {
        let config = build_config(Path::new("/data/VanningHandy"), None, env(&[])).unwrap();

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(
            config.storage.database_path,
            PathBuf::from("/data/VanningHandy/db/handy.db")
        );
        assert_eq!(config.storage.image_dir, PathBuf::from("/data/VanningHandy/images"));
        assert_eq!(config.http.connect_timeout_secs, 20);
        assert_eq!(config.http.request_timeout_secs, 120);
        assert_eq!(config.log.dir, PathBuf::from("/data/VanningHandy/logs"));
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
            endpoint = "http://backoffice.local/SvcHandy.asmx"

            [http]
            request_timeout_secs = 45
            "#
        )
        .unwrap();

        let config = build_config(Path::new("/data"), Some(file.path()), env(&[])).unwrap();

        assert_eq!(config.endpoint, "http://backoffice.local/SvcHandy.asmx");
        assert_eq!(config.http.request_timeout_secs, 45);
        assert_eq!(config.http.connect_timeout_secs, 20);
    }

    #[test]
    fn environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "[log]\nlevel = \"warn\"\n").unwrap();

        let config = build_config(
            Path::new("/data"),
            Some(file.path()),
            env(&[
                ("VANNING__LOG__LEVEL", "debug"),
                ("VANNING__HTTP__CONNECT_TIMEOUT_SECS", "5"),
            ]),
        )
        .unwrap();

        assert_eq!(config.log.level, "debug");
        assert_eq!(config.http.connect_timeout_secs, 5);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let config = build_config(
            Path::new("/data"),
            Some(Path::new("/nonexistent/vanning.toml")),
            env(&[]),
        )
        .unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn malformed_file_is_reported() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "endpoint = [").unwrap();

        let err = build_config(Path::new("/data"), Some(file.path()), env(&[])).unwrap_err();
        assert!(err.to_string().contains("Failed to read configuration"));
    }
}
