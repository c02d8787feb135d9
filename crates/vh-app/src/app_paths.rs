use std::path::{Path, PathBuf};

/// Concrete file locations under one data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub db_path: PathBuf,
    pub image_dir: PathBuf,
    pub settings_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppPaths {
    pub fn from_data_root(root: &Path) -> Self {
        Self {
            db_path: root.join("db").join("handy.db"),
            image_dir: root.join("images"),
            settings_path: root.join("settings.json"),
            logs_dir: root.join("logs"),
        }
    }
}
