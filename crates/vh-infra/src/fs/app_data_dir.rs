use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "VanningHandy";

/// Root data directory of the terminal.
///
/// - macOS: ~/Library/Application Support/VanningHandy
/// - Windows: %APPDATA%\VanningHandy
/// - Linux: $XDG_DATA_HOME/VanningHandy or ~/.local/share/VanningHandy
///
/// Nothing is created here; callers create directories when they write.
/// File locations below the root are derived by `vh_app::AppPaths`.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir =
        get_platform_data_dir().context("Failed to get platform-specific data directory")?;

    Ok(base_dir.join(APP_DIR_NAME))
}

fn get_platform_data_dir() -> Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        if let Some(xdg_data_home) = std::env::var_os("XDG_DATA_HOME") {
            return Ok(PathBuf::from(xdg_data_home));
        }
    }

    dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Unable to get platform data directory"))
}
