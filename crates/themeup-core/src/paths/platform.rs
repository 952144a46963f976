//! Platform-specific data root resolution.

use std::env;
use std::fs;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = crate::settings::env_keys::DATA_DIR;

/// Get the root directory for application data (database, `.env`).
///
/// Resolution order:
/// 1. `THEMEUP_DATA_DIR` environment variable
/// 2. System data directory (e.g., `~/.local/share/themeup`)
///
/// The directory is created if missing.
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = match env::var(DATA_DIR_ENV) {
        Ok(raw) if !raw.trim().is_empty() => normalize_user_path(&raw)?,
        _ => dirs::data_local_dir()
            .ok_or(PathError::NoDataDir)?
            .join("themeup"),
    };

    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}

/// Normalize a user-provided path, expanding `~` and making it absolute.
fn normalize_user_path(raw: &str) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let expanded = if trimmed == "~" {
        dirs::home_dir().ok_or(PathError::NoHomeDir)?
    } else if let Some(rest) = trimmed.strip_prefix("~/") {
        dirs::home_dir().ok_or(PathError::NoHomeDir)?.join(rest)
    } else {
        PathBuf::from(trimmed)
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(expanded))
            .map_err(|e| PathError::CurrentDirError(e.to_string()))
    }
}
