//! Resolved paths for CLI introspection (`themeup paths`).

use std::path::PathBuf;

use super::{PathError, data_root, database_path, env_file_path};

/// All resolved paths captured in a single struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Root directory for application data
    pub data_root: PathBuf,
    /// Path to the `SQLite` state database
    pub database_path: PathBuf,
    /// Path to the persisted `.env` overrides
    pub env_file: PathBuf,
    /// Whether `THEMEUP_DATA_DIR` decided the data root
    pub data_root_overridden: bool,
}

impl ResolvedPaths {
    /// Resolve all paths using the current environment.
    pub fn resolve() -> Result<Self, PathError> {
        Ok(Self {
            data_root: data_root()?,
            database_path: database_path()?,
            env_file: env_file_path()?,
            data_root_overridden: std::env::var_os(super::DATA_DIR_ENV)
                .is_some_and(|v| !v.is_empty()),
        })
    }
}

impl std::fmt::Display for ResolvedPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "data_root = {}", self.data_root.display())?;
        writeln!(f, "database_path = {}", self.database_path.display())?;
        writeln!(f, "env_file = {}", self.env_file.display())?;
        write!(
            f,
            "data_root_source = {}",
            if self.data_root_overridden {
                super::DATA_DIR_ENV
            } else {
                "platform default"
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::test_utils::{ENV_LOCK, EnvVarGuard};
    use tempfile::tempdir;

    #[test]
    fn test_resolve_is_consistent_under_override() {
        let _lock = ENV_LOCK.lock().unwrap();
        let temp = tempdir().unwrap();
        let _env = EnvVarGuard::set("THEMEUP_DATA_DIR", temp.path().to_string_lossy().as_ref());

        let paths = ResolvedPaths::resolve().unwrap();

        assert_eq!(paths, ResolvedPaths::resolve().unwrap());
        assert!(paths.data_root_overridden);
        assert!(paths.database_path.starts_with(&paths.data_root));
        assert!(paths.env_file.starts_with(&paths.data_root));

        let output = paths.to_string();
        assert!(output.contains("database_path = "));
        assert!(output.contains("data_root_source = THEMEUP_DATA_DIR"));
    }
}
