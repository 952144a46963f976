//! Database path resolution.

use std::path::PathBuf;

use super::error::PathError;
use super::platform::data_root;

/// File name of the local state database.
pub const DATABASE_FILE: &str = "themeup.db";

/// Get the path to the themeup state database (`<data_root>/themeup.db`).
pub fn database_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(DATABASE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::test_utils::{ENV_LOCK, EnvVarGuard};
    use tempfile::tempdir;

    #[test]
    fn test_database_lives_in_data_root() {
        let _lock = ENV_LOCK.lock().unwrap();
        let temp = tempdir().unwrap();
        let _env = EnvVarGuard::set("THEMEUP_DATA_DIR", temp.path().to_string_lossy().as_ref());

        let path = database_path().unwrap();

        assert_eq!(path, temp.path().join("themeup.db"));
    }
}
