//! `.env` file utilities.
//!
//! Persisted overrides live in `<data_root>/.env` and are loaded by the CLI
//! at startup.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use super::error::PathError;
use super::platform::data_root;

/// Location of the `.env` file that stores user overrides.
pub fn env_file_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(".env"))
}

/// Persist a key=value pair into the `.env` file.
///
/// An existing entry for `key` is replaced in place (duplicates dropped);
/// otherwise the pair is appended.
pub fn persist_env_value(key: &str, value: &str) -> Result<(), PathError> {
    if key.is_empty() || key.contains(['=', '\n', '\r']) || key.trim() != key {
        return Err(PathError::InvalidEnvKey(key.to_string()));
    }
    if value.contains(['\n', '\r']) {
        return Err(PathError::InvalidEnvValue(key.to_string()));
    }

    let env_path = env_file_path()?;
    let env_err = |e: std::io::Error| PathError::EnvFileError {
        path: env_path.clone(),
        reason: e.to_string(),
    };

    let existing = if env_path.exists() {
        fs::read_to_string(&env_path).map_err(env_err)?
    } else {
        String::new()
    };

    let mut updated = false;
    let mut output: Vec<String> = Vec::new();

    for line in existing.lines() {
        match line.split_once('=') {
            Some((lhs, _)) if lhs.trim() == key => {
                if !updated {
                    output.push(format!("{key}={value}"));
                    updated = true;
                }
            }
            _ => output.push(line.to_string()),
        }
    }

    if !updated {
        output.push(format!("{key}={value}"));
    }

    let mut content = output.join("\n");
    content.push('\n');

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&env_path)
        .map_err(env_err)?;
    file.write_all(content.as_bytes()).map_err(env_err)?;

    Ok(())
}
