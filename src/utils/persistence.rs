//! JSON persistence helpers for files under ~/.fishy-fortune/.

use crate::constants::DATA_DIR_NAME;
use crate::error::PersistenceError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable that relocates the data directory.
pub const DATA_DIR_ENV: &str = "FISHY_FORTUNE_HOME";

/// Get the data directory path, creating it if needed.
///
/// Defaults to `~/.fishy-fortune/`; `FISHY_FORTUNE_HOME` overrides it.
pub fn data_dir() -> io::Result<PathBuf> {
    let dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(custom) => PathBuf::from(custom),
        None => dirs::home_dir()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "Could not determine home directory",
                )
            })?
            .join(DATA_DIR_NAME),
    };
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in the data directory.
pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    Ok(data_dir()?.join(filename))
}

/// Load a JSON file. `Ok(None)` when the file does not exist.
pub fn load_json<T: serde::de::DeserializeOwned>(
    path: &Path,
) -> Result<Option<T>, PersistenceError> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&json)?))
}

/// Write through a sibling temp file so a crash never leaves half a record.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)
}
