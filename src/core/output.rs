//! Artifact I/O: thin wrappers for writing and reading JSON and CSV files.

use serde::{de::DeserializeOwned, Serialize};
use std::{fs, io::Write, path::Path};

use crate::{error::SleeperError, Result};

/// Write a string to file, creating parent directories.
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Write an artifact, keeping the destination path on failure.
pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    write_string(path, contents).map_err(|source| SleeperError::Output {
        path: path.display().to_string(),
        source,
    })
}

pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_artifact(path, &json)
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Quote a CSV field unconditionally, doubling embedded quotes.
pub fn quote_csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
