//! Crash-safe persistence of submissions.
//!
//! Each user's best submission lives at `storage/<homework>/<user>.json`.
//! Writes go to a staging file next to the final path and are renamed over
//! it, so a reader only ever observes a complete file: absent, the previous
//! version, or the new version — never a torn write.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use util::paths;
use util::submission::StoredSubmission;

#[derive(Debug)]
pub enum StorageError {
    /// The submission could not be serialized.
    Serialize(String),
    /// Creating, writing or renaming the file failed.
    Io(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Serialize(message) => {
                write!(f, "cannot serialize submission: {message}")
            }
            StorageError::Io(message) => write!(f, "storage i/o failed: {message}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// The staging path: the final path with a trailing `-`.
///
/// The suffix lands after `.json`, so a staging file left behind by a crash
/// never matches the `*.json` scan below.
pub(crate) fn staging_path(final_path: &Path) -> PathBuf {
    let mut name = final_path.as_os_str().to_os_string();
    name.push("-");
    PathBuf::from(name)
}

/// Atomically persists one user's best submission.
pub fn store_submission(homework: &str, submission: &StoredSubmission) -> Result<(), StorageError> {
    let bytes =
        serde_json::to_vec(submission).map_err(|e| StorageError::Serialize(e.to_string()))?;

    let final_path = paths::submission_path(homework, &submission.user);
    if let Some(parent) = final_path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let staging = staging_path(&final_path);
    fs::write(&staging, &bytes).map_err(io_error)?;
    fs::rename(&staging, &final_path).map_err(io_error)?;
    Ok(())
}

/// Scans a homework's storage directory for persisted submissions.
///
/// Creates the directory if missing. A corrupt or unreadable file is logged
/// and skipped, never fatal; files load in name order for deterministic
/// board reconstruction.
pub fn scan_submissions(homework: &str) -> Result<Vec<StoredSubmission>, StorageError> {
    let dir = paths::homework_storage_dir(homework);
    fs::create_dir_all(&dir).map_err(io_error)?;

    let mut files: Vec<_> = fs::read_dir(&dir)
        .map_err(io_error)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();
    files.sort();

    let mut loaded = Vec::new();
    for path in files {
        match read_submission(&path) {
            Ok(submission) => loaded.push(submission),
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "skipping stored submission");
            }
        }
    }
    Ok(loaded)
}

fn read_submission(path: &Path) -> Result<StoredSubmission, StorageError> {
    let bytes = fs::read(path).map_err(io_error)?;
    serde_json::from_slice(&bytes).map_err(|e| StorageError::Serialize(e.to_string()))
}

fn io_error(e: std::io::Error) -> StorageError {
    StorageError::Io(e.to_string())
}
