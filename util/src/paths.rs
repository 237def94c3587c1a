//! Storage and output path helpers.

use common::config;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Root directory for persisted submissions, from `config::storage_root()`.
pub fn storage_root() -> PathBuf {
    PathBuf::from(config::storage_root())
}

/// One homework's submission directory: `{STORAGE_ROOT}/{homework}`
pub fn homework_storage_dir(homework: &str) -> PathBuf {
    storage_root().join(homework)
}

/// A user's persisted submission: `{STORAGE_ROOT}/{homework}/{user}.json`
pub fn submission_path(homework: &str, user: &str) -> PathBuf {
    homework_storage_dir(homework).join(format!("{user}.json"))
}

/// Root directory for rendered board snapshots, from `config::output_root()`.
pub fn output_root() -> PathBuf {
    PathBuf::from(config::output_root())
}

/// One homework's rendered board snapshot: `{OUTPUT_ROOT}/{homework}/board.json`
pub fn board_snapshot_path(homework: &str) -> PathBuf {
    output_root().join(homework).join("board.json")
}
