//! Board snapshot rendering.
//!
//! Every accepted update re-renders the homework's board into
//! `out/<homework>/board.json`, using the same staging-rename discipline as
//! submission storage. The snapshot is what the presentation layer consumes;
//! the service also serves the same rows over HTTP.

use crate::board::BoardEntry;
use crate::ranking::{self, TableRow};
use crate::storage;
use chrono::{DateTime, Utc};
use common::config;
use serde::Serialize;
use std::time::Instant;
use util::homework::Homework;
use util::paths;

#[derive(Serialize)]
struct BoardSnapshot<'a> {
    homework: &'a str,
    generated_at: DateTime<Utc>,
    rows: &'a [TableRow],
}

/// Renders the ranked board rows to the homework's snapshot file.
///
/// Failures are logged, never propagated — a render problem must not undo or
/// fail the board update that triggered it.
pub fn render_board(homework: &Homework, entries: &[BoardEntry]) {
    let started = Instant::now();
    let rows = ranking::board_rows(homework, entries, &config::ranked_prefix());
    let snapshot = BoardSnapshot {
        homework: &homework.name,
        generated_at: Utc::now(),
        rows: &rows,
    };

    let path = paths::board_snapshot_path(&homework.name);
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::error!(dir = %parent.display(), error = %e, "failed to create output directory");
            return;
        }
    }

    let bytes = match serde_json::to_vec_pretty(&snapshot) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(homework = %homework.name, error = %e, "failed to serialize board snapshot");
            return;
        }
    };

    let staging = storage::staging_path(&path);
    let written = std::fs::write(&staging, &bytes).and_then(|_| std::fs::rename(&staging, &path));
    if let Err(e) = written {
        tracing::error!(file = %path.display(), error = %e, "failed to write board snapshot");
        return;
    }

    tracing::info!(
        homework = %homework.name,
        submissions = entries.len(),
        elapsed = ?started.elapsed(),
        "rendered board"
    );
}
