//! Per-homework board state.
//!
//! The board owns the map of best-known submissions and hides its lock:
//! callers get exactly two operations, an atomic improve-only `update` and a
//! consistent `snapshot`. Entries are replaced whole, never mutated in place.

use crate::render;
use crate::score::{self, Score};
use crate::storage;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::Mutex;
use util::homework::Homework;
use util::submission::{StoredSubmission, Submission};

/// One user's best-known submission plus its recomputed score.
#[derive(Debug, Clone)]
pub struct BoardEntry {
    pub score: Score,
    pub submission: StoredSubmission,
}

/// Outcome of a board update.
///
/// Rejecting a submission that does not improve on the stored one is a
/// normal outcome, not an error; the variants render the operator-facing
/// transition messages.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Created(Score),
    Updated(Score, Score),
    NotUpdating(Score, Score),
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateOutcome::Created(new) => write!(f, "created {new}"),
            UpdateOutcome::Updated(old, new) => write!(f, "updated {old} --> {new}"),
            UpdateOutcome::NotUpdating(old, new) => write!(f, "not updating {old} -x-> {new}"),
        }
    }
}

/// The authoritative ranking state for one homework.
///
/// Lives for the process lifetime; boards are created at startup and never
/// removed.
pub struct Board {
    homework: Homework,
    submissions: Mutex<HashMap<String, BoardEntry>>,
}

impl Board {
    /// Creates an empty board.
    pub fn new(homework: Homework) -> Self {
        Self {
            homework,
            submissions: Mutex::new(HashMap::new()),
        }
    }

    /// Reconstructs a board by replaying the persisted submissions, then
    /// renders the initial snapshot.
    ///
    /// Scores are recomputed from the stored results — a persisted score
    /// field would never be trusted. Corrupt files were already skipped by
    /// the storage scan.
    pub fn load(homework: Homework) -> Self {
        let mut entries = HashMap::new();
        match storage::scan_submissions(&homework.name) {
            Ok(stored) => {
                for submission in stored {
                    let entry = BoardEntry {
                        score: score::calc_score(&homework, &submission.results),
                        submission,
                    };
                    entries.insert(entry.submission.user.clone(), entry);
                }
            }
            Err(e) => {
                tracing::error!(homework = %homework.name, error = %e, "failed to scan stored submissions");
            }
        }

        render::render_board(&homework, &Self::sorted_entries(&entries));
        Self {
            homework,
            submissions: Mutex::new(entries),
        }
    }

    pub fn homework(&self) -> &Homework {
        &self.homework
    }

    /// Applies the improve-only update policy.
    ///
    /// The new score is computed and compared under the board lock; a better
    /// (or first) submission replaces the entry and is persisted before the
    /// lock drops. Rendering happens after, on the immutable snapshot, so
    /// the lock is never held across the render.
    pub async fn update(&self, submission: &Submission) -> UpdateOutcome {
        let new_score = score::calc_score(&self.homework, &submission.results);

        let (outcome, snapshot) = {
            let mut submissions = self.submissions.lock().await;
            let old_score = submissions.get(&submission.user).map(|entry| entry.score);

            if let Some(old_score) = old_score {
                if !new_score.better(&old_score) {
                    return UpdateOutcome::NotUpdating(old_score, new_score);
                }
            }

            let entry = BoardEntry {
                score: new_score,
                submission: StoredSubmission {
                    user: submission.user.clone(),
                    results: submission.results.clone(),
                },
            };
            if let Err(e) = storage::store_submission(&self.homework.name, &entry.submission) {
                // Memory and disk may diverge until the next successful
                // write for this user; the in-memory update stands.
                tracing::error!(
                    homework = %self.homework.name,
                    user = %submission.user,
                    error = %e,
                    "failed to store submission"
                );
            }
            submissions.insert(submission.user.clone(), entry);

            let outcome = match old_score {
                None => UpdateOutcome::Created(new_score),
                Some(old_score) => UpdateOutcome::Updated(old_score, new_score),
            };
            (outcome, Self::sorted_entries(&submissions))
        };

        render::render_board(&self.homework, &snapshot);
        outcome
    }

    /// An immutable copy of the current entries, sorted by user name for
    /// deterministic downstream iteration.
    pub async fn snapshot(&self) -> Vec<BoardEntry> {
        Self::sorted_entries(&*self.submissions.lock().await)
    }

    fn sorted_entries(map: &HashMap<String, BoardEntry>) -> Vec<BoardEntry> {
        let mut entries: Vec<_> = map.values().cloned().collect();
        entries.sort_by(|a, b| a.submission.user.cmp(&b.submission.user));
        entries
    }
}
