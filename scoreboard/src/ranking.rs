//! Ranking and highlight engine.
//!
//! Produces the ordered, cell-annotated view of a board's entries. Rows are
//! transient: rebuilt on every render, never persisted, never shared across
//! renders.

use crate::board::BoardEntry;
use crate::score::Score;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use util::homework::Homework;
use util::submission::CaseResult;

/// A passing time within this many seconds of the ranked minimum counts as
/// "best" for highlighting.
pub const BEST_TOLERANCE: f64 = 0.1;

/// One rendered cell; `result` is absent when the user never submitted the
/// case.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TableCell {
    pub result: Option<CaseResult>,
    pub best: bool,
}

impl TableCell {
    /// Display class consumed by the presentation layer. "best" overrides
    /// the normal failed/empty/default classes.
    pub fn class(&self) -> &'static str {
        if self.best {
            return "best";
        }
        match &self.result {
            None => "empty",
            Some(result) if !result.passed => "failed",
            Some(_) => "",
        }
    }

    /// Cell text: the case time, or a dash when absent.
    pub fn value(&self) -> String {
        match &self.result {
            None => "—".to_string(),
            Some(result) => format!("{:.2}", result.time),
        }
    }

    /// Hover text: the verdict, or a placeholder when absent.
    pub fn title(&self) -> &str {
        match &self.result {
            None => "not submitted",
            Some(result) => &result.verdict,
        }
    }
}

/// One board row: a user's score plus one cell per homework case.
#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub user: String,
    /// `None` for users outside the ranked subpopulation.
    pub rank: Option<usize>,
    pub score: Score,
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Rank text: the number, or an em dash for unranked users.
    pub fn rank_text(&self) -> String {
        match self.rank {
            Some(rank) => rank.to_string(),
            None => "—".to_string(),
        }
    }
}

/// Whether a user belongs to the ranked subpopulation. An empty prefix ranks
/// everyone.
fn is_ranked(user: &str, ranked_prefix: &str) -> bool {
    user.starts_with(ranked_prefix)
}

/// Builds the ordered, annotated view of a board's entries.
///
/// Rows sort best-first; the sort is stable, so equal scores keep the order
/// of `entries` and renders stay deterministic. Rank numbers and best-time
/// highlighting only consider the ranked subpopulation.
pub fn board_rows(homework: &Homework, entries: &[BoardEntry], ranked_prefix: &str) -> Vec<TableRow> {
    let case_index: HashMap<&str, usize> = homework
        .cases
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut rows: Vec<TableRow> = entries
        .iter()
        .map(|entry| {
            let mut cells = vec![TableCell::default(); homework.cases.len()];
            for result in &entry.submission.results {
                if let Some(&i) = case_index.get(result.case.as_str()) {
                    cells[i].result = Some(result.clone());
                }
            }
            TableRow {
                user: entry.submission.user.clone(),
                rank: None,
                score: entry.score,
                cells,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        if a.score.better(&b.score) {
            Ordering::Less
        } else if b.score.better(&a.score) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    });

    let mut rank = 0;
    for row in rows.iter_mut() {
        if is_ranked(&row.user, ranked_prefix) {
            rank += 1;
            row.rank = Some(rank);
        }
    }

    for case_id in 0..homework.cases.len() {
        let mut best = f64::INFINITY;
        for row in rows.iter() {
            if !is_ranked(&row.user, ranked_prefix) {
                continue;
            }
            if let Some(result) = &row.cells[case_id].result {
                if result.passed && result.time < best {
                    best = result.time;
                }
            }
        }
        for row in rows.iter_mut() {
            if !is_ranked(&row.user, ranked_prefix) {
                continue;
            }
            if let Some(result) = &row.cells[case_id].result {
                if result.passed && result.time - BEST_TOLERANCE < best {
                    row.cells[case_id].best = true;
                }
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::calc_score;
    use util::submission::StoredSubmission;

    fn homework(cases: &[&str]) -> Homework {
        Homework {
            name: "hw".to_string(),
            target: "hw".to_string(),
            runner: "runner".to_string(),
            files: Vec::new(),
            penalty_time: 10.0,
            cases: cases.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn entry(hw: &Homework, user: &str, results: Vec<CaseResult>) -> BoardEntry {
        BoardEntry {
            score: calc_score(hw, &results),
            submission: StoredSubmission {
                user: user.to_string(),
                results,
            },
        }
    }

    fn passed(case: &str, time: f64) -> CaseResult {
        CaseResult {
            case: case.to_string(),
            passed: true,
            time,
            verdict: "accepted".to_string(),
        }
    }

    fn failed(case: &str) -> CaseResult {
        CaseResult {
            case: case.to_string(),
            passed: false,
            time: 0.0,
            verdict: "wrong answer".to_string(),
        }
    }

    #[test]
    fn rows_sort_best_first() {
        let hw = homework(&["a", "b"]);
        let entries = vec![
            entry(&hw, "one_pass", vec![passed("a", 1.0)]),
            entry(&hw, "two_pass", vec![passed("a", 5.0), passed("b", 5.0)]),
        ];

        let rows = board_rows(&hw, &entries, "");
        assert_eq!(rows[0].user, "two_pass");
        assert_eq!(rows[0].rank, Some(1));
        assert_eq!(rows[1].user, "one_pass");
        assert_eq!(rows[1].rank, Some(2));
    }

    #[test]
    fn equal_scores_keep_entry_order() {
        let hw = homework(&["a"]);
        let entries = vec![
            entry(&hw, "alice", vec![passed("a", 2.0)]),
            entry(&hw, "bob", vec![passed("a", 2.0)]),
        ];

        let rows = board_rows(&hw, &entries, "");
        assert_eq!(rows[0].user, "alice");
        assert_eq!(rows[1].user, "bob");
    }

    #[test]
    fn only_prefixed_users_receive_ranks() {
        let hw = homework(&["a"]);
        let entries = vec![
            entry(&hw, "staff_tom", vec![passed("a", 0.5)]),
            entry(&hw, "stu01", vec![passed("a", 1.0)]),
            entry(&hw, "stu02", vec![passed("a", 2.0)]),
        ];

        let rows = board_rows(&hw, &entries, "stu");
        assert_eq!(rows[0].user, "staff_tom");
        assert_eq!(rows[0].rank, None);
        assert_eq!(rows[0].rank_text(), "—");
        assert_eq!(rows[1].rank, Some(1));
        assert_eq!(rows[2].rank, Some(2));
    }

    #[test]
    fn best_highlight_uses_ranked_minimum_with_tolerance() {
        let hw = homework(&["a"]);
        let entries = vec![
            // Unranked user is fastest but must not set the bar.
            entry(&hw, "staff_tom", vec![passed("a", 0.2)]),
            entry(&hw, "stu01", vec![passed("a", 1.0)]),
            entry(&hw, "stu02", vec![passed("a", 1.05)]),
            entry(&hw, "stu03", vec![passed("a", 1.3)]),
        ];

        let rows = board_rows(&hw, &entries, "stu");
        let cell = |user: &str| {
            rows.iter()
                .find(|row| row.user == user)
                .map(|row| &row.cells[0])
                .unwrap()
        };

        assert!(!cell("staff_tom").best);
        assert!(cell("stu01").best);
        assert!(cell("stu02").best, "within 0.1 of the minimum");
        assert!(!cell("stu03").best);
    }

    #[test]
    fn cell_classes_cover_all_states() {
        let hw = homework(&["a", "b", "c"]);
        let entries = vec![entry(&hw, "stu01", vec![passed("a", 1.0), failed("b")])];

        let rows = board_rows(&hw, &entries, "stu");
        assert_eq!(rows[0].cells[0].class(), "best");
        assert_eq!(rows[0].cells[1].class(), "failed");
        assert_eq!(rows[0].cells[1].title(), "wrong answer");
        assert_eq!(rows[0].cells[2].class(), "empty");
        assert_eq!(rows[0].cells[2].value(), "—");
        assert_eq!(rows[0].cells[2].title(), "not submitted");
    }
}
