//! Scoring engine.
//!
//! A pure mapping from a homework plus a set of case results to a comparable
//! score. Scores are never persisted; they are recomputed on every load and
//! update so a stored score can never drift from its results.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use util::homework::Homework;
use util::submission::CaseResult;

/// A comparable summary of one submission against one homework.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Score {
    pub num_passed: usize,
    pub total_time: f64,
    pub penalty_time: f64,
}

impl Score {
    /// Whether this score ranks strictly above `other`.
    ///
    /// Only `num_passed` (descending) and `total_time` (ascending) take
    /// part. `penalty_time` is computed and displayed but deliberately not
    /// compared.
    pub fn better(&self, other: &Score) -> bool {
        if self.num_passed == other.num_passed {
            return self.total_time < other.total_time;
        }
        self.num_passed > other.num_passed
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} {:.2}}}", self.num_passed, self.total_time)
    }
}

/// Derives a submission's score against a homework.
///
/// Only the homework's own cases count; results for unknown case names are
/// ignored. When a result set holds several entries for one case, the last
/// passing one wins. Every case without a passing result adds the homework's
/// penalty.
pub fn calc_score(homework: &Homework, results: &[CaseResult]) -> Score {
    let case_index: HashMap<&str, usize> = homework
        .cases
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut passing_times: Vec<Option<f64>> = vec![None; homework.cases.len()];
    for result in results {
        let Some(&i) = case_index.get(result.case.as_str()) else {
            continue;
        };
        if result.passed {
            passing_times[i] = Some(result.time);
        }
    }

    let mut score = Score::default();
    for time in passing_times {
        match time {
            Some(time) => {
                score.num_passed += 1;
                score.total_time += time;
            }
            None => score.penalty_time += homework.penalty_time,
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn homework(cases: &[&str], penalty_time: f64) -> Homework {
        Homework {
            name: "hw".to_string(),
            target: "hw".to_string(),
            runner: "runner".to_string(),
            files: Vec::new(),
            penalty_time,
            cases: cases.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn result(case: &str, passed: bool, time: f64) -> CaseResult {
        CaseResult {
            case: case.to_string(),
            passed,
            time,
            verdict: if passed { "accepted" } else { "wrong answer" }.to_string(),
        }
    }

    #[test]
    fn counts_passing_cases_and_penalties() {
        let hw = homework(&["a", "b"], 10.0);
        let score = calc_score(&hw, &[result("a", true, 2.0), result("b", false, 1.0)]);
        assert_eq!(score.num_passed, 1);
        assert_eq!(score.total_time, 2.0);
        assert_eq!(score.penalty_time, 10.0);
    }

    #[test]
    fn is_independent_of_result_ordering() {
        let hw = homework(&["a", "b", "c"], 5.0);
        let mut results = vec![
            result("c", true, 3.0),
            result("a", true, 1.0),
            result("b", false, 9.0),
        ];
        let forward = calc_score(&hw, &results);
        results.reverse();
        assert_eq!(calc_score(&hw, &results), forward);
    }

    #[test]
    fn ignores_unknown_cases() {
        let hw = homework(&["a"], 0.0);
        let score = calc_score(&hw, &[result("a", true, 1.0), result("ghost", true, 0.1)]);
        assert_eq!(score.num_passed, 1);
        assert_eq!(score.total_time, 1.0);
    }

    #[test]
    fn duplicate_results_keep_the_last_passing_entry() {
        let hw = homework(&["a"], 0.0);
        let score = calc_score(
            &hw,
            &[
                result("a", true, 4.0),
                result("a", true, 2.0),
                result("a", false, 1.0),
            ],
        );
        // The failed duplicate does not erase the earlier pass.
        assert_eq!(score.num_passed, 1);
        assert_eq!(score.total_time, 2.0);
    }

    #[test]
    fn better_prefers_more_passes_then_less_time() {
        let more_passes = Score {
            num_passed: 2,
            total_time: 100.0,
            penalty_time: 0.0,
        };
        let fewer_passes = Score {
            num_passed: 1,
            total_time: 1.0,
            penalty_time: 0.0,
        };
        assert!(more_passes.better(&fewer_passes));
        assert!(!fewer_passes.better(&more_passes));

        let fast = Score {
            num_passed: 2,
            total_time: 3.0,
            penalty_time: 0.0,
        };
        let slow = Score {
            num_passed: 2,
            total_time: 4.0,
            penalty_time: 0.0,
        };
        assert!(fast.better(&slow));
        assert!(!slow.better(&fast));
        // Irreflexive: a score never beats itself.
        assert!(!fast.better(&fast));
    }

    /// Observed behavior kept on purpose: penalty time is display-only and
    /// does not participate in ranking.
    #[test]
    fn penalty_time_does_not_affect_ranking() {
        let heavy_penalty = Score {
            num_passed: 1,
            total_time: 2.0,
            penalty_time: 1000.0,
        };
        let light_penalty = Score {
            num_passed: 1,
            total_time: 2.5,
            penalty_time: 0.0,
        };
        assert!(heavy_penalty.better(&light_penalty));
    }

    #[test]
    fn display_omits_penalty() {
        let score = Score {
            num_passed: 3,
            total_time: 12.5,
            penalty_time: 30.0,
        };
        assert_eq!(score.to_string(), "{3 12.50}");
    }
}
