//! Core judge data types.

use colored::Colorize;
use std::path::PathBuf;
use util::homework::{Homework, SourceFile};
use util::submission::CaseResult;

/// Verdict used for every judge-side failure (spawn, wait, parse, non-zero
/// runner exit). Runner-side verdicts come from the runner itself.
pub const INTERNAL_ERROR: &str = "internal error";

/// The execution plan for one judge run, derived from a homework descriptor
/// plus runtime options.
#[derive(Debug, Clone)]
pub struct Rule {
    pub target: String,
    pub mandatory: Vec<String>,
    pub optional: Vec<SourceFile>,
    pub runner: String,
    pub skip_compile: bool,
    pub median_of: usize,
    pub debug: bool,
}

impl Rule {
    /// Builds the default rule for a homework: every descriptor file is staged
    /// as optional-with-fallback, the target and runner carry over.
    pub fn from_homework(homework: &Homework, median_of: usize, debug: bool) -> Self {
        Self {
            target: homework.target.clone(),
            mandatory: Vec::new(),
            optional: homework.files.clone(),
            runner: homework.runner.clone(),
            skip_compile: false,
            median_of,
            debug,
        }
    }
}

/// One unit of dispatchable work: a single run of a single case.
///
/// The same case is emitted `median_of` times with the same `case_id`.
#[derive(Debug, Clone)]
pub struct JudgeRequest {
    pub case_id: usize,
    pub case_name: String,
    pub executable: PathBuf,
    pub runner: String,
    pub debug: bool,
}

/// The outcome of a single run of a single case.
///
/// `case_id` never crosses the runner protocol; it exists so responses can be
/// routed back to the correct case slot despite out-of-order completion.
#[derive(Debug, Clone)]
pub struct JudgeResult {
    pub case_id: usize,
    pub case_name: String,
    pub passed: bool,
    pub time: f64,
    pub verdict: String,
    pub details: String,
}

impl JudgeResult {
    /// The subset transmitted to the scoreboard and persisted.
    pub fn to_case_result(&self) -> CaseResult {
        CaseResult {
            case: self.case_name.clone(),
            passed: self.passed,
            time: self.time,
            verdict: self.verdict.clone(),
        }
    }

    /// Colored one-line description for the operator stream.
    pub fn describe(&self) -> String {
        let verdict = if self.passed {
            self.verdict.green().to_string()
        } else {
            self.verdict.red().to_string()
        };
        if self.details.is_empty() {
            verdict
        } else {
            format!("{verdict}: {}", self.details)
        }
    }
}
