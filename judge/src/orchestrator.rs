//! Judge orchestration.
//!
//! Ties the build stage, the worker pool and the median aggregator together
//! under one cancellation token, streaming verdict lines to the operator as
//! runs complete.

use crate::build::Builder;
use crate::error::JudgeError;
use crate::median::MedianBuffer;
use crate::pool::{DEFAULT_WORKERS, WorkerPool};
use crate::supervisor::{CaseRunner, ProcessSupervisor};
use crate::types::{JudgeRequest, JudgeResult, Rule};
use common::config;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use util::submission::CaseResult;

/// Judges every case of `rule` and returns the per-case median results.
///
/// Build failure aborts with an error and no results — the caller must not
/// submit in that situation. Cancellation mid-run returns the medians
/// completed so far; the missing cases are reported as incomplete, not as
/// failures.
pub async fn judge(
    rule: &Rule,
    cases: &[String],
    cancel: CancellationToken,
) -> Result<Vec<CaseResult>, JudgeError> {
    judge_with(rule, cases, cancel, Arc::new(ProcessSupervisor)).await
}

/// Same as [`judge`], with an injectable case runner.
pub async fn judge_with(
    rule: &Rule,
    cases: &[String],
    cancel: CancellationToken,
    runner: Arc<dyn CaseRunner>,
) -> Result<Vec<CaseResult>, JudgeError> {
    let mut median = MedianBuffer::new(cases.len(), rule.median_of)?;

    // The scratch directory must stay alive until every run has finished;
    // dropping the handle removes the tree.
    let mut workspace = None;
    let executable = if rule.skip_compile {
        PathBuf::from(&rule.target)
    } else {
        let work_root = config::judge_work_root();
        let dir = tempfile::Builder::new()
            .prefix(".judge.")
            .tempdir_in(&work_root)
            .map_err(|e| JudgeError::Workspace(format!("{work_root}: {e}")))?;
        let artifact = Builder::new().build(rule, dir.path()).await?;
        workspace = Some(dir);
        artifact
    };

    let requests = build_requests(rule, cases, &executable);
    let expected = requests.len();
    let mut responses =
        WorkerPool::new(DEFAULT_WORKERS).dispatch(runner, requests, cancel.clone());

    let case_width = cases.iter().map(|name| name.len()).max().unwrap_or(0);
    let hint_width = rule.median_of.to_string().len();

    let mut results = Vec::with_capacity(cases.len());
    for _ in 0..expected {
        let response = tokio::select! {
            _ = cancel.cancelled() => break,
            response = responses.recv() => match response {
                Some(response) => response,
                None => break,
            },
        };

        if rule.median_of > 1 {
            let run = median.run_count(response.case_id) + 1;
            print_result(&response, &format!("#{run:0hint_width$}"), case_width);
            if let Some(selected) = median.push(response) {
                print_result(&selected, &" ".repeat(hint_width + 1), case_width);
                results.push(selected.to_case_result());
            }
        } else {
            print_result(&response, "", case_width);
            results.push(response.to_case_result());
        }
    }

    if results.len() < cases.len() {
        tracing::warn!(
            completed = results.len(),
            total = cases.len(),
            "judging incomplete"
        );
        eprintln!(
            "Judging incomplete: {} of {} cases finished",
            results.len(),
            cases.len()
        );
    }

    if let Some(dir) = workspace {
        eprintln!("Removing temporary directory {}", dir.path().display());
    }

    Ok(results)
}

/// Case-major, repetition-minor emission order.
fn build_requests(rule: &Rule, cases: &[String], executable: &Path) -> Vec<JudgeRequest> {
    let mut requests = Vec::with_capacity(cases.len() * rule.median_of);
    for (case_id, case_name) in cases.iter().enumerate() {
        for _ in 0..rule.median_of {
            requests.push(JudgeRequest {
                case_id,
                case_name: case_name.clone(),
                executable: executable.to_path_buf(),
                runner: rule.runner.clone(),
                debug: rule.debug,
            });
        }
    }
    requests
}

fn print_result(result: &JudgeResult, hint: &str, case_width: usize) {
    eprintln!(
        "{:>case_width$}{hint} {:7.2}   {}",
        result.case_name,
        result.time,
        result.describe()
    );
}
