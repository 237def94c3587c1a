//! Supervised execution of a single runner process.
//!
//! The runner is spawned as the leader of its own process group so that
//! timeout/cancellation signals reach every descendant it forks. Only stdout
//! is captured; it must carry the runner's structured report.

use crate::types::{INTERNAL_ERROR, JudgeRequest, JudgeResult};
use async_trait::async_trait;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use serde::Deserialize;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::{Instant, timeout};
use tokio_util::sync::CancellationToken;

/// How long a cancelled process group gets to exit after the graceful signal
/// before the whole group is forcefully killed.
pub const KILL_GRACE: Duration = Duration::from_secs(5);

/// The structured payload a runner must print on stdout.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RunnerReport {
    passed: bool,
    time: f64,
    verdict: String,
    #[serde(default)]
    details: String,
}

/// Executes one judge request to completion.
///
/// The worker pool only depends on this seam, so its scheduling and
/// cancellation behavior can be exercised with a fake runner in tests.
#[async_trait]
pub trait CaseRunner: Send + Sync + 'static {
    async fn run_case(&self, request: JudgeRequest, cancel: CancellationToken) -> JudgeResult;
}

/// Runs the external runner as a supervised child process.
///
/// Invocation: `runner [--debug] <case> <executable>`. Every failure mode on
/// the judge side (spawn, wait, non-zero exit, malformed stdout) degrades to
/// an `internal error` result carrying the elapsed wall time.
pub struct ProcessSupervisor;

#[async_trait]
impl CaseRunner for ProcessSupervisor {
    async fn run_case(&self, request: JudgeRequest, cancel: CancellationToken) -> JudgeResult {
        let started = Instant::now();

        let mut command = Command::new(&request.runner);
        if request.debug {
            command.arg("--debug");
        }
        command
            .arg(&request.case_name)
            .arg(&request.executable)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .process_group(0);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                return internal_error(&request, started, format!("could not start runner: {e}"));
            }
        };

        // The child leads its own group, so signalling the group id reaches
        // every process it spawned.
        let pgid = child.id().map(|pid| Pid::from_raw(pid as i32));

        let mut stdout = child.stdout.take();
        let drain = tokio::spawn(async move {
            let mut buffer = Vec::new();
            if let Some(out) = stdout.as_mut() {
                let _ = out.read_to_end(&mut buffer).await;
            }
            buffer
        });

        let wait = child.wait();
        tokio::pin!(wait);

        let status = tokio::select! {
            status = &mut wait => status,
            _ = cancel.cancelled() => {
                if let Some(pgid) = pgid {
                    let _ = signal::killpg(pgid, Signal::SIGTERM);
                }
                match timeout(KILL_GRACE, &mut wait).await {
                    Ok(status) => status,
                    Err(_) => {
                        if let Some(pgid) = pgid {
                            let _ = signal::killpg(pgid, Signal::SIGKILL);
                        }
                        (&mut wait).await
                    }
                }
            }
        };

        let output = drain.await.unwrap_or_default();

        let status = match status {
            Ok(status) => status,
            Err(e) => {
                return internal_error(&request, started, format!("could not execute runner: {e}"));
            }
        };
        if !status.success() {
            return internal_error(
                &request,
                started,
                format!("runner exited unsuccessfully: {status}"),
            );
        }

        match serde_json::from_slice::<RunnerReport>(&output) {
            Ok(report) => JudgeResult {
                case_id: request.case_id,
                case_name: request.case_name,
                passed: report.passed,
                time: report.time,
                verdict: report.verdict,
                details: report.details,
            },
            Err(e) => internal_error(&request, started, format!("runner output invalid: {e}")),
        }
    }
}

fn internal_error(request: &JudgeRequest, started: Instant, details: String) -> JudgeResult {
    JudgeResult {
        case_id: request.case_id,
        case_name: request.case_name.clone(),
        passed: false,
        time: started.elapsed().as_secs_f64(),
        verdict: INTERNAL_ERROR.to_string(),
        details,
    }
}
