//! Bounded worker pool.
//!
//! A fixed set of workers consumes judge requests from a shared queue and
//! publishes results to a response channel. Emission order is case-major,
//! repetition-minor, but completion order is unordered — consumers must rely
//! on the `case_id` tag, never on arrival order.

use crate::supervisor::CaseRunner;
use crate::types::{JudgeRequest, JudgeResult};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;

/// Number of concurrent workers per judge run. Bounds live processes at
/// `DEFAULT_WORKERS` regardless of the number of cases.
pub const DEFAULT_WORKERS: usize = 4;

/// A fixed-size pool of long-lived workers executing judge requests.
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Enqueues `requests` and spawns the workers and producer.
    ///
    /// Returns the response channel; it closes once every request has been
    /// answered or abandoned. After cancellation workers stop picking up
    /// queued requests, but requests already in flight run to whatever end
    /// the runner gives them.
    pub fn dispatch(
        &self,
        runner: Arc<dyn CaseRunner>,
        requests: Vec<JudgeRequest>,
        cancel: CancellationToken,
    ) -> mpsc::Receiver<JudgeResult> {
        let capacity = requests.len().max(1);
        let (request_tx, request_rx) = mpsc::channel::<JudgeRequest>(capacity);
        let (response_tx, response_rx) = mpsc::channel::<JudgeResult>(capacity);
        let request_rx = Arc::new(Mutex::new(request_rx));

        for _ in 0..self.workers {
            let request_rx = Arc::clone(&request_rx);
            let response_tx = response_tx.clone();
            let runner = Arc::clone(&runner);
            let cancel = cancel.clone();
            tokio::spawn(async move {
                loop {
                    if cancel.is_cancelled() {
                        break;
                    }
                    let request = { request_rx.lock().await.recv().await };
                    let Some(request) = request else { break };
                    let result = runner.run_case(request, cancel.clone()).await;
                    if response_tx.send(result).await.is_err() {
                        break;
                    }
                }
            });
        }

        let producer_cancel = cancel.clone();
        tokio::spawn(async move {
            for request in requests {
                tokio::select! {
                    _ = producer_cancel.cancelled() => break,
                    sent = request_tx.send(request) => {
                        if sent.is_err() {
                            break;
                        }
                    }
                }
            }
            // request_tx drops here; idle workers see the closed queue and exit.
        });

        response_rx
    }
}
