//! Median-of-N aggregation.
//!
//! Each case runs `median_of` times to damp timing noise; the buffered runs
//! reduce to the exact middle element under a worst-last ordering, so a
//! single outlier (fast or slow, or a flaky failure) cannot become the
//! representative result.

use crate::error::JudgeError;
use crate::types::JudgeResult;
use std::cmp::Ordering;

/// Buffers the repeated runs of every case and reduces each to its median.
pub struct MedianBuffer {
    median_of: usize,
    buffers: Vec<Vec<JudgeResult>>,
}

impl MedianBuffer {
    /// `median_of` must be odd; an even value is a configuration error
    /// rejected before judging starts.
    pub fn new(num_cases: usize, median_of: usize) -> Result<Self, JudgeError> {
        if median_of % 2 == 0 {
            return Err(JudgeError::EvenMedian(median_of));
        }
        Ok(Self {
            median_of,
            buffers: vec![Vec::new(); num_cases],
        })
    }

    /// Number of runs buffered so far for a case.
    pub fn run_count(&self, case_id: usize) -> usize {
        self.buffers[case_id].len()
    }

    /// Buffers one run; returns the case's median once all its runs arrived.
    pub fn push(&mut self, result: JudgeResult) -> Option<JudgeResult> {
        let buffer = &mut self.buffers[result.case_id];
        buffer.push(result);
        if buffer.len() < self.median_of {
            return None;
        }
        buffer.sort_by(compare_runs);
        Some(buffer[self.median_of / 2].clone())
    }
}

/// Passed runs rank before failed runs regardless of time; within the same
/// outcome, faster runs rank first.
fn compare_runs(a: &JudgeResult, b: &JudgeResult) -> Ordering {
    match b.passed.cmp(&a.passed) {
        Ordering::Equal => a.time.partial_cmp(&b.time).unwrap_or(Ordering::Equal),
        other => other,
    }
}
