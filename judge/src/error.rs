//! Judge error types.
//!
//! These cover the fatal and build-aborting classes only. Per-case failures
//! never surface here — they degrade to an `internal error` verdict on the
//! affected case so sibling cases keep running.

use std::fmt;

#[derive(Debug)]
pub enum JudgeError {
    /// `median_of` must be odd; judging refuses to start otherwise.
    EvenMedian(usize),
    /// A mandatory source file is absent; the run is aborted.
    MissingMandatory(String),
    /// The build scratch directory could not be created.
    Workspace(String),
    /// The build tool failed or could not be invoked.
    BuildFailed(String),
    /// The build reported success but the target artifact does not exist.
    MissingArtifact(String),
}

impl fmt::Display for JudgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JudgeError::EvenMedian(n) => {
                write!(f, "refusing to pick a median from an even number of runs ({n})")
            }
            JudgeError::MissingMandatory(name) => {
                write!(f, "mandatory file not found: {name}")
            }
            JudgeError::Workspace(message) => {
                write!(f, "failed to create build directory: {message}")
            }
            JudgeError::BuildFailed(message) => write!(f, "cannot compile executable: {message}"),
            JudgeError::MissingArtifact(target) => {
                write!(f, "compilation succeeded but {target} wasn't generated")
            }
        }
    }
}

impl std::error::Error for JudgeError {}
