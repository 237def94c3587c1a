//! Build stage.
//!
//! Stages the rule's source files into a scratch directory and invokes the
//! external build tool against the target. The stage gates judging: a missing
//! mandatory file, a failing build, or a missing artifact all abort the run
//! before any case executes.

use crate::error::JudgeError;
use crate::types::Rule;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Default external build tool; invoked as `<tool> -C <dir> <target>`.
pub const DEFAULT_BUILD_TOOL: &str = "ninja";

pub struct Builder {
    program: String,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        Self {
            program: DEFAULT_BUILD_TOOL.to_string(),
        }
    }

    /// Uses an alternative build program. Tests inject a stub here.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Stages the rule's sources into `dir` and builds the target.
    ///
    /// Returns the path of the built artifact. Success requires both a zero
    /// exit status and the artifact existing afterwards.
    pub async fn build(&self, rule: &Rule, dir: &Path) -> Result<PathBuf, JudgeError> {
        for name in &rule.mandatory {
            if !stage_file(name, "", dir) {
                return Err(JudgeError::MissingMandatory(name.clone()));
            }
        }
        for file in &rule.optional {
            if !stage_file(&file.name, &file.fallback, dir) {
                tracing::warn!(file = %file.name, "building without optional source file");
            }
        }

        eprintln!("Running: {} -C {} {}", self.program, dir.display(), rule.target);
        let output = Command::new(&self.program)
            .arg("-C")
            .arg(dir)
            .arg(&rule.target)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                JudgeError::BuildFailed(format!("could not invoke {}: {e}", self.program))
            })?;

        if !output.status.success() {
            eprint!("{}", String::from_utf8_lossy(&output.stdout));
            eprint!("{}", String::from_utf8_lossy(&output.stderr));
            return Err(JudgeError::BuildFailed(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }

        let artifact = dir.join(&rule.target);
        if !artifact.exists() {
            return Err(JudgeError::MissingArtifact(rule.target.clone()));
        }
        Ok(artifact)
    }
}

/// Copies `name` (or its fallback) into the build directory under the primary
/// file name. Any copy failure counts as the file being absent.
fn stage_file(name: &str, fallback: &str, dir: &Path) -> bool {
    let Some(staged_name) = Path::new(name).file_name() else {
        eprintln!("Looking for {name}: {}", "Not Found".red());
        return false;
    };
    let destination = dir.join(staged_name);

    if std::fs::copy(name, &destination).is_ok() {
        eprintln!("Looking for {name}: {}", "OK".green());
        return true;
    }
    if fallback.is_empty() {
        eprintln!("Looking for {name}: {}", "Not Found".red());
        return false;
    }
    eprintln!("Looking for {name}: {}", "Not Found".yellow());
    if std::fs::copy(fallback, &destination).is_ok() {
        eprintln!("Using fallback: {fallback}: {}", "OK".green());
        true
    } else {
        eprintln!("Using fallback: {fallback}: {}", "Failed".red());
        false
    }
}
