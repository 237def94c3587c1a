//! Homework descriptors.
//!
//! One TOML file per homework lives in the config directory; the file stem is
//! the homework name. Missing keys decode to their zero values so minimal
//! descriptors stay valid, `target` falls back to the homework name, and the
//! case list is range-expanded on load.

use crate::case_range::{self, ExpandError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A source file the judge stages into the build directory, with an optional
/// fallback used when the primary name is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    pub name: String,
    #[serde(default)]
    pub fallback: String,
}

/// An immutable homework descriptor. One instance owns one board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Homework {
    pub name: String,
    pub target: String,
    pub runner: String,
    pub files: Vec<SourceFile>,
    pub penalty_time: f64,
    pub cases: Vec<String>,
}

/// `penalty_time` accepts both integer and float TOML encodings; both decode
/// to seconds. This leniency is part of the descriptor contract.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PenaltyTime {
    Int(i64),
    Float(f64),
}

impl Default for PenaltyTime {
    fn default() -> Self {
        PenaltyTime::Float(0.0)
    }
}

impl From<PenaltyTime> for f64 {
    fn from(value: PenaltyTime) -> f64 {
        match value {
            PenaltyTime::Int(seconds) => seconds as f64,
            PenaltyTime::Float(seconds) => seconds,
        }
    }
}

/// The on-disk TOML shape before name resolution and case expansion.
#[derive(Debug, Default, Deserialize)]
struct RawHomework {
    #[serde(default)]
    target: String,
    #[serde(default)]
    runner: String,
    #[serde(default)]
    files: Vec<SourceFile>,
    #[serde(default)]
    penalty_time: PenaltyTime,
    #[serde(default)]
    cases: Vec<String>,
}

#[derive(Debug)]
pub enum HomeworkError {
    /// The descriptor file could not be read.
    Io(String),
    /// The descriptor is not valid TOML or does not match the schema.
    Parse(String),
    /// A case name contains a malformed range expression.
    BadCase(ExpandError),
}

impl fmt::Display for HomeworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeworkError::Io(message) => write!(f, "cannot read homework descriptor: {message}"),
            HomeworkError::Parse(message) => write!(f, "invalid homework descriptor: {message}"),
            HomeworkError::BadCase(err) => write!(f, "invalid case name: {err}"),
        }
    }
}

impl std::error::Error for HomeworkError {}

impl From<ExpandError> for HomeworkError {
    fn from(err: ExpandError) -> Self {
        HomeworkError::BadCase(err)
    }
}

/// Loads a single homework descriptor from a TOML file.
pub fn load_homework<P: AsRef<Path>>(path: P) -> Result<Homework, HomeworkError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| HomeworkError::Io(format!("{}: {e}", path.display())))?;
    let raw: RawHomework = toml::from_str(&text)
        .map_err(|e| HomeworkError::Parse(format!("{}: {e}", path.display())))?;

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let target = if raw.target.is_empty() {
        name.clone()
    } else {
        raw.target
    };
    let cases = case_range::expand_all(&raw.cases)?;

    Ok(Homework {
        name,
        target,
        runner: raw.runner,
        files: raw.files,
        penalty_time: raw.penalty_time.into(),
        cases,
    })
}

/// Loads every `*.toml` descriptor in a directory, sorted by file name.
///
/// Any unreadable or malformed descriptor fails the whole load; the service
/// treats that as a fatal configuration error at startup.
pub fn load_homework_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<Homework>, HomeworkError> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir)
        .map_err(|e| HomeworkError::Io(format!("{}: {e}", dir.display())))?;

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    paths.sort();

    paths.into_iter().map(load_homework).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_descriptor(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_full_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_descriptor(
            &dir,
            "hw2.toml",
            r#"
            target = "lab2"
            runner = "/usr/local/bin/hw2-runner"
            penalty_time = 600
            cases = ["case[01-03]", "bonus"]

            [[files]]
            name = "solution.c"

            [[files]]
            name = "Makefile"
            fallback = "Makefile.default"
            "#,
        );

        let hw = load_homework(&path).unwrap();
        assert_eq!(hw.name, "hw2");
        assert_eq!(hw.target, "lab2");
        assert_eq!(hw.runner, "/usr/local/bin/hw2-runner");
        assert_eq!(hw.penalty_time, 600.0);
        assert_eq!(hw.cases, vec!["case01", "case02", "case03", "bonus"]);
        assert_eq!(hw.files.len(), 2);
        assert_eq!(hw.files[1].fallback, "Makefile.default");
    }

    #[test]
    fn target_defaults_to_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_descriptor(&dir, "hw5.toml", "runner = \"r\"\ncases = [\"a\"]\n");
        let hw = load_homework(&path).unwrap();
        assert_eq!(hw.target, "hw5");
    }

    #[test]
    fn penalty_time_accepts_integer_and_float() {
        let dir = tempfile::tempdir().unwrap();
        let int_path = write_descriptor(&dir, "int.toml", "penalty_time = 300\n");
        let float_path = write_descriptor(&dir, "float.toml", "penalty_time = 12.5\n");
        assert_eq!(load_homework(&int_path).unwrap().penalty_time, 300.0);
        assert_eq!(load_homework(&float_path).unwrap().penalty_time, 12.5);
    }

    #[test]
    fn malformed_descriptor_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_descriptor(&dir, "bad.toml", "cases = 3\n");
        assert!(matches!(
            load_homework(&path),
            Err(HomeworkError::Parse(_))
        ));
    }

    #[test]
    fn directory_load_is_sorted_and_strict() {
        let dir = tempfile::tempdir().unwrap();
        write_descriptor(&dir, "hw2.toml", "cases = [\"a\"]\n");
        write_descriptor(&dir, "hw1.toml", "cases = [\"b\"]\n");
        write_descriptor(&dir, "notes.txt", "not a descriptor");

        let homeworks = load_homework_dir(dir.path()).unwrap();
        assert_eq!(homeworks.len(), 2);
        assert_eq!(homeworks[0].name, "hw1");
        assert_eq!(homeworks[1].name, "hw2");

        write_descriptor(&dir, "broken.toml", "cases = [\"x[1-\"]\n");
        assert!(load_homework_dir(dir.path()).is_err());
    }
}
