//! Submission protocol types shared by the judge and the scoreboard.
//!
//! The PascalCase wire names are a compatibility contract: persisted
//! `storage/<homework>/<user>.json` files and submitted payloads use exactly
//! this shape, so renaming a field here is a breaking change.

use serde::{Deserialize, Serialize};

/// One case outcome as transmitted and persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CaseResult {
    pub case: String,
    pub passed: bool,
    pub time: f64,
    pub verdict: String,
}

/// A client submission for one homework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Submission {
    pub user: String,
    pub homework: String,
    pub results: Vec<CaseResult>,
}

/// The durably stored best-known submission of one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StoredSubmission {
    pub user: String,
    pub results: Vec<CaseResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The persisted JSON shape is part of the external contract.
    #[test]
    fn stored_submission_uses_pascal_case_keys() {
        let stored = StoredSubmission {
            user: "alice".to_string(),
            results: vec![CaseResult {
                case: "case01".to_string(),
                passed: true,
                time: 1.25,
                verdict: "accepted".to_string(),
            }],
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["User"], "alice");
        assert_eq!(json["Results"][0]["Case"], "case01");
        assert_eq!(json["Results"][0]["Passed"], true);
        assert_eq!(json["Results"][0]["Time"], 1.25);
        assert_eq!(json["Results"][0]["Verdict"], "accepted");
    }
}
