//! HTTP client for the scoreboard service.

use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use util::homework::Homework;
use util::submission::Submission;

/// Client-side timeout for submitting results.
pub const SUBMIT_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug)]
pub enum ClientError {
    /// Transport-level failure reaching the service.
    Transport(String),
    /// The service answered with an unsuccessful envelope.
    Service(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport(message) => write!(f, "scoreboard unreachable: {message}"),
            ClientError::Service(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ClientError {}

/// Envelope every scoreboard endpoint responds with.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    message: String,
}

pub struct ScoreboardClient {
    base_url: String,
    http: reqwest::Client,
}

impl ScoreboardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Fetches a homework descriptor by name.
    pub async fn query_homework(&self, name: &str) -> Result<Homework, ClientError> {
        let url = format!("{}/api/homeworks/{name}", self.base_url);
        let response = self.http.get(&url).send().await.map_err(transport)?;
        let envelope: Envelope<Homework> = response.json().await.map_err(transport)?;
        if !envelope.success {
            return Err(ClientError::Service(envelope.message));
        }
        envelope
            .data
            .ok_or_else(|| ClientError::Service("empty homework response".to_string()))
    }

    /// Submits judge results; returns the board's transition message.
    ///
    /// A losing submission is still a success here — the message says the
    /// board kept the stored entry.
    pub async fn submit(&self, submission: &Submission) -> Result<String, ClientError> {
        let url = format!("{}/api/submissions", self.base_url);
        let response = self
            .http
            .post(&url)
            .timeout(SUBMIT_TIMEOUT)
            .json(submission)
            .send()
            .await
            .map_err(transport)?;
        let envelope: Envelope<serde_json::Value> = response.json().await.map_err(transport)?;
        if !envelope.success {
            return Err(ClientError::Service(envelope.message));
        }
        Ok(envelope.message)
    }
}

fn transport(e: reqwest::Error) -> ClientError {
    ClientError::Transport(e.to_string())
}
