use std::fmt;

use serde::Deserialize;

pub type JobId = String;

/// Job states understood by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Running,
    Complete,
    Failed,
}

impl JobState {
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw {
            "PENDING" => Some(JobState::Pending),
            "RUNNING" => Some(JobState::Running),
            "COMPLETE" => Some(JobState::Complete),
            "FAILED" => Some(JobState::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JobState::Pending => "PENDING",
            JobState::Running => "RUNNING",
            JobState::Complete => "COMPLETE",
            JobState::Failed => "FAILED",
        };
        f.write_str(label)
    }
}

/// Parsed body of a job-status response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPayload {
    pub state: JobState,
    pub message: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub todo_list: Option<String>,
    pub transcript: Option<String>,
}

/// Wire shape of the status body. `status` stays raw so unknown values can be reported.
#[derive(Debug, Deserialize)]
pub(crate) struct RawStatusBody {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub todo_list: Option<String>,
    #[serde(default)]
    pub transcript: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Submitted(Result<JobId, SubmitError>),
    StatusChecked {
        job_id: JobId,
        seq: u64,
        result: Result<StatusPayload, PollError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// Server answered with something other than 202 Accepted.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("Failed to reach server: {0}")]
    Transport(String),
    #[error("Request timed out")]
    Timeout,
    #[error("Unexpected response from server: {0}")]
    InvalidResponse(String),
    #[error("Could not read {path}: {message}")]
    File { path: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PollError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("status request timed out")]
    Timeout,
    #[error("invalid status response: {0}")]
    InvalidResponse(String),
    #[error("unknown job status {status:?} (http {http_status})")]
    UnknownStatus { status: String, http_status: u16 },
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    Client(String),
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
