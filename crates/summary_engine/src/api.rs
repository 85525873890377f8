use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use reqwest::{StatusCode, Url};
use serde_json::Value;

use crate::types::RawStatusBody;
use crate::{EngineError, JobId, JobState, PollError, StatusPayload, SubmitError, UploadFile};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/";

const START_JOB_SEGMENT: &str = "start-summary-job";
const CHECK_STATUS_SEGMENT: &str = "check-job-status";
const UPLOAD_FIELD: &str = "audio_file";
const START_FALLBACK_MESSAGE: &str = "Failed to start job.";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            // Uploads of long recordings take a while on slow links.
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// The two calls the client makes against the summary service.
#[async_trait::async_trait]
pub trait JobApi: Send + Sync {
    /// Uploads the file and returns the id of the created job.
    async fn start_job(&self, upload: &UploadFile) -> Result<JobId, SubmitError>;

    /// Fetches the current status of a job.
    async fn check_status(&self, job_id: &str) -> Result<StatusPayload, PollError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestJobApi {
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestJobApi {
    pub fn new(settings: ApiSettings) -> Result<Self, EngineError> {
        let base_url = parse_base_url(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;
        Ok(Self { base_url, client })
    }

    /// `{base}/{segments...}/`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments).push("");
        }
        url
    }
}

fn parse_base_url(raw: &str) -> Result<Url, EngineError> {
    let invalid = |reason: &str| EngineError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };
    let url = Url::parse(raw).map_err(|err| invalid(&err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("url cannot be used as a base"));
    }
    Ok(url)
}

#[async_trait::async_trait]
impl JobApi for ReqwestJobApi {
    async fn start_job(&self, upload: &UploadFile) -> Result<JobId, SubmitError> {
        let url = self.endpoint(&[START_JOB_SEGMENT]);
        engine_info!(
            "Uploading {} ({} bytes) to {}",
            upload.file_name,
            upload.bytes.len(),
            url
        );

        let part = reqwest::multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone());
        let form = reqwest::multipart::Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_submit_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_submit_error)?;
        let json: Option<Value> = serde_json::from_slice(&body).ok();

        if status != StatusCode::ACCEPTED {
            let message = json
                .as_ref()
                .and_then(|value| value.get("message"))
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .unwrap_or(START_FALLBACK_MESSAGE)
                .to_string();
            engine_warn!("Job creation rejected with {}: {}", status, message);
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let job_id = json
            .as_ref()
            .and_then(|value| value.get("job_id"))
            .and_then(job_id_from_value)
            .ok_or_else(|| SubmitError::InvalidResponse("missing job_id".to_string()))?;
        engine_info!("Job {} accepted", job_id);
        Ok(job_id)
    }

    async fn check_status(&self, job_id: &str) -> Result<StatusPayload, PollError> {
        let url = self.endpoint(&[CHECK_STATUS_SEGMENT, job_id]);
        engine_debug!("Checking status of job {} at {}", job_id, url);

        let response = self.client.get(url).send().await.map_err(map_poll_error)?;
        let http_status = response.status();
        let body = response.bytes().await.map_err(map_poll_error)?;

        // The body is authoritative whatever the HTTP status: the service reports
        // missing results as a 500 carrying `status: FAILED`.
        let raw: RawStatusBody = serde_json::from_slice(&body)
            .map_err(|err| PollError::InvalidResponse(err.to_string()))?;
        let state = JobState::parse(&raw.status).ok_or_else(|| PollError::UnknownStatus {
            status: raw.status.clone(),
            http_status: http_status.as_u16(),
        })?;

        Ok(StatusPayload {
            state,
            message: raw.message,
            title: raw.title,
            summary: raw.summary,
            todo_list: raw.todo_list,
            transcript: raw.transcript,
        })
    }
}

/// Job ids come back as JSON numbers from the service; strings are accepted too.
fn job_id_from_value(value: &Value) -> Option<JobId> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn map_submit_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        return SubmitError::Timeout;
    }
    SubmitError::Transport(err.to_string())
}

fn map_poll_error(err: reqwest::Error) -> PollError {
    if err.is_timeout() {
        return PollError::Timeout;
    }
    PollError::Transport(err.to_string())
}
