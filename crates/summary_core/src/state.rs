use std::path::PathBuf;

use crate::view_model::{
    AppViewModel, StatusKind, StatusLine, DEFAULT_FILE_LABEL, SUBMIT_LABEL_BUSY,
    SUBMIT_LABEL_IDLE,
};

/// Server-assigned job identifier, normalised to a string.
pub type JobId = String;

/// Monotonic per-job poll sequence number.
pub type PollSeq = u64;

/// Title shown when the server does not provide one.
pub const DEFAULT_TITLE: &str = "Meeting";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
}

impl SelectedFile {
    /// Builds a selection from a path, using the final path component as display name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Running,
    Complete,
    Failed,
}

/// One status observation as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub status: JobStatus,
    pub message: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub todo_list: Option<String>,
    pub transcript: Option<String>,
}

impl StatusReport {
    pub fn new(status: JobStatus) -> Self {
        Self {
            status,
            message: None,
            title: None,
            summary: None,
            todo_list: None,
            transcript: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobResult {
    pub title: String,
    pub summary: String,
    pub todo_list: String,
    pub transcript: String,
}

impl JobResult {
    /// Copies the result fields verbatim; only the title gets a fallback.
    pub fn from_report(report: &StatusReport) -> Self {
        let title = report
            .title
            .as_deref()
            .filter(|title| !title.is_empty())
            .unwrap_or(DEFAULT_TITLE)
            .to_string();
        Self {
            title,
            summary: report.summary.clone().unwrap_or_default(),
            todo_list: report.todo_list.clone().unwrap_or_default(),
            transcript: report.transcript.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Uploading,
    Polling,
    Complete,
    Failed,
}

impl UiState {
    pub fn is_busy(self) -> bool {
        matches!(self, UiState::Uploading | UiState::Polling)
    }
}

/// The job currently being tracked. Dropped on the first terminal observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadJob {
    pub job_id: JobId,
    pub status: JobStatus,
    pub message: Option<String>,
    next_seq: PollSeq,
    last_applied_seq: Option<PollSeq>,
}

impl UploadJob {
    fn new(job_id: JobId) -> Self {
        Self {
            job_id,
            status: JobStatus::Pending,
            message: None,
            next_seq: 1,
            last_applied_seq: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    ui: UiState,
    selected_file: Option<SelectedFile>,
    job: Option<UploadJob>,
    status: Option<StatusLine>,
    result: Option<JobResult>,
    results_visible: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let busy = self.ui.is_busy();
        AppViewModel {
            ui_state: self.ui,
            file_label: self
                .selected_file
                .as_ref()
                .map(|file| file.name.clone())
                .unwrap_or_else(|| DEFAULT_FILE_LABEL.to_string()),
            submit_enabled: self.can_submit(),
            submit_label: if busy {
                SUBMIT_LABEL_BUSY
            } else {
                SUBMIT_LABEL_IDLE
            }
            .to_string(),
            status: self.status.clone(),
            results: if self.results_visible {
                self.result.clone()
            } else {
                None
            },
            dirty: self.dirty,
        }
    }

    /// A finished job keeps its file selected; a new pick is needed to submit again.
    pub fn can_submit(&self) -> bool {
        self.selected_file.is_some() && !self.ui.is_busy() && self.ui != UiState::Complete
    }

    pub fn ui_state(&self) -> UiState {
        self.ui
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn job(&self) -> Option<&UploadJob> {
        self.job.as_ref()
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn select_file(&mut self, file: SelectedFile) {
        self.selected_file = Some(file);
        self.ui = UiState::Idle;
        self.dirty = true;
    }

    pub(crate) fn begin_upload(&mut self, message: impl Into<String>) {
        self.ui = UiState::Uploading;
        self.show_status(message, StatusKind::Pending);
    }

    pub(crate) fn begin_polling(&mut self, job_id: JobId) {
        self.job = Some(UploadJob::new(job_id));
        self.ui = UiState::Polling;
        self.dirty = true;
    }

    /// Allocates the sequence number for the next status request.
    pub(crate) fn next_poll_seq(&mut self) -> Option<(JobId, PollSeq)> {
        if self.ui != UiState::Polling {
            return None;
        }
        let job = self.job.as_mut()?;
        let seq = job.next_seq;
        job.next_seq += 1;
        Some((job.job_id.clone(), seq))
    }

    /// Accepts a poll response only if it is for the tracked job and newer
    /// than every response applied so far.
    pub(crate) fn accept_poll_response(&mut self, job_id: &str, seq: PollSeq) -> bool {
        if self.ui != UiState::Polling {
            return false;
        }
        let Some(job) = self.job.as_mut() else {
            return false;
        };
        if job.job_id != job_id || job.last_applied_seq.is_some_and(|last| seq <= last) {
            return false;
        }
        job.last_applied_seq = Some(seq);
        true
    }

    pub(crate) fn record_progress(&mut self, report: &StatusReport) {
        if let Some(job) = self.job.as_mut() {
            job.status = report.status;
            job.message = report.message.clone();
        }
    }

    /// Ends tracking of the current job.
    pub(crate) fn finish_job(&mut self) {
        self.job = None;
    }

    pub(crate) fn complete(&mut self, result: JobResult) {
        self.result = Some(result);
        self.results_visible = true;
        self.status = None;
        self.ui = UiState::Complete;
        self.dirty = true;
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.show_status(message, StatusKind::Failed);
        self.reset_form();
        self.ui = UiState::Failed;
    }

    pub(crate) fn show_status(&mut self, message: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusLine {
            text: message.into(),
            kind,
        });
        self.dirty = true;
    }

    pub(crate) fn clear_status(&mut self) {
        self.status = None;
        self.dirty = true;
    }

    /// Back to the empty-selection form. Hides earlier results; leaves the status line alone.
    pub(crate) fn reset_form(&mut self) {
        self.selected_file = None;
        self.results_visible = false;
        self.ui = UiState::Idle;
        self.dirty = true;
    }
}
