use crate::{JobResult, UiState};

/// Label shown when no file is selected.
pub const DEFAULT_FILE_LABEL: &str = "No file selected";
pub const SUBMIT_LABEL_IDLE: &str = "Summarize Meeting";
pub const SUBMIT_LABEL_BUSY: &str = "Uploading...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Pending,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub kind: StatusKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub ui_state: UiState,
    pub file_label: String,
    pub submit_enabled: bool,
    pub submit_label: String,
    /// `None` means the status box is hidden.
    pub status: Option<StatusLine>,
    /// `None` means the results section is hidden.
    pub results: Option<JobResult>,
    pub dirty: bool,
}
