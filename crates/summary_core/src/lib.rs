//! Meeting summary core: pure submit-and-poll state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, JobId, JobResult, JobStatus, PollSeq, SelectedFile, StatusReport, UiState,
    UploadJob, DEFAULT_TITLE,
};
pub use update::update;
pub use view_model::{
    AppViewModel, StatusKind, StatusLine, DEFAULT_FILE_LABEL, SUBMIT_LABEL_BUSY,
    SUBMIT_LABEL_IDLE,
};
