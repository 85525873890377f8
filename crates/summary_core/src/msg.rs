use crate::{JobId, PollSeq, SelectedFile, StatusReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a file, or cleared the selection (`None`).
    FileSelected(Option<SelectedFile>),
    /// User pressed the submit control.
    SubmitClicked,
    /// Server accepted the upload and created a job.
    SubmissionAccepted { job_id: JobId },
    /// Upload was rejected or never reached the server.
    SubmissionFailed { message: String },
    /// Poll timer fired.
    PollTick,
    /// A status request completed with a parsed report.
    StatusReceived {
        job_id: JobId,
        seq: PollSeq,
        report: StatusReport,
    },
    /// A status request failed before a usable report was obtained.
    PollTransportFailed {
        job_id: JobId,
        seq: PollSeq,
        message: String,
    },
}
