use crate::{JobId, JobResult, PollSeq, SelectedFile};

/// Side effects requested by [`crate::update`]; executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Upload the selected file to the job-creation endpoint.
    SubmitUpload { file: SelectedFile },
    /// Start the repeating poll timer for a freshly accepted job.
    StartPolling { job_id: JobId },
    /// Issue one status request. `seq` is echoed back with the response.
    CheckStatus { job_id: JobId, seq: PollSeq },
    /// Cancel the poll timer. Emitted once per job, on the first terminal observation.
    StopPolling { job_id: JobId },
    /// Results are ready; bring them into view.
    RevealResults { job_id: JobId, result: JobResult },
}
