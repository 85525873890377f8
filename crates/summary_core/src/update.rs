use engine_logging::{engine_debug, engine_warn};

use crate::{AppState, Effect, JobResult, JobStatus, Msg, StatusKind, StatusReport, UiState};

const UPLOADING_MESSAGE: &str = "Uploading file and starting background job...";
const RUNNING_FALLBACK: &str = "Processing in background...";
const FAILED_FALLBACK: &str = "Unknown error";
const POLLING_CRITICAL_MESSAGE: &str = "Critical Error during polling. Check the log.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(selection) => {
            if state.ui_state().is_busy() {
                engine_debug!("Ignoring file selection change while a job is in flight");
                return (state, Vec::new());
            }
            match selection {
                Some(file) => state.select_file(file),
                None => {
                    state.reset_form();
                    state.clear_status();
                }
            }
            Vec::new()
        }
        Msg::SubmitClicked => {
            if !state.can_submit() {
                return (state, Vec::new());
            }
            let Some(file) = state.selected_file().cloned() else {
                return (state, Vec::new());
            };
            state.begin_upload(UPLOADING_MESSAGE);
            vec![Effect::SubmitUpload { file }]
        }
        Msg::SubmissionAccepted { job_id } => {
            if state.ui_state() != UiState::Uploading {
                engine_debug!("Ignoring submission acceptance for job {job_id}: not uploading");
                return (state, Vec::new());
            }
            state.show_status(
                format!("Job started (ID: {job_id}). Processing audio..."),
                StatusKind::Pending,
            );
            state.begin_polling(job_id.clone());
            vec![Effect::StartPolling { job_id }]
        }
        Msg::SubmissionFailed { message } => {
            if state.ui_state() != UiState::Uploading {
                return (state, Vec::new());
            }
            state.fail(format!("Error: {message}. Please try again."));
            Vec::new()
        }
        Msg::PollTick => match state.next_poll_seq() {
            Some((job_id, seq)) => vec![Effect::CheckStatus { job_id, seq }],
            None => Vec::new(),
        },
        Msg::StatusReceived {
            job_id,
            seq,
            report,
        } => {
            if !state.accept_poll_response(&job_id, seq) {
                engine_debug!("Dropping stale status response job={job_id} seq={seq}");
                return (state, Vec::new());
            }
            apply_status(&mut state, job_id, report)
        }
        Msg::PollTransportFailed {
            job_id,
            seq,
            message,
        } => {
            if !state.accept_poll_response(&job_id, seq) {
                engine_debug!("Dropping stale poll failure job={job_id} seq={seq}: {message}");
                return (state, Vec::new());
            }
            engine_warn!("Polling job {job_id} failed: {message}");
            state.finish_job();
            state.fail(POLLING_CRITICAL_MESSAGE);
            vec![Effect::StopPolling { job_id }]
        }
    };

    (state, effects)
}

fn apply_status(state: &mut AppState, job_id: String, report: StatusReport) -> Vec<Effect> {
    match report.status {
        JobStatus::Pending | JobStatus::Running => {
            state.record_progress(&report);
            let detail = report
                .message
                .as_deref()
                .filter(|message| !message.is_empty())
                .unwrap_or(RUNNING_FALLBACK);
            state.show_status(
                format!("Job ID {job_id} Running: {detail}"),
                StatusKind::Pending,
            );
            Vec::new()
        }
        JobStatus::Complete => {
            state.finish_job();
            let result = JobResult::from_report(&report);
            state.complete(result.clone());
            vec![
                Effect::StopPolling {
                    job_id: job_id.clone(),
                },
                Effect::RevealResults { job_id, result },
            ]
        }
        JobStatus::Failed => {
            state.finish_job();
            let detail = report
                .message
                .as_deref()
                .filter(|message| !message.is_empty())
                .unwrap_or(FAILED_FALLBACK);
            state.fail(format!("Job FAILED: {detail}"));
            vec![Effect::StopPolling { job_id }]
        }
    }
}
