use std::io::Write;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use chrono::Utc;
use engine_logging::{engine_error, engine_info, engine_warn};
use summary_core::{Effect, JobResult, JobStatus, Msg, StatusReport};
use summary_engine::{
    export_meeting, EngineEvent, EngineHandle, JobState, MeetingDocument, StatusPayload,
};

use crate::timer::PollTimer;
use crate::ui::terminal::TerminalSurface;

pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
    poll_interval: Duration,
    timer: Option<PollTimer>,
    save_dir: Option<PathBuf>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        msg_tx: mpsc::Sender<Msg>,
        poll_interval: Duration,
        save_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            engine,
            msg_tx,
            poll_interval,
            timer: None,
            save_dir,
        }
    }

    pub fn run<W: Write>(&mut self, effects: Vec<Effect>, surface: &mut TerminalSurface<W>) {
        for effect in effects {
            match effect {
                Effect::SubmitUpload { file } => {
                    engine_info!("SubmitUpload file={:?}", file.path);
                    self.engine.submit(file.path, file.name);
                }
                Effect::StartPolling { job_id } => {
                    engine_info!(
                        "StartPolling job_id={} interval={:?}",
                        job_id,
                        self.poll_interval
                    );
                    self.stop_timer();
                    self.timer = Some(PollTimer::start(self.poll_interval, self.msg_tx.clone()));
                }
                Effect::CheckStatus { job_id, seq } => {
                    self.engine.check_status(job_id, seq);
                }
                Effect::StopPolling { job_id } => {
                    engine_info!("StopPolling job_id={}", job_id);
                    if !self.stop_timer() {
                        engine_warn!("StopPolling for job {} without a running timer", job_id);
                    }
                }
                Effect::RevealResults { job_id, result } => {
                    if let Err(err) = surface.reveal_results() {
                        engine_error!("Failed to write results: {}", err);
                    }
                    self.save_result(&job_id, &result, surface);
                }
            }
        }
    }

    pub fn try_recv(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }

    #[cfg(test)]
    pub fn is_polling(&self) -> bool {
        self.timer.is_some()
    }

    /// Cancels the poll timer if one is running. The handle is taken before
    /// cancelling, so a second call is a no-op.
    fn stop_timer(&mut self) -> bool {
        match self.timer.take() {
            Some(timer) => {
                timer.cancel();
                true
            }
            None => false,
        }
    }

    fn save_result<W: Write>(
        &self,
        job_id: &str,
        result: &JobResult,
        surface: &mut TerminalSurface<W>,
    ) {
        let Some(dir) = &self.save_dir else {
            return;
        };
        let doc = MeetingDocument {
            job_id: job_id.to_string(),
            title: result.title.clone(),
            summary: result.summary.clone(),
            todo_list: result.todo_list.clone(),
            transcript: result.transcript.clone(),
            saved_utc: Utc::now().to_rfc3339(),
        };
        let notice = match export_meeting(dir, &doc) {
            Ok(path) => format!("Saved to {}", path.display()),
            Err(err) => {
                engine_error!("Failed to save meeting {} to {:?}: {}", job_id, dir, err);
                format!("Could not save results: {err}")
            }
        };
        let _ = surface.notice(&notice);
    }
}

pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Submitted(Ok(job_id)) => Msg::SubmissionAccepted { job_id },
        EngineEvent::Submitted(Err(err)) => Msg::SubmissionFailed {
            message: err.to_string(),
        },
        EngineEvent::StatusChecked {
            job_id,
            seq,
            result: Ok(payload),
        } => Msg::StatusReceived {
            job_id,
            seq,
            report: map_payload(payload),
        },
        EngineEvent::StatusChecked {
            job_id,
            seq,
            result: Err(err),
        } => Msg::PollTransportFailed {
            job_id,
            seq,
            message: err.to_string(),
        },
    }
}

fn map_payload(payload: StatusPayload) -> StatusReport {
    StatusReport {
        status: map_state(payload.state),
        message: payload.message,
        title: payload.title,
        summary: payload.summary,
        todo_list: payload.todo_list,
        transcript: payload.transcript,
    }
}

fn map_state(state: JobState) -> JobStatus {
    match state {
        JobState::Pending => JobStatus::Pending,
        JobState::Running => JobStatus::Running,
        JobState::Complete => JobStatus::Complete,
        JobState::Failed => JobStatus::Failed,
    }
}
