use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};

use crate::{ApiSettings, EngineError, EngineEvent, JobApi, JobId, ReqwestJobApi, UploadFile};

enum EngineCommand {
    Submit { path: PathBuf, file_name: String },
    CheckStatus { job_id: JobId, seq: u64 },
}

/// Runs job API calls on a background tokio runtime.
///
/// Every command becomes its own task, so status checks may overlap in flight
/// and complete out of order. Events carry the caller's sequence number so the
/// receiver can discard stale ones.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, EngineError> {
        let api = ReqwestJobApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn JobApi>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
            engine_info!("Engine command channel closed; shutting down runtime");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, path: impl Into<PathBuf>, file_name: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            path: path.into(),
            file_name: file_name.into(),
        });
    }

    pub fn check_status(&self, job_id: impl Into<JobId>, seq: u64) {
        let _ = self.cmd_tx.send(EngineCommand::CheckStatus {
            job_id: job_id.into(),
            seq,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    api: &dyn JobApi,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit { path, file_name } => {
            let result = match UploadFile::load(&path, &file_name).await {
                Ok(upload) => api.start_job(&upload).await,
                Err(err) => Err(err),
            };
            if let Err(err) = &result {
                engine_warn!("Submission of {:?} failed: {}", path, err);
            }
            let _ = event_tx.send(EngineEvent::Submitted(result));
        }
        EngineCommand::CheckStatus { job_id, seq } => {
            let result = api.check_status(&job_id).await;
            if let Err(err) = &result {
                engine_warn!("Status check job={} seq={} failed: {}", job_id, seq, err);
            }
            let _ = event_tx.send(EngineEvent::StatusChecked {
                job_id,
                seq,
                result,
            });
        }
    }
}
