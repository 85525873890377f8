use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use summary_engine::{
    EngineEvent, EngineHandle, JobApi, JobId, JobState, PollError, StatusPayload, SubmitError,
    UploadFile,
};
use tempfile::TempDir;

/// In-memory job API. Status checks for ids listed in `delays` sleep first.
#[derive(Default)]
struct FakeApi {
    uploads: Mutex<Vec<UploadFile>>,
    delays: HashMap<String, Duration>,
}

#[async_trait::async_trait]
impl JobApi for FakeApi {
    async fn start_job(&self, upload: &UploadFile) -> Result<JobId, SubmitError> {
        self.uploads.lock().unwrap().push(upload.clone());
        Ok("abc123".to_string())
    }

    async fn check_status(&self, job_id: &str) -> Result<StatusPayload, PollError> {
        if let Some(delay) = self.delays.get(job_id) {
            tokio::time::sleep(*delay).await;
        }
        Ok(StatusPayload {
            state: JobState::Running,
            message: Some(job_id.to_string()),
            title: None,
            summary: None,
            todo_list: None,
            transcript: None,
        })
    }
}

fn wait_for_events(engine: &EngineHandle, count: usize) -> Vec<EngineEvent> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut events = Vec::new();
    while events.len() < count && Instant::now() < deadline {
        if let Some(event) = engine.recv_timeout(Duration::from_millis(50)) {
            events.push(event);
        }
    }
    events
}

#[test]
fn submit_reads_file_and_reports_job_id() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("notes.mp3");
    std::fs::write(&file, b"audio bytes").unwrap();

    let api = Arc::new(FakeApi::default());
    let engine = EngineHandle::with_api(api.clone()).unwrap();
    engine.submit(&file, "notes.mp3");

    let events = wait_for_events(&engine, 1);
    assert_eq!(events, vec![EngineEvent::Submitted(Ok("abc123".to_string()))]);
    let uploads = api.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].file_name, "notes.mp3");
    assert_eq!(uploads[0].bytes, b"audio bytes");
}

#[test]
fn missing_file_is_a_submit_error_without_network_call() {
    let temp = TempDir::new().unwrap();
    let api = Arc::new(FakeApi::default());
    let engine = EngineHandle::with_api(api.clone()).unwrap();
    engine.submit(temp.path().join("missing.mp3"), "missing.mp3");

    let events = wait_for_events(&engine, 1);
    assert!(matches!(
        events.as_slice(),
        [EngineEvent::Submitted(Err(SubmitError::File { .. }))]
    ));
    assert!(api.uploads.lock().unwrap().is_empty());
}

#[test]
fn overlapping_status_checks_complete_out_of_order_with_their_seq() {
    let api = FakeApi {
        delays: HashMap::from([("slow".to_string(), Duration::from_millis(300))]),
        ..FakeApi::default()
    };
    let engine = EngineHandle::with_api(Arc::new(api)).unwrap();
    engine.check_status("slow", 1);
    engine.check_status("fast", 2);

    let events = wait_for_events(&engine, 2);
    let order: Vec<(String, u64)> = events
        .into_iter()
        .map(|event| match event {
            EngineEvent::StatusChecked { job_id, seq, .. } => (job_id, seq),
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    assert_eq!(
        order,
        vec![("fast".to_string(), 2), ("slow".to_string(), 1)]
    );
}
