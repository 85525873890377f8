//! Meeting summary engine: job API client, upload loading, and result export.
mod api;
mod engine;
mod export;
mod filename;
mod persist;
mod types;
mod upload;

pub use api::{ApiSettings, JobApi, ReqwestJobApi, DEFAULT_BASE_URL};
pub use engine::EngineHandle;
pub use export::{build_meeting_document, export_meeting, ExportError, MeetingDocument};
pub use filename::meeting_filename;
pub use persist::{ensure_save_dir, AtomicFileWriter, PersistError};
pub use types::{EngineError, EngineEvent, JobId, JobState, PollError, StatusPayload, SubmitError};
pub use upload::UploadFile;
