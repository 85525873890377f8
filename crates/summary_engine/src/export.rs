use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use serde_json::Value;

use crate::filename::meeting_filename;
use crate::persist::{AtomicFileWriter, PersistError};

/// A finished meeting analysis, as written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingDocument {
    pub job_id: String,
    pub title: String,
    pub summary: String,
    pub todo_list: String,
    pub transcript: String,
    pub saved_utc: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Renders the document as markdown with a small frontmatter block.
/// Section contents are copied verbatim; frontmatter values are quoted.
pub fn build_meeting_document(doc: &MeetingDocument) -> String {
    format!(
        "---\njob_id: {job_id}\ntitle: {title}\nsaved_utc: {saved}\n---\n\n\
         # {heading}\n\n## Summary\n\n{summary}\n\n## To-do\n\n{todo}\n\n## Transcript\n\n{transcript}\n",
        job_id = quoted(&doc.job_id),
        title = quoted(&doc.title),
        saved = quoted(&doc.saved_utc),
        heading = doc.title.lines().collect::<Vec<_>>().join(" "),
        summary = doc.summary,
        todo = doc.todo_list,
        transcript = doc.transcript,
    )
}

/// Double-quoted scalar; JSON string escapes are valid YAML.
fn quoted(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

/// Writes the document into `dir` and returns the final path.
pub fn export_meeting(dir: &Path, doc: &MeetingDocument) -> Result<PathBuf, ExportError> {
    let filename = meeting_filename(&doc.title, &doc.job_id);
    let writer = AtomicFileWriter::new(dir.to_path_buf());
    let path = writer.write(&filename, &build_meeting_document(doc))?;
    engine_info!("Saved meeting {} to {:?}", doc.job_id, path);
    Ok(path)
}
