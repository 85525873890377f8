use std::io::{self, Write};

use colored::Colorize;
use engine_logging::engine_debug;
use summary_core::{JobResult, StatusKind, StatusLine};

use super::render::UiCommand;

/// Line-oriented terminal surface.
///
/// Holds what is currently "on screen" and only writes when a command changes it,
/// so re-rendering the full view after every message does not repeat output.
pub struct TerminalSurface<W: Write> {
    out: W,
    color: bool,
    file_label: Option<String>,
    submit: Option<(bool, String)>,
    status: Option<StatusLine>,
    results: Option<JobResult>,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            file_label: None,
            submit: None,
            status: None,
            results: None,
        }
    }

    pub fn apply(&mut self, commands: Vec<UiCommand>) -> io::Result<()> {
        for command in commands {
            self.apply_one(command)?;
        }
        self.out.flush()
    }

    fn apply_one(&mut self, command: UiCommand) -> io::Result<()> {
        match command {
            UiCommand::SetFileLabel(label) => {
                if self.file_label.as_ref() != Some(&label) {
                    writeln!(self.out, "File: {label}")?;
                    self.file_label = Some(label);
                }
            }
            UiCommand::SetSubmit { enabled, label } => {
                let next = (enabled, label);
                if self.submit.as_ref() != Some(&next) {
                    engine_debug!("Submit control: enabled={} label={:?}", next.0, next.1);
                    self.submit = Some(next);
                }
            }
            UiCommand::ShowStatus(status) => {
                if self.status.as_ref() != Some(&status) {
                    self.write_status(&status)?;
                    self.status = Some(status);
                }
            }
            UiCommand::HideStatus => {
                self.status = None;
            }
            UiCommand::ShowResults(result) => {
                if self.results.as_ref() != Some(&result) {
                    self.write_results(&result)?;
                    self.results = Some(result);
                }
            }
            UiCommand::HideResults => {
                if self.results.take().is_some() {
                    writeln!(self.out, "(previous results cleared)")?;
                }
            }
        }
        Ok(())
    }

    /// Terminal output already ends at the results block; make sure it is flushed.
    pub fn reveal_results(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn notice(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    fn write_status(&mut self, status: &StatusLine) -> io::Result<()> {
        let tag = match status.kind {
            StatusKind::Pending => "[pending]",
            StatusKind::Failed => "[failed]",
        };
        if self.color {
            let tag = match status.kind {
                StatusKind::Pending => tag.yellow(),
                StatusKind::Failed => tag.red().bold(),
            };
            writeln!(self.out, "{tag} {}", status.text)
        } else {
            writeln!(self.out, "{tag} {}", status.text)
        }
    }

    fn write_results(&mut self, result: &JobResult) -> io::Result<()> {
        let sections = [
            ("Summary", result.summary.as_str()),
            ("To-do", result.todo_list.as_str()),
            ("Transcript", result.transcript.as_str()),
        ];
        writeln!(self.out)?;
        if self.color {
            writeln!(self.out, "{}", result.title.bold())?;
        } else {
            writeln!(self.out, "{}", result.title)?;
        }
        for (heading, body) in sections {
            writeln!(self.out)?;
            if self.color {
                writeln!(self.out, "{}", heading.underline())?;
            } else {
                writeln!(self.out, "{heading}")?;
            }
            writeln!(self.out, "{body}")?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::render::render;
    use summary_core::{update, AppState, JobStatus, Msg, SelectedFile, StatusReport};

    fn output(surface: TerminalSurface<Vec<u8>>) -> String {
        String::from_utf8(surface.into_inner()).unwrap()
    }

    #[test]
    fn repeated_renders_do_not_repeat_output() {
        let mut surface = TerminalSurface::new(Vec::new(), false);
        let view = AppState::new().view();
        surface.apply(render(&view)).unwrap();
        surface.apply(render(&view)).unwrap();

        assert_eq!(output(surface), "File: No file selected\n");
    }

    #[test]
    fn status_updates_are_written_with_kind_tag() {
        let mut surface = TerminalSurface::new(Vec::new(), false);
        surface
            .apply(vec![UiCommand::ShowStatus(StatusLine {
                text: "Error: bad format. Please try again.".to_string(),
                kind: StatusKind::Failed,
            })])
            .unwrap();

        assert_eq!(
            output(surface),
            "[failed] Error: bad format. Please try again.\n"
        );
    }

    #[test]
    fn completed_job_prints_every_section_verbatim() {
        let (state, _) = update(
            AppState::new(),
            Msg::FileSelected(Some(SelectedFile::from_path("notes.mp3"))),
        );
        let (state, _) = update(state, Msg::SubmitClicked);
        let (state, _) = update(
            state,
            Msg::SubmissionAccepted {
                job_id: "abc123".to_string(),
            },
        );
        let (state, _) = update(state, Msg::PollTick);
        let report = StatusReport {
            title: Some("Sync".to_string()),
            summary: Some("S".to_string()),
            todo_list: Some("T".to_string()),
            transcript: Some("Tx".to_string()),
            ..StatusReport::new(JobStatus::Complete)
        };
        let (state, _) = update(
            state,
            Msg::StatusReceived {
                job_id: "abc123".to_string(),
                seq: 1,
                report,
            },
        );

        let mut surface = TerminalSurface::new(Vec::new(), false);
        surface.apply(render(&state.view())).unwrap();
        let text = output(surface);

        assert!(text.contains("\nSync\n\nSummary\nS\n\nTo-do\nT\n\nTranscript\nTx\n"), "{text}");
        assert!(!text.contains("[pending]"));
    }
}
