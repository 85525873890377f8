use summary_core::{AppViewModel, JobResult, StatusLine};

/// Instructions for a UI surface. Rendering is a pure function of the view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    SetFileLabel(String),
    SetSubmit { enabled: bool, label: String },
    ShowStatus(StatusLine),
    HideStatus,
    ShowResults(JobResult),
    HideResults,
}

pub fn render(view: &AppViewModel) -> Vec<UiCommand> {
    let mut cmds = Vec::with_capacity(4);

    cmds.push(UiCommand::SetFileLabel(view.file_label.clone()));
    cmds.push(UiCommand::SetSubmit {
        enabled: view.submit_enabled,
        label: view.submit_label.clone(),
    });
    cmds.push(match &view.status {
        Some(status) => UiCommand::ShowStatus(status.clone()),
        None => UiCommand::HideStatus,
    });
    cmds.push(match &view.results {
        Some(result) => UiCommand::ShowResults(result.clone()),
        None => UiCommand::HideResults,
    });

    cmds
}
