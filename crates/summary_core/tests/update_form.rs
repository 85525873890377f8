use std::sync::Once;

use summary_core::{
    update, AppState, Effect, Msg, SelectedFile, StatusKind, StatusLine, UiState,
    DEFAULT_FILE_LABEL, SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn select(state: AppState, path: &str) -> AppState {
    let (state, _) = update(state, Msg::FileSelected(Some(SelectedFile::from_path(path))));
    state
}

#[test]
fn initial_form_is_empty_and_disabled() {
    init_logging();
    let view = AppState::new().view();

    assert_eq!(view.ui_state, UiState::Idle);
    assert_eq!(view.file_label, DEFAULT_FILE_LABEL);
    assert!(!view.submit_enabled);
    assert_eq!(view.submit_label, SUBMIT_LABEL_IDLE);
    assert!(view.status.is_none());
    assert!(view.results.is_none());
}

#[test]
fn selecting_a_file_enables_submit_and_shows_name() {
    init_logging();
    let mut state = select(AppState::new(), "/tmp/recordings/notes.mp3");
    let view = state.view();

    assert_eq!(view.file_label, "notes.mp3");
    assert!(view.submit_enabled);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn clearing_the_selection_resets_the_form() {
    init_logging();
    let state = select(AppState::new(), "notes.mp3");
    let (state, effects) = update(state, Msg::FileSelected(None));
    let view = state.view();

    assert!(effects.is_empty());
    assert_eq!(view.file_label, DEFAULT_FILE_LABEL);
    assert!(!view.submit_enabled);
    assert!(state.selected_file().is_none());
}

#[test]
fn submit_without_file_is_noop() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(next, state);
}

#[test]
fn submit_emits_upload_and_shows_pending_status() {
    init_logging();
    let state = select(AppState::new(), "notes.mp3");
    let (state, effects) = update(state, Msg::SubmitClicked);
    let view = state.view();

    assert_eq!(
        effects,
        vec![Effect::SubmitUpload {
            file: SelectedFile::from_path("notes.mp3"),
        }]
    );
    assert_eq!(view.ui_state, UiState::Uploading);
    assert!(!view.submit_enabled);
    assert_eq!(view.submit_label, SUBMIT_LABEL_BUSY);
    assert_eq!(
        view.status,
        Some(StatusLine {
            text: "Uploading file and starting background job...".to_string(),
            kind: StatusKind::Pending,
        })
    );
}

#[test]
fn double_submit_is_ignored_while_uploading() {
    init_logging();
    let state = select(AppState::new(), "notes.mp3");
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(state.ui_state(), UiState::Uploading);
}

#[test]
fn accepted_submission_starts_polling() {
    init_logging();
    let state = select(AppState::new(), "notes.mp3");
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, effects) = update(
        state,
        Msg::SubmissionAccepted {
            job_id: "abc123".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::StartPolling {
            job_id: "abc123".to_string(),
        }]
    );
    let view = state.view();
    assert_eq!(view.ui_state, UiState::Polling);
    assert_eq!(
        view.status.map(|status| status.text),
        Some("Job started (ID: abc123). Processing audio...".to_string())
    );
    assert!(view.results.is_none());
}

#[test]
fn rejected_submission_shows_error_and_resets_form() {
    init_logging();
    let state = select(AppState::new(), "notes.mp3");
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, effects) = update(
        state,
        Msg::SubmissionFailed {
            message: "bad format".to_string(),
        },
    );
    let view = state.view();

    assert!(effects.is_empty());
    assert_eq!(view.ui_state, UiState::Failed);
    assert_eq!(
        view.status,
        Some(StatusLine {
            text: "Error: bad format. Please try again.".to_string(),
            kind: StatusKind::Failed,
        })
    );
    assert_eq!(view.file_label, DEFAULT_FILE_LABEL);
    assert!(!view.submit_enabled);
    assert_eq!(view.submit_label, SUBMIT_LABEL_IDLE);

    // No job was created, so ticks do nothing.
    let (_, effects) = update(state, Msg::PollTick);
    assert!(effects.is_empty());
}

#[test]
fn file_selection_is_ignored_while_polling() {
    init_logging();
    let state = select(AppState::new(), "notes.mp3");
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::SubmissionAccepted {
            job_id: "1".to_string(),
        },
    );
    let (state, effects) = update(state, Msg::FileSelected(None));

    assert!(effects.is_empty());
    assert_eq!(state.ui_state(), UiState::Polling);
    assert_eq!(state.view().file_label, "notes.mp3");
}

#[test]
fn user_can_retry_after_failure() {
    init_logging();
    let state = select(AppState::new(), "notes.mp3");
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::SubmissionFailed {
            message: "Failed to start job.".to_string(),
        },
    );
    let state = select(state, "notes.mp3");
    let (state, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(effects.len(), 1);
    assert_eq!(state.ui_state(), UiState::Uploading);
}
