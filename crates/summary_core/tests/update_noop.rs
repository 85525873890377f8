use summary_core::{update, AppState, Msg};

#[test]
fn poll_tick_without_job_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::PollTick);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn submission_result_without_upload_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::SubmissionAccepted {
            job_id: "9".to_string(),
        },
    );
    assert_eq!(state, next);
    assert!(effects.is_empty());

    let (next, effects) = update(
        state.clone(),
        Msg::SubmissionFailed {
            message: "late".to_string(),
        },
    );
    assert_eq!(state, next);
    assert!(effects.is_empty());
}
