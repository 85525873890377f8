use std::io::Write;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use engine_logging::engine_info;
use summary_core::{update, AppState, Msg, SelectedFile, UiState};
use summary_engine::EngineHandle;

use crate::config::ClientSettings;
use crate::effects::EffectRunner;
use crate::ui::{render::render, terminal::TerminalSurface};

/// How long the loop waits for a timer message before checking engine events again.
const EVENT_POLL: Duration = Duration::from_millis(20);

/// Runs one submit-and-poll cycle for `file` and returns the final UI state.
pub fn run_app(settings: ClientSettings, file: Option<PathBuf>, color: bool) -> Result<UiState> {
    engine_info!("Using API base {}", settings.api.base_url);
    let engine = EngineHandle::new(settings.api.clone()).context("failed to start engine")?;
    let mut app = App::new(engine, &settings, TerminalSurface::stdout(color));
    app.run(file)
}

struct App<W: Write> {
    state: AppState,
    runner: EffectRunner,
    surface: TerminalSurface<W>,
    msg_rx: mpsc::Receiver<Msg>,
}

impl<W: Write> App<W> {
    fn new(engine: EngineHandle, settings: &ClientSettings, surface: TerminalSurface<W>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
        let runner = EffectRunner::new(
            engine,
            msg_tx,
            settings.poll_interval,
            settings.save_dir.clone(),
        );
        Self {
            state: AppState::new(),
            runner,
            surface,
            msg_rx,
        }
    }

    /// Selects and submits `file`, then pumps timer and engine messages until
    /// the job leaves the busy states.
    fn run(&mut self, file: Option<PathBuf>) -> Result<UiState> {
        self.render_initial()?;
        self.dispatch(Msg::FileSelected(file.map(SelectedFile::from_path)))?;
        self.dispatch(Msg::SubmitClicked)?;

        while self.state.ui_state().is_busy() {
            while let Some(msg) = self.runner.try_recv() {
                self.dispatch(msg)?;
            }
            match self.msg_rx.recv_timeout(EVENT_POLL) {
                Ok(msg) => self.dispatch(msg)?,
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }

        Ok(self.state.ui_state())
    }

    fn render_initial(&mut self) -> Result<()> {
        self.surface
            .apply(render(&self.state.view()))
            .context("failed to write to terminal")
    }

    fn dispatch(&mut self, msg: Msg) -> Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        if was_dirty {
            self.surface
                .apply(render(&view))
                .context("failed to write to terminal")?;
        }
        self.runner.run(effects, &mut self.surface);
        Ok(())
    }
}
