use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use engine_logging::engine_debug;
use summary_core::Msg;

/// Default interval between status checks.
pub const POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// Repeating timer that sends [`Msg::PollTick`] at a fixed rate.
///
/// Ticks are scheduled from the previous tick's deadline, not from when the
/// status request it triggered completes. Cancelling consumes the handle;
/// dropping it also stops the thread.
pub struct PollTimer {
    stop_tx: mpsc::Sender<()>,
}

impl PollTimer {
    pub fn start(interval: Duration, msg_tx: mpsc::Sender<Msg>) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        thread::spawn(move || {
            let mut next = Instant::now() + interval;
            loop {
                let wait = next.saturating_duration_since(Instant::now());
                match stop_rx.recv_timeout(wait) {
                    Err(mpsc::RecvTimeoutError::Timeout) => {
                        if msg_tx.send(Msg::PollTick).is_err() {
                            break;
                        }
                        next += interval;
                    }
                    // Explicit cancel or handle dropped.
                    Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                }
            }
            engine_debug!("Poll timer stopped");
        });

        Self { stop_tx }
    }

    pub fn cancel(self) {
        let _ = self.stop_tx.send(());
    }
}
