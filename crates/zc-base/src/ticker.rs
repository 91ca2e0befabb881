//! Owned handle for the cosmetic progress tick.
//!
//! The tick runs on its own thread and reports through a sink callback.
//! Dropping the handle stops the thread and joins it, so a ticker can never
//! outlive whatever owns it.

use std::fmt;
use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rand::Rng;

use crate::constants::{TICK_STEP_MAX, TICK_STEP_MIN};

/// One tick, tagged with the session generation that started it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickMessage {
    pub generation: u64,
    pub step: u8,
}

/// Where ticks are delivered. Returning `false` stops the ticker.
pub type TickSink = Arc<dyn Fn(TickMessage) -> bool + Send + Sync>;

pub struct ProgressTicker {
    generation: u64,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressTicker {
    /// Spawn the tick thread. It fires every `interval` with a random step in
    /// `TICK_STEP_MIN..=TICK_STEP_MAX` until cancelled or the sink refuses.
    pub fn start(generation: u64, interval: Duration, sink: TickSink) -> io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new().name(format!("progress-tick-{}", generation)).spawn(move || {
            let mut rng = rand::rng();
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        let step = rng.random_range(TICK_STEP_MIN..=TICK_STEP_MAX);
                        if !sink(TickMessage { generation, step }) {
                            break;
                        }
                    }
                    // Explicit stop or the handle was dropped
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            tracing::debug!(generation, "progress tick stopped");
        })?;
        Ok(Self { generation, stop_tx: Some(stop_tx), handle: Some(handle) })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the thread and wait for it. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for ProgressTicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressTicker")
            .field("generation", &self.generation)
            .field("running", &self.is_running())
            .finish()
    }
}
