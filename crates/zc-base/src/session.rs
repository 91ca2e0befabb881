//! Lifecycle of one upload → analyze → review cycle.
//!
//! ```text
//! Idle --submit--> Analyzing --success--> Results --reset--> Idle
//!                            --failure--> Failed  --reset--> Idle
//! ```
//!
//! The progress ticker lives inside the `Analyzing` state. Leaving that state
//! moves it out and cancels it; dropping the session drops it too.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::constants::{PROGRESS_CAP, PROGRESS_COMPLETE, TICK_INTERVAL_MS};
use crate::ticker::{ProgressTicker, TickMessage, TickSink};
use crate::tree::FileEntry;
use crate::upload::{Upload, UploadError, check_upload};

/// Coarse state name, for display and errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Analyzing,
    Results,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Idle => "idle",
            Phase::Analyzing => "analyzing",
            Phase::Results => "showing results",
            Phase::Failed => "failed",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    InvalidUpload(#[from] UploadError),

    #[error("An analysis is already running")]
    Busy,

    #[error("Cannot {event} while {phase}")]
    InvalidTransition { phase: Phase, event: &'static str },

    #[error("Could not start progress timer: {0}")]
    Ticker(String),
}

/// In-flight analysis. Owns the ticker.
#[derive(Debug)]
pub struct Analyzing {
    pub file_name: String,
    pub progress: u8,
    pub generation: u64,
    ticker: ProgressTicker,
}

#[derive(Debug)]
pub enum SessionState {
    Idle,
    Analyzing(Analyzing),
    Results { file_name: String, entries: Vec<FileEntry> },
    Failed { file_name: String, message: String },
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        match self {
            SessionState::Idle => Phase::Idle,
            SessionState::Analyzing(_) => Phase::Analyzing,
            SessionState::Results { .. } => Phase::Results,
            SessionState::Failed { .. } => Phase::Failed,
        }
    }
}

/// Tick cadence and cap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub tick_interval: Duration,
    pub progress_cap: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { tick_interval: Duration::from_millis(TICK_INTERVAL_MS), progress_cap: PROGRESS_CAP }
    }
}

pub struct Session {
    state: SessionState,
    config: SessionConfig,
    sink: TickSink,
    last_generation: u64,
}

impl Session {
    pub fn new(config: SessionConfig, sink: TickSink) -> Self {
        let progress_cap = config.progress_cap.clamp(1, PROGRESS_COMPLETE - 1);
        Self { state: SessionState::Idle, config: SessionConfig { progress_cap, ..config }, sink, last_generation: 0 }
    }

    /// Session whose ticks go nowhere (headless runs, tests)
    pub fn detached(config: SessionConfig) -> Self {
        Self::new(config, Arc::new(|_| true))
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn file_name(&self) -> Option<&str> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Analyzing(a) => Some(&a.file_name),
            SessionState::Results { file_name, .. } | SessionState::Failed { file_name, .. } => Some(file_name),
        }
    }

    /// 0 when idle or failed, 100 once results are in
    pub fn progress(&self) -> u8 {
        match &self.state {
            SessionState::Analyzing(a) => a.progress,
            SessionState::Results { .. } => PROGRESS_COMPLETE,
            SessionState::Idle | SessionState::Failed { .. } => 0,
        }
    }

    pub fn entries(&self) -> Option<&[FileEntry]> {
        match &self.state {
            SessionState::Results { entries, .. } => Some(entries),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            SessionState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Generation of the in-flight analysis, if any
    pub fn active_generation(&self) -> Option<u64> {
        match &self.state {
            SessionState::Analyzing(a) => Some(a.generation),
            _ => None,
        }
    }

    pub fn is_ticking(&self) -> bool {
        match &self.state {
            SessionState::Analyzing(a) => a.ticker.is_running(),
            _ => false,
        }
    }

    /// `Idle --submit--> Analyzing(name, 0)`.
    ///
    /// Rejected uploads leave the state untouched. Returns the generation
    /// that ticks and the completion must carry.
    pub fn submit(&mut self, upload: &Upload) -> Result<u64, SessionError> {
        match self.state.phase() {
            Phase::Idle => {}
            Phase::Analyzing => {
                tracing::warn!("submit refused: analysis in flight");
                return Err(SessionError::Busy);
            }
            phase => return Err(SessionError::InvalidTransition { phase, event: "submit" }),
        }

        if let Err(e) = check_upload(upload) {
            tracing::info!(name = %upload.name, "upload rejected");
            return Err(e.into());
        }

        let generation = self.last_generation + 1;
        let ticker = ProgressTicker::start(generation, self.config.tick_interval, Arc::clone(&self.sink))
            .map_err(|e| SessionError::Ticker(e.to_string()))?;
        self.last_generation = generation;

        tracing::info!(name = %upload.name, generation, "analysis started");
        self.state = SessionState::Analyzing(Analyzing { file_name: upload.name.clone(), progress: 0, generation, ticker });
        Ok(generation)
    }

    /// Advance progress by `step`, capped below completion.
    /// No-op (returns `false`) unless `generation` is the one in flight.
    pub fn apply_tick(&mut self, tick: TickMessage) -> bool {
        let cap = self.config.progress_cap;
        match &mut self.state {
            SessionState::Analyzing(a) if a.generation == tick.generation => {
                let next = a.progress.saturating_add(tick.step.max(1)).min(cap);
                let changed = next != a.progress;
                a.progress = next;
                changed
            }
            _ => false,
        }
    }

    /// `Analyzing --success(tree)--> Results`.
    pub fn succeed(&mut self, generation: u64, entries: Vec<FileEntry>) -> bool {
        let Some(analyzing) = self.take_analyzing(generation) else {
            return false;
        };
        let file_name = analyzing.finish();
        tracing::info!(name = %file_name, entries = entries.len(), "analysis finished");
        self.state = SessionState::Results { file_name, entries };
        true
    }

    /// `Analyzing --failure(message)--> Failed`.
    pub fn fail(&mut self, generation: u64, message: impl Into<String>) -> bool {
        let Some(analyzing) = self.take_analyzing(generation) else {
            return false;
        };
        let file_name = analyzing.finish();
        let message = message.into();
        tracing::error!(name = %file_name, %message, "analysis failed");
        self.state = SessionState::Failed { file_name, message };
        true
    }

    /// Route a provider outcome to `succeed` or `fail`.
    pub fn complete(&mut self, generation: u64, outcome: Result<Vec<FileEntry>, String>) -> bool {
        match outcome {
            Ok(entries) => self.succeed(generation, entries),
            Err(message) => self.fail(generation, message),
        }
    }

    /// `Results | Failed --reset--> Idle`.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        match self.state.phase() {
            Phase::Results | Phase::Failed => {
                self.state = SessionState::Idle;
                tracing::info!("session reset");
                Ok(())
            }
            Phase::Analyzing => Err(SessionError::Busy),
            Phase::Idle => Err(SessionError::InvalidTransition { phase: Phase::Idle, event: "reset" }),
        }
    }

    fn take_analyzing(&mut self, generation: u64) -> Option<Analyzing> {
        match &self.state {
            SessionState::Analyzing(a) if a.generation == generation => {}
            _ => {
                tracing::debug!(generation, "ignoring stale completion");
                return None;
            }
        }
        match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Analyzing(a) => Some(a),
            _ => None,
        }
    }
}

impl Analyzing {
    /// Stop the ticker and hand back the file name.
    fn finish(self) -> String {
        let Analyzing { file_name, mut ticker, .. } = self;
        ticker.cancel();
        file_name
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("last_generation", &self.last_generation)
            .finish()
    }
}
