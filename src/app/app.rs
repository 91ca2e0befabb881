use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use ratatui::prelude::*;

use zc_base::config::Config;
use zc_base::report::write_report;
use zc_base::session::{Phase, Session, SessionState};
use zc_base::upload::Upload;

use crate::app::actions::{Action, ActionResult, apply_action};
use crate::app::events::handle_event;
use crate::app::worker::{AppEvent, spawn_analysis};
use crate::constants::{EVENT_POLL_MS, IDLE_POLL_MS, RENDER_THROTTLE_MS};
use crate::llms::AnalysisProvider;
use crate::state::ViewState;
use crate::ui;

pub struct App {
    session: Session,
    pub view: ViewState,
    provider: Arc<dyn AnalysisProvider>,
    /// "provider · model" for the status bar
    provider_label: String,
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
    report_dir: PathBuf,
    /// Content type attached to every upload (from --content-type)
    content_type: Option<String>,
    last_render: Option<Instant>,
}

impl App {
    pub fn new(config: &Config, provider: Arc<dyn AnalysisProvider>, content_type: Option<String>) -> Self {
        let (tx, rx) = mpsc::channel::<AppEvent>();
        let tick_tx = tx.clone();
        let session = Session::new(config.session_config(), Arc::new(move |tick| tick_tx.send(AppEvent::Tick(tick)).is_ok()));
        let provider_label = match provider.model() {
            "" => provider.name().to_string(),
            model => format!("{} · {}", provider.name(), model),
        };

        Self {
            session,
            view: ViewState::new(),
            provider,
            provider_label,
            tx,
            rx,
            report_dir: config.report_dir.clone(),
            content_type,
            last_render: None,
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        loop {
            // === INPUT FIRST ===
            if event::poll(Duration::ZERO)? {
                let evt = event::read()?;
                if let Event::Resize(..) = evt {
                    self.view.dirty = true;
                }

                let Some(action) = handle_event(&evt, self.session.phase()) else {
                    tracing::info!(phase = %self.session.phase(), "quit");
                    break;
                };
                self.handle_action(action);

                // Render immediately after input for instant feedback
                if self.view.dirty {
                    self.draw(terminal)?;
                }
            }

            // === BACKGROUND PROCESSING ===
            self.process_events();

            let throttled = self
                .last_render
                .is_some_and(|at| at.elapsed() < Duration::from_millis(RENDER_THROTTLE_MS));
            if self.view.dirty && !throttled {
                self.draw(terminal)?;
            }

            let poll_ms = if self.session.phase() == Phase::Analyzing || self.view.dirty {
                EVENT_POLL_MS
            } else {
                IDLE_POLL_MS
            };
            let _ = event::poll(Duration::from_millis(poll_ms))?;
        }

        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        terminal.draw(|frame| ui::render(frame, &self.session, &mut self.view, &self.provider_label))?;
        self.view.dirty = false;
        self.last_render = Some(Instant::now());
        Ok(())
    }

    pub fn handle_action(&mut self, action: Action) {
        match apply_action(&mut self.view, self.session.entries(), action) {
            ActionResult::Nothing => {}
            ActionResult::Submit(name) => {
                let mut upload = Upload::from_path(Path::new(&name));
                if let Some(content_type) = &self.content_type {
                    upload = upload.with_content_type(content_type.clone());
                }
                self.submit_upload(upload);
            }
            ActionResult::Reset => match self.session.reset() {
                Ok(()) => {
                    self.view.tree.reset();
                    self.view.clear_input();
                }
                Err(e) => self.view.error(e.to_string()),
            },
            ActionResult::Export => self.export_report(),
        }
    }

    /// Start analyzing `upload`, or show why it was refused.
    pub fn submit_upload(&mut self, upload: Upload) {
        match self.session.submit(&upload) {
            Ok(generation) => {
                tracing::info!(file_name = %upload.name, generation, "upload accepted");
                self.view.clear_input();
                self.view.tree.reset();
                spawn_analysis(Arc::clone(&self.provider), generation, upload.name, self.tx.clone());
            }
            Err(e) => {
                tracing::info!(file_name = %upload.name, error = %e, "upload rejected");
                self.view.error(e.to_string());
            }
        }
        self.view.dirty = true;
    }

    /// Drain ticks and analysis results. Stale ones are ignored by the session.
    pub fn process_events(&mut self) {
        while let Ok(evt) = self.rx.try_recv() {
            match evt {
                AppEvent::Tick(tick) => {
                    if self.session.apply_tick(tick) {
                        self.view.dirty = true;
                    }
                }
                AppEvent::Analysis { generation, outcome } => {
                    if self.session.complete(generation, outcome) {
                        tracing::info!(generation, phase = %self.session.phase(), "analysis settled");
                        self.view.tree.reset();
                        self.view.dirty = true;
                    } else {
                        tracing::debug!(generation, "stale analysis result ignored");
                    }
                }
            }
        }
    }

    fn export_report(&mut self) {
        let SessionState::Results { file_name, entries } = self.session.state() else {
            self.view.error("Nothing to export yet");
            return;
        };
        match write_report(&self.report_dir, file_name, entries) {
            Ok(path) => self.view.info(format!("Report saved to {}", path.display())),
            Err(e) => {
                tracing::error!(dir = %self.report_dir.display(), error = %e, "report export failed");
                self.view.error(format!("Could not save report: {}", e));
            }
        }
    }
}
