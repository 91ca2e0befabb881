mod app;
mod constants;
mod llms;
mod state;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use crossterm::{
    ExecutableCommand,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

use zc_base::config::{Config, ProviderKind};
use zc_base::constants::{LOG_FILE, LOGS_DIR, STORE_DIR};
use zc_base::report::{format_report, write_report};
use zc_base::session::{Session, SessionState};
use zc_base::tree::count_stats;
use zc_base::upload::Upload;

use app::App;
use app::worker::{in_provider_call, run_analysis};
use constants::DEFAULT_LOG_FILTER;
use llms::build_provider;

#[derive(Parser)]
#[command(name = "zipclean")]
#[command(version, about = "Keep-or-delete suggestions for a project ZIP, from its name alone")]
struct Cli {
    /// Analysis provider (gemini, grok, fixture)
    #[arg(long, global = true)]
    provider: Option<ProviderKind>,

    /// Model id for the provider
    #[arg(long, global = true)]
    model: Option<String>,

    /// Base URL override for the provider API
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Response file replayed by the fixture provider
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    /// Config file (default: .zip-cleaner/config.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Declared content type of the upload, e.g. application/zip
    #[arg(long, global = true)]
    content_type: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,

    /// ZIP to submit as soon as the TUI starts
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze one ZIP without the TUI and write its report
    Analyze {
        /// ZIP file name or path (the file is never opened)
        file: PathBuf,
        /// Directory for the report (default: report_dir from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the report to stdout instead of writing it
        #[arg(long)]
        print: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let headless = cli.command.is_some();
    init_logging(headless);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    match cli.command {
        Some(Command::Analyze { file, output, print }) => {
            run_analyze(&config, &file, cli.content_type.as_deref(), output, print)
        }
        None => match run_tui(&config, cli.file.as_deref(), cli.content_type.as_deref()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        },
    }
}

/// Config file values with CLI flags layered on top.
fn load_config(cli: &Cli) -> Result<Config, zc_base::config::ConfigError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(provider) = cli.provider {
        config.provider = provider;
    }
    if let Some(model) = &cli.model {
        config.model = Some(model.clone());
    }
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = Some(endpoint.clone());
    }
    if let Some(fixture) = &cli.fixture {
        config.fixture = Some(fixture.clone());
        // A fixture path alone is enough to pick the fixture provider
        if cli.provider.is_none() {
            config.provider = ProviderKind::Fixture;
        }
    }
    config.validate()?;
    Ok(config)
}

/// The TUI owns the terminal, so its logs go to a file. Headless runs log
/// to stderr, keeping stdout for the report.
fn init_logging(headless: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if headless {
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
        return;
    }

    let dir = Path::new(STORE_DIR).join(LOGS_DIR);
    let file = fs::create_dir_all(&dir)
        .and_then(|_| OpenOptions::new().create(true).append(true).open(dir.join(LOG_FILE)));
    // No log file: run without logging rather than write over the TUI
    if let Ok(file) = file {
        tracing_subscriber::fmt().with_env_filter(filter).with_ansi(false).with_writer(Mutex::new(file)).init();
    }
}

fn make_upload(path: &Path, content_type: Option<&str>) -> Upload {
    let upload = Upload::from_path(path);
    match content_type {
        Some(content_type) => upload.with_content_type(content_type),
        None => upload,
    }
}

/// Panic hook: restore terminal state before the default hook prints.
/// Without this, a panic leaves the terminal in raw mode + alternate screen.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if !should_restore_terminal() {
            // Caught by the worker and shown as a failed analysis
            tracing::error!(%info, "provider panic");
            return;
        }
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(DisableBracketedPaste);
        let _ = io::stdout().execute(LeaveAlternateScreen);
        tracing::error!(%info, "panic");
        default_hook(info);
    }));
}

/// Hooks run before unwinding, so a provider panic that `run_analysis` will
/// catch must not tear the terminal down under the running TUI.
fn should_restore_terminal() -> bool {
    !in_provider_call()
}

fn run_tui(config: &Config, file: Option<&Path>, content_type: Option<&str>) -> io::Result<()> {
    let provider = build_provider(config).map_err(|e| io::Error::other(e.to_string()))?;

    install_panic_hook();

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(config, provider, content_type.map(String::from));
    if let Some(file) = file {
        app.submit_upload(make_upload(file, content_type));
    }
    let result = app.run(&mut terminal);

    // Cleanup
    disable_raw_mode()?;
    io::stdout().execute(DisableBracketedPaste)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}

/// One session, start to finish, without a terminal UI.
fn run_analyze(config: &Config, file: &Path, content_type: Option<&str>, output: Option<PathBuf>, print: bool) -> ExitCode {
    let provider = match build_provider(config) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    let upload = make_upload(file, content_type);
    let mut session = Session::detached(config.session_config());
    let generation = match session.submit(&upload) {
        Ok(generation) => generation,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    let outcome = run_analysis(provider.as_ref(), &upload.name);
    session.complete(generation, outcome);

    match session.state() {
        SessionState::Results { file_name, entries } => {
            let stats = count_stats(entries);
            let summary = format!("Keep: {}  Delete: {}  Total: {}", stats.keep, stats.delete, stats.total());
            if print {
                print!("{}", format_report(file_name, entries));
                eprintln!("{}", summary);
                return ExitCode::SUCCESS;
            }

            let dir = output.unwrap_or_else(|| config.report_dir.clone());
            match write_report(&dir, file_name, entries) {
                Ok(path) => {
                    println!("{}", summary);
                    println!("Report written to {}", path.display());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Could not write report to {}: {}", dir.display(), e);
                    ExitCode::FAILURE
                }
            }
        }
        SessionState::Failed { message, .. } => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
        other => {
            eprintln!("Analysis ended in unexpected state: {}", other.phase());
            ExitCode::FAILURE
        }
    }
}
