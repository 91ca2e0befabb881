use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use zc_base::config::prompts::failure_message;
use zc_base::ticker::TickMessage;
use zc_base::tree::FileEntry;

use crate::llms::AnalysisProvider;

/// Messages from background threads to the UI loop
#[derive(Debug)]
pub enum AppEvent {
    Tick(TickMessage),
    Analysis { generation: u64, outcome: Result<Vec<FileEntry>, String> },
}

thread_local! {
    static IN_PROVIDER_CALL: Cell<bool> = const { Cell::new(false) };
}

/// True while this thread is inside `provider.analyze`. Panic hooks run
/// before unwinding, so the TUI hook checks this to leave the terminal alone
/// for panics that `run_analysis` will catch.
pub fn in_provider_call() -> bool {
    IN_PROVIDER_CALL.with(Cell::get)
}

/// Marks the current thread as inside a provider call until dropped.
struct ProviderCall;

impl ProviderCall {
    fn enter() -> Self {
        IN_PROVIDER_CALL.with(|flag| flag.set(true));
        Self
    }
}

impl Drop for ProviderCall {
    fn drop(&mut self) {
        IN_PROVIDER_CALL.with(|flag| flag.set(false));
    }
}

/// Run one analysis to completion, flattening every failure (including a
/// panicking provider) into the user-facing message.
pub fn run_analysis(provider: &dyn AnalysisProvider, file_name: &str) -> Result<Vec<FileEntry>, String> {
    tracing::info!(provider = provider.name(), model = provider.model(), file_name, "provider call started");

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let _call = ProviderCall::enter();
        provider.analyze(file_name)
    }));
    match result {
        Ok(Ok(entries)) => {
            tracing::info!(file_name, entries = entries.len(), "provider call returned");
            Ok(entries)
        }
        Ok(Err(e)) => {
            tracing::warn!(file_name, error = %e, "provider call failed");
            Err(failure_message(&e.to_string()))
        }
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "provider panicked".to_string());
            tracing::error!(file_name, %detail, "provider panicked");
            Err(failure_message(&detail))
        }
    }
}

/// Analyze in a background thread and post the outcome tagged with its
/// generation. A closed channel means the app is gone; the result is dropped.
pub fn spawn_analysis(provider: Arc<dyn AnalysisProvider>, generation: u64, file_name: String, tx: Sender<AppEvent>) {
    thread::spawn(move || {
        let outcome = run_analysis(provider.as_ref(), &file_name);
        if tx.send(AppEvent::Analysis { generation, outcome }).is_err() {
            tracing::debug!(generation, "analysis result dropped, receiver closed");
        }
    });
}
