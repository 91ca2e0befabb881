//! Offline provider: replays a saved JSON response from disk.
use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use zc_base::schema::parse_entries;
use zc_base::tree::FileEntry;

use super::AnalysisProvider;
use super::error::LlmError;

pub struct FixtureProvider {
    path: PathBuf,
    delay: Duration,
}

impl FixtureProvider {
    pub fn new(path: PathBuf) -> Self {
        Self { path, delay: Duration::ZERO }
    }

    /// Sleep this long before answering, to make the loader visible.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl AnalysisProvider for FixtureProvider {
    fn name(&self) -> &'static str {
        "fixture"
    }

    fn model(&self) -> &str {
        ""
    }

    fn analyze(&self, file_name: &str) -> Result<Vec<FileEntry>, LlmError> {
        tracing::debug!(file_name, path = %self.path.display(), "replaying fixture");
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        let text = fs::read_to_string(&self.path)
            .map_err(|e| LlmError::Setup(format!("cannot read {}: {}", self.path.display(), e)))?;
        Ok(parse_entries(&text)?)
    }
}
