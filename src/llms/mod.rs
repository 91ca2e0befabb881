//! Analysis provider abstraction layer.
//!
//! A provider turns a ZIP filename into a project tree. Only the name is sent;
//! the tree is whatever the model invents for it. Responses are validated by
//! `zc_base::schema` before they leave this module.

pub mod error;
pub mod fixture;
pub mod gemini;
pub mod grok;

use std::sync::Arc;
use std::time::Duration;

use zc_base::config::{Config, ProviderKind};
use zc_base::tree::FileEntry;

pub use error::LlmError;

/// Maximum tokens requested for one analysis
pub const MAX_RESPONSE_TOKENS: u32 = 8192;

/// Turns a filename into a validated tree
pub trait AnalysisProvider: Send + Sync {
    /// Short provider id for logs and the status bar
    fn name(&self) -> &'static str;
    /// Model id in use (empty for offline providers)
    fn model(&self) -> &str;
    fn analyze(&self, file_name: &str) -> Result<Vec<FileEntry>, LlmError>;
}

/// Build the provider selected by `config`.
pub fn build_provider(config: &Config) -> Result<Arc<dyn AnalysisProvider>, LlmError> {
    let timeout = config.request_timeout();
    let provider: Arc<dyn AnalysisProvider> = match config.provider {
        ProviderKind::Gemini => {
            Arc::new(gemini::GeminiClient::from_env(config.model.clone(), config.endpoint.clone(), timeout))
        }
        ProviderKind::Grok => {
            Arc::new(grok::GrokClient::from_env(config.model.clone(), config.endpoint.clone(), timeout))
        }
        ProviderKind::Fixture => {
            let path = config
                .fixture
                .clone()
                .ok_or_else(|| LlmError::Setup("the fixture provider needs a fixture path (--fixture)".into()))?;
            Arc::new(fixture::FixtureProvider::new(path).with_delay(Duration::from_millis(config.fixture_delay_ms)))
        }
    };
    tracing::info!(provider = provider.name(), model = provider.model(), "provider ready");
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_fixture_requires_path() {
        let config = Config { provider: ProviderKind::Fixture, ..Config::default() };
        assert!(matches!(build_provider(&config), Err(LlmError::Setup(_))));
    }

    #[test]
    fn test_builds_each_provider() {
        let config = Config { provider: ProviderKind::Fixture, fixture: Some(PathBuf::from("t.json")), ..Config::default() };
        assert_eq!(build_provider(&config).unwrap().name(), "fixture");

        let config = Config { provider: ProviderKind::Grok, model: Some("grok-4".into()), ..Config::default() };
        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.name(), "grok");
        assert_eq!(provider.model(), "grok-4");

        let provider = build_provider(&Config::default()).unwrap();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.model(), gemini::DEFAULT_GEMINI_MODEL);
    }
}
