//! Runtime configuration.
//!
//! Loaded from YAML (`.zip-cleaner/config.yaml` unless a path is given);
//! every field has a default so an absent file is fine. CLI flags are layered
//! on top by the binary.
pub mod prompts;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{CONFIG_FILE, PROGRESS_CAP, STORE_DIR, TICK_INTERVAL_MS};
use crate::session::SessionConfig;

/// Default HTTP timeout for provider calls (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Which collaborator turns a filename into a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gemini,
    Grok,
    Fixture,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::Grok => "grok",
            ProviderKind::Fixture => "fixture",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "grok" => Ok(ProviderKind::Grok),
            "fixture" => Ok(ProviderKind::Fixture),
            other => Err(format!("unknown provider '{}' (expected gemini, grok or fixture)", other)),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Cannot parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub provider: ProviderKind,
    /// Model id; the provider's default when absent
    pub model: Option<String>,
    /// Base URL override for HTTP providers
    pub endpoint: Option<String>,
    /// Response file for the fixture provider
    pub fixture: Option<PathBuf>,
    /// Artificial latency of the fixture provider (milliseconds)
    pub fixture_delay_ms: u64,
    pub tick_interval_ms: u64,
    pub progress_cap: u8,
    pub report_dir: PathBuf,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: None,
            endpoint: None,
            fixture: None,
            fixture_delay_ms: 0,
            tick_interval_ms: TICK_INTERVAL_MS,
            progress_cap: PROGRESS_CAP,
            report_dir: PathBuf::from("."),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Default config location, relative to the working directory
    pub fn default_path() -> PathBuf {
        Path::new(STORE_DIR).join(CONFIG_FILE)
    }

    /// Load from `path`, or from the default location if it exists.
    /// An explicit path that cannot be read is an error; a missing default is not.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if !required && e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let config = Self::from_yaml(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse { path: path.clone(), message },
            other => other,
        })?;
        tracing::debug!(path = %path.display(), provider = %config.provider, "config loaded");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty file deserializes to unit, not a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse { path: PathBuf::new(), message: e.to_string() })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive".into()));
        }
        if self.progress_cap == 0 || self.progress_cap >= 100 {
            return Err(ConfigError::Invalid("progress_cap must be between 1 and 99".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be positive".into()));
        }
        Ok(())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig { tick_interval: Duration::from_millis(self.tick_interval_ms), progress_cap: self.progress_cap }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.provider, ProviderKind::Gemini);
        assert_eq!(config.session_config(), SessionConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("provider: grok\nmodel: grok-4-fast\n").unwrap();
        assert_eq!(config.provider, ProviderKind::Grok);
        assert_eq!(config.model.as_deref(), Some("grok-4-fast"));
        assert_eq!(config.tick_interval_ms, TICK_INTERVAL_MS);
        assert_eq!(config.report_dir, PathBuf::from("."));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_rejects_unknown_keys_and_bad_values() {
        assert!(matches!(Config::from_yaml("colour: red\n"), Err(ConfigError::Parse { .. })));
        assert!(matches!(Config::from_yaml("provider: openai\n"), Err(ConfigError::Parse { .. })));
        assert!(matches!(Config::from_yaml("progress_cap: 100\n"), Err(ConfigError::Invalid(_))));
        assert!(matches!(Config::from_yaml("tick_interval_ms: 0\n"), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "provider: fixture\nfixture: tree.json\nreport_dir: out\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.provider, ProviderKind::Fixture);
        assert_eq!(config.fixture, Some(PathBuf::from("tree.json")));
        assert_eq!(config.report_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = Config::load(Some(&tmp.path().join("nope.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_parse_error_names_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "provider: [\n").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("config.yaml"));
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("Gemini".parse::<ProviderKind>(), Ok(ProviderKind::Gemini));
        assert_eq!("grok".parse::<ProviderKind>(), Ok(ProviderKind::Grok));
        assert!("claude".parse::<ProviderKind>().is_err());
    }
}
