//! Embedded prompt strings (yamls/prompts.yaml).
use std::sync::LazyLock;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PromptsConfig {
    pub analysis: String,
    pub failure_prefix: String,
}

pub static PROMPTS: LazyLock<PromptsConfig> = LazyLock::new(|| {
    serde_yaml::from_str(include_str!("../../yamls/prompts.yaml"))
        .unwrap_or_else(|e| panic!("Failed to parse embedded prompts.yaml: {}", e))
});

/// Analysis prompt for `file_name`.
pub fn analysis_prompt(file_name: &str) -> String {
    PROMPTS.analysis.replace("{file_name}", file_name)
}

/// User-facing message for a failed provider call.
pub fn failure_message(detail: &str) -> String {
    format!("{}: {}", PROMPTS.failure_prefix, detail)
}
