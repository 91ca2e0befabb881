//! xAI Grok client.
//!
//! Grok speaks the OpenAI chat completions format. The call is a single
//! non-streaming request; the reply text is expected to be the JSON array,
//! optionally wrapped in a Markdown code fence.

use std::env;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretBox};
use serde::{Deserialize, Serialize};

use zc_base::config::prompts::analysis_prompt;
use zc_base::schema::parse_entries;
use zc_base::tree::FileEntry;

use super::error::LlmError;
use super::{AnalysisProvider, MAX_RESPONSE_TOKENS};

const GROK_API_BASE: &str = "https://api.x.ai/v1";

pub const DEFAULT_GROK_MODEL: &str = "grok-4-fast";

/// ```json ... ``` around the whole reply
static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*```[a-zA-Z]*\s*\n(.*?)\n?\s*```\s*$").expect("valid fence pattern"));

/// xAI Grok client
pub struct GrokClient {
    api_key: Option<SecretBox<String>>,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GrokClient {
    pub fn new(api_key: Option<String>, model: Option<String>, base_url: Option<String>, timeout: Duration) -> Self {
        Self {
            api_key: api_key.map(|k| SecretBox::new(Box::new(k))),
            model: model.unwrap_or_else(|| DEFAULT_GROK_MODEL.to_string()),
            base_url: base_url.unwrap_or_else(|| GROK_API_BASE.to_string()),
            timeout,
        }
    }

    pub fn from_env(model: Option<String>, base_url: Option<String>, timeout: Duration) -> Self {
        dotenvy::dotenv().ok();
        Self::new(env::var("XAI_API_KEY").ok(), model, base_url, timeout)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Remove a Markdown code fence wrapping the whole reply.
pub fn strip_code_fence(text: &str) -> &str {
    match CODE_FENCE.captures(text).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str(),
        None => text.trim(),
    }
}

impl AnalysisProvider for GrokClient {
    fn name(&self) -> &'static str {
        "grok"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn analyze(&self, file_name: &str) -> Result<Vec<FileEntry>, LlmError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| LlmError::Auth("XAI_API_KEY not set".into()))?;

        let client = Client::builder().timeout(self.timeout).build()?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage { role: "user", content: analysis_prompt(file_name) }],
            max_tokens: MAX_RESPONSE_TOKENS,
            stream: false,
        };

        let endpoint = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        tracing::debug!(%endpoint, file_name, "grok request");

        let response = client
            .post(&endpoint)
            .header("Authorization", format!("Bearer {}", api_key.expose_secret()))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let body: ChatResponse = response.json().map_err(|e| LlmError::Parse(e.to_string()))?;
        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| LlmError::Parse("response contained no message content".into()))?;

        Ok(parse_entries(strip_code_fence(&text))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fence("  ```\n[]\n```  "), "[]");
        assert_eq!(strip_code_fence(" [2] "), "[2]");
        // A fence in the middle is not a wrapper
        assert_eq!(strip_code_fence("x ```json\n[]\n```"), "x ```json\n[]\n```");
    }

    #[test]
    fn test_parses_fenced_reply() {
        let mut server = mockito::Server::new();
        let content = "```json\n[{\"name\":\"README.md\",\"type\":\"file\",\"status\":\"keep\",\"reason\":\"Docs.\"}]\n```";
        let body = serde_json::json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] });
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer xai-key")
            .with_status(200)
            .with_body(body.to_string())
            .create();

        let client = GrokClient::new(Some("xai-key".into()), None, Some(server.url()), Duration::from_secs(5));
        let entries = client.analyze("docs.zip").unwrap();
        mock.assert();
        assert_eq!(entries[0].name, "README.md");
    }

    #[test]
    fn test_missing_content_is_parse_error() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("POST", "/chat/completions").with_status(200).with_body(r#"{"choices": []}"#).create();

        let client = GrokClient::new(Some("k".into()), None, Some(server.url()), Duration::from_secs(5));
        assert!(matches!(client.analyze("a.zip"), Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_unauthorized() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("POST", "/chat/completions").with_status(401).with_body("bad key").create();

        let client = GrokClient::new(Some("k".into()), None, Some(server.url()), Duration::from_secs(5));
        assert!(matches!(client.analyze("a.zip"), Err(LlmError::Api { status: 401, .. })));
    }
}
