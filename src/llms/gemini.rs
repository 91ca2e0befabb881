//! Google Gemini `generateContent` client.
//!
//! Asks for `application/json` output constrained by a response schema, so a
//! healthy reply is the bare JSON array.

use std::env;
use std::time::Duration;

use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretBox};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use zc_base::config::prompts::analysis_prompt;
use zc_base::schema::parse_entries;
use zc_base::tree::FileEntry;

use super::error::LlmError;
use super::{AnalysisProvider, MAX_RESPONSE_TOKENS};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Gemini client
pub struct GeminiClient {
    api_key: Option<SecretBox<String>>,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: Option<String>, base_url: Option<String>, timeout: Duration) -> Self {
        Self {
            api_key: api_key.map(|k| SecretBox::new(Box::new(k))),
            model: model.unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: base_url.unwrap_or_else(|| GEMINI_API_BASE.to_string()),
            timeout,
        }
    }

    /// Key from `GEMINI_API_KEY`, falling back to `API_KEY`.
    pub fn from_env(model: Option<String>, base_url: Option<String>, timeout: Duration) -> Self {
        dotenvy::dotenv().ok();
        let api_key = env::var("GEMINI_API_KEY").or_else(|_| env::var("API_KEY")).ok();
        Self::new(api_key, model, base_url, timeout)
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url.trim_end_matches('/'), self.model)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Entry schema in Gemini's OpenAPI subset. The API has no recursive
/// references, so nesting is spelled out two levels deep and the prompt
/// carries the rest.
fn response_schema() -> Value {
    let leaf = json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "type": { "type": "STRING", "enum": ["file", "folder"] },
            "status": { "type": "STRING", "enum": ["keep", "delete"] },
            "reason": { "type": "STRING" }
        },
        "required": ["name", "type", "status", "reason"]
    });
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING", "description": "The name of the file or folder." },
                "type": { "type": "STRING", "enum": ["file", "folder"], "description": "The type of the entry." },
                "status": { "type": "STRING", "enum": ["keep", "delete"], "description": "Decision to keep or delete the item." },
                "reason": { "type": "STRING", "description": "A brief justification for the decision." },
                "children": {
                    "type": "ARRAY",
                    "description": "Nested files and folders. Omit for files or empty folders.",
                    "items": leaf
                }
            },
            "required": ["name", "type", "status", "reason"]
        }
    })
}

impl AnalysisProvider for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn analyze(&self, file_name: &str) -> Result<Vec<FileEntry>, LlmError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| LlmError::Auth("GEMINI_API_KEY not set".into()))?;

        let client = Client::builder().timeout(self.timeout).build()?;

        let request = GenerateRequest {
            contents: vec![Content { role: "user", parts: vec![Part { text: analysis_prompt(file_name) }] }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
                max_output_tokens: MAX_RESPONSE_TOKENS,
            },
        };

        let endpoint = self.endpoint();
        tracing::debug!(%endpoint, file_name, "gemini request");

        let response = client
            .post(&endpoint)
            .header("x-goog-api-key", api_key.expose_secret().as_str())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let body: GenerateResponse = response.json().map_err(|e| LlmError::Parse(e.to_string()))?;

        if let Some(reason) = body.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(LlmError::Api { status: 200, body: format!("prompt blocked: {}", reason) });
        }

        let text: String = body
            .candidates
            .into_iter()
            .take(1)
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(LlmError::Parse("response contained no text".into()));
        }

        let entries = parse_entries(&text)?;
        tracing::debug!(entries = entries.len(), "gemini response validated");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(server: &mockito::Server, key: Option<&str>) -> GeminiClient {
        GeminiClient::new(key.map(String::from), None, Some(server.url()), Duration::from_secs(5))
    }

    fn envelope(text: &str) -> String {
        json!({ "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }] }).to_string()
    }

    #[test]
    fn test_parses_generated_tree() {
        let mut server = mockito::Server::new();
        let tree = r#"[{"name":"src","type":"folder","status":"keep","reason":"Source.","children":[
            {"name":"main.tsx","type":"file","status":"keep","reason":"Entry."}]}]"#;
        let mock = server
            .mock("POST", "/models/gemini-2.5-flash:generateContent")
            .match_header("x-goog-api-key", "secret")
            .match_body(mockito::Matcher::Regex("shop\\.zip".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope(tree))
            .create();

        let entries = client(&server, Some("secret")).analyze("shop.zip").unwrap();
        mock.assert();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].children()[0].name, "main.tsx");
    }

    #[test]
    fn test_http_error_maps_to_api() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/models/gemini-2.5-flash:generateContent")
            .with_status(503)
            .with_body("overloaded")
            .create();

        let err = client(&server, Some("k")).analyze("a.zip").unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 503, ref body } if body == "overloaded"));
    }

    #[test]
    fn test_non_array_payload_is_schema_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_body(envelope(r#"{"name":"src"}"#))
            .create();

        let err = client(&server, Some("k")).analyze("a.zip").unwrap_err();
        assert!(matches!(err, LlmError::Schema(_)));
    }

    #[test]
    fn test_empty_candidates_is_parse_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_body(r#"{"candidates": []}"#)
            .create();

        let err = client(&server, Some("k")).analyze("a.zip").unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[test]
    fn test_missing_key_fails_before_request() {
        let server = mockito::Server::new();
        let err = client(&server, None).analyze("a.zip").unwrap_err();
        assert!(matches!(err, LlmError::Auth(_)));
    }

    #[test]
    fn test_schema_requires_decision_fields() {
        let schema = response_schema();
        let required = schema["items"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 4);
        assert_eq!(schema["items"]["properties"]["children"]["items"]["required"], schema["items"]["required"]);
    }
}
