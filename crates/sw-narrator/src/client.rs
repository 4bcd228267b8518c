//! Ollama-backed narrator.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use sw_engine::{GeneratedChapter, NarrativeRequest, Narrator, NarratorError};

use crate::prompt;

/// Default Ollama endpoint.
pub const DEFAULT_URL: &str = "http://127.0.0.1:11434";
/// Default generation model.
pub const DEFAULT_MODEL: &str = "qwen3:4b";
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    format: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Narrator backed by a local Ollama instance.
pub struct OllamaNarrator {
    http: reqwest::Client,
    url: String,
    model: String,
}

impl OllamaNarrator {
    /// Create a narrator against the default local endpoint.
    pub fn new() -> Result<Self, NarratorError> {
        Self::with_endpoint(DEFAULT_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a narrator against a specific endpoint and model.
    pub fn with_endpoint(url: &str, model: &str, timeout_secs: u64) -> Result<Self, NarratorError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| NarratorError::Request(e.to_string()))?;
        Ok(Self {
            http,
            url: url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    /// The model this narrator generates with.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Probe whether the Ollama service answers at all.
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.url);
        self.http.get(&url).send().await.is_ok()
    }

    async fn chat(&self, system: String, user: String) -> Result<String, NarratorError> {
        let url = format!("{}/api/chat", self.url);
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            stream: false,
            format: Some("json"),
        };

        info!(model = %self.model, "narrator call");
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| NarratorError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NarratorError::Request(format!(
                "ollama returned {status}: {body}"
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| NarratorError::Request(e.to_string()))?;
        debug!(chars = chat.message.content.len(), "narrator response");
        Ok(chat.message.content)
    }
}

/// Parse a model response into a chapter, tolerating prose around the JSON.
fn parse_chapter(text: &str) -> Result<GeneratedChapter, NarratorError> {
    if let Ok(chapter) = serde_json::from_str::<GeneratedChapter>(text) {
        return Ok(chapter);
    }
    let extracted = extract_json(text);
    serde_json::from_str::<GeneratedChapter>(extracted)
        .map_err(|e| NarratorError::Malformed(format!("{e}: {text}")))
}

/// Cut the outermost brace-delimited slice out of surrounding prose.
fn extract_json(text: &str) -> &str {
    if let Some(start) = text.find('{') {
        if let Some(end) = text.rfind('}') {
            if start < end {
                return &text[start..=end];
            }
        }
    }
    text
}

#[async_trait]
impl Narrator for OllamaNarrator {
    async fn generate(
        &self,
        request: &NarrativeRequest,
    ) -> Result<GeneratedChapter, NarratorError> {
        let system = prompt::system(request.total_chapters);
        let user = prompt::for_request(request);
        let content = self.chat(system, user).await?;
        parse_chapter(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_json_parses() {
        let text = r#"{
            "prose": "A door creaks open.",
            "options": [
                {"letter": "A", "text": "one", "category": "explorer"},
                {"letter": "B", "text": "two", "category": "logical"},
                {"letter": "C", "text": "three", "category": "emotional"},
                {"letter": "D", "text": "four", "category": "fate"}
            ]
        }"#;
        let chapter = parse_chapter(text).unwrap();
        assert!(chapter.validate(false).is_ok());
    }

    #[test]
    fn json_wrapped_in_prose_parses() {
        let text = "Here is the chapter:\n{\"prose\": \"The mist lifts.\"}\nEnjoy!";
        let chapter = parse_chapter(text).unwrap();
        assert_eq!(chapter.prose, "The mist lifts.");
        assert!(chapter.options.is_none());
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            parse_chapter("no json here"),
            Err(NarratorError::Malformed(_))
        ));
    }

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let narrator =
            OllamaNarrator::with_endpoint("http://localhost:11434/", "qwen3:4b", 30).unwrap();
        assert_eq!(narrator.url, "http://localhost:11434");
    }
}
