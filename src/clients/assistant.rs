use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde_json::json;

use crate::error::{AppError, Result};

/// Text deltas produced by the assistant, in arrival order
pub type ReplyStream = BoxStream<'static, Result<String>>;

/// Streams assistant replies for the site's chat widget
#[async_trait]
pub trait ChatAssistant: Send + Sync {
    async fn stream_reply(&self, message: &str, thread_id: Option<&str>) -> Result<ReplyStream>;
}

/// OpenAI Assistants API client (streaming runs)
pub struct OpenAiAssistant {
    http: reqwest::Client,
    api_key: String,
    assistant_id: String,
}

impl OpenAiAssistant {
    pub fn new(http: reqwest::Client, api_key: String, assistant_id: String) -> Self {
        Self {
            http,
            api_key,
            assistant_id,
        }
    }
}

#[async_trait]
impl ChatAssistant for OpenAiAssistant {
    async fn stream_reply(&self, message: &str, thread_id: Option<&str>) -> Result<ReplyStream> {
        if self.api_key.is_empty() {
            return Err(AppError::ExternalService(
                "LLM_API_KEY is not configured".to_string(),
            ));
        }

        // A known thread continues the conversation; otherwise a thread is
        // created together with the run
        let (url, body) = match thread_id {
            Some(id) => (
                format!("https://api.openai.com/v1/threads/{}/runs", id),
                json!({
                    "assistant_id": self.assistant_id,
                    "stream": true,
                    "additional_messages": [{ "role": "user", "content": message }]
                }),
            ),
            None => (
                "https://api.openai.com/v1/threads/runs".to_string(),
                json!({
                    "assistant_id": self.assistant_id,
                    "stream": true,
                    "thread": { "messages": [{ "role": "user", "content": message }] }
                }),
            ),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("OpenAI-Beta", "assistants=v2")
            .json(&body)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| AppError::ExternalService(format!("assistant run failed: {}", e)))?;

        let mut parser = SseParser::default();
        let deltas = response
            .bytes_stream()
            .map_err(AppError::from)
            .map(move |chunk| match chunk {
                Ok(bytes) => {
                    let texts: Vec<Result<String>> =
                        parser.feed(&bytes).into_iter().map(Ok).collect();
                    stream::iter(texts)
                }
                Err(e) => stream::iter(vec![Err(e)]),
            })
            .flatten()
            .boxed();

        Ok(deltas)
    }
}

/// Incremental parser for the upstream SSE byte stream. Chunks can split
/// lines arbitrarily, so a partial trailing line is buffered between feeds.
#[derive(Default)]
struct SseParser {
    buf: String,
    event: String,
}

impl SseParser {
    /// Feed raw bytes, returning any completed message-delta texts
    fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buf.push_str(&String::from_utf8_lossy(bytes));

        let mut texts = Vec::new();
        while let Some(pos) = self.buf.find('\n') {
            let line: String = self.buf.drain(..=pos).collect();
            let line = line.trim_end();

            if line.is_empty() {
                self.event.clear();
            } else if let Some(name) = line.strip_prefix("event:") {
                self.event = name.trim().to_string();
            } else if let Some(data) = line.strip_prefix("data:") {
                let data = data.trim();
                if data == "[DONE]" {
                    continue;
                }
                if self.event == "thread.message.delta" {
                    if let Some(text) = extract_delta_text(data) {
                        texts.push(text);
                    }
                }
            }
        }

        texts
    }
}

/// Pull the text value out of a `thread.message.delta` payload
fn extract_delta_text(data: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(data).ok()?;
    let parts = value.get("delta")?.get("content")?.as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text")?.get("value")?.as_str())
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_extracts_delta_text() {
        let mut parser = SseParser::default();
        let payload = concat!(
            "event: thread.message.delta\n",
            "data: {\"delta\":{\"content\":[{\"text\":{\"value\":\"Hello\"}}]}}\n",
            "\n",
        );
        assert_eq!(parser.feed(payload.as_bytes()), vec!["Hello".to_string()]);
    }

    #[test]
    fn test_parser_handles_split_chunks() {
        let mut parser = SseParser::default();
        let first = "event: thread.message.delta\ndata: {\"delta\":{\"content\":[{\"te";
        let second = "xt\":{\"value\":\"Hi\"}}]}}\n\n";

        assert!(parser.feed(first.as_bytes()).is_empty());
        assert_eq!(parser.feed(second.as_bytes()), vec!["Hi".to_string()]);
    }

    #[test]
    fn test_parser_ignores_other_events() {
        let mut parser = SseParser::default();
        let payload = concat!(
            "event: thread.run.created\n",
            "data: {\"id\":\"run_1\"}\n",
            "\n",
            "data: [DONE]\n",
        );
        assert!(parser.feed(payload.as_bytes()).is_empty());
    }
}
