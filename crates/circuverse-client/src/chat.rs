//! Streaming chat assistant
//!
//! The chat endpoint answers with server-sent-event style lines
//! (`data: {...}\n`) terminated by a `[DONE]` sentinel. The client decodes
//! UTF-8 chunks incrementally, splits on newlines and appends each delta to
//! the transcript as it arrives; a mid-stream failure keeps whatever was
//! already streamed.

use crate::config::ApiConfig;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Chat stream failure taxonomy
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// HTTP 429 from the gateway
    #[error("rate limit exceeded, please try again shortly")]
    RateLimited,

    /// HTTP 402 from the gateway
    #[error("usage credits exhausted, please add funds to your workspace")]
    PaymentRequired,

    /// Any other non-success status
    #[error("chat endpoint error ({status}): {message}")]
    Endpoint {
        status: u16,
        message: String,
    },

    /// Network failure before or during the stream
    #[error("chat transport failed: {0}")]
    Transport(String),

    /// HTTP client construction failed
    #[error("chat client setup failed: {0}")]
    Setup(String),
}

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// New message stamped now
    #[must_use]
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

const GREETING: &str = "Welcome to CIRCUVERSE AI! I can help you understand how waste \
transforms into value, smart city innovations and circular economy principles. \
What would you like to explore?";

/// Ordered conversation transcript
///
/// Partial assistant content already streamed survives a stream error; the
/// transcript is never rolled back.
#[derive(Debug, Clone)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    /// Transcript seeded with the assistant greeting
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::new(ChatRole::Assistant, GREETING)],
        }
    }

    /// All messages in order
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Append a user message
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::new(ChatRole::User, content));
    }

    /// Open an empty assistant message for incremental deltas
    pub fn begin_assistant(&mut self) {
        self.messages.push(ChatMessage::new(ChatRole::Assistant, ""));
    }

    /// Append a streamed delta to the open assistant message
    ///
    /// No-op when the last message is not an assistant message.
    pub fn append_delta(&mut self, delta: &str) {
        if let Some(last) = self
            .messages
            .last_mut()
            .filter(|m| m.role == ChatRole::Assistant)
        {
            last.content.push_str(delta);
        }
    }

    /// Content of the last message
    #[must_use]
    pub fn last_content(&self) -> &str {
        self.messages.last().map(|m| m.content.as_str()).unwrap_or("")
    }
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::new()
    }
}

/// Incremental SSE decoder
///
/// Feed raw byte chunks; receive completed content deltas. Keeps a carry
/// buffer across chunk boundaries so a `data:` line split mid-chunk still
/// decodes.
#[derive(Debug, Default)]
pub struct SseAccumulator {
    buffer: String,
    done: bool,
}

impl SseAccumulator {
    /// Fresh accumulator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the `[DONE]` sentinel was seen
    #[inline]
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Decode one chunk, returning any completed deltas
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Vec<String> {
        if self.done {
            return Vec::new();
        }
        self.buffer.push_str(&String::from_utf8_lossy(chunk));

        let mut deltas = Vec::new();
        while let Some(newline) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=newline).collect();
            let line = line.trim();
            let Some(payload) = line.strip_prefix("data: ").or_else(|| line.strip_prefix("data:"))
            else {
                continue;
            };
            let payload = payload.trim();
            if payload == "[DONE]" {
                self.done = true;
                break;
            }
            match serde_json::from_str::<serde_json::Value>(payload) {
                Ok(value) => {
                    if let Some(content) = value
                        .pointer("/choices/0/delta/content")
                        .and_then(|c| c.as_str())
                    {
                        deltas.push(content.to_string());
                    }
                }
                // Tolerate partial/garbled frames; the stream continues.
                Err(err) => tracing::debug!(error = %err, "skipping unparsable SSE frame"),
            }
        }
        deltas
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: Vec<WireMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Streaming chat client
#[derive(Debug, Clone)]
pub struct ChatClient {
    config: ApiConfig,
    client: Client,
}

impl ChatClient {
    /// Create a client for the configured endpoint
    pub fn new(config: ApiConfig) -> Result<Self, StreamError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| StreamError::Setup(e.to_string()))?;
        Ok(Self { config, client })
    }

    /// Stream one assistant reply, invoking `on_delta` per content delta
    ///
    /// Returns the full assembled reply. On a mid-stream transport failure
    /// the deltas already delivered through `on_delta` stand; only the error
    /// is returned.
    pub async fn stream_reply<F>(
        &self,
        messages: &[ChatMessage],
        mut on_delta: F,
    ) -> Result<String, StreamError>
    where
        F: FnMut(&str),
    {
        let request = ChatRequest {
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: match m.role {
                        ChatRole::User => "user",
                        ChatRole::Assistant => "assistant",
                    },
                    content: &m.content,
                })
                .collect(),
            stream: true,
        };

        let mut builder = self.client.post(self.config.endpoint("chat")).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| StreamError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(StreamError::RateLimited),
            StatusCode::PAYMENT_REQUIRED => return Err(StreamError::PaymentRequired),
            status if !status.is_success() => {
                let message = response.text().await.unwrap_or_default();
                return Err(StreamError::Endpoint {
                    status: status.as_u16(),
                    message,
                });
            }
            _ => {}
        }

        let mut accumulator = SseAccumulator::new();
        let mut reply = String::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| StreamError::Transport(e.to_string()))?;
            for delta in accumulator.push_chunk(&chunk) {
                on_delta(&delta);
                reply.push_str(&delta);
            }
            if accumulator.is_done() {
                break;
            }
        }

        tracing::debug!(chars = reply.len(), "chat reply assembled");
        Ok(reply)
    }
}

/// Canned assistant reply for offline mode, keyed on conversation keywords
#[must_use]
pub fn suggested_reply(input: &str) -> &'static str {
    let lower = input.to_lowercase();
    if lower.contains("plastic") {
        "Plastic waste has strong circular potential: plastic-modified asphalt, \
         eco-bricks, urban furniture and thermal insulation panels."
    } else if lower.contains("circular") || lower.contains("economy") {
        "The circular economy follows six principles: use, reuse, repair, \
         recycle, redesign, repeat - closing the loop on materials."
    } else if lower.contains("city") || lower.contains("smart") || lower.contains("urban") {
        "AI-powered sustainable cities combine plastic roads, waste-to-energy \
         plants, modular recycled housing and solar made from e-waste."
    } else {
        "I can help with circular economy principles, waste transformation \
         technologies, smart city innovations and impact metrics."
    }
}
