//! OpenAI-compatible streaming backend.
//!
//! Talks to any Chat Completions endpoint that speaks the OpenAI SSE
//! protocol (`stream: true`). Tool-call argument fragments arrive as
//! per-index deltas; this client accumulates them and emits a single
//! [`StreamEvent::ToolCallEnd`] per call once the round's finish reason
//! lands.

use std::collections::BTreeMap;

use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::stream::BoxStream;
use futures::StreamExt;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, instrument, warn};

use hive_core::events::{StreamEvent, ToolCall};

use crate::backend::{ChatMessage, GenerationBackend, GenerationRequest};
use crate::errors::{ProtocolError, Result};

/// Default Chat Completions endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Configuration for [`OpenAiBackend`].
#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    /// Endpoint root (no trailing slash).
    pub base_url: String,
    /// Model id.
    pub model: String,
    /// Bearer token.
    pub api_key: String,
}

impl OpenAiConfig {
    /// Config with the default endpoint and model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
        }
    }
}

/// Streaming client for OpenAI-compatible Chat Completions endpoints.
pub struct OpenAiBackend {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiBackend {
    /// New backend with a fresh HTTP client.
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn request_body(&self, request: &GenerationRequest) -> Value {
        json!({
            "model": self.config.model,
            "stream": true,
            "messages": request.messages.iter().map(wire_message).collect::<Vec<_>>(),
            "tools": request.tools.iter().map(|tool| json!({
                "type": "function",
                "function": {
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": tool.parameters,
                }
            })).collect::<Vec<_>>(),
        })
    }
}

#[async_trait]
impl GenerationBackend for OpenAiBackend {
    #[instrument(skip(self, request), fields(project_id = %request.project_id, model = %self.config.model))]
    async fn stream(&self, request: GenerationRequest) -> Result<BoxStream<'static, StreamEvent>> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(&request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = body.chars().take(512).collect::<String>();
            return Err(ProtocolError::BackendStatus {
                status: status.as_u16(),
                body,
            });
        }

        let mut sse = response.bytes_stream().eventsource();
        let stream = async_stream::stream! {
            yield StreamEvent::Start;

            let mut pending: BTreeMap<u32, PendingToolCall> = BTreeMap::new();
            let mut finish_reason: Option<String> = None;

            while let Some(event) = sse.next().await {
                let event = match event {
                    Ok(event) => event,
                    Err(err) => {
                        yield StreamEvent::Error { error: err.to_string() };
                        return;
                    }
                };
                if event.data == "[DONE]" {
                    break;
                }
                let chunk: ChatChunk = match serde_json::from_str(&event.data) {
                    Ok(chunk) => chunk,
                    Err(err) => {
                        warn!(%err, "skipping unparseable stream chunk");
                        continue;
                    }
                };
                let Some(choice) = chunk.choices.into_iter().next() else {
                    continue;
                };

                if let Some(text) = choice.delta.content {
                    if !text.is_empty() {
                        yield StreamEvent::TextDelta { delta: text };
                    }
                }
                for fragment in choice.delta.tool_calls.unwrap_or_default() {
                    let entry = pending.entry(fragment.index).or_default();
                    if let Some(id) = fragment.id {
                        entry.id = id;
                    }
                    if let Some(function) = fragment.function {
                        if let Some(name) = function.name {
                            entry.name = name;
                            yield StreamEvent::ToolCallStart {
                                tool_call_id: entry.id.clone(),
                                name: entry.name.clone(),
                            };
                        }
                        if let Some(arguments) = function.arguments {
                            if !arguments.is_empty() {
                                entry.arguments.push_str(&arguments);
                                yield StreamEvent::ToolCallDelta {
                                    tool_call_id: entry.id.clone(),
                                    arguments_delta: arguments,
                                };
                            }
                        }
                    }
                }
                if let Some(reason) = choice.finish_reason {
                    finish_reason = Some(reason);
                }
            }

            for (_, call) in pending {
                yield StreamEvent::ToolCallEnd { tool_call: call.finish() };
            }

            let stop_reason = finish_reason.unwrap_or_else(|| "stop".to_string());
            debug!(%stop_reason, "backend round complete");
            yield StreamEvent::Done { stop_reason };
        };
        Ok(Box::pin(stream))
    }
}

#[derive(Default)]
struct PendingToolCall {
    id: String,
    name: String,
    arguments: String,
}

impl PendingToolCall {
    fn finish(self) -> ToolCall {
        let arguments = match serde_json::from_str::<Map<String, Value>>(&self.arguments) {
            Ok(map) => map,
            Err(err) => {
                // The dispatcher turns the missing fields into an error
                // ack; nothing to salvage here.
                warn!(%err, name = %self.name, "tool call arguments were not valid JSON");
                Map::new()
            }
        };
        let id = if self.id.is_empty() {
            hive_core::ids::call_id()
        } else {
            self.id
        };
        ToolCall {
            id,
            name: self.name,
            arguments,
        }
    }
}

#[derive(Deserialize)]
struct ChatChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    delta: ChunkDelta,
    finish_reason: Option<String>,
}

#[derive(Default, Deserialize)]
struct ChunkDelta {
    content: Option<String>,
    tool_calls: Option<Vec<ToolCallFragment>>,
}

#[derive(Deserialize)]
struct ToolCallFragment {
    index: u32,
    id: Option<String>,
    function: Option<FunctionFragment>,
}

#[derive(Deserialize)]
struct FunctionFragment {
    name: Option<String>,
    arguments: Option<String>,
}

fn wire_message(message: &ChatMessage) -> Value {
    match message {
        ChatMessage::System { content } => json!({ "role": "system", "content": content }),
        ChatMessage::User { content } => json!({ "role": "user", "content": content }),
        ChatMessage::Assistant {
            content,
            tool_calls,
        } => {
            let mut wire = json!({ "role": "assistant", "content": content });
            if !tool_calls.is_empty() {
                wire["tool_calls"] = tool_calls
                    .iter()
                    .map(|call| {
                        json!({
                            "id": call.id,
                            "type": "function",
                            "function": {
                                "name": call.name,
                                "arguments": Value::Object(call.arguments.clone()).to_string(),
                            }
                        })
                    })
                    .collect();
            }
            wire
        }
        ChatMessage::Tool { call_id, content } => json!({
            "role": "tool",
            "tool_call_id": call_id,
            "content": content,
        }),
    }
}
