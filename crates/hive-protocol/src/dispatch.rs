//! Tool invocation dispatch.
//!
//! Parses a completed [`ToolCall`], persists its effect through the store,
//! and produces two things: a JSON ack fed back to the backend as the tool
//! result, and a [`TurnEvent`] for live clients.
//!
//! Failure posture, per invocation:
//! - malformed arguments → error ack, no event, turn continues
//! - persistence failure → warn-logged and swallowed; the success ack and
//!   the event still go out so a flaky disk never kills a turn

use std::sync::Arc;

use chrono::Utc;
use metrics::counter;
use serde_json::{json, Map, Value};
use tracing::{instrument, warn};

use hive_core::constants::{
    METRIC_TOOL_INVOCATIONS_TOTAL, METRIC_TOOL_PERSISTENCE_FAILURES_TOTAL, TOOL_LOG_THOUGHT,
    TOOL_WRITE_FILE,
};
use hive_core::events::{ToolCall, TurnEvent};
use hive_core::records::{GeneratedFile, NarratedThought};
use hive_core::roles::{AgentRole, ThoughtType};
use hive_store::ProjectStore;

/// The result of dispatching one tool call.
#[derive(Clone, Debug)]
pub struct Dispatched {
    /// JSON ack returned to the backend as the tool result.
    pub ack: Value,
    /// Event for live clients; absent for malformed calls.
    pub event: Option<TurnEvent>,
}

/// Parses, persists, and acks tool invocations for one store.
pub struct ToolDispatcher {
    store: Arc<ProjectStore>,
}

impl ToolDispatcher {
    /// New dispatcher writing through `store`.
    pub fn new(store: Arc<ProjectStore>) -> Self {
        Self { store }
    }

    /// Dispatch one completed tool call for `project_id`.
    #[instrument(skip(self, call), fields(tool = %call.name, call_id = %call.id))]
    pub fn dispatch(&self, project_id: &str, call: &ToolCall) -> Dispatched {
        counter!(METRIC_TOOL_INVOCATIONS_TOTAL, "tool" => call.name.clone()).increment(1);
        match call.name.as_str() {
            TOOL_WRITE_FILE => self.write_file(project_id, call),
            TOOL_LOG_THOUGHT => self.log_thought(project_id, call),
            other => {
                warn!(tool = other, "unknown tool invoked");
                Dispatched {
                    ack: error_ack(format!("unknown tool: {other}")),
                    event: None,
                }
            }
        }
    }

    fn write_file(&self, project_id: &str, call: &ToolCall) -> Dispatched {
        let Some(path) = str_arg(&call.arguments, "path") else {
            return malformed(TOOL_WRITE_FILE, "path");
        };
        let Some(content) = str_arg(&call.arguments, "content") else {
            return malformed(TOOL_WRITE_FILE, "content");
        };
        let description = str_arg(&call.arguments, "description");

        let file = match self
            .store
            .upsert_file(project_id, path, content, description)
        {
            Ok(file) => file,
            Err(err) => {
                // Non-fatal: the turn continues, the client still sees the
                // write, only durability is degraded.
                warn!(%err, path, "file persistence failed, continuing turn");
                counter!(METRIC_TOOL_PERSISTENCE_FAILURES_TOTAL, "tool" => TOOL_WRITE_FILE)
                    .increment(1);
                GeneratedFile {
                    path: path.to_string(),
                    content: content.to_string(),
                    description: description.map(str::to_string),
                    updated_at: Utc::now(),
                }
            }
        };

        Dispatched {
            ack: json!({ "status": "written", "path": path }),
            event: Some(TurnEvent::FileWritten {
                file,
                call_id: call.id.clone(),
            }),
        }
    }

    fn log_thought(&self, project_id: &str, call: &ToolCall) -> Dispatched {
        let Some(agent_raw) = str_arg(&call.arguments, "agent") else {
            return malformed(TOOL_LOG_THOUGHT, "agent");
        };
        let Some(thought_text) = str_arg(&call.arguments, "thought") else {
            return malformed(TOOL_LOG_THOUGHT, "thought");
        };
        let Some(type_raw) = str_arg(&call.arguments, "type") else {
            return malformed(TOOL_LOG_THOUGHT, "type");
        };
        let Ok(agent) = agent_raw.parse::<AgentRole>() else {
            return Dispatched {
                ack: error_ack(format!("unknown agent: {agent_raw}")),
                event: None,
            };
        };
        let Ok(thought_type) = type_raw.parse::<ThoughtType>() else {
            return Dispatched {
                ack: error_ack(format!("unknown thought type: {type_raw}")),
                event: None,
            };
        };

        let thought = match self.store.append_thought(
            project_id,
            agent.as_str(),
            thought_text,
            thought_type.as_str(),
        ) {
            Ok(thought) => thought,
            Err(err) => {
                warn!(%err, "thought persistence failed, continuing turn");
                counter!(METRIC_TOOL_PERSISTENCE_FAILURES_TOTAL, "tool" => TOOL_LOG_THOUGHT)
                    .increment(1);
                NarratedThought {
                    id: hive_core::ids::thought_id(),
                    agent,
                    content: thought_text.to_string(),
                    thought_type,
                    created_at: Utc::now(),
                }
            }
        };

        Dispatched {
            ack: json!({ "status": "logged", "agent": agent.as_str() }),
            event: Some(TurnEvent::ThoughtLogged {
                thought,
                call_id: call.id.clone(),
            }),
        }
    }
}

fn str_arg<'a>(args: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    args.get(key).and_then(Value::as_str)
}

fn error_ack(message: String) -> Value {
    json!({ "status": "error", "message": message })
}

fn malformed(tool: &str, field: &str) -> Dispatched {
    warn!(tool, field, "malformed tool arguments");
    Dispatched {
        ack: error_ack(format!("missing required field: {field}")),
        event: None,
    }
}
