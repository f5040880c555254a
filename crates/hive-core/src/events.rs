//! Event types for generation.
//!
//! Two event families:
//!
//! - **[`StreamEvent`]**: low-level events from the generative backend's
//!   token stream (text deltas, tool call construction, done/error).
//! - **[`TurnEvent`]**: turn-lifecycle events emitted by the protocol layer
//!   as tool invocations are dispatched; this is what the server streams to
//!   clients and what the reconciler folds.
//!
//! `StreamEvent` is purely in-memory (never persisted). `TurnEvent` is
//! serialized onto the client event stream but also never persisted — the
//! durable records it references are written through the store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::records::{GeneratedFile, NarratedThought};

// ─────────────────────────────────────────────────────────────────────────────
// Tool calls
// ─────────────────────────────────────────────────────────────────────────────

/// A structured, named side-effecting call emitted mid-stream by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCall {
    /// Backend-assigned call id, or a synthesized `call_…` id.
    pub id: String,
    /// Tool name (`writeFile` or `logSwarmThought`).
    pub name: String,
    /// Parsed JSON arguments.
    pub arguments: Map<String, Value>,
}

// ─────────────────────────────────────────────────────────────────────────────
// StreamEvent — generative backend streaming events
// ─────────────────────────────────────────────────────────────────────────────

/// Events emitted while the generative backend streams one response.
///
/// Transient; they drive tool-call assembly and live narration only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StreamEvent {
    /// Stream started.
    #[serde(rename = "start")]
    Start,

    /// Incremental narration text.
    #[serde(rename = "text_delta")]
    TextDelta {
        /// Text fragment.
        delta: String,
    },

    /// Tool call started.
    #[serde(rename = "toolcall_start")]
    ToolCallStart {
        /// Tool call id (may be empty for backends that assign none).
        #[serde(rename = "toolCallId")]
        tool_call_id: String,
        /// Tool name.
        name: String,
    },

    /// Incremental tool call argument JSON.
    #[serde(rename = "toolcall_delta")]
    ToolCallDelta {
        /// Tool call id.
        #[serde(rename = "toolCallId")]
        tool_call_id: String,
        /// Partial JSON arguments.
        #[serde(rename = "argumentsDelta")]
        arguments_delta: String,
    },

    /// Tool call fully constructed.
    #[serde(rename = "toolcall_end")]
    ToolCallEnd {
        /// Complete tool call.
        #[serde(rename = "toolCall")]
        tool_call: ToolCall,
    },

    /// Stream completed successfully.
    #[serde(rename = "done")]
    Done {
        /// Stop reason reported by the backend (`stop`, `tool_calls`, …).
        #[serde(rename = "stopReason")]
        stop_reason: String,
    },

    /// Stream error — the turn aborts.
    #[serde(rename = "error")]
    Error {
        /// Error message.
        error: String,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// TurnEvent — generation-turn lifecycle
// ─────────────────────────────────────────────────────────────────────────────

/// How a generation turn stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StopKind {
    /// The backend finished with plain text (normal completion).
    Completed,
    /// The tool-round cap was reached — a soft stop, not a failure.
    RoundCap,
}

/// Turn-lifecycle events, in delivery order.
///
/// Delivery order is also append order for thoughts and upsert order for
/// files — consumers rely on that for within-stream ordering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TurnEvent {
    /// A generation turn began.
    TurnStarted {
        /// Owning project.
        #[serde(rename = "projectId")]
        project_id: String,
        /// Turn id (`turn_…`).
        #[serde(rename = "turnId")]
        turn_id: String,
    },

    /// Incremental assistant narration that has not yet produced a thought.
    Narration {
        /// Text fragment.
        delta: String,
    },

    /// A `logSwarmThought` invocation was dispatched.
    ThoughtLogged {
        /// The appended thought.
        thought: NarratedThought,
        /// The originating tool call id (dedup key for clients).
        #[serde(rename = "callId")]
        call_id: String,
    },

    /// A `writeFile` invocation was dispatched.
    FileWritten {
        /// The upserted file.
        file: GeneratedFile,
        /// The originating tool call id.
        #[serde(rename = "callId")]
        call_id: String,
    },

    /// The turn ended cleanly; the project is now `ready`.
    TurnCompleted {
        /// Owning project.
        #[serde(rename = "projectId")]
        project_id: String,
        /// Turn id.
        #[serde(rename = "turnId")]
        turn_id: String,
        /// Number of backend rounds consumed.
        rounds: u32,
        /// Why the turn stopped.
        stop: StopKind,
    },

    /// The turn aborted on a stream error; the project is now `error`.
    TurnFailed {
        /// Owning project.
        #[serde(rename = "projectId")]
        project_id: String,
        /// Turn id.
        #[serde(rename = "turnId")]
        turn_id: String,
        /// Backend error message.
        error: String,
    },
}

impl TurnEvent {
    /// Wire discriminant, useful for logging and metrics labels.
    pub fn event_type(&self) -> &'static str {
        match self {
            TurnEvent::TurnStarted { .. } => "turnStarted",
            TurnEvent::Narration { .. } => "narration",
            TurnEvent::ThoughtLogged { .. } => "thoughtLogged",
            TurnEvent::FileWritten { .. } => "fileWritten",
            TurnEvent::TurnCompleted { .. } => "turnCompleted",
            TurnEvent::TurnFailed { .. } => "turnFailed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{AgentRole, ThoughtType};
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn stream_event_tagged_serde() {
        let e = StreamEvent::TextDelta {
            delta: "hello".into(),
        };
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["type"], "text_delta");
        let back: StreamEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, e);
    }

    #[test]
    fn toolcall_end_round_trips() {
        let mut args = Map::new();
        let _ = args.insert("path".into(), json!("src/App.tsx"));
        let e = StreamEvent::ToolCallEnd {
            tool_call: ToolCall {
                id: "call_1".into(),
                name: "writeFile".into(),
                arguments: args,
            },
        };
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["toolCall"]["name"], "writeFile");
        let back: StreamEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, e);
    }

    #[test]
    fn turn_event_types_are_stable() {
        let e = TurnEvent::ThoughtLogged {
            thought: NarratedThought {
                id: "th_1".into(),
                agent: AgentRole::Manager,
                content: "planning".into(),
                thought_type: ThoughtType::Planning,
                created_at: Utc::now(),
            },
            call_id: "call_1".into(),
        };
        assert_eq!(e.event_type(), "thoughtLogged");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["type"], "thoughtLogged");
    }

    #[test]
    fn stop_kind_serde() {
        assert_eq!(
            serde_json::to_string(&StopKind::RoundCap).unwrap(),
            "\"roundCap\""
        );
    }
}
