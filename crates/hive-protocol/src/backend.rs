//! The generative backend boundary.
//!
//! Everything upstream of the turn loop is abstracted behind
//! [`GenerationBackend`] so the loop, the dispatcher, and the server are
//! testable without network access. The real implementation lives in
//! [`crate::openai`]; tests use [`crate::testutil::ScriptedBackend`].

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use hive_core::events::{StreamEvent, ToolCall};

use crate::errors::Result;
use crate::tools::ToolDefinition;

/// One message in the conversation history sent to the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
    /// System instructions.
    System {
        /// Instruction text.
        content: String,
    },
    /// A user turn.
    User {
        /// Message text.
        content: String,
    },
    /// An assistant turn, possibly carrying tool calls.
    Assistant {
        /// Narration text (may be empty when the turn was pure tool use).
        content: String,
        /// Tool calls issued in this turn.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCall>,
    },
    /// A tool result fed back to the backend.
    Tool {
        /// The call this result answers.
        call_id: String,
        /// JSON-encoded result payload.
        content: String,
    },
}

impl ChatMessage {
    /// Shorthand for a user message.
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage::User {
            content: content.into(),
        }
    }

    /// Shorthand for a system message.
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage::System {
            content: content.into(),
        }
    }
}

/// One streaming request to the generative backend.
#[derive(Clone, Debug)]
pub struct GenerationRequest {
    /// Owning project, threaded through for logging.
    pub project_id: String,
    /// Conversation history, oldest first.
    pub messages: Vec<ChatMessage>,
    /// Tools offered to the backend.
    pub tools: Vec<ToolDefinition>,
}

/// A streaming generative backend.
///
/// One call = one backend round: the returned stream yields
/// [`StreamEvent`]s until a `Done` or `Error` terminator.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Open one streaming round.
    async fn stream(&self, request: GenerationRequest) -> Result<BoxStream<'static, StreamEvent>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_message_serde_tags_role() {
        let msg = ChatMessage::user("build a crm");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "build a crm");
    }

    #[test]
    fn assistant_without_tool_calls_omits_field() {
        let msg = ChatMessage::Assistant {
            content: "done".into(),
            tool_calls: vec![],
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.get("tool_calls").is_none());
    }
}
