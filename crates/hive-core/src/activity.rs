//! The derived activity timeline union.
//!
//! [`ActivityItem`] merges user messages and narrated thoughts into one
//! orderable view. It is derived on demand and never persisted.

use serde::{Deserialize, Serialize};

use crate::roles::{AgentRole, ThoughtType};

/// One entry in the merged activity timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ActivityItem {
    /// A user message.
    User {
        /// Stable display key.
        key: String,
        /// Message text.
        content: String,
        /// Millisecond epoch used for ordering.
        #[serde(rename = "createdAt")]
        created_at_ms: i64,
    },
    /// A narrated agent thought.
    Thought {
        /// Stable display key (tool call id or synthesized).
        key: String,
        /// Narrating role.
        agent: AgentRole,
        /// Intent classification.
        #[serde(rename = "type")]
        thought_type: ThoughtType,
        /// Thought text.
        content: String,
        /// Millisecond epoch used for ordering.
        #[serde(rename = "createdAt")]
        created_at_ms: i64,
    },
}

impl ActivityItem {
    /// Ordering timestamp.
    pub fn created_at_ms(&self) -> i64 {
        match self {
            ActivityItem::User { created_at_ms, .. }
            | ActivityItem::Thought { created_at_ms, .. } => *created_at_ms,
        }
    }

    /// True for user entries. On an exact timestamp tie the user entry
    /// sorts before the agent entry — the user's turn always precedes the
    /// response it provoked.
    pub fn is_user(&self) -> bool {
        matches!(self, ActivityItem::User { .. })
    }

    /// Stable display key.
    pub fn key(&self) -> &str {
        match self {
            ActivityItem::User { key, .. } | ActivityItem::Thought { key, .. } => key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_tags_by_kind() {
        let item = ActivityItem::User {
            key: "user-0".into(),
            content: "build a crm".into(),
            created_at_ms: 1_000,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "user");
        assert_eq!(json["createdAt"], 1_000);
    }

    #[test]
    fn accessors() {
        let item = ActivityItem::Thought {
            key: "call_1".into(),
            agent: AgentRole::Designer,
            thought_type: ThoughtType::Designing,
            content: "dark, luxurious".into(),
            created_at_ms: 42,
        };
        assert!(!item.is_user());
        assert_eq!(item.created_at_ms(), 42);
        assert_eq!(item.key(), "call_1");
    }
}
