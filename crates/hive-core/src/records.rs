//! Persisted records produced by the tool invocation protocol.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::roles::{AgentRole, ThoughtType};

/// A generated source file.
///
/// Keyed by `(project, path)` — a later write for the same key replaces the
/// earlier one (upsert, never append).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFile {
    /// Project-relative logical path (e.g. `src/App.tsx`).
    pub path: String,
    /// Full file text.
    pub content: String,
    /// One-line description supplied by the generating agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Last write time.
    pub updated_at: DateTime<Utc>,
}

/// A single narrated, timestamped utterance attributed to an agent.
///
/// Append-only: thoughts are never mutated or deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarratedThought {
    /// Unique id (`th_…`).
    pub id: String,
    /// Narrating role.
    pub agent: AgentRole,
    /// Free-text content.
    pub content: String,
    /// Intent classification.
    #[serde(rename = "type")]
    pub thought_type: ThoughtType,
    /// Emission time.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thought_serializes_type_field() {
        let t = NarratedThought {
            id: "th_1".into(),
            agent: AgentRole::Coder,
            content: "writing App.tsx".into(),
            thought_type: ThoughtType::Coding,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["type"], "coding");
        assert_eq!(json["agent"], "Coder");
    }

    #[test]
    fn file_omits_absent_description() {
        let f = GeneratedFile {
            path: "src/App.tsx".into(),
            content: "export default function App() {}".into(),
            description: None,
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&f).unwrap();
        assert!(json.get("description").is_none());
    }
}
