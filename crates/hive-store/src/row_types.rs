//! Raw row structs, one per table.
//!
//! Timestamps are RFC 3339 strings at this layer; conversion to
//! `DateTime<Utc>` happens in [`crate::store`] when rows become
//! `hive-core` records.

use serde::{Deserialize, Serialize};

/// A row from `projects`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRow {
    /// Project id (`proj_…`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Creating prompt.
    pub prompt: String,
    /// Owner handle.
    pub user_id: String,
    /// Lifecycle status (`building` / `ready` / `error`).
    pub status: String,
    /// RFC 3339 creation time.
    pub created_at: String,
    /// RFC 3339 last-mutation time.
    pub updated_at: String,
}

/// A row from `files`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRow {
    /// Row id (`file_…`). Stable across upserts of the same path.
    pub id: String,
    /// Owning project.
    pub project_id: String,
    /// Project-relative path; unique per project.
    pub path: String,
    /// Full file text.
    pub content: String,
    /// Optional one-line description from the generating agent.
    pub description: Option<String>,
    /// Hex sha-256 of `content`.
    pub content_hash: String,
    /// RFC 3339 last-write time.
    pub updated_at: String,
}

/// A row from `thoughts`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtRow {
    /// Thought id (`th_…`).
    pub id: String,
    /// Owning project.
    pub project_id: String,
    /// Narrating role name.
    pub agent: String,
    /// Thought text.
    pub content: String,
    /// Intent classification name.
    pub thought_type: String,
    /// RFC 3339 emission time.
    pub created_at: String,
}
