//! Project identity and lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a project.
///
/// Created as [`Building`](ProjectStatus::Building); the generation turn's
/// completion signal moves it to [`Ready`](ProjectStatus::Ready), a stream
/// error to [`Error`](ProjectStatus::Error). There is no automatic retry —
/// a later successful turn moves an errored project back to `Ready`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Generation in progress (or never completed).
    Building,
    /// Last generation turn completed cleanly.
    Ready,
    /// Last generation turn aborted on a stream error.
    Error,
}

impl ProjectStatus {
    /// Canonical storage name.
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Building => "building",
            ProjectStatus::Ready => "ready",
            ProjectStatus::Error => "error",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = crate::roles::ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "building" => Ok(ProjectStatus::Building),
            "ready" => Ok(ProjectStatus::Ready),
            "error" => Ok(ProjectStatus::Error),
            other => Err(crate::roles::ParseRoleError {
                kind: "project status",
                value: other.to_string(),
            }),
        }
    }
}

/// A user-owned generated project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique id (`proj_…`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// The prompt the project was created from.
    pub prompt: String,
    /// Opaque owner handle.
    pub user_id: String,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last mutation time (status flips, file writes).
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips() {
        for s in ["building", "ready", "error"] {
            let status: ProjectStatus = s.parse().unwrap();
            assert_eq!(status.as_str(), s);
        }
    }

    #[test]
    fn status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::Ready).unwrap(),
            "\"ready\""
        );
    }

    #[test]
    fn unknown_status_rejected() {
        assert!("published".parse::<ProjectStatus>().is_err());
    }
}
