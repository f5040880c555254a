//! Agent roles and thought classification.
//!
//! The swarm narrates its work as a sequence of thoughts, each attributed
//! to one of a fixed set of roles and classified by intent. Both enums are
//! part of the wire contract with the generative backend and are stored
//! verbatim, so their serde names are load-bearing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One narrated role in the generation pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentRole {
    /// Coordinates the other agents and talks to the user.
    Manager,
    /// Plans the system design and file structure.
    Architect,
    /// Writes the actual code.
    Coder,
    /// Handles UI/UX decisions.
    Designer,
}

impl AgentRole {
    /// All roles, in pipeline order.
    pub const ALL: [AgentRole; 4] = [
        AgentRole::Manager,
        AgentRole::Architect,
        AgentRole::Coder,
        AgentRole::Designer,
    ];

    /// Canonical wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentRole::Manager => "Manager",
            AgentRole::Architect => "Architect",
            AgentRole::Coder => "Coder",
            AgentRole::Designer => "Designer",
        }
    }

    /// The system persona used when this role speaks through the backend.
    pub fn persona(self) -> &'static str {
        match self {
            AgentRole::Manager => {
                "You are the swarm manager. Coordinate architect, designer, and coder \
                 clearly, summarize progress, and keep implementation decisions grounded \
                 in the user request."
            }
            AgentRole::Architect => {
                "You are the software architect. Produce clear component/file structure, \
                 data flow, and implementation steps for scalable React/TypeScript apps."
            }
            AgentRole::Coder => {
                "You are the implementation engineer. Return production-ready code with \
                 complete files, correct imports, and practical defaults."
            }
            AgentRole::Designer => {
                "You are the product designer. Define visual direction, UX hierarchy, \
                 spacing, and interaction polish that maps directly to implementable UI."
            }
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role or thought type.
#[derive(Debug, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseRoleError {
    /// What was being parsed ("agent role" or "thought type").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl FromStr for AgentRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Manager" => Ok(AgentRole::Manager),
            "Architect" => Ok(AgentRole::Architect),
            "Coder" => Ok(AgentRole::Coder),
            "Designer" => Ok(AgentRole::Designer),
            other => Err(ParseRoleError {
                kind: "agent role",
                value: other.to_string(),
            }),
        }
    }
}

/// Classifies the intent of a narrated thought.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThoughtType {
    /// Planning work ahead.
    Planning,
    /// Writing or about to write code.
    Coding,
    /// Visual/UX direction.
    Designing,
    /// Reviewing produced output.
    Reviewing,
    /// A decision that narrows the solution space.
    Decision,
    /// A question back to the user (pauses execution).
    Question,
}

impl ThoughtType {
    /// Canonical wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            ThoughtType::Planning => "planning",
            ThoughtType::Coding => "coding",
            ThoughtType::Designing => "designing",
            ThoughtType::Reviewing => "reviewing",
            ThoughtType::Decision => "decision",
            ThoughtType::Question => "question",
        }
    }
}

impl fmt::Display for ThoughtType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThoughtType {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planning" => Ok(ThoughtType::Planning),
            "coding" => Ok(ThoughtType::Coding),
            "designing" => Ok(ThoughtType::Designing),
            "reviewing" => Ok(ThoughtType::Reviewing),
            "decision" => Ok(ThoughtType::Decision),
            "question" => Ok(ThoughtType::Question),
            other => Err(ParseRoleError {
                kind: "thought type",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in AgentRole::ALL {
            let parsed: AgentRole = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn role_rejects_unknown() {
        let err = "Intern".parse::<AgentRole>().unwrap_err();
        assert!(err.to_string().contains("Intern"));
    }

    #[test]
    fn role_serde_uses_wire_names() {
        let json = serde_json::to_string(&AgentRole::Architect).unwrap();
        assert_eq!(json, "\"Architect\"");
    }

    #[test]
    fn thought_type_serde_is_lowercase() {
        let json = serde_json::to_string(&ThoughtType::Question).unwrap();
        assert_eq!(json, "\"question\"");
        let back: ThoughtType = serde_json::from_str("\"decision\"").unwrap();
        assert_eq!(back, ThoughtType::Decision);
    }

    #[test]
    fn thought_type_round_trips_through_str() {
        for s in ["planning", "coding", "designing", "reviewing", "decision", "question"] {
            let t: ThoughtType = s.parse().unwrap();
            assert_eq!(t.as_str(), s);
        }
    }

    #[test]
    fn every_role_has_a_persona() {
        for role in AgentRole::ALL {
            assert!(!role.persona().is_empty());
        }
    }
}
