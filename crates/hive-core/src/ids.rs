//! Prefixed UUID v7 id helpers.
//!
//! Every persisted entity carries a typed prefix so an id is legible in
//! logs without a schema lookup. UUID v7 keeps ids roughly time-ordered.

use uuid::Uuid;

/// New project id (`proj_…`).
pub fn project_id() -> String {
    format!("proj_{}", Uuid::now_v7())
}

/// New narrated-thought id (`th_…`).
pub fn thought_id() -> String {
    format!("th_{}", Uuid::now_v7())
}

/// New file-row id (`file_…`).
pub fn file_id() -> String {
    format!("file_{}", Uuid::now_v7())
}

/// New generation-turn id (`turn_…`).
pub fn turn_id() -> String {
    format!("turn_{}", Uuid::now_v7())
}

/// New tool-call id (`call_…`). Used when the backend did not supply one.
pub fn call_id() -> String {
    format!("call_{}", Uuid::now_v7())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_carry_prefixes() {
        assert!(project_id().starts_with("proj_"));
        assert!(thought_id().starts_with("th_"));
        assert!(file_id().starts_with("file_"));
        assert!(turn_id().starts_with("turn_"));
        assert!(call_id().starts_with("call_"));
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(project_id(), project_id());
    }
}
