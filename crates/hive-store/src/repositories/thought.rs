//! Thought repository — append-only narration log.
//!
//! Thoughts are never updated or deleted; every agent narration appends a
//! new row and reads return them in emission order.

use rusqlite::{params, Connection};

use crate::errors::Result;
use crate::row_types::ThoughtRow;

/// Options for appending a narrated thought.
pub struct AppendThoughtOptions<'a> {
    /// Owning project.
    pub project_id: &'a str,
    /// Narrating role name.
    pub agent: &'a str,
    /// Thought text.
    pub content: &'a str,
    /// Intent classification name.
    pub thought_type: &'a str,
}

fn row_from(row: &rusqlite::Row<'_>) -> std::result::Result<ThoughtRow, rusqlite::Error> {
    Ok(ThoughtRow {
        id: row.get(0)?,
        project_id: row.get(1)?,
        agent: row.get(2)?,
        content: row.get(3)?,
        thought_type: row.get(4)?,
        created_at: row.get(5)?,
    })
}

const COLUMNS: &str = "id, project_id, agent, content, thought_type, created_at";

/// Thought repository — stateless, every method takes `&Connection`.
pub struct ThoughtRepo;

impl ThoughtRepo {
    /// Append a thought, returning the stored row.
    pub fn append(conn: &Connection, opts: &AppendThoughtOptions<'_>) -> Result<ThoughtRow> {
        let id = hive_core::ids::thought_id();
        let now = chrono::Utc::now().to_rfc3339();
        let _ = conn.execute(
            "INSERT INTO thoughts (id, project_id, agent, content, thought_type, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![id, opts.project_id, opts.agent, opts.content, opts.thought_type, now],
        )?;
        Ok(ThoughtRow {
            id,
            project_id: opts.project_id.to_string(),
            agent: opts.agent.to_string(),
            content: opts.content.to_string(),
            thought_type: opts.thought_type.to_string(),
            created_at: now,
        })
    }

    /// All thoughts for a project in emission order. The id is a UUID v7,
    /// so it breaks ties when two thoughts share a timestamp.
    pub fn list_for_project(conn: &Connection, project_id: &str) -> Result<Vec<ThoughtRow>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM thoughts WHERE project_id = ?1 ORDER BY created_at, id"
        ))?;
        let rows = stmt
            .query_map(params![project_id], row_from)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Count thoughts for a project.
    pub fn count(conn: &Connection, project_id: &str) -> Result<i64> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM thoughts WHERE project_id = ?1",
            params![project_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
