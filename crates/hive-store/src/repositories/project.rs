//! Project repository — CRUD for the `projects` table.

use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::Result;
use crate::row_types::ProjectRow;

/// Options for creating a new project.
pub struct CreateProjectOptions<'a> {
    /// Display name.
    pub name: &'a str,
    /// Creating prompt.
    pub prompt: &'a str,
    /// Owner handle.
    pub user_id: &'a str,
}

fn row_from(row: &rusqlite::Row<'_>) -> std::result::Result<ProjectRow, rusqlite::Error> {
    Ok(ProjectRow {
        id: row.get(0)?,
        name: row.get(1)?,
        prompt: row.get(2)?,
        user_id: row.get(3)?,
        status: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

const COLUMNS: &str = "id, name, prompt, user_id, status, created_at, updated_at";

/// Project repository — stateless, every method takes `&Connection`.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project with status `building`.
    pub fn create(conn: &Connection, opts: &CreateProjectOptions<'_>) -> Result<ProjectRow> {
        let id = hive_core::ids::project_id();
        let now = chrono::Utc::now().to_rfc3339();
        let _ = conn.execute(
            "INSERT INTO projects (id, name, prompt, user_id, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, 'building', ?5, ?5)",
            params![id, opts.name, opts.prompt, opts.user_id, now],
        )?;
        Ok(ProjectRow {
            id,
            name: opts.name.to_string(),
            prompt: opts.prompt.to_string(),
            user_id: opts.user_id.to_string(),
            status: "building".to_string(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Get a project by id.
    pub fn get_by_id(conn: &Connection, project_id: &str) -> Result<Option<ProjectRow>> {
        let row = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM projects WHERE id = ?1"),
                params![project_id],
                row_from,
            )
            .optional()?;
        Ok(row)
    }

    /// List a user's projects, newest first.
    pub fn list_for_user(conn: &Connection, user_id: &str) -> Result<Vec<ProjectRow>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM projects WHERE user_id = ?1 ORDER BY created_at DESC"
        ))?;
        let rows = stmt
            .query_map(params![user_id], row_from)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Update lifecycle status. Returns `true` if a row changed.
    pub fn set_status(conn: &Connection, project_id: &str, status: &str) -> Result<bool> {
        let now = chrono::Utc::now().to_rfc3339();
        let changed = conn.execute(
            "UPDATE projects SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status, now, project_id],
        )?;
        Ok(changed > 0)
    }

    /// Check project existence.
    pub fn exists(conn: &Connection, project_id: &str) -> Result<bool> {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM projects WHERE id = ?1)",
            params![project_id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}
