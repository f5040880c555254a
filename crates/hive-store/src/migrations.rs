//! Schema migrations driven by `PRAGMA user_version`.
//!
//! Each migration is a numbered batch applied exactly once, inside a
//! transaction, in order. Adding a migration means appending to
//! [`MIGRATIONS`] — never editing an applied entry.

use rusqlite::Connection;
use tracing::info;

use crate::errors::Result;

/// Ordered migration batches. Index 0 runs when `user_version` is 0.
const MIGRATIONS: &[&str] = &[
    // v1: initial schema
    "CREATE TABLE projects (
        id          TEXT PRIMARY KEY,
        name        TEXT NOT NULL,
        prompt      TEXT NOT NULL,
        user_id     TEXT NOT NULL,
        status      TEXT NOT NULL,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL
    );
    CREATE INDEX idx_projects_user ON projects(user_id, created_at DESC);

    CREATE TABLE files (
        id            TEXT PRIMARY KEY,
        project_id    TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
        path          TEXT NOT NULL,
        content       TEXT NOT NULL,
        description   TEXT,
        content_hash  TEXT NOT NULL,
        updated_at    TEXT NOT NULL,
        UNIQUE(project_id, path)
    );
    CREATE INDEX idx_files_project ON files(project_id);

    CREATE TABLE thoughts (
        id            TEXT PRIMARY KEY,
        project_id    TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
        agent         TEXT NOT NULL,
        content       TEXT NOT NULL,
        thought_type  TEXT NOT NULL,
        created_at    TEXT NOT NULL
    );
    CREATE INDEX idx_thoughts_project_created ON thoughts(project_id, created_at);",
];

/// Run any pending migrations. Returns the number applied.
pub fn run_migrations(conn: &Connection) -> Result<u32> {
    let current: u32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    let mut applied = 0u32;

    for (idx, batch) in MIGRATIONS.iter().enumerate() {
        let version = idx as u32 + 1;
        if version <= current {
            continue;
        }
        conn.execute_batch(&format!(
            "BEGIN;\n{batch}\nPRAGMA user_version = {version};\nCOMMIT;"
        ))?;
        info!(version, "applied migration");
        applied += 1;
    }

    Ok(applied)
}
