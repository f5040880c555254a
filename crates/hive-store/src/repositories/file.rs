//! File repository — upsert-by-path storage for generated files.
//!
//! The write path is a single `INSERT … ON CONFLICT(project_id, path) DO
//! UPDATE`, so invoking it twice for the same path replaces content and
//! never duplicates rows.

use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};

use crate::errors::Result;
use crate::row_types::FileRow;

/// Options for writing a generated file.
pub struct UpsertFileOptions<'a> {
    /// Owning project.
    pub project_id: &'a str,
    /// Project-relative path.
    pub path: &'a str,
    /// Full file text.
    pub content: &'a str,
    /// Optional one-line description.
    pub description: Option<&'a str>,
}

/// Hex sha-256 of file content.
pub fn content_hash(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

fn row_from(row: &rusqlite::Row<'_>) -> std::result::Result<FileRow, rusqlite::Error> {
    Ok(FileRow {
        id: row.get(0)?,
        project_id: row.get(1)?,
        path: row.get(2)?,
        content: row.get(3)?,
        description: row.get(4)?,
        content_hash: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

const COLUMNS: &str = "id, project_id, path, content, description, content_hash, updated_at";

/// File repository — stateless, every method takes `&Connection`.
pub struct FileRepo;

impl FileRepo {
    /// Upsert a file keyed by `(project_id, path)`, returning the stored row.
    pub fn upsert(conn: &Connection, opts: &UpsertFileOptions<'_>) -> Result<FileRow> {
        let id = hive_core::ids::file_id();
        let now = chrono::Utc::now().to_rfc3339();
        let hash = content_hash(opts.content);
        let _ = conn.execute(
            "INSERT INTO files (id, project_id, path, content, description, content_hash, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(project_id, path) DO UPDATE SET
                 content = excluded.content,
                 description = excluded.description,
                 content_hash = excluded.content_hash,
                 updated_at = excluded.updated_at",
            params![id, opts.project_id, opts.path, opts.content, opts.description, hash, now],
        )?;
        // The row id is stable across upserts; read it back.
        let stored = Self::get(conn, opts.project_id, opts.path)?.ok_or_else(|| {
            crate::errors::StoreError::Internal(format!(
                "upserted file vanished: {}",
                opts.path
            ))
        })?;
        Ok(stored)
    }

    /// Get one file by project and path.
    pub fn get(conn: &Connection, project_id: &str, path: &str) -> Result<Option<FileRow>> {
        let row = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM files WHERE project_id = ?1 AND path = ?2"),
                params![project_id, path],
                row_from,
            )
            .optional()?;
        Ok(row)
    }

    /// All files for a project, in first-write order (row id is a UUID v7,
    /// so ordering by id is ordering by first insertion).
    pub fn list_for_project(conn: &Connection, project_id: &str) -> Result<Vec<FileRow>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM files WHERE project_id = ?1 ORDER BY id"
        ))?;
        let rows = stmt
            .query_map(params![project_id], row_from)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Count files for a project.
    pub fn count(conn: &Connection, project_id: &str) -> Result<i64> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM files WHERE project_id = ?1",
            params![project_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

#[cfg(test)]
#[allow(unused_results)]
mod tests {
    use super::*;
    use crate::migrations::run_migrations;
    use crate::repositories::project::{CreateProjectOptions, ProjectRepo};

    fn setup() -> (Connection, String) {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        run_migrations(&conn).unwrap();
        let p = ProjectRepo::create(
            &conn,
            &CreateProjectOptions {
                name: "Test",
                prompt: "test",
                user_id: "user_1",
            },
        )
        .unwrap();
        (conn, p.id)
    }

    #[test]
    fn upsert_creates_file() {
        let (conn, pid) = setup();
        let f = FileRepo::upsert(
            &conn,
            &UpsertFileOptions {
                project_id: &pid,
                path: "src/App.tsx",
                content: "export default function App() {}",
                description: Some("entry point"),
            },
        )
        .unwrap();
        assert!(f.id.starts_with("file_"));
        assert_eq!(f.path, "src/App.tsx");
        assert_eq!(f.description.as_deref(), Some("entry point"));
    }

    #[test]
    fn upsert_same_path_replaces_never_duplicates() {
        let (conn, pid) = setup();
        let first = FileRepo::upsert(
            &conn,
            &UpsertFileOptions {
                project_id: &pid,
                path: "src/App.tsx",
                content: "v1",
                description: None,
            },
        )
        .unwrap();
        let second = FileRepo::upsert(
            &conn,
            &UpsertFileOptions {
                project_id: &pid,
                path: "src/App.tsx",
                content: "v2",
                description: Some("updated"),
            },
        )
        .unwrap();

        assert_eq!(FileRepo::count(&conn, &pid).unwrap(), 1);
        assert_eq!(second.content, "v2");
        // Row identity is stable across upserts.
        assert_eq!(second.id, first.id);
    }

    #[test]
    fn same_path_different_projects_coexist() {
        let (conn, pid) = setup();
        let other = ProjectRepo::create(
            &conn,
            &CreateProjectOptions {
                name: "Other",
                prompt: "o",
                user_id: "user_1",
            },
        )
        .unwrap();

        for project in [&pid, &other.id] {
            FileRepo::upsert(
                &conn,
                &UpsertFileOptions {
                    project_id: project,
                    path: "src/App.tsx",
                    content: "x",
                    description: None,
                },
            )
            .unwrap();
        }
        assert_eq!(FileRepo::count(&conn, &pid).unwrap(), 1);
        assert_eq!(FileRepo::count(&conn, &other.id).unwrap(), 1);
    }

    #[test]
    fn list_preserves_first_write_order() {
        let (conn, pid) = setup();
        for path in ["src/App.tsx", "src/Header.tsx", "src/Footer.tsx"] {
            FileRepo::upsert(
                &conn,
                &UpsertFileOptions {
                    project_id: &pid,
                    path,
                    content: "x",
                    description: None,
                },
            )
            .unwrap();
        }
        // Rewriting the first file must not move it to the end.
        FileRepo::upsert(
            &conn,
            &UpsertFileOptions {
                project_id: &pid,
                path: "src/App.tsx",
                content: "y",
                description: None,
            },
        )
        .unwrap();

        let files = FileRepo::list_for_project(&conn, &pid).unwrap();
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["src/App.tsx", "src/Header.tsx", "src/Footer.tsx"]);
    }

    #[test]
    fn content_hash_changes_with_content() {
        assert_ne!(content_hash("a"), content_hash("b"));
        assert_eq!(content_hash("a"), content_hash("a"));
        assert_eq!(content_hash("").len(), 64);
    }

    #[test]
    fn get_missing_is_none() {
        let (conn, pid) = setup();
        assert!(FileRepo::get(&conn, &pid, "nope.tsx").unwrap().is_none());
    }
}
