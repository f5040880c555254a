//! High-level store facade over the repositories.
//!
//! [`ProjectStore`] is the sole write path. Writes are serialized behind a
//! global lock and retried with linear backoff plus jitter when SQLite
//! reports the database busy, so concurrent turns never surface transient
//! `SQLITE_BUSY` to callers. Reads go straight to the pool.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::time::Duration;
use tracing::{instrument, warn};

use hive_core::project::{Project, ProjectStatus};
use hive_core::records::{GeneratedFile, NarratedThought};

use crate::connection::ConnectionPool;
use crate::errors::{Result, StoreError};
use crate::repositories::file::UpsertFileOptions;
use crate::repositories::thought::AppendThoughtOptions;
use crate::repositories::{FileRepo, ProjectRepo, ThoughtRepo};
use crate::row_types::{FileRow, ProjectRow, ThoughtRow};

const BUSY_RETRY_ATTEMPTS: u32 = 5;
const BUSY_RETRY_BASE_MS: u64 = 10;
const BUSY_RETRY_JITTER_MS: u64 = 10;

/// Everything a client needs to hydrate a project view in one read.
#[derive(Clone, Debug)]
pub struct ProjectSnapshot {
    /// The project record.
    pub project: Project,
    /// Generated files in first-write order.
    pub files: Vec<GeneratedFile>,
    /// Narrated thoughts in emission order.
    pub thoughts: Vec<NarratedThought>,
}

/// Pooled, write-serialized access to project state.
pub struct ProjectStore {
    pool: ConnectionPool,
    write_lock: Mutex<()>,
}

impl ProjectStore {
    /// Wrap a migrated pool.
    pub fn new(pool: ConnectionPool) -> Self {
        Self {
            pool,
            write_lock: Mutex::new(()),
        }
    }

    /// Create a project in status `building`.
    #[instrument(skip(self, prompt))]
    pub fn create_project(&self, name: &str, prompt: &str, user_id: &str) -> Result<Project> {
        let row = self.write(|conn| {
            ProjectRepo::create(
                conn,
                &crate::repositories::project::CreateProjectOptions {
                    name,
                    prompt,
                    user_id,
                },
            )
        })?;
        project_from_row(row)
    }

    /// Fetch one project.
    pub fn get_project(&self, project_id: &str) -> Result<Project> {
        let conn = self.pool.get()?;
        let row = ProjectRepo::get_by_id(&conn, project_id)?.ok_or_else(|| {
            StoreError::NotFound {
                entity: "project",
                id: project_id.to_string(),
            }
        })?;
        project_from_row(row)
    }

    /// List a user's projects, newest first.
    pub fn list_projects(&self, user_id: &str) -> Result<Vec<Project>> {
        let conn = self.pool.get()?;
        ProjectRepo::list_for_user(&conn, user_id)?
            .into_iter()
            .map(project_from_row)
            .collect()
    }

    /// Flip project lifecycle status.
    #[instrument(skip(self))]
    pub fn set_status(&self, project_id: &str, status: ProjectStatus) -> Result<()> {
        let changed = self.write(|conn| ProjectRepo::set_status(conn, project_id, status.as_str()))?;
        if !changed {
            return Err(StoreError::NotFound {
                entity: "project",
                id: project_id.to_string(),
            });
        }
        Ok(())
    }

    /// Upsert a generated file keyed by `(project, path)`.
    #[instrument(skip(self, content, description))]
    pub fn upsert_file(
        &self,
        project_id: &str,
        path: &str,
        content: &str,
        description: Option<&str>,
    ) -> Result<GeneratedFile> {
        if !self.project_exists(project_id)? {
            return Err(StoreError::NotFound {
                entity: "project",
                id: project_id.to_string(),
            });
        }
        let row = self.write(|conn| {
            FileRepo::upsert(
                conn,
                &UpsertFileOptions {
                    project_id,
                    path,
                    content,
                    description,
                },
            )
        })?;
        file_from_row(row)
    }

    /// Append a narrated thought.
    #[instrument(skip(self, content))]
    pub fn append_thought(
        &self,
        project_id: &str,
        agent: &str,
        content: &str,
        thought_type: &str,
    ) -> Result<NarratedThought> {
        if !self.project_exists(project_id)? {
            return Err(StoreError::NotFound {
                entity: "project",
                id: project_id.to_string(),
            });
        }
        let row = self.write(|conn| {
            ThoughtRepo::append(
                conn,
                &AppendThoughtOptions {
                    project_id,
                    agent,
                    content,
                    thought_type,
                },
            )
        })?;
        thought_from_row(row)
    }

    /// One-read hydration: project plus all files and thoughts.
    #[instrument(skip(self))]
    pub fn snapshot(&self, project_id: &str) -> Result<ProjectSnapshot> {
        let conn = self.pool.get()?;
        let project_row = ProjectRepo::get_by_id(&conn, project_id)?.ok_or_else(|| {
            StoreError::NotFound {
                entity: "project",
                id: project_id.to_string(),
            }
        })?;
        let files = FileRepo::list_for_project(&conn, project_id)?
            .into_iter()
            .map(file_from_row)
            .collect::<Result<Vec<_>>>()?;
        let thoughts = ThoughtRepo::list_for_project(&conn, project_id)?
            .into_iter()
            .map(thought_from_row)
            .collect::<Result<Vec<_>>>()?;
        Ok(ProjectSnapshot {
            project: project_from_row(project_row)?,
            files,
            thoughts,
        })
    }

    fn project_exists(&self, project_id: &str) -> Result<bool> {
        let conn = self.pool.get()?;
        ProjectRepo::exists(&conn, project_id)
    }

    /// Run a write under the global lock, retrying on `SQLITE_BUSY`.
    fn write<T>(&self, mut op: impl FnMut(&rusqlite::Connection) -> Result<T>) -> Result<T> {
        let _guard = self.write_lock.lock();
        let conn = self.pool.get()?;

        let mut attempt = 0u32;
        loop {
            match op(&conn) {
                Err(StoreError::Sqlite(err)) if is_busy(&err) && attempt + 1 < BUSY_RETRY_ATTEMPTS => {
                    attempt += 1;
                    let backoff = BUSY_RETRY_BASE_MS * u64::from(attempt)
                        + rand::random_range(0..BUSY_RETRY_JITTER_MS);
                    warn!(attempt, backoff_ms = backoff, "database busy, retrying write");
                    std::thread::sleep(Duration::from_millis(backoff));
                }
                other => return other,
            }
        }
    }
}

fn is_busy(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::DatabaseBusy
                || e.code == rusqlite::ErrorCode::DatabaseLocked
    )
}

fn parse_rfc3339(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| StoreError::Corrupt(format!("{field}: {value:?}: {err}")))
}

fn project_from_row(row: ProjectRow) -> Result<Project> {
    let status = row
        .status
        .parse::<ProjectStatus>()
        .map_err(|err| StoreError::Corrupt(err.to_string()))?;
    Ok(Project {
        created_at: parse_rfc3339(&row.created_at, "projects.created_at")?,
        updated_at: parse_rfc3339(&row.updated_at, "projects.updated_at")?,
        id: row.id,
        name: row.name,
        prompt: row.prompt,
        user_id: row.user_id,
        status,
    })
}

fn file_from_row(row: FileRow) -> Result<GeneratedFile> {
    Ok(GeneratedFile {
        updated_at: parse_rfc3339(&row.updated_at, "files.updated_at")?,
        path: row.path,
        content: row.content,
        description: row.description,
    })
}

fn thought_from_row(row: ThoughtRow) -> Result<NarratedThought> {
    let agent = row
        .agent
        .parse()
        .map_err(|err: hive_core::roles::ParseRoleError| StoreError::Corrupt(err.to_string()))?;
    let thought_type = row
        .thought_type
        .parse()
        .map_err(|err: hive_core::roles::ParseRoleError| StoreError::Corrupt(err.to_string()))?;
    Ok(NarratedThought {
        created_at: parse_rfc3339(&row.created_at, "thoughts.created_at")?,
        id: row.id,
        agent,
        content: row.content,
        thought_type,
    })
}

#[cfg(test)]
#[allow(unused_results)]
mod tests {
    use super::*;
    use crate::connection::{new_in_memory, ConnectionConfig};
    use crate::migrations::run_migrations;

    fn setup() -> ProjectStore {
        let pool = new_in_memory(&ConnectionConfig::default()).unwrap();
        run_migrations(&pool.get().unwrap()).unwrap();
        ProjectStore::new(pool)
    }

    #[test]
    fn create_then_get() {
        let store = setup();
        let p = store
            .create_project("Crypto Tracker", "build me a dashboard", "user_1")
            .unwrap();
        assert_eq!(p.status, ProjectStatus::Building);
        let found = store.get_project(&p.id).unwrap();
        assert_eq!(found, p);
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = setup();
        let err = store.get_project("proj_nope").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "project", .. }));
    }

    #[test]
    fn status_flips_persist() {
        let store = setup();
        let p = store.create_project("X", "x", "user_1").unwrap();
        store.set_status(&p.id, ProjectStatus::Ready).unwrap();
        assert_eq!(store.get_project(&p.id).unwrap().status, ProjectStatus::Ready);

        // An errored project can come back to ready on a later turn.
        store.set_status(&p.id, ProjectStatus::Error).unwrap();
        store.set_status(&p.id, ProjectStatus::Ready).unwrap();
        assert_eq!(store.get_project(&p.id).unwrap().status, ProjectStatus::Ready);
    }

    #[test]
    fn upsert_file_requires_project() {
        let store = setup();
        let err = store
            .upsert_file("proj_nope", "src/App.tsx", "x", None)
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn snapshot_collects_everything() {
        let store = setup();
        let p = store.create_project("X", "x", "user_1").unwrap();
        store
            .upsert_file(&p.id, "src/App.tsx", "v1", Some("entry"))
            .unwrap();
        store
            .upsert_file(&p.id, "src/App.tsx", "v2", Some("entry"))
            .unwrap();
        store
            .upsert_file(&p.id, "src/Header.tsx", "h", None)
            .unwrap();
        store
            .append_thought(&p.id, "Architect", "planning the layout", "planning")
            .unwrap();
        store
            .append_thought(&p.id, "Coder", "writing App.tsx", "coding")
            .unwrap();

        let snap = store.snapshot(&p.id).unwrap();
        assert_eq!(snap.project.id, p.id);
        // Rewritten path stays a single file with the latest content.
        assert_eq!(snap.files.len(), 2);
        assert_eq!(snap.files[0].path, "src/App.tsx");
        assert_eq!(snap.files[0].content, "v2");
        assert_eq!(snap.thoughts.len(), 2);
        assert_eq!(snap.thoughts[0].content, "planning the layout");
    }

    #[test]
    fn thought_with_unknown_agent_rejected_at_read() {
        let store = setup();
        let p = store.create_project("X", "x", "user_1").unwrap();
        // Write a row the typed layer would never produce.
        {
            let conn = store.pool.get().unwrap();
            conn.execute(
                "INSERT INTO thoughts (id, project_id, agent, content, thought_type, created_at)
                 VALUES ('th_bad', ?1, 'Intern', 'hi', 'planning', ?2)",
                rusqlite::params![p.id, chrono::Utc::now().to_rfc3339()],
            )
            .unwrap();
        }
        let err = store.snapshot(&p.id).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }
}
