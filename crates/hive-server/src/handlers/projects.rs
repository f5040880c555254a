//! Project CRUD and hydration snapshot handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use hive_core::project::Project;
use hive_core::records::{GeneratedFile, NarratedThought};

use crate::errors::ApiError;
use crate::state::AppState;

/// Body of `POST /api/projects`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectBody {
    /// Display name.
    pub name: String,
    /// Creating prompt.
    pub prompt: String,
    /// Owner handle.
    pub user_id: String,
}

/// Query of `GET /api/projects`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Owner handle to scope the listing.
    pub user_id: String,
}

/// Body of `GET /api/projects/{id}` — everything a client needs to hydrate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotResponse {
    /// The project record.
    pub project: Project,
    /// Generated files, first-write order.
    pub files: Vec<GeneratedFile>,
    /// Narrated thoughts, emission order.
    pub thoughts: Vec<NarratedThought>,
}

/// `POST /api/projects`
#[instrument(skip_all, fields(user_id = %body.user_id))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateProjectBody>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    counter!(crate::metrics::HTTP_REQUESTS_TOTAL, "route" => "create_project").increment(1);
    for (field, value) in [
        ("name", &body.name),
        ("prompt", &body.prompt),
        ("userId", &body.user_id),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::BadRequest(format!("{field} must not be empty")));
        }
    }
    let project = state
        .store
        .create_project(&body.name, &body.prompt, &body.user_id)?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// `GET /api/projects?userId=`
#[instrument(skip_all, fields(user_id = %query.user_id))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Project>>, ApiError> {
    counter!(crate::metrics::HTTP_REQUESTS_TOTAL, "route" => "list_projects").increment(1);
    Ok(Json(state.store.list_projects(&query.user_id)?))
}

/// `GET /api/projects/{id}`
#[instrument(skip_all, fields(project_id = %id))]
pub async fn snapshot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    counter!(crate::metrics::HTTP_REQUESTS_TOTAL, "route" => "snapshot").increment(1);
    let snapshot = state.store.snapshot(&id)?;
    Ok(Json(SnapshotResponse {
        project: snapshot.project,
        files: snapshot.files,
        thoughts: snapshot.thoughts,
    }))
}
