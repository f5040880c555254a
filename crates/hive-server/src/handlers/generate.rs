//! The SSE generation endpoint.
//!
//! `POST /api/projects/{id}/generate` starts a generation turn and streams
//! its [`hive_core::events::TurnEvent`]s back as server-sent events. The
//! turn runs on its own task: a client that disconnects mid-stream
//! abandons the view, not the work — tool effects keep landing durably.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::Stream;
use metrics::counter;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tracing::{instrument, warn};

use hive_core::events::TurnEvent;
use hive_protocol::{run_turn, ChatMessage};

use crate::errors::ApiError;
use crate::state::AppState;

/// Body of `POST /api/projects/{id}/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    /// Conversation so far, oldest first.
    pub messages: Vec<IncomingMessage>,
}

/// One conversation message from the client.
#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    /// `user` or `assistant`.
    pub role: String,
    /// Message text.
    pub content: String,
}

fn to_history(messages: Vec<IncomingMessage>) -> Result<Vec<ChatMessage>, ApiError> {
    messages
        .into_iter()
        .map(|msg| match msg.role.as_str() {
            "user" => Ok(ChatMessage::User {
                content: msg.content,
            }),
            "assistant" => Ok(ChatMessage::Assistant {
                content: msg.content,
                tool_calls: vec![],
            }),
            other => Err(ApiError::BadRequest(format!("unknown role: {other}"))),
        })
        .collect()
}

/// `POST /api/projects/{id}/generate`
#[instrument(skip_all, fields(project_id = %id))]
pub async fn generate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<GenerateBody>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    counter!(crate::metrics::HTTP_REQUESTS_TOTAL, "route" => "generate").increment(1);

    // 404 before committing to a stream.
    let project = state.store.get_project(&id)?;
    let history = to_history(body.messages)?;
    if history.is_empty() {
        return Err(ApiError::BadRequest("messages must not be empty".into()));
    }

    let (tx, rx) = mpsc::channel::<TurnEvent>(256);
    let store = Arc::clone(&state.store);
    let backend = Arc::clone(&state.backend);
    let _task = tokio::spawn(async move {
        if let Err(err) = run_turn(&store, backend.as_ref(), &project.id, history, &tx).await {
            // Already surfaced to the client as a turnFailed event.
            warn!(%err, project_id = %project.id, "generation turn failed");
        }
    });

    let stream = ReceiverStream::new(rx)
        .map(|event| {
            Event::default()
                .event(event.event_type())
                .json_data(&event)
                .unwrap_or_else(|err| {
                    warn!(%err, "failed to serialize turn event");
                    Event::default().event("error").data("serialization failure")
                })
        })
        .map(Ok::<_, Infallible>);
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
