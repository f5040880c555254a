//! The generation turn loop.
//!
//! One turn = up to [`MAX_TOOL_ROUNDS`] backend rounds. Each round streams
//! until its terminator; tool calls collected along the way are dispatched
//! in delivery order and their acks fed back as tool messages for the next
//! round. A round that ends with no tool calls completes the turn.
//!
//! Turn outcomes and project status:
//! - clean completion → `TurnCompleted` / status `ready`
//! - round cap hit → `TurnCompleted` with a round-cap stop, still `ready`
//!   (the stream itself ended without error)
//! - backend stream error → `TurnFailed` / status `error`, no retry

use std::sync::Arc;

use futures::StreamExt;
use metrics::{counter, histogram};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

use hive_core::constants::{MAX_TOOL_ROUNDS, METRIC_TURNS_TOTAL, METRIC_TURN_ROUNDS};
use hive_core::events::{StopKind, StreamEvent, TurnEvent};
use hive_core::project::ProjectStatus;
use hive_store::ProjectStore;

use crate::backend::{ChatMessage, GenerationBackend, GenerationRequest};
use crate::dispatch::ToolDispatcher;
use crate::errors::{ProtocolError, Result};
use crate::tools::{toolset, SYSTEM_PROMPT};

/// How a completed turn went.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    /// The turn's id.
    pub turn_id: String,
    /// Backend rounds consumed.
    pub rounds: u32,
    /// Why the turn stopped.
    pub stop: StopKind,
}

/// Run one generation turn for `project_id`.
///
/// `history` is the conversation so far (user and prior assistant turns,
/// without the system prompt). Live events go to `events`; a dropped
/// receiver abandons the client but the turn keeps landing its durable
/// effects.
#[instrument(skip_all, fields(project_id))]
pub async fn run_turn(
    store: &Arc<ProjectStore>,
    backend: &dyn GenerationBackend,
    project_id: &str,
    history: Vec<ChatMessage>,
    events: &mpsc::Sender<TurnEvent>,
) -> Result<TurnOutcome> {
    let turn_id = hive_core::ids::turn_id();
    let dispatcher = ToolDispatcher::new(Arc::clone(store));

    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ChatMessage::system(SYSTEM_PROMPT));
    messages.extend(history);

    emit(
        events,
        TurnEvent::TurnStarted {
            project_id: project_id.to_string(),
            turn_id: turn_id.clone(),
        },
    )
    .await;

    for round in 1..=MAX_TOOL_ROUNDS {
        let request = GenerationRequest {
            project_id: project_id.to_string(),
            messages: messages.clone(),
            tools: toolset(),
        };
        let mut stream = match backend.stream(request).await {
            Ok(stream) => stream,
            Err(err) => {
                return fail(store, events, project_id, &turn_id, err).await;
            }
        };

        let mut round_text = String::new();
        let mut calls = Vec::new();
        while let Some(event) = stream.next().await {
            match event {
                StreamEvent::Start
                | StreamEvent::ToolCallStart { .. }
                | StreamEvent::ToolCallDelta { .. } => {}
                StreamEvent::TextDelta { delta } => {
                    round_text.push_str(&delta);
                    emit(events, TurnEvent::Narration { delta }).await;
                }
                StreamEvent::ToolCallEnd { tool_call } => calls.push(tool_call),
                StreamEvent::Done { .. } => break,
                StreamEvent::Error { error } => {
                    return fail(store, events, project_id, &turn_id, ProtocolError::Stream(error))
                        .await;
                }
            }
        }

        if calls.is_empty() {
            return complete(store, events, project_id, &turn_id, round, StopKind::Completed)
                .await;
        }

        let mut acks = Vec::with_capacity(calls.len());
        for call in &calls {
            let dispatched = dispatcher.dispatch(project_id, call);
            if let Some(event) = dispatched.event {
                emit(events, event).await;
            }
            acks.push((call.id.clone(), dispatched.ack));
        }

        messages.push(ChatMessage::Assistant {
            content: round_text,
            tool_calls: calls,
        });
        for (call_id, ack) in acks {
            messages.push(ChatMessage::Tool {
                call_id,
                content: ack.to_string(),
            });
        }
    }

    // Soft stop: the backend kept calling tools past the cap. Everything it
    // did land durably, so the project is still ready.
    complete(
        store,
        events,
        project_id,
        &turn_id,
        MAX_TOOL_ROUNDS,
        StopKind::RoundCap,
    )
    .await
}

async fn emit(events: &mpsc::Sender<TurnEvent>, event: TurnEvent) {
    // A dropped receiver means the client went away; the turn carries on.
    if events.send(event).await.is_err() {
        warn!("event receiver dropped, continuing turn detached");
    }
}

async fn complete(
    store: &Arc<ProjectStore>,
    events: &mpsc::Sender<TurnEvent>,
    project_id: &str,
    turn_id: &str,
    rounds: u32,
    stop: StopKind,
) -> Result<TurnOutcome> {
    if let Err(err) = store.set_status(project_id, ProjectStatus::Ready) {
        warn!(%err, "failed to mark project ready");
    }
    counter!(METRIC_TURNS_TOTAL, "outcome" => "completed").increment(1);
    histogram!(METRIC_TURN_ROUNDS).record(f64::from(rounds));
    info!(turn_id, rounds, ?stop, "turn completed");
    emit(
        events,
        TurnEvent::TurnCompleted {
            project_id: project_id.to_string(),
            turn_id: turn_id.to_string(),
            rounds,
            stop,
        },
    )
    .await;
    Ok(TurnOutcome {
        turn_id: turn_id.to_string(),
        rounds,
        stop,
    })
}

async fn fail(
    store: &Arc<ProjectStore>,
    events: &mpsc::Sender<TurnEvent>,
    project_id: &str,
    turn_id: &str,
    err: ProtocolError,
) -> Result<TurnOutcome> {
    if let Err(status_err) = store.set_status(project_id, ProjectStatus::Error) {
        warn!(%status_err, "failed to mark project errored");
    }
    counter!(METRIC_TURNS_TOTAL, "outcome" => "failed").increment(1);
    warn!(turn_id, %err, "turn failed");
    emit(
        events,
        TurnEvent::TurnFailed {
            project_id: project_id.to_string(),
            turn_id: turn_id.to_string(),
            error: err.to_string(),
        },
    )
    .await;
    Err(err)
}
