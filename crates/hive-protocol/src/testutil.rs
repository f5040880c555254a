//! Test support: a scripted generative backend.

use std::collections::VecDeque;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use parking_lot::Mutex;

use hive_core::events::StreamEvent;

use crate::backend::{GenerationBackend, GenerationRequest};
use crate::errors::Result;

/// A backend that replays prerecorded rounds of [`StreamEvent`]s.
///
/// Each call to [`GenerationBackend::stream`] pops the next round. When
/// the script runs out, further rounds complete immediately with a plain
/// `Done`, which reads as "no more tool calls" to the turn loop.
pub struct ScriptedBackend {
    rounds: Mutex<VecDeque<Vec<StreamEvent>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedBackend {
    /// Backend replaying `rounds` in order.
    pub fn new(rounds: Vec<Vec<StreamEvent>>) -> Self {
        Self {
            rounds: Mutex::new(rounds.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Rounds not yet consumed.
    pub fn remaining_rounds(&self) -> usize {
        self.rounds.lock().len()
    }

    /// Every request seen so far, in order.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn stream(&self, request: GenerationRequest) -> Result<BoxStream<'static, StreamEvent>> {
        self.requests.lock().push(request);
        let round = self.rounds.lock().pop_front().unwrap_or_else(|| {
            vec![
                StreamEvent::Start,
                StreamEvent::Done {
                    stop_reason: "stop".to_string(),
                },
            ]
        });
        Ok(futures::stream::iter(round).boxed())
    }
}
