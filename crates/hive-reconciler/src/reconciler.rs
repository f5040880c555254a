//! The live state reconciler.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::debug;

use hive_core::activity::ActivityItem;
use hive_core::events::TurnEvent;
use hive_core::records::{GeneratedFile, NarratedThought};

/// Session lifecycle phase.
///
/// `Hydrating → Ready` exactly once; `Ready` is terminal-stable. An
/// implicit streaming sub-state is tracked separately via
/// [`Reconciler::is_streaming`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the durable snapshot. Auto-submit is suppressed.
    Hydrating,
    /// Snapshot applied; live events and auto-submit are unblocked.
    Ready,
}

/// The one-time durable snapshot that seeds a session.
#[derive(Clone, Debug, Default)]
pub struct HydrationSnapshot {
    /// Persisted files, first-write order.
    pub files: Vec<GeneratedFile>,
    /// Persisted thoughts, emission order.
    pub thoughts: Vec<NarratedThought>,
}

struct ThoughtEntry {
    key: String,
    thought: NarratedThought,
}

struct UserMessage {
    key: String,
    content: String,
    created_at: DateTime<Utc>,
}

/// Per-project-session reconciliation state machine.
pub struct Reconciler {
    phase: Phase,
    initial_prompt: Option<String>,
    auto_submitted: bool,

    files: IndexMap<String, GeneratedFile>,
    thoughts: Vec<ThoughtEntry>,
    known_keys: HashSet<String>,
    user_messages: Vec<UserMessage>,

    active_file: Option<String>,

    streaming: bool,
    streaming_text: String,
    turn_id: Option<String>,
    event_index: usize,
}

impl Reconciler {
    /// New session, optionally carrying an initial prompt to auto-submit
    /// once hydration confirms there is no prior activity.
    pub fn new(initial_prompt: Option<String>) -> Self {
        Self {
            phase: Phase::Hydrating,
            initial_prompt,
            auto_submitted: false,
            files: IndexMap::new(),
            thoughts: Vec::new(),
            known_keys: HashSet::new(),
            user_messages: Vec::new(),
            active_file: None,
            streaming: false,
            streaming_text: String::new(),
            turn_id: None,
            event_index: 0,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while a generation turn is streaming.
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Apply the one-time durable snapshot and transition to `Ready`.
    ///
    /// A live write that landed before hydration completed wins over the
    /// hydrated row for the same path, so hydration only fills gaps.
    /// Hydrated thoughts dedup against live ones by their persisted id.
    pub fn hydrate(&mut self, snapshot: HydrationSnapshot) {
        for file in snapshot.files {
            if !self.files.contains_key(&file.path) {
                if self.active_file.is_none() {
                    self.active_file = Some(file.path.clone());
                }
                let _ = self.files.insert(file.path.clone(), file);
            }
        }
        for thought in snapshot.thoughts {
            if self.known_keys.insert(thought.id.clone()) {
                self.thoughts.push(ThoughtEntry {
                    key: thought.id.clone(),
                    thought,
                });
            }
        }
        self.phase = Phase::Ready;
        debug!(
            files = self.files.len(),
            thoughts = self.thoughts.len(),
            "hydrated"
        );
    }

    /// Record a user message sent at `at`.
    pub fn add_user_message(&mut self, content: &str, at: DateTime<Utc>) {
        let key = format!("user-{}", self.user_messages.len());
        self.user_messages.push(UserMessage {
            key,
            content: content.to_string(),
            created_at: at,
        });
    }

    /// Surface the initial prompt for submission, exactly once.
    ///
    /// Yields `Some` only when hydration has completed and no prior user
    /// or agent activity exists. The one-shot latch makes re-polling
    /// idempotent; restored history consumes the prompt without yielding.
    pub fn take_initial_prompt(&mut self) -> Option<String> {
        if self.phase != Phase::Ready || self.auto_submitted {
            return None;
        }
        if !self.user_messages.is_empty() || !self.thoughts.is_empty() {
            self.initial_prompt = None;
            self.auto_submitted = true;
            return None;
        }
        let prompt = self.initial_prompt.take()?;
        self.auto_submitted = true;
        Some(prompt)
    }

    /// Fold one live turn event into the session state.
    pub fn apply_turn_event(&mut self, event: &TurnEvent) {
        match event {
            TurnEvent::TurnStarted { turn_id, .. } => {
                self.streaming = true;
                self.turn_id = Some(turn_id.clone());
                self.event_index = 0;
                self.streaming_text.clear();
            }
            TurnEvent::Narration { delta } => {
                self.streaming_text.push_str(delta);
            }
            TurnEvent::ThoughtLogged { thought, call_id } => {
                self.fold_thought(thought, call_id);
                self.event_index += 1;
            }
            TurnEvent::FileWritten { file, .. } => {
                // Later values win on path collision; live always wins
                // after hydration.
                if self.active_file.is_none() {
                    self.active_file = Some(file.path.clone());
                }
                let _ = self.files.insert(file.path.clone(), file.clone());
                self.event_index += 1;
            }
            TurnEvent::TurnCompleted { .. } | TurnEvent::TurnFailed { .. } => {
                self.streaming = false;
                self.streaming_text.clear();
                self.turn_id = None;
            }
        }
    }

    fn fold_thought(&mut self, thought: &NarratedThought, call_id: &str) {
        let key = if call_id.is_empty() {
            // Synthesized fallback: owning turn id plus positional index.
            let turn = self.turn_id.as_deref().unwrap_or("turn");
            format!("{turn}-{}", self.event_index)
        } else {
            call_id.to_string()
        };

        if self.known_keys.contains(&key) || self.known_keys.contains(&thought.id) {
            debug!(%key, "dropped duplicate thought");
            return;
        }
        let _ = self.known_keys.insert(key.clone());
        let _ = self.known_keys.insert(thought.id.clone());
        self.thoughts.push(ThoughtEntry {
            key,
            thought: thought.clone(),
        });
        // A finalized entry supersedes in-flight narration.
        self.streaming_text.clear();
    }

    /// The current file table, insertion-ordered.
    pub fn files(&self) -> &IndexMap<String, GeneratedFile> {
        &self.files
    }

    /// Number of known thoughts. Never decreases.
    pub fn thought_count(&self) -> usize {
        self.thoughts.len()
    }

    /// Path of the file the client should display.
    pub fn active_file(&self) -> Option<&str> {
        self.active_file.as_deref()
    }

    /// Explicit user selection. Only existing paths are selectable; the
    /// default only ever fills an unset active file, so a selection is
    /// never overridden by later writes.
    pub fn select_file(&mut self, path: &str) {
        if self.files.contains_key(path) {
            self.active_file = Some(path.to_string());
        }
    }

    /// In-flight narration that has not yet produced a thought, shown as a
    /// transient element outside the persisted timeline.
    pub fn streaming_text(&self) -> Option<&str> {
        if self.streaming && !self.streaming_text.is_empty() {
            Some(&self.streaming_text)
        } else {
            None
        }
    }

    /// The merged activity timeline: user messages and thoughts, stably
    /// sorted by timestamp, with a user entry winning an exact tie.
    pub fn activity_timeline(&self) -> Vec<ActivityItem> {
        let mut items: Vec<ActivityItem> = Vec::with_capacity(
            self.user_messages.len() + self.thoughts.len(),
        );
        for msg in &self.user_messages {
            items.push(ActivityItem::User {
                key: msg.key.clone(),
                content: msg.content.clone(),
                created_at_ms: msg.created_at.timestamp_millis(),
            });
        }
        for entry in &self.thoughts {
            items.push(ActivityItem::Thought {
                key: entry.key.clone(),
                agent: entry.thought.agent,
                thought_type: entry.thought.thought_type,
                content: entry.thought.content.clone(),
                created_at_ms: entry.thought.created_at.timestamp_millis(),
            });
        }
        items.sort_by(|a, b| {
            a.created_at_ms()
                .cmp(&b.created_at_ms())
                .then_with(|| b.is_user().cmp(&a.is_user()))
        });
        items
    }
}
