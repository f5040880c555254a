//! # hive-protocol
//!
//! The tool invocation protocol: everything between "a generation turn
//! starts" and "durable records exist and clients saw the events".
//!
//! - [`backend`]: the [`backend::GenerationBackend`] trait and the chat
//!   message types fed to it
//! - [`openai`]: an OpenAI-compatible streaming client implementation
//! - [`tools`]: the `writeFile` / `logSwarmThought` toolset and the swarm
//!   system prompt
//! - [`dispatch`]: parses and persists tool invocations, producing result
//!   acks for the backend and [`hive_core::events::TurnEvent`]s for clients
//! - [`turn`]: the round loop that drives one generation turn end to end
//! - [`testutil`]: a scripted backend for tests
//!
//! Persistence failures inside a dispatch are logged and swallowed; the
//! turn keeps going. Backend stream errors abort the turn and leave the
//! project in status `error`.

#![deny(unsafe_code)]

pub mod backend;
pub mod dispatch;
pub mod errors;
pub mod openai;
pub mod testutil;
pub mod tools;
pub mod turn;

pub use backend::{ChatMessage, GenerationBackend, GenerationRequest};
pub use dispatch::ToolDispatcher;
pub use errors::{ProtocolError, Result};
pub use openai::OpenAiBackend;
pub use turn::{run_turn, TurnOutcome};
