//! # hive-server
//!
//! The HTTP surface over the engine: project creation and listing,
//! hydration snapshots, and the server-sent-events generation stream.
//!
//! Routing, state, and error mapping live here; all domain behavior is in
//! `hive-protocol` and `hive-store`. The server owns no mutable state of
//! its own beyond the shared [`state::AppState`].

#![deny(unsafe_code)]

pub mod errors;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod state;

pub use errors::ApiError;
pub use router::build_router;
pub use state::AppState;
