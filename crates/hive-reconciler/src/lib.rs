//! # hive-reconciler
//!
//! Produces one consistent view of "what the user should see right now"
//! from two disjoint sources: a one-time durable hydration snapshot and a
//! continuous live turn-event stream — with no duplicates, no drops, and
//! no out-of-order user/agent exchanges.
//!
//! The [`Reconciler`] is a plain synchronous state machine. It does no
//! I/O: the caller fetches the snapshot, consumes the event stream, and
//! feeds both in. Dropping the value abandons the session; there is no
//! cancellation primitive, and a turn abandoned mid-stream keeps landing
//! its effects durably through the protocol layer regardless.

#![deny(unsafe_code)]

mod reconciler;

pub use reconciler::{HydrationSnapshot, Phase, Reconciler};
