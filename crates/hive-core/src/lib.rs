//! # hive-core
//!
//! Foundation types and utilities shared by every Hive crate.
//!
//! Hive turns a natural-language product description into a running
//! application: a swarm of narrated generation agents streams file writes
//! and thoughts, a client-side reconciler folds durable history and the
//! live stream into one view, and a virtual module compiler prepares the
//! generated files for an isolated preview runtime.
//!
//! This crate provides the shared vocabulary:
//!
//! - **Roles**: [`roles::AgentRole`] and [`roles::ThoughtType`]
//! - **Records**: [`project::Project`], [`records::GeneratedFile`],
//!   [`records::NarratedThought`]
//! - **Activity**: [`activity::ActivityItem`] — the derived timeline union
//! - **Events**: [`events::StreamEvent`] for backend streaming,
//!   [`events::TurnEvent`] for generation-turn lifecycle
//! - **IDs**: prefixed UUID v7 helpers in [`ids`]
//! - **Logging**: [`logging::init_logging`]
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other hive crates.

#![deny(unsafe_code)]

pub mod activity;
pub mod constants;
pub mod events;
pub mod ids;
pub mod logging;
pub mod project;
pub mod records;
pub mod roles;
