//! # hive-store
//!
//! SQLite persistence for the Hive engine: projects, generated files
//! (upsert-by-path), and narrated thoughts (append-only).
//!
//! Layout follows a pooled-connection + stateless-repository split:
//!
//! - [`connection`]: r2d2 pool construction and pragmas
//! - [`migrations`]: `user_version`-driven schema migrations
//! - [`repositories`]: per-table repos, every method takes `&Connection`
//! - [`store`]: the high-level [`store::ProjectStore`] — the sole write
//!   path, serialized behind a global write lock with busy-retry
//!
//! ## Crate Position
//!
//! Depends on `hive-core` for record types. Consumed by `hive-protocol`
//! (tool persistence) and `hive-server` (hydration reads).

#![deny(unsafe_code)]

pub mod connection;
pub mod errors;
pub mod migrations;
pub mod repositories;
pub mod row_types;
pub mod store;

pub use connection::{new_file, new_in_memory, ConnectionConfig, ConnectionPool, PooledConnection};
pub use errors::{Result, StoreError};
pub use migrations::run_migrations;
pub use store::{ProjectSnapshot, ProjectStore};
