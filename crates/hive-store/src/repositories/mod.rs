//! Per-table repositories.
//!
//! Repos are stateless — every method takes `&Connection` so callers
//! control pooling and transaction scope.

pub mod file;
pub mod project;
pub mod thought;

pub use file::FileRepo;
pub use project::ProjectRepo;
pub use thought::ThoughtRepo;
