//! HTTP handlers.

pub mod generate;
pub mod projects;
