//! # hive-compiler
//!
//! Turns the flat `path → content` table of generated files into a
//! self-contained virtual module graph a sandboxed preview runtime can
//! boot without access to the host build configuration.
//!
//! The whole pipeline is pure and total: [`compile`] never fails, never
//! does I/O, and recomputes everything from scratch on each call. Inputs
//! it cannot make sense of pass through unchanged and are reported in
//! [`ModuleGraph::unresolved`] instead of raised as errors — a broken
//! import fails inside the sandbox, not here.
//!
//! Pipeline, in order:
//!
//! 1. [`normalize`]: sandbox-root-relative paths, page file renamed to the
//!    entry filename
//! 2. [`resolve`]: `@/` alias specifiers matched against the path set
//! 3. [`rewrite`]: resolved imports rewritten to relative specifiers
//! 4. [`mocks`]: framework-only modules swapped for local stand-ins
//! 5. [`deps`]: external package names collected into a manifest
//! 6. [`entry`]: entry module chosen and default export synthesized
//! 7. [`scaffold`]: HTML shell, base stylesheet, and manifest injected

#![deny(unsafe_code)]

pub mod deps;
pub mod entry;
pub mod graph;
pub mod mocks;
pub mod normalize;
pub mod resolve;
pub mod rewrite;
pub mod scaffold;

mod compiler;

pub use compiler::compile;
pub use graph::{ModuleGraph, UnresolvedImport};
