//! Compiler output types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An import specifier the compiler could not resolve.
///
/// Carried as data, not as an error: the file keeps the specifier verbatim
/// and the sandbox reports the failure at load time if it matters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedImport {
    /// Sandbox path of the importing file.
    pub file: String,
    /// The specifier as written.
    pub specifier: String,
}

/// A complete, bootable virtual module graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleGraph {
    /// Sandbox path of the entry module.
    pub entry: String,
    /// Virtual file system, insertion-ordered.
    pub files: IndexMap<String, String>,
    /// Inferred external packages, name → version.
    pub dependencies: IndexMap<String, String>,
    /// Specifiers left unrewritten.
    pub unresolved: Vec<UnresolvedImport>,
}
