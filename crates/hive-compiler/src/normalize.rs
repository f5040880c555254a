//! Path normalization — step 1 of the pipeline.
//!
//! Generated files arrive with whatever layout the agents imagined, most
//! often a Next.js-shaped `src/app/` tree. The sandbox wants flat,
//! root-relative paths with a conventional `/App.tsx` entry.

use indexmap::IndexMap;

/// The sandbox's expected application-entry path.
pub const ENTRY_PATH: &str = "/App.tsx";

/// Normalize one source path to its sandbox form.
///
/// Strips a leading `src/app/` or `src/` root, guarantees a leading slash,
/// and renames the conventional page file to [`ENTRY_PATH`].
pub fn normalize_path(path: &str) -> String {
    let stripped = path
        .strip_prefix("src/app/")
        .or_else(|| path.strip_prefix("src/"))
        .unwrap_or(path);

    let mut normalized = if stripped.starts_with('/') {
        stripped.to_string()
    } else {
        format!("/{stripped}")
    };

    if normalized == "/page.tsx" {
        normalized = ENTRY_PATH.to_string();
    }
    normalized
}

/// Normalize a whole file table.
///
/// When two distinct source paths normalize to the same sandbox path, the
/// later one in iteration order wins. Accepted limitation, not an error.
pub fn normalize_table(files: &IndexMap<String, String>) -> IndexMap<String, String> {
    let mut out = IndexMap::with_capacity(files.len());
    for (path, content) in files {
        let _ = out.insert(normalize_path(path), content.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_source_roots() {
        assert_eq!(normalize_path("src/app/components/Header.tsx"), "/components/Header.tsx");
        assert_eq!(normalize_path("src/components/Header.tsx"), "/components/Header.tsx");
        assert_eq!(normalize_path("components/Header.tsx"), "/components/Header.tsx");
    }

    #[test]
    fn page_becomes_entry() {
        assert_eq!(normalize_path("src/app/page.tsx"), "/App.tsx");
        assert_eq!(normalize_path("page.tsx"), "/App.tsx");
    }

    #[test]
    fn nested_page_is_untouched() {
        assert_eq!(normalize_path("src/app/billing/page.tsx"), "/billing/page.tsx");
    }

    #[test]
    fn already_rooted_paths_pass_through() {
        assert_eq!(normalize_path("/App.tsx"), "/App.tsx");
    }

    #[test]
    fn collision_is_last_write_wins() {
        let mut files = IndexMap::new();
        let _ = files.insert("src/app/page.tsx".to_string(), "first".to_string());
        let _ = files.insert("page.tsx".to_string(), "second".to_string());
        let out = normalize_table(&files);
        assert_eq!(out.len(), 1);
        assert_eq!(out["/App.tsx"], "second");
    }
}
