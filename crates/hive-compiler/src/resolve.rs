//! Alias resolution and relative-specifier computation — steps 2 and 3's
//! shared resolver.

use indexmap::IndexMap;

/// The project-internal alias prefix generated code imports through.
pub const ALIAS_PREFIX: &str = "@/";

/// Extensions probed when an alias specifier has no exact match, in
/// priority order.
const EXTENSIONS: [&str; 6] = [".tsx", ".ts", ".jsx", ".js", ".css", ".json"];

/// Resolve an `@/`-alias specifier against the known path set.
///
/// Candidates, first hit wins: the exact path, the path with each source
/// extension appended, then an `index.*` file inside the directory.
/// Returns `None` when nothing matches; the caller leaves the specifier
/// untouched.
pub fn resolve_alias(specifier: &str, files: &IndexMap<String, String>) -> Option<String> {
    let bare = specifier.strip_prefix(ALIAS_PREFIX)?;
    let rooted = format!("/{bare}");

    if files.contains_key(&rooted) {
        return Some(rooted);
    }
    for ext in EXTENSIONS {
        let candidate = format!("{rooted}{ext}");
        if files.contains_key(&candidate) {
            return Some(candidate);
        }
    }
    for ext in EXTENSIONS {
        let candidate = format!("{rooted}/index{ext}");
        if files.contains_key(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Rewrite `to` (a sandbox-rooted path) as a specifier relative to the
/// file at `from`.
///
/// Walks off the common directory prefix and emits one `../` per remaining
/// segment of the importer's directory; a sibling import gets `./`.
pub fn relative_specifier(from: &str, to: &str) -> String {
    let from_segments: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let from_dir = &from_segments[..from_segments.len().saturating_sub(1)];
    let to_segments: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    let mut common = 0;
    while common < from_dir.len()
        && common + 1 < to_segments.len()
        && from_dir[common] == to_segments[common]
    {
        common += 1;
    }

    let ups = from_dir.len() - common;
    let mut out = String::new();
    if ups == 0 {
        out.push_str("./");
    } else {
        for _ in 0..ups {
            out.push_str("../");
        }
    }
    out.push_str(&to_segments[common..].join("/"));
    out
}
