//! Entry-module selection and default-export synthesis.

use indexmap::IndexMap;
use regex::Regex;
use std::sync::OnceLock;

use crate::normalize::ENTRY_PATH;

/// Fallback paths tried, in order, when nothing normalized to the entry.
const ENTRY_FALLBACKS: [&str; 3] = ["/index.tsx", "/main.tsx", "/page.tsx"];

fn exported_symbol_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"export (?:const|function) ([A-Z][a-zA-Z0-9_]*)")
            .unwrap_or_else(|_| unreachable!("static pattern"))
    })
}

/// Make sure the file table has an entry module, aliasing a fallback or an
/// arbitrary first file when necessary, and synthesize a default export
/// when the chosen entry lacks one. Returns the entry path.
pub fn ensure_entry(files: &mut IndexMap<String, String>) -> String {
    if !files.contains_key(ENTRY_PATH) {
        let source = ENTRY_FALLBACKS
            .iter()
            .find_map(|path| files.get(*path).cloned())
            .or_else(|| files.values().next().cloned());
        if let Some(content) = source {
            let _ = files.insert(ENTRY_PATH.to_string(), content);
        }
    }

    if let Some(content) = files.get_mut(ENTRY_PATH) {
        if let Some(synthesized) = synthesize_default_export(content) {
            *content = synthesized;
        }
    }
    ENTRY_PATH.to_string()
}

/// Append a default export for the entry's single capitalized exported
/// symbol, when the content has no explicit `export default`. Returns
/// `None` when nothing needs doing or no symbol can be found.
fn synthesize_default_export(content: &str) -> Option<String> {
    if content.contains("export default") {
        return None;
    }
    let caps = exported_symbol_re().captures(content)?;
    let symbol = caps.get(1)?.as_str();
    Some(format!("{content}\n\nexport default {symbol};"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> IndexMap<String, String> {
        entries
            .iter()
            .map(|(p, c)| ((*p).to_string(), (*c).to_string()))
            .collect()
    }

    #[test]
    fn existing_entry_is_kept() {
        let mut files = table(&[("/App.tsx", "export default function App() {}")]);
        assert_eq!(ensure_entry(&mut files), "/App.tsx");
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn index_fallback_is_aliased() {
        let mut files = table(&[("/index.tsx", "export default function Home() {}")]);
        let _ = ensure_entry(&mut files);
        assert_eq!(files["/App.tsx"], files["/index.tsx"]);
    }

    #[test]
    fn fallback_order_prefers_index_over_main() {
        let mut files = table(&[("/main.tsx", "main"), ("/index.tsx", "export default 1;")]);
        let _ = ensure_entry(&mut files);
        assert_eq!(files["/App.tsx"], "export default 1;");
    }

    #[test]
    fn arbitrary_first_file_is_last_resort() {
        let mut files = table(&[(
            "/components/Dashboard.tsx",
            "export function Dashboard() { return null; }",
        )]);
        let _ = ensure_entry(&mut files);
        assert!(files.contains_key("/App.tsx"));
        // Single capitalized exported symbol gets a synthesized default.
        assert!(files["/App.tsx"].ends_with("export default Dashboard;"));
    }

    #[test]
    fn default_export_is_not_duplicated() {
        let mut files = table(&[("/App.tsx", "export default function App() {}")]);
        let _ = ensure_entry(&mut files);
        assert_eq!(files["/App.tsx"].matches("export default").count(), 1);
    }

    #[test]
    fn no_symbol_means_no_synthesis() {
        let mut files = table(&[("/App.tsx", "const x = 1;")]);
        let _ = ensure_entry(&mut files);
        assert_eq!(files["/App.tsx"], "const x = 1;");
    }

    #[test]
    fn empty_table_still_returns_entry_path() {
        let mut files = IndexMap::new();
        assert_eq!(ensure_entry(&mut files), "/App.tsx");
        assert!(files.is_empty());
    }
}
