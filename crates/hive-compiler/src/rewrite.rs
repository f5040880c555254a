//! Import-specifier rewriting.
//!
//! One regex covers both syntactic import forms ("from"-style and bare
//! side-effect imports) so every specifier goes through the same resolver
//! regardless of surface syntax. The resolver decides; this module only
//! splices.

use regex::Regex;
use std::sync::OnceLock;

fn import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // `import X from '…'`, `import { a, b } from "…"`, and bare
        // `import '…'`. The specifier is the single capture group.
        Regex::new(r#"import\s+(?:[^'";]*?from\s+)?['"]([^'"]+)['"]"#)
            .unwrap_or_else(|_| unreachable!("static pattern"))
    })
}

/// Rewrite every import specifier in `content` through `map`.
///
/// `map` returns the replacement specifier, or `None` to leave the
/// original in place. Statement text around the specifier is preserved.
pub fn rewrite_imports(content: &str, mut map: impl FnMut(&str) -> Option<String>) -> String {
    import_re()
        .replace_all(content, |caps: &regex::Captures<'_>| {
            let (Some(whole), Some(spec)) = (caps.get(0), caps.get(1)) else {
                return String::new();
            };
            match map(spec.as_str()) {
                Some(new) => {
                    // Splice by position so a binding that happens to share
                    // the specifier's text is never touched.
                    let text = whole.as_str();
                    let start = spec.start() - whole.start();
                    let end = spec.end() - whole.start();
                    format!("{}{new}{}", &text[..start], &text[end..])
                }
                None => whole.as_str().to_string(),
            }
        })
        .into_owned()
}

/// Collect every import specifier in `content`, in source order.
pub fn import_specifiers(content: &str) -> Vec<String> {
    import_re()
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect()
}
