//! Environment scaffolding — the files injected into every graph.
//!
//! The sandbox always gets an HTML shell with the Tailwind CDN runtime, a
//! base stylesheet, and a synthesized package manifest, so even a single
//! generated component boots into a styled page.

use indexmap::IndexMap;

/// Sandbox path of the HTML shell.
pub const INDEX_HTML_PATH: &str = "/public/index.html";

/// Sandbox path of the base stylesheet.
pub const STYLES_CSS_PATH: &str = "/styles.css";

/// Sandbox path of the synthesized manifest.
pub const PACKAGE_JSON_PATH: &str = "/package.json";

/// Static HTML shell with Tailwind loaded from its CDN.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Hive Preview</title>
    <script src="https://cdn.tailwindcss.com"></script>
    <script>
      tailwind.config = {
        theme: {
          extend: {
            colors: {
              border: "hsl(var(--border))",
              background: "hsl(var(--background))",
              foreground: "hsl(var(--foreground))",
            }
          }
        }
      }
    </script>
    <style>
      body { margin: 0; padding: 0; font-family: ui-sans-serif, system-ui, sans-serif; background: #000; color: #fff; }
    </style>
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>
"##;

/// Base stylesheet injected alongside the shell.
pub const STYLES_CSS: &str = "body {\n    background-color: #020204;\n    color: #ffffff;\n}\n";

/// Build the `package.json` manifest text from inferred dependencies.
pub fn package_json(dependencies: &IndexMap<String, String>) -> String {
    let manifest = serde_json::json!({
        "name": "hive-preview",
        "private": true,
        "dependencies": dependencies,
    });
    serde_json::to_string_pretty(&manifest).unwrap_or_else(|_| "{}".to_string())
}

/// Inject the scaffolding files into a graph's file table. Generated files
/// that already claimed a scaffold path are overwritten; the sandbox needs
/// these exact contents to boot.
pub fn inject(files: &mut IndexMap<String, String>, dependencies: &IndexMap<String, String>) {
    let _ = files.insert(INDEX_HTML_PATH.to_string(), INDEX_HTML.to_string());
    let _ = files.insert(STYLES_CSS_PATH.to_string(), STYLES_CSS.to_string());
    let _ = files.insert(PACKAGE_JSON_PATH.to_string(), package_json(dependencies));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_loads_tailwind_from_cdn() {
        assert!(INDEX_HTML.contains("cdn.tailwindcss.com"));
        assert!(INDEX_HTML.contains("<div id=\"root\">"));
    }

    #[test]
    fn manifest_lists_dependencies() {
        let mut deps = IndexMap::new();
        let _ = deps.insert("clsx".to_string(), "^2.1.1".to_string());
        let json = package_json(&deps);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["dependencies"]["clsx"], "^2.1.1");
    }

    #[test]
    fn inject_always_adds_all_three() {
        let mut files = IndexMap::new();
        inject(&mut files, &IndexMap::new());
        assert!(files.contains_key(INDEX_HTML_PATH));
        assert!(files.contains_key(STYLES_CSS_PATH));
        assert!(files.contains_key(PACKAGE_JSON_PATH));
    }
}
