//! Dependency inference — external package names from import specifiers.

/// Packages the sandbox runtime supplies on its own.
const BUILTINS: [&str; 2] = ["react", "react-dom"];

/// Known-good versions for packages the agents reach for constantly.
/// Anything else is pinned to `latest`.
const PRESET_VERSIONS: [(&str, &str); 4] = [
    ("lucide-react", "^0.451.0"),
    ("framer-motion", "^11.11.1"),
    ("clsx", "^2.1.1"),
    ("tailwind-merge", "^2.5.2"),
];

/// Extract the external package name from an import specifier.
///
/// Returns `None` for relative imports, `@/`-alias imports, sandbox-rooted
/// paths, and the always-available builtins. Scoped packages keep their
/// two leading segments; everything else keeps one.
pub fn package_name(specifier: &str) -> Option<String> {
    if specifier.starts_with('.') || specifier.starts_with('/') {
        return None;
    }
    if specifier.starts_with(crate::resolve::ALIAS_PREFIX) {
        return None;
    }

    let name = if specifier.starts_with('@') {
        // Scope plus package: "@radix-ui/react-dialog/dist" → "@radix-ui/react-dialog"
        let mut parts = specifier.splitn(3, '/');
        let scope = parts.next()?;
        let pkg = parts.next()?;
        format!("{scope}/{pkg}")
    } else {
        specifier.split('/').next()?.to_string()
    };

    if BUILTINS.contains(&name.as_str()) {
        return None;
    }
    Some(name)
}

/// The version to pin for an inferred package.
pub fn version_for(package: &str) -> &'static str {
    PRESET_VERSIONS
        .iter()
        .find(|(name, _)| *name == package)
        .map_or("latest", |(_, version)| version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_and_alias_are_not_packages() {
        assert_eq!(package_name("./Header"), None);
        assert_eq!(package_name("../lib/utils"), None);
        assert_eq!(package_name("/App.tsx"), None);
        assert_eq!(package_name("@/components/Header"), None);
    }

    #[test]
    fn builtins_are_excluded() {
        assert_eq!(package_name("react"), None);
        assert_eq!(package_name("react-dom"), None);
        assert_eq!(package_name("react-dom/client"), None);
    }

    #[test]
    fn plain_packages_keep_one_segment() {
        assert_eq!(package_name("framer-motion").as_deref(), Some("framer-motion"));
        assert_eq!(package_name("date-fns/format").as_deref(), Some("date-fns"));
    }

    #[test]
    fn scoped_packages_keep_two_segments() {
        assert_eq!(
            package_name("@radix-ui/react-dialog").as_deref(),
            Some("@radix-ui/react-dialog")
        );
        assert_eq!(
            package_name("@tanstack/react-query/devtools").as_deref(),
            Some("@tanstack/react-query")
        );
    }

    #[test]
    fn presets_have_pinned_versions() {
        assert_eq!(version_for("clsx"), "^2.1.1");
        assert_eq!(version_for("left-pad"), "latest");
    }
}
