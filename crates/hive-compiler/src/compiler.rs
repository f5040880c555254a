//! The compile pipeline.

use indexmap::IndexMap;

use crate::graph::{ModuleGraph, UnresolvedImport};
use crate::{deps, entry, mocks, normalize, resolve, rewrite, scaffold};

/// Compile a flat `path → content` table into a bootable module graph.
///
/// Pure and total: never fails, never does I/O. Specifiers that cannot be
/// resolved are left verbatim and reported in [`ModuleGraph::unresolved`].
pub fn compile(files: &IndexMap<String, String>) -> ModuleGraph {
    let normalized = normalize::normalize_table(files);

    let mut out = IndexMap::with_capacity(normalized.len() + 4);
    let mut dependencies: IndexMap<String, String> = IndexMap::new();
    let mut unresolved: Vec<UnresolvedImport> = Vec::new();
    let mut needed_mocks: Vec<&'static str> = Vec::new();

    for (path, content) in &normalized {
        let rewritten = rewrite::rewrite_imports(content, |spec| {
            if let Some(mock) = mocks::mock_path(spec) {
                if !needed_mocks.contains(&mock) {
                    needed_mocks.push(mock);
                }
                return Some(resolve::relative_specifier(path, mock));
            }

            if spec.starts_with(resolve::ALIAS_PREFIX) {
                return match resolve::resolve_alias(spec, &normalized) {
                    Some(target) => Some(resolve::relative_specifier(path, &target)),
                    None => {
                        let miss = UnresolvedImport {
                            file: path.clone(),
                            specifier: spec.to_string(),
                        };
                        if !unresolved.contains(&miss) {
                            unresolved.push(miss);
                        }
                        None
                    }
                };
            }

            if let Some(package) = deps::package_name(spec) {
                let version = deps::version_for(&package).to_string();
                let _ = dependencies.entry(package).or_insert(version);
            }
            None
        });
        let _ = out.insert(path.clone(), rewritten);
    }

    for mock in needed_mocks {
        if let Some((_, _, source)) = mocks::MOCKED_MODULES.iter().find(|(_, p, _)| *p == mock) {
            let _ = out.insert(mock.to_string(), (*source).to_string());
        }
    }

    let entry = entry::ensure_entry(&mut out);
    scaffold::inject(&mut out, &dependencies);

    ModuleGraph {
        entry,
        files: out,
        dependencies,
        unresolved,
    }
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
    fn alias_hit_rewrites_to_relative() {
        let files = table(&[
            (
                "src/app/page.tsx",
                "import { Header } from '@/components/Header';\nexport default function Page() { return null; }",
            ),
            ("src/components/Header.tsx", "export const Header = () => null;"),
        ]);
        let graph = compile(&files);
        assert!(graph.files["/App.tsx"].contains("from './components/Header.tsx'"));
        assert!(graph.unresolved.is_empty());
    }

    #[test]
    fn alias_miss_is_left_unchanged_and_reported() {
        let files = table(&[(
            "src/app/page.tsx",
            "import { Header } from '@/components/Header';",
        )]);
        let graph = compile(&files);
        assert!(graph.files["/App.tsx"].contains("from '@/components/Header'"));
        assert_eq!(graph.unresolved.len(), 1);
        assert_eq!(graph.unresolved[0].specifier, "@/components/Header");
    }

    #[test]
    fn scoped_package_imported_twice_yields_one_entry() {
        let files = table(&[
            ("src/A.tsx", "import { Dialog } from '@radix-ui/react-dialog';"),
            ("src/B.tsx", "import { DialogTrigger } from '@radix-ui/react-dialog';"),
        ]);
        let graph = compile(&files);
        assert_eq!(
            graph
                .dependencies
                .keys()
                .filter(|k| k.as_str() == "@radix-ui/react-dialog")
                .count(),
            1
        );
    }

    #[test]
    fn builtins_never_reach_the_manifest() {
        let files = table(&[(
            "src/App.tsx",
            "import React from 'react';\nimport { createRoot } from 'react-dom/client';",
        )]);
        let graph = compile(&files);
        assert!(graph.dependencies.is_empty());
    }

    #[test]
    fn preset_versions_apply() {
        let files = table(&[("src/App.tsx", "import { motion } from 'framer-motion';")]);
        let graph = compile(&files);
        assert_eq!(graph.dependencies["framer-motion"], "^11.11.1");
    }

    #[test]
    fn next_modules_are_mocked() {
        let files = table(&[(
            "src/app/page.tsx",
            "import Link from 'next/link';\nimport { useRouter } from 'next/navigation';",
        )]);
        let graph = compile(&files);
        assert!(graph.files["/App.tsx"].contains("from './__mocks__/next-link.tsx'"));
        assert!(graph.files["/App.tsx"].contains("from './__mocks__/next-navigation.tsx'"));
        assert!(graph.files.contains_key("/__mocks__/next-link.tsx"));
        assert!(graph.files.contains_key("/__mocks__/next-navigation.tsx"));
        // Mocked modules are not external dependencies.
        assert!(graph.dependencies.is_empty());
    }

    #[test]
    fn entry_synthesis_from_non_entry_component() {
        let files = table(&[(
            "src/components/Dashboard.tsx",
            "export function Dashboard() { return null; }",
        )]);
        let graph = compile(&files);
        assert_eq!(graph.entry, "/App.tsx");
        assert_eq!(
            graph.files["/App.tsx"].matches("export default").count(),
            1
        );
        assert!(graph.files["/App.tsx"].ends_with("export default Dashboard;"));
    }

    #[test]
    fn scaffolding_is_always_injected() {
        let graph = compile(&IndexMap::new());
        assert!(graph.files.contains_key("/public/index.html"));
        assert!(graph.files.contains_key("/styles.css"));
        assert!(graph.files.contains_key("/package.json"));
    }

    #[test]
    fn compile_is_deterministic() {
        let files = table(&[
            ("src/app/page.tsx", "import { H } from '@/components/H';"),
            ("src/components/H.tsx", "export const H = () => null;"),
        ]);
        assert_eq!(compile(&files), compile(&files));
    }

    #[test]
    fn garbage_input_never_panics() {
        let files = table(&[
            ("", ""),
            ("////", "import '"),
            ("src/app/page.tsx", "not even code \u{1F41D}"),
        ]);
        let graph = compile(&files);
        assert_eq!(graph.entry, "/App.tsx");
    }
}
