//! Framework-only module mocking.
//!
//! Generated code routinely imports Next.js runtime modules the sandbox
//! cannot supply. Each one is swapped for a small local module with the
//! same exported shape and degraded behavior, so the code runs unmodified:
//! navigation hooks become no-ops, `Link` renders an anchor, `Image`
//! renders a plain `img`.

/// Sandbox directory holding synthesized mock modules.
pub const MOCKS_DIR: &str = "/__mocks__";

/// Specifiers that get mocked, with their mock module path and source.
pub const MOCKED_MODULES: [(&str, &str, &str); 4] = [
    ("next/navigation", "/__mocks__/next-navigation.tsx", NAVIGATION_MOCK),
    ("next/router", "/__mocks__/next-router.tsx", ROUTER_MOCK),
    ("next/link", "/__mocks__/next-link.tsx", LINK_MOCK),
    ("next/image", "/__mocks__/next-image.tsx", IMAGE_MOCK),
];

/// Mock module path for a specifier, if it is one we mock.
pub fn mock_path(specifier: &str) -> Option<&'static str> {
    MOCKED_MODULES
        .iter()
        .find(|(spec, _, _)| *spec == specifier)
        .map(|(_, path, _)| *path)
}

const NAVIGATION_MOCK: &str = r"const noop = () => {};

export function useRouter() {
  return {
    push: noop,
    replace: noop,
    back: noop,
    forward: noop,
    refresh: noop,
    prefetch: noop,
  };
}

export function usePathname() {
  return '/';
}

export function useSearchParams() {
  return new URLSearchParams();
}

export function useParams() {
  return {};
}

export function redirect(_url: string) {}
export function notFound() {}
";

const ROUTER_MOCK: &str = r"const noop = () => Promise.resolve(true);

export function useRouter() {
  return {
    pathname: '/',
    query: {},
    asPath: '/',
    push: noop,
    replace: noop,
    back: () => {},
    prefetch: () => Promise.resolve(),
    events: { on: () => {}, off: () => {}, emit: () => {} },
  };
}

export default { useRouter };
";

const LINK_MOCK: &str = r"import React from 'react';

export default function Link({ href, children, ...rest }: any) {
  return React.createElement('a', { href, ...rest }, children);
}
";

const IMAGE_MOCK: &str = r"import React from 'react';

export default function Image({ src, alt, width, height, ...rest }: any) {
  return React.createElement('img', { src, alt, width, height, ...rest });
}
";
