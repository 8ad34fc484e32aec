//! Routes, internal links, and reference errors.
//!
//! A route is a site-relative path in canonical form: leading `/`, no trailing
//! slash (except the root), no query or fragment. Each locale has its own
//! [`RouteTable`] listing every page it emits, and every internal link in
//! config or content must resolve against it.
//!
//! Every page is written as `<route>/index.html`, and links are emitted with a
//! trailing slash so they hit the directory index directly on any static host.

use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Route the not-found page is rendered under. It is written to `404.html`
/// rather than a directory index.
pub const NOT_FOUND_ROUTE: &str = "/404";

/// A dangling reference found while resolving a locale. Always fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReferenceError {
    #[error("{referrer} points to '{target}', which does not exist")]
    MissingDocument { referrer: String, target: String },
    #[error("{referrer} references asset '{asset}', which is not in static/")]
    MissingAsset { referrer: String, asset: String },
    #[error("{referrer} references sidebar '{sidebar}', which is not defined")]
    UnknownSidebar { referrer: String, sidebar: String },
    #[error("sidebar '{0}' has no documents")]
    EmptySidebar(String),
    #[error("broken link in {page}: '{target}' does not resolve to a page or asset")]
    BrokenLink { page: String, target: String },
    #[error("{first} and {second} both map to route {route}")]
    DuplicateRoute {
        route: String,
        first: String,
        second: String,
    },
    #[error("{first} and {second} would both be written to {path}")]
    DuplicateOutput {
        path: String,
        first: String,
        second: String,
    },
}

/// Whether a link target leaves the site (has a scheme or is protocol-relative).
pub fn is_external(target: &str) -> bool {
    target.starts_with("//")
        || target
            .split_once(':')
            .is_some_and(|(scheme, _)| {
                !scheme.is_empty()
                    && scheme
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
            })
}

/// Split `path#fragment` (or `path?query`) into the path and the suffix.
pub fn split_suffix(target: &str) -> (&str, &str) {
    match target.find(['#', '?']) {
        Some(idx) => target.split_at(idx),
        None => (target, ""),
    }
}

/// Canonical form of an internal path, for lookups.
///
/// `"/docs/"` → `"/docs"`, `"docs#intro"` → `"/docs"`, `""` → `"/"`.
pub fn normalize(path: &str) -> String {
    let (path, _) = split_suffix(path);
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Join a route base (`"docs"`, `""`) and a relative path into a route.
pub fn join_route(base: &str, rest: &str) -> String {
    let base = base.trim_matches('/');
    let rest = rest.trim_matches('/');
    match (base.is_empty(), rest.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{rest}"),
        (false, true) => format!("/{base}"),
        (false, false) => format!("/{base}/{rest}"),
    }
}

/// Build an href for an internal path under a locale's link root.
///
/// `link_root` always ends with `/` (e.g. `/libvips_ffi/zh-Hans/`). Query
/// and fragment are preserved.
pub fn href(link_root: &str, path: &str) -> String {
    let (_, suffix) = split_suffix(path);
    let route = normalize(path);
    if route == "/" {
        format!("{link_root}{suffix}")
    } else {
        format!("{link_root}{}/{suffix}", route.trim_start_matches('/'))
    }
}

/// Whether every segment of a slash-separated path is a plain name.
///
/// Empty, `.` and `..` segments are rejected, as are backslashes. The bare
/// root (`""` or `"/"`) is clean.
pub fn is_clean_path(path: &str) -> bool {
    let trimmed = path.trim_matches('/');
    trimmed.is_empty()
        || trimmed
            .split('/')
            .all(|s| !s.is_empty() && s != "." && s != ".." && !s.contains('\\'))
}

/// Output file of a route, relative to the locale's output directory.
///
/// `"/"` → `index.html`, `"/docs/intro"` → `docs/intro/index.html`. Dot
/// segments never become path components, so the result stays inside the
/// output directory.
pub fn output_file(route: &str) -> PathBuf {
    let mut path = PathBuf::new();
    for segment in route.split('/').filter(|s| !matches!(*s, "" | "." | "..")) {
        path.push(segment);
    }
    path.join("index.html")
}

/// Resolve `..` and `.` segments of a slash-separated relative path.
///
/// Returns `None` when the path climbs above its root.
pub fn resolve_relative(dir: &str, target: &str) -> Option<String> {
    let mut segments: Vec<&str> = dir.split('/').filter(|s| !s.is_empty()).collect();
    for part in target.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(segments.join("/"))
}

/// Every route a locale emits, plus a lookup from document source files.
///
/// Each route remembers what claimed it; a second claim is an error rather
/// than a page silently overwriting another.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: BTreeMap<String, String>,
    doc_files: BTreeMap<String, String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `route` for `owner` (e.g. `"homepage"`, `"blog post 'blog/x.md'"`).
    pub fn insert(&mut self, route: &str, owner: &str) -> Result<(), ReferenceError> {
        let route = normalize(route);
        if let Some(first) = self.routes.get(&route) {
            return Err(ReferenceError::DuplicateRoute {
                route,
                first: first.clone(),
                second: owner.to_string(),
            });
        }
        self.routes.insert(route, owner.to_string());
        Ok(())
    }

    /// Claim a document's route. `source` is its path from the site root,
    /// `rel_path` its path within the docs directory (`010-packages/overview.md`).
    pub fn insert_doc(&mut self, source: &str, rel_path: &str, route: &str) -> Result<(), ReferenceError> {
        self.insert(route, &format!("document '{source}'"))?;
        self.doc_files.insert(rel_path.to_string(), normalize(route));
        Ok(())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(&normalize(path))
    }

    pub fn doc_file_route(&self, rel_path: &str) -> Option<&str> {
        self.doc_files.get(rel_path).map(String::as_str)
    }

    /// Check an internal `to` target, returning its canonical route.
    pub fn resolve(&self, referrer: &str, to: &str) -> Result<String, ReferenceError> {
        let route = normalize(to);
        if self.routes.contains_key(&route) {
            Ok(route)
        } else {
            Err(ReferenceError::MissingDocument {
                referrer: referrer.to_string(),
                target: to.to_string(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
