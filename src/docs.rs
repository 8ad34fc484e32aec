//! Documentation tree scanning.
//!
//! Every `.md` file under the docs directory becomes one page. The document id
//! is its path with ordering prefixes and the extension removed; the route is
//! the id under `docs.route_base_path`, except that `index.md` and `README.md`
//! take their directory's route.
//!
//! ```text
//! docs/
//! ├── index.md                  # id "index",             route /docs
//! ├── 010-installation.md       # id "installation",      route /docs/installation
//! ├── 020-packages/
//! │   ├── index.md              # id "packages/index",    route /docs/packages
//! │   └── overview.md           # id "packages/overview", route /docs/packages/overview
//! └── _snippet.md               # ignored (leading underscore)
//! ```
//!
//! Translations live under `i18n/<locale>/docs/` with the same layout and are
//! matched to default-locale documents by id.

use crate::markdown::{self, FrontMatter};
use crate::naming::{parse_entry_name, strip_prefixes};
use crate::routes;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum DocsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Invalid front matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid slug '{slug}' in {path}: use plain path segments, without '.' or '..'")]
    InvalidSlug { path: PathBuf, slug: String },
    #[error("{first} and {second} both map to route {route}")]
    DuplicateRoute {
        route: String,
        first: String,
        second: String,
    },
}

/// A single documentation page, with front matter applied.
#[derive(Debug, Clone, PartialEq)]
pub struct DocPage {
    pub id: String,
    pub route: String,
    pub title: String,
    /// Label in the sidebar; defaults to the title.
    pub sidebar_label: String,
    pub sidebar_position: Option<i64>,
    /// Ordering prefix of the file name.
    pub number: Option<u32>,
    pub description: Option<String>,
    /// Path relative to the site root, e.g. `docs/020-packages/overview.md`.
    pub source: String,
    /// Path relative to the docs directory, e.g. `020-packages/overview.md`.
    pub rel_path: String,
    /// Markdown body without front matter.
    pub body: String,
    /// Whether the body supplies its own `# ` heading.
    pub has_h1: bool,
}

impl DocPage {
    /// Directory of the source file within the docs directory.
    pub fn dir(&self) -> &str {
        self.rel_path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
    }

    pub fn is_index(&self) -> bool {
        is_index_stem(self.rel_path.rsplit('/').next().unwrap_or_default())
    }
}

fn is_index_stem(file_name: &str) -> bool {
    matches!(
        file_name.strip_suffix(".md").unwrap_or(file_name),
        "index" | "README"
    )
}

fn is_ignored(name: &str) -> bool {
    name.starts_with('_') || name.starts_with('.')
}

/// Scan `<site_root>/<rel_dir>` for documents.
///
/// `rel_dir` is kept in each page's `source` so edit links and error messages
/// point at the real file. A missing directory yields no documents.
pub fn scan_docs(site_root: &Path, rel_dir: &str, route_base: &str) -> Result<Vec<DocPage>, DocsError> {
    let dir = site_root.join(rel_dir);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut pages = Vec::new();
    let walker = WalkDir::new(&dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_ignored(&e.file_name().to_string_lossy()));
    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let Ok(rel) = path.strip_prefix(&dir) else {
            continue;
        };
        let rel_path = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let content = fs::read_to_string(path)?;
        pages.push(parse_doc(&content, rel_dir, &rel_path, route_base)?);
    }

    let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
    for page in &pages {
        if let Some(first) = seen.insert(&page.route, &page.source) {
            return Err(DocsError::DuplicateRoute {
                route: page.route.clone(),
                first: first.to_string(),
                second: page.source.clone(),
            });
        }
    }
    Ok(pages)
}

/// Build a page from file contents and its path within the docs directory.
///
/// Errors name the file by its path from the site root.
pub fn parse_doc(
    content: &str,
    rel_dir: &str,
    rel_path: &str,
    route_base: &str,
) -> Result<DocPage, DocsError> {
    let source = format!("{}/{rel_path}", rel_dir.trim_end_matches('/'));
    let (front, body) =
        markdown::split_front_matter(content).map_err(|e| DocsError::FrontMatter {
            path: PathBuf::from(&source),
            source: e,
        })?;
    let FrontMatter {
        title,
        description,
        sidebar_label,
        sidebar_position,
        slug,
    } = front;

    let (dir, file_name) = rel_path.rsplit_once('/').unwrap_or(("", rel_path));
    let stem = file_name.strip_suffix(".md").unwrap_or(file_name);
    let parsed = parse_entry_name(stem);
    let clean_dir = strip_prefixes(dir);
    let clean_stem = if parsed.name.is_empty() {
        stem.to_string()
    } else {
        parsed.name.clone()
    };
    let id = if clean_dir.is_empty() {
        clean_stem.clone()
    } else {
        format!("{clean_dir}/{clean_stem}")
    };

    if let Some(slug) = slug.as_deref().filter(|s| !routes::is_clean_path(s)) {
        return Err(DocsError::InvalidSlug {
            path: PathBuf::from(&source),
            slug: slug.to_string(),
        });
    }
    let route = match slug.as_deref() {
        Some(slug) if slug.starts_with('/') => routes::join_route(route_base, slug),
        Some(slug) => routes::join_route(route_base, &format!("{clean_dir}/{slug}")),
        None if is_index_stem(file_name) => routes::join_route(route_base, &clean_dir),
        None => routes::join_route(route_base, &id),
    };

    let heading = markdown::first_heading(body);
    let has_h1 = heading.is_some();
    let fallback_title = if is_index_stem(file_name) {
        dir.rsplit('/')
            .next()
            .filter(|d| !d.is_empty())
            .map(|d| parse_entry_name(d).display_title)
            .unwrap_or_else(|| clean_stem.clone())
    } else {
        parsed.display_title.clone()
    };
    let title = title.or(heading).unwrap_or(fallback_title);

    Ok(DocPage {
        sidebar_label: sidebar_label.unwrap_or_else(|| title.clone()),
        source,
        rel_path: rel_path.to_string(),
        body: body.to_string(),
        id,
        route,
        title,
        sidebar_position,
        number: parsed.number,
        description,
        has_h1,
    })
}
