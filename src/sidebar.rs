//! Documentation sidebars.
//!
//! Sidebars are declared in `sidebars.toml`, one array per sidebar id:
//!
//! ```toml
//! tutorial = [
//!     "index",
//!     { category = "Packages", items = ["packages/overview", "packages/pipeline"] },
//!     { doc = "faq", label = "FAQ" },
//!     { label = "libvips", href = "https://www.libvips.org/" },
//!     { autogenerated = "020-guides" },
//! ]
//! ```
//!
//! Without the file, a single sidebar named `docs` is generated from the whole
//! docs tree: directories become categories, and siblings are ordered by
//! `sidebar_position`, then number prefix, then name, with `index` first.
//!
//! Definitions are resolved per locale so labels come from that locale's
//! (possibly translated) documents. Every referenced document must exist.

use crate::config::DocsConfig;
use crate::docs::DocPage;
use crate::naming::parse_entry_name;
use crate::routes::{self, ReferenceError};
use maud::{Markup, html};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Id of the sidebar generated when no `sidebars.toml` exists.
pub const AUTOGENERATED_SIDEBAR: &str = "docs";

#[derive(Error, Debug)]
pub enum SidebarError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid sidebar file {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// One entry of a sidebar definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SidebarEntry {
    /// Bare document id.
    Id(String),
    Doc {
        doc: String,
        label: Option<String>,
    },
    Category {
        category: String,
        items: Vec<SidebarEntry>,
        #[serde(default)]
        collapsed: bool,
    },
    Link {
        label: String,
        href: String,
    },
    /// Every document under a docs subdirectory (`"."` for all).
    Autogenerated { autogenerated: String },
}

/// Sidebar definitions keyed by sidebar id.
pub type SidebarDefs = BTreeMap<String, Vec<SidebarEntry>>;

/// Load `sidebars.toml`, or generate a sidebar from the docs tree.
pub fn load_sidebars(root: &Path, docs_config: &DocsConfig, docs: &[DocPage]) -> Result<SidebarDefs, SidebarError> {
    let path = root.join(&docs_config.sidebar_path);
    if !path.exists() {
        return Ok(autogenerate(docs));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|source| SidebarError::Toml { path, source })
}

/// A single sidebar covering the whole docs tree. Empty when there are no docs.
pub fn autogenerate(docs: &[DocPage]) -> SidebarDefs {
    if docs.is_empty() {
        return SidebarDefs::new();
    }
    BTreeMap::from([(AUTOGENERATED_SIDEBAR.to_string(), autogenerate_dir(docs, ""))])
}

type SortKey = (i64, u32, String);

fn sort_key(position: Option<i64>, number: Option<u32>, name: &str) -> SortKey {
    (
        position.unwrap_or(i64::MAX),
        number.unwrap_or(u32::MAX),
        name.to_string(),
    )
}

/// Immediate child directory of `dir` containing `doc_dir`, if any.
fn child_dir<'a>(doc_dir: &'a str, dir: &str) -> Option<&'a str> {
    let rest = if dir.is_empty() {
        doc_dir
    } else {
        doc_dir.strip_prefix(dir)?.strip_prefix('/')?
    };
    rest.split('/').next().filter(|s| !s.is_empty())
}

fn autogenerate_dir(docs: &[DocPage], dir: &str) -> Vec<SidebarEntry> {
    let mut items: Vec<(bool, SortKey, SidebarEntry)> = Vec::new();

    for doc in docs.iter().filter(|d| d.dir() == dir) {
        let file = doc.rel_path.rsplit('/').next().unwrap_or_default();
        items.push((
            doc.is_index(),
            sort_key(doc.sidebar_position, doc.number, file),
            SidebarEntry::Id(doc.id.clone()),
        ));
    }

    let subdirs: BTreeSet<&str> = docs.iter().filter_map(|d| child_dir(d.dir(), dir)).collect();
    for sub in subdirs {
        let path = if dir.is_empty() {
            sub.to_string()
        } else {
            format!("{dir}/{sub}")
        };
        let index = docs.iter().find(|d| d.dir() == path && d.is_index());
        let parsed = parse_entry_name(sub);
        let label = index
            .map(|d| d.sidebar_label.clone())
            .unwrap_or_else(|| parsed.display_title.clone());
        items.push((
            false,
            sort_key(index.and_then(|d| d.sidebar_position), parsed.number, sub),
            SidebarEntry::Category {
                category: label,
                items: autogenerate_dir(docs, &path),
                collapsed: false,
            },
        ));
    }

    items.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    items.into_iter().map(|(_, _, entry)| entry).collect()
}

// =============================================================================
// Resolved sidebars
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SidebarNode {
    Doc {
        id: String,
        label: String,
        route: String,
    },
    Category {
        label: String,
        children: Vec<SidebarNode>,
        collapsed: bool,
    },
    Link {
        label: String,
        href: String,
    },
}

/// A sidebar with every document reference resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Sidebar {
    pub id: String,
    pub items: Vec<SidebarNode>,
}

/// A document as it appears in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocLink<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub route: &'a str,
}

impl Sidebar {
    /// Documents in reading order (depth-first).
    pub fn doc_order(&self) -> Vec<DocLink<'_>> {
        fn walk<'a>(nodes: &'a [SidebarNode], out: &mut Vec<DocLink<'a>>) {
            for node in nodes {
                match node {
                    SidebarNode::Doc { id, label, route } => out.push(DocLink { id, label, route }),
                    SidebarNode::Category { children, .. } => walk(children, out),
                    SidebarNode::Link { .. } => {}
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.items, &mut out);
        out
    }

    pub fn first_doc(&self) -> Option<DocLink<'_>> {
        self.doc_order().into_iter().next()
    }

    pub fn contains_doc(&self, doc_id: &str) -> bool {
        self.doc_order().iter().any(|d| d.id == doc_id)
    }

    /// Previous and next documents around `doc_id`.
    pub fn neighbors(&self, doc_id: &str) -> (Option<DocLink<'_>>, Option<DocLink<'_>>) {
        let order = self.doc_order();
        match order.iter().position(|d| d.id == doc_id) {
            Some(idx) => (
                idx.checked_sub(1).map(|i| order[i]),
                order.get(idx + 1).copied(),
            ),
            None => (None, None),
        }
    }
}

/// All sidebars of one locale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sidebars {
    sidebars: Vec<Sidebar>,
}

impl Sidebars {
    /// Resolve definitions against a locale's documents.
    pub fn resolve(defs: &SidebarDefs, docs: &[DocPage]) -> Result<Self, ReferenceError> {
        let by_id: BTreeMap<&str, &DocPage> = docs.iter().map(|d| (d.id.as_str(), d)).collect();
        let sidebars = defs
            .iter()
            .map(|(id, entries)| {
                let referrer = format!("sidebar '{id}'");
                Ok(Sidebar {
                    id: id.clone(),
                    items: resolve_entries(entries, &by_id, docs, &referrer)?,
                })
            })
            .collect::<Result<_, ReferenceError>>()?;
        Ok(Self { sidebars })
    }

    pub fn get(&self, id: &str) -> Option<&Sidebar> {
        self.sidebars.iter().find(|s| s.id == id)
    }

    /// First sidebar listing `doc_id`.
    pub fn sidebar_for(&self, doc_id: &str) -> Option<&Sidebar> {
        self.sidebars.iter().find(|s| s.contains_doc(doc_id))
    }
}

fn resolve_entries(
    entries: &[SidebarEntry],
    by_id: &BTreeMap<&str, &DocPage>,
    docs: &[DocPage],
    referrer: &str,
) -> Result<Vec<SidebarNode>, ReferenceError> {
    let doc_node = |id: &str, label: Option<&String>| {
        let doc = by_id.get(id).ok_or_else(|| ReferenceError::MissingDocument {
            referrer: referrer.to_string(),
            target: id.to_string(),
        })?;
        Ok::<_, ReferenceError>(SidebarNode::Doc {
            id: doc.id.clone(),
            label: label.cloned().unwrap_or_else(|| doc.sidebar_label.clone()),
            route: doc.route.clone(),
        })
    };

    let mut nodes = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            SidebarEntry::Id(id) => nodes.push(doc_node(id, None)?),
            SidebarEntry::Doc { doc, label } => nodes.push(doc_node(doc, label.as_ref())?),
            SidebarEntry::Category {
                category,
                items,
                collapsed,
            } => nodes.push(SidebarNode::Category {
                label: category.clone(),
                children: resolve_entries(items, by_id, docs, referrer)?,
                collapsed: *collapsed,
            }),
            SidebarEntry::Link { label, href } => nodes.push(SidebarNode::Link {
                label: label.clone(),
                href: href.clone(),
            }),
            SidebarEntry::Autogenerated { autogenerated } => {
                let dir = autogenerated.trim_matches('/');
                let dir = if dir == "." { "" } else { dir };
                let generated = autogenerate_dir(docs, dir);
                if generated.is_empty() {
                    return Err(ReferenceError::MissingDocument {
                        referrer: referrer.to_string(),
                        target: format!("{dir}/ (autogenerated)"),
                    });
                }
                nodes.extend(resolve_entries(&generated, by_id, docs, referrer)?);
            }
        }
    }
    Ok(nodes)
}

// =============================================================================
// Rendering
// =============================================================================

/// Render a sidebar, marking the current document and expanding its category.
pub fn render_sidebar(sidebar: &Sidebar, current_route: &str, link_root: &str) -> Markup {
    html! {
        nav.sidebar aria-label="Docs sidebar" {
            (render_nodes(&sidebar.items, current_route, link_root))
        }
    }
}

fn contains_route(nodes: &[SidebarNode], route: &str) -> bool {
    nodes.iter().any(|node| match node {
        SidebarNode::Doc { route: r, .. } => r == route,
        SidebarNode::Category { children, .. } => contains_route(children, route),
        SidebarNode::Link { .. } => false,
    })
}

fn render_nodes(nodes: &[SidebarNode], current_route: &str, link_root: &str) -> Markup {
    html! {
        ul.menu__list {
            @for node in nodes {
                @match node {
                    SidebarNode::Doc { label, route, .. } => {
                        @let active = route == current_route;
                        @let class = if active { "menu__link menu__link--active" } else { "menu__link" };
                        li.menu__list-item {
                            a class=(class)
                                href=(routes::href(link_root, route))
                                aria-current=[active.then_some("page")] { (label) }
                        }
                    }
                    SidebarNode::Category { label, children, collapsed } => {
                        @let open = !collapsed || contains_route(children, current_route);
                        li.menu__list-item {
                            details open[open] {
                                summary.menu__caret { (label) }
                                (render_nodes(children, current_route, link_root))
                            }
                        }
                    }
                    SidebarNode::Link { label, href } => {
                        li.menu__list-item {
                            a.menu__link href=(href) target="_blank" rel="noopener noreferrer" { (label) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::parse_doc;

    fn doc(rel_path: &str, content: &str) -> DocPage {
        parse_doc(content, "docs", rel_path, "docs").unwrap()
    }

    fn tree() -> Vec<DocPage> {
        vec![
            doc("020-packages/overview.md", "# Overview\n"),
            doc("020-packages/index.md", "+++\nsidebar_label = \"Packages\"\n+++\n"),
            doc("010-installation.md", "# Installation\n"),
            doc("index.md", "# Introduction\n"),
            doc("faq.md", "+++\nsidebar_position = 1\n+++\n# FAQ\n"),
        ]
    }

    fn labels(nodes: &[SidebarNode]) -> Vec<String> {
        nodes
            .iter()
            .map(|n| match n {
                SidebarNode::Doc { label, .. } | SidebarNode::Link { label, .. } => label.clone(),
                SidebarNode::Category { label, .. } => format!("[{label}]"),
            })
            .collect()
    }

    #[test]
    fn parse_sidebar_file_entries() {
        let defs: SidebarDefs = toml::from_str(
            r#"
tutorial = [
    "index",
    { category = "Packages", items = ["packages/overview"], collapsed = true },
    { doc = "faq", label = "FAQ" },
    { label = "libvips", href = "https://www.libvips.org/" },
    { autogenerated = "." },
]
"#,
        )
        .unwrap();
        let entries = &defs["tutorial"];
        assert_eq!(entries[0], SidebarEntry::Id("index".to_string()));
        assert!(matches!(entries[1], SidebarEntry::Category { collapsed: true, .. }));
        assert!(matches!(entries[2], SidebarEntry::Doc { .. }));
        assert!(matches!(entries[3], SidebarEntry::Link { .. }));
        assert!(matches!(entries[4], SidebarEntry::Autogenerated { .. }));
    }

    #[test]
    fn autogenerate_orders_by_position_number_then_name() {
        let docs = tree();
        let sidebars = Sidebars::resolve(&autogenerate(&docs), &docs).unwrap();
        let sidebar = sidebars.get(AUTOGENERATED_SIDEBAR).unwrap();
        assert_eq!(
            labels(&sidebar.items),
            vec!["Introduction", "FAQ", "Installation", "[Packages]"]
        );
        let SidebarNode::Category { children, .. } = &sidebar.items[3] else {
            panic!("expected category");
        };
        assert_eq!(labels(children), vec!["Packages", "Overview"]);
    }

    #[test]
    fn autogenerate_empty_tree_has_no_sidebars() {
        assert!(autogenerate(&[]).is_empty());
    }

    #[test]
    fn doc_order_and_neighbors_follow_sidebar() {
        let docs = tree();
        let sidebars = Sidebars::resolve(&autogenerate(&docs), &docs).unwrap();
        let sidebar = sidebars.sidebar_for("packages/overview").unwrap();
        let ids: Vec<&str> = sidebar.doc_order().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["index", "faq", "installation", "packages/index", "packages/overview"]);

        let (prev, next) = sidebar.neighbors("installation");
        assert_eq!(prev.map(|d| d.id), Some("faq"));
        assert_eq!(next.map(|d| d.id), Some("packages/index"));
        assert_eq!(sidebar.first_doc().map(|d| d.route), Some("/docs"));
    }

    #[test]
    fn unknown_doc_reference_names_sidebar() {
        let docs = tree();
        let defs = BTreeMap::from([(
            "tutorial".to_string(),
            vec![SidebarEntry::Id("missing".to_string())],
        )]);
        let err = Sidebars::resolve(&defs, &docs).unwrap_err();
        assert_eq!(
            err.to_string(),
            "sidebar 'tutorial' points to 'missing', which does not exist"
        );
    }

    #[test]
    fn explicit_label_overrides_doc_label() {
        let docs = tree();
        let defs = BTreeMap::from([(
            "tutorial".to_string(),
            vec![SidebarEntry::Doc {
                doc: "faq".to_string(),
                label: Some("Questions".to_string()),
            }],
        )]);
        let sidebars = Sidebars::resolve(&defs, &docs).unwrap();
        assert_eq!(labels(&sidebars.get("tutorial").unwrap().items), vec!["Questions"]);
    }

    #[test]
    fn render_marks_active_and_opens_its_category() {
        let docs = tree();
        let defs = BTreeMap::from([(
            "tutorial".to_string(),
            vec![SidebarEntry::Category {
                category: "Packages".to_string(),
                items: vec![SidebarEntry::Id("packages/overview".to_string())],
                collapsed: true,
            }],
        )]);
        let sidebars = Sidebars::resolve(&defs, &docs).unwrap();
        let html = render_sidebar(
            sidebars.get("tutorial").unwrap(),
            "/docs/packages/overview",
            "/zh-Hans/",
        )
        .into_string();
        assert!(html.contains(r#"class="menu__link menu__link--active""#));
        assert!(html.contains(r#"href="/zh-Hans/docs/packages/overview/""#));
        assert!(html.contains("<details open>"));
    }
}
