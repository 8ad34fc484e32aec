//! Blog posts.
//!
//! Only built when `blog.enabled` is set. Posts are markdown files named
//! `YYYY-MM-DD-slug.md` directly under the blog directory; the date comes from
//! the file name and the slug becomes the route segment:
//!
//! ```text
//! blog/2025-03-01-release-1-0.md  →  /blog/release-1-0
//! ```
//!
//! Translated posts live under `i18n/<locale>/blog/` and are matched by slug.

use crate::markdown::{self, FrontMatter};
use crate::routes;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Blog post {0} must be named YYYY-MM-DD-slug.md")]
    FileName(PathBuf),
    #[error("Invalid slug '{slug}' in {path}: use plain path segments, without '.' or '..'")]
    InvalidSlug { path: PathBuf, slug: String },
    #[error("Invalid front matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlogPost {
    pub slug: String,
    pub date: NaiveDate,
    pub title: String,
    pub description: Option<String>,
    pub route: String,
    /// Path relative to the site root.
    pub source: String,
    pub body: String,
    pub has_h1: bool,
}

/// Split `2025-03-01-release-1-0` into its date and slug.
pub fn parse_post_name(stem: &str) -> Option<(NaiveDate, String)> {
    let date = stem.get(..10)?;
    let slug = stem.get(10..)?.strip_prefix('-')?;
    if slug.is_empty() {
        return None;
    }
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some((date, slug.to_string()))
}

/// Read every post under `<site_root>/<rel_dir>`, newest first.
///
/// A missing directory yields no posts.
pub fn scan_posts(site_root: &Path, rel_dir: &str, route_base: &str) -> Result<Vec<BlogPost>, BlogError> {
    let dir = site_root.join(rel_dir);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut entries: Vec<PathBuf> = fs::read_dir(&dir)?
        .map(|e| e.map(|e| e.path()))
        .collect::<Result<_, _>>()?;
    entries.sort();

    let mut posts = Vec::new();
    for path in entries {
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = file_name.trim_end_matches(".md");
        let (date, slug) = parse_post_name(stem).ok_or_else(|| BlogError::FileName(path.clone()))?;

        let content = fs::read_to_string(&path)?;
        let (front, body) = markdown::split_front_matter(&content).map_err(|source| {
            BlogError::FrontMatter {
                path: path.clone(),
                source,
            }
        })?;
        let FrontMatter {
            title,
            description,
            slug: slug_override,
            ..
        } = front;
        let slug = slug_override.unwrap_or(slug);
        if slug.trim_matches('/').is_empty() || !routes::is_clean_path(&slug) {
            return Err(BlogError::InvalidSlug { path, slug });
        }
        let heading = markdown::first_heading(body);

        posts.push(BlogPost {
            route: routes::join_route(route_base, &slug),
            title: title
                .or_else(|| heading.clone())
                .unwrap_or_else(|| slug.replace('-', " ")),
            has_h1: heading.is_some(),
            source: format!("{}/{file_name}", rel_dir.trim_end_matches('/')),
            body: body.to_string(),
            slug,
            date,
            description,
        });
    }

    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
    Ok(posts)
}
