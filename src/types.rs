//! Types shared between the build pipeline and CLI output.

use serde::Serialize;
use std::path::PathBuf;

/// What kind of page a rendered file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Home,
    Doc,
    BlogIndex,
    BlogPost,
    NotFound,
}

impl PageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PageKind::Home => "home",
            PageKind::Doc => "doc",
            PageKind::BlogIndex => "blog index",
            PageKind::BlogPost => "post",
            PageKind::NotFound => "404",
        }
    }
}

/// A fully rendered page, held in memory until the whole site is known good.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    /// Route within the locale, e.g. `/docs/intro`. The 404 page has no route
    /// of its own and uses `/404`.
    pub route: String,
    /// Output path relative to the output root, locale prefix included.
    pub output: PathBuf,
    pub title: String,
    pub kind: PageKind,
    pub html: String,
}
