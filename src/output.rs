//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is organized by locale and page, not by file. Each page leads with
//! its positional index and title; the file it was written to follows the
//! arrow. Locales that borrow the default locale's content say so, since an
//! untranslated tree is the most common surprise in a multilingual build.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! en → /
//!     001 Home → index.html
//!     002 Introduction → docs/index.html
//!     003 404 → 404.html
//! zh-Hans → /zh-Hans/
//!     Content: default locale (no translation)
//!     001 Home → zh-Hans/index.html
//!     ...
//!
//! Stylesheet → assets/css/styles.3f9a1c0e.css
//! Copied 4 static files
//! Generated 2 locales, 6 pages
//! ```
//!
//! ## Progress events
//!
//! ```text
//! Resolving zh-Hans (default locale content)
//! Rendered zh-Hans → /zh-Hans/ (3 pages, 3 features)
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::generate::{BuildEvent, BuildReport, LocaleReport, PageSummary};
use crate::types::PageKind;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Public path a locale is served under, relative to the base URL.
fn locale_path(prefix: &str) -> String {
    if prefix.is_empty() {
        "/".to_string()
    } else {
        format!("/{prefix}/")
    }
}

/// Homepage and 404 titles are whole sentences or labels; name them by kind.
fn page_label(page: &PageSummary) -> &str {
    match page.kind {
        PageKind::Home => "Home",
        PageKind::NotFound => "404",
        _ => &page.title,
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn locale_lines(locale: &LocaleReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{} \u{2192} {}",
        locale.code,
        locale_path(&locale.prefix)
    )];
    if locale.fallback {
        lines.push(format!("{}Content: default locale (no translation)", indent(1)));
    }
    for (i, page) in locale.pages.iter().enumerate() {
        lines.push(format!(
            "{}{} {} \u{2192} {}",
            indent(1),
            format_index(i + 1),
            page_label(page),
            page.output.display()
        ));
    }
    lines
}

// ============================================================================
// Build
// ============================================================================

/// Format the result of a successful build: every locale tree and its pages.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();
    for locale in &report.locales {
        lines.extend(locale_lines(locale));
    }
    let pages: usize = report.locales.iter().map(|l| l.pages.len()).sum();

    lines.push(String::new());
    lines.push(format!("Stylesheet \u{2192} {}", report.stylesheet));
    lines.push(format!("Copied {}", plural(report.assets, "static file", "static files")));
    lines.push(format!(
        "Generated {}, {}",
        plural(report.locales.len(), "locale", "locales"),
        plural(pages, "page", "pages")
    ));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

/// Format the result of `check`: one summary line per locale.
pub fn format_check_output(report: &BuildReport) -> Vec<String> {
    report
        .locales
        .iter()
        .map(|locale| {
            let mut line = format!(
                "{} \u{2192} {} ({}, {})",
                locale.code,
                locale_path(&locale.prefix),
                plural(locale.pages.len(), "page", "pages"),
                plural(locale.features, "feature", "features")
            );
            if locale.fallback {
                line.push_str(" [default locale content]");
            }
            line
        })
        .collect()
}

pub fn print_check_output(report: &BuildReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Progress events
// ============================================================================

/// Format a single build progress event as display lines.
pub fn format_event(event: &BuildEvent) -> Vec<String> {
    match event {
        BuildEvent::LocaleStarted { locale, fallback } => {
            if *fallback {
                vec![format!("Resolving {} (default locale content)", locale)]
            } else {
                vec![format!("Resolving {}", locale)]
            }
        }
        BuildEvent::LocaleRendered {
            locale,
            prefix,
            pages,
            features,
        } => vec![format!(
            "Rendered {} \u{2192} {} ({}, {})",
            locale,
            locale_path(prefix),
            plural(*pages, "page", "pages"),
            plural(*features, "feature", "features")
        )],
    }
}
