//! Shared test utilities for the docsite test suite.
//!
//! Provides fixture setup, file writers, and HTML extractors that work with
//! rendered pages.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixture_site();
//! let site = Site::load(tmp.path()).unwrap();
//! let plan = site.plan(&options, None).unwrap();
//!
//! let home = find_page(&plan, "zh-Hans/index.html");
//! assert_eq!(card_titles(&home.html), vec!["高性能", "跨平台", "简洁的 Pipeline API"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::assets::AssetIndex;
use crate::generate::SitePlan;
use crate::types::RenderedPage;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixture_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// An asset index over a temp `static/` holding the given files.
///
/// The directory must outlive the index if files are copied, so both are
/// returned.
pub fn asset_index_with(files: &[&str]) -> (TempDir, AssetIndex) {
    let tmp = TempDir::new().unwrap();
    for rel in files {
        write_file(tmp.path(), rel, "<svg/>");
    }
    let index = AssetIndex::scan(tmp.path()).unwrap();
    (tmp, index)
}

// =========================================================================
// Page lookups (panic with a clear message on miss)
// =========================================================================

/// Find a rendered page by output path. Panics if not found.
pub fn find_page<'a>(plan: &'a SitePlan, output: &str) -> &'a RenderedPage {
    let pages = || plan.locales.iter().flat_map(|l| &l.pages);
    pages()
        .find(|p| p.output == Path::new(output))
        .unwrap_or_else(|| {
            let outputs: Vec<String> = pages().map(|p| p.output.display().to_string()).collect();
            panic!("page '{output}' not rendered. Available: {outputs:?}")
        })
}

// =========================================================================
// HTML extractors
// =========================================================================

/// Text of every `<h3>` in document order (feature card titles).
pub fn card_titles(html: &str) -> Vec<String> {
    let mut titles = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find("<h3>") {
        let after = &rest[start + "<h3>".len()..];
        let Some(end) = after.find("</h3>") else {
            break;
        };
        titles.push(after[..end].to_string());
        rest = &after[end..];
    }
    titles
}
