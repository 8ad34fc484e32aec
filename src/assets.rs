//! Static assets and the generated stylesheet.
//!
//! Everything under the site's `static/` directory is indexed up front so that
//! icon, logo, and image references can be checked before any page renders.
//! The index is copied verbatim to the output root and shared by all locales.
//!
//! The stylesheet is assembled from the embedded base CSS, color and syntax
//! tokens generated from config, and the optional `theme.custom_css` file. Its
//! file name carries a SHA-256 prefix so browsers never serve a stale copy:
//!
//! ```text
//! build/assets/css/styles.3f9a1c0e.css
//! ```

use crate::config::{self, ThemeConfig};
use crate::routes::ReferenceError;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Static directory, relative to the site root.
pub const STATIC_DIR: &str = "static";

const BASE_CSS: &str = include_str!("../static/style.css");

/// Color-mode toggle script, inlined into pages when the switch is enabled.
pub const COLOR_MODE_JS: &str = include_str!("../static/color-mode.js");

/// Set of files available under `static/`.
#[derive(Debug, Clone, Default)]
pub struct AssetIndex {
    root: PathBuf,
    files: BTreeSet<String>,
}

impl AssetIndex {
    /// Index `static_dir`. A missing directory yields an empty index.
    pub fn scan(static_dir: &Path) -> Result<Self, walkdir::Error> {
        let mut files = BTreeSet::new();
        if static_dir.is_dir() {
            for entry in WalkDir::new(static_dir).sort_by_file_name() {
                let entry = entry?;
                if !entry.file_type().is_file() {
                    continue;
                }
                if let Ok(rel) = entry.path().strip_prefix(static_dir) {
                    let rel = rel
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/");
                    files.insert(rel);
                }
            }
        }
        Ok(Self {
            root: static_dir.to_path_buf(),
            files,
        })
    }

    pub fn contains(&self, asset: &str) -> bool {
        self.files.contains(asset.trim_start_matches('/'))
    }

    /// Check that an asset exists, returning its canonical (unrooted) path.
    pub fn require(&self, referrer: &str, asset: &str) -> Result<String, ReferenceError> {
        let canonical = asset.trim_start_matches('/');
        if self.files.contains(canonical) {
            Ok(canonical.to_string())
        } else {
            Err(ReferenceError::MissingAsset {
                referrer: referrer.to_string(),
                asset: asset.to_string(),
            })
        }
    }

    /// Indexed files, relative to `static/`, in sorted order.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Copy every indexed file into `output_dir`, preserving relative paths.
    pub fn copy_to(&self, output_dir: &Path) -> io::Result<usize> {
        for rel in &self.files {
            let dst = output_dir.join(rel);
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(self.root.join(rel), &dst)?;
        }
        Ok(self.files.len())
    }
}

/// The site-wide stylesheet, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    /// Path relative to the output root, e.g. `assets/css/styles.3f9a1c0e.css`.
    pub path: String,
    pub contents: String,
}

/// Assemble the stylesheet: generated tokens, base CSS, then custom CSS.
pub fn build_stylesheet(theme: &ThemeConfig, custom_css: Option<&str>) -> Stylesheet {
    let mut contents = String::new();
    contents.push_str(&config::generate_color_css(&theme.colors, &theme.color_mode));
    contents.push('\n');
    contents.push_str(&config::generate_syntax_css(&theme.prism, &theme.color_mode));
    contents.push('\n');
    contents.push_str(BASE_CSS);
    if let Some(custom) = custom_css {
        contents.push_str("\n/* custom */\n");
        contents.push_str(custom);
    }

    let digest = format!("{:x}", Sha256::digest(contents.as_bytes()));
    Stylesheet {
        path: format!("assets/css/styles.{}.css", &digest[..8]),
        contents,
    }
}

/// Read `theme.custom_css`, failing if the configured file does not exist.
pub fn read_custom_css(root: &Path, theme: &ThemeConfig) -> Result<Option<String>, ReferenceError> {
    let Some(rel) = &theme.custom_css else {
        return Ok(None);
    };
    fs::read_to_string(root.join(rel))
        .map(Some)
        .map_err(|_| ReferenceError::MissingAsset {
            referrer: "theme.custom_css".to_string(),
            asset: rel.clone(),
        })
}
