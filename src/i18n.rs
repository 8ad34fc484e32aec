//! Locales and per-locale content bundles.
//!
//! Every configured locale gets its own content bundle, read from
//! `i18n/<locale>/content.toml`:
//!
//! ```toml
//! [home]
//! page_title = "High-performance image processing for Flutter & Dart"
//! get_started = "Get Started"
//! registry = "View on pub.dev"
//!
//! [[features]]
//! title = "High Performance"
//! icon = "img/undraw_docusaurus_mountain.svg"
//! description = "Powered by libvips, one of the fastest image processing libraries."
//!
//! [labels]
//! "Docs" = "Docs"
//! ```
//!
//! Bundles are held in a [`Localized`] mapping, which is only constructed once
//! every configured locale has an entry. A non-default locale without its own
//! bundle either borrows the default locale's (`fallback`) or fails the build
//! (`strict`), per [`TranslationPolicy`].
//!
//! The default locale is served at the site root; every other locale lives
//! under `/<code>/`.

use crate::config::{Direction, I18nConfig, TranslationPolicy};
use crate::features::FeatureList;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory holding per-locale content, relative to the site root.
pub const I18N_DIR: &str = "i18n";
/// Bundle file inside each locale directory.
pub const BUNDLE_FILE: &str = "content.toml";

#[derive(Error, Debug)]
pub enum I18nError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid content bundle {path}: {source}")]
    Bundle {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Missing translation for locale '{locale}': {what}")]
    MissingTranslation { locale: LocaleCode, what: String },
}

/// A validated locale identifier such as `en` or `zh-Hans`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LocaleCode(String);

impl LocaleCode {
    /// Parse a BCP 47-style code: a 2-3 letter language subtag followed by
    /// any number of 2-8 character alphanumeric subtags.
    pub fn parse(code: &str) -> Result<Self, String> {
        let invalid = || format!("'{code}' is not a valid locale code");
        let mut subtags = code.split('-');
        let language = subtags.next().unwrap_or_default();
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(invalid());
        }
        for subtag in subtags {
            if !(2..=8).contains(&subtag.len()) || !subtag.chars().all(|c| c.is_ascii_alphanumeric())
            {
                return Err(invalid());
            }
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display and routing details of one configured locale.
#[derive(Debug, Clone, Serialize)]
pub struct LocaleInfo {
    pub code: LocaleCode,
    /// Name shown in the locale dropdown.
    pub label: String,
    /// Value of `<html lang>`.
    pub html_lang: String,
    pub direction: Direction,
    /// URL path segment: empty for the default locale, the code otherwise.
    pub prefix: String,
    pub is_default: bool,
}

/// Build the locale table from (validated) i18n config, in configured order.
pub fn locale_table(i18n: &I18nConfig) -> Vec<LocaleInfo> {
    i18n.locales
        .iter()
        .map(|code| {
            let settings = i18n.locale_configs.get(code);
            let is_default = *code == i18n.default_locale;
            LocaleInfo {
                code: LocaleCode(code.clone()),
                label: settings
                    .and_then(|s| s.label.clone())
                    .unwrap_or_else(|| code.clone()),
                html_lang: settings
                    .and_then(|s| s.html_lang.clone())
                    .unwrap_or_else(|| code.clone()),
                direction: settings.map(|s| s.direction).unwrap_or_default(),
                prefix: if is_default {
                    String::new()
                } else {
                    code.clone()
                },
                is_default,
            }
        })
        .collect()
}

/// Directory holding a locale's translated content.
pub fn locale_dir(root: &Path, locale: &LocaleCode) -> PathBuf {
    root.join(I18N_DIR).join(locale.as_str())
}

// =============================================================================
// Localized mapping
// =============================================================================

/// Mapping from every configured locale to its content.
///
/// Construction goes through [`Localized::load`], which either yields an entry
/// for every locale or fails, so lookups for configured locales never miss.
#[derive(Debug, Clone)]
pub struct Localized<T> {
    order: Vec<LocaleCode>,
    entries: BTreeMap<LocaleCode, T>,
    fallbacks: BTreeSet<LocaleCode>,
}

impl<T> Localized<T> {
    pub fn get(&self, locale: &LocaleCode) -> Option<&T> {
        self.entries.get(locale)
    }

    /// Whether this locale borrowed the default locale's content.
    pub fn is_fallback(&self, locale: &LocaleCode) -> bool {
        self.fallbacks.contains(locale)
    }

    /// Locales in configured order.
    pub fn locales(&self) -> &[LocaleCode] {
        &self.order
    }
}

impl<T: Clone> Localized<T> {
    /// Load one entry per configured locale.
    ///
    /// `load` returns `Ok(None)` when a locale has no content of its own. The
    /// default locale must always have content; other locales fall back to it
    /// or fail according to `i18n.missing_translations`.
    pub fn load<E>(
        i18n: &I18nConfig,
        what: &str,
        mut load: impl FnMut(&LocaleCode) -> Result<Option<T>, E>,
    ) -> Result<Self, E>
    where
        E: From<I18nError>,
    {
        let default = LocaleCode(i18n.default_locale.clone());
        let order: Vec<LocaleCode> = i18n.locales.iter().cloned().map(LocaleCode).collect();

        let default_entry = load(&default)?.ok_or_else(|| I18nError::MissingTranslation {
            locale: default.clone(),
            what: format!("{what} is required for the default locale"),
        })?;

        let mut entries = BTreeMap::new();
        let mut fallbacks = BTreeSet::new();
        for code in order.iter().filter(|c| **c != default) {
            match load(code)? {
                Some(entry) => {
                    entries.insert(code.clone(), entry);
                }
                None if i18n.missing_translations == TranslationPolicy::Fallback => {
                    entries.insert(code.clone(), default_entry.clone());
                    fallbacks.insert(code.clone());
                }
                None => {
                    return Err(I18nError::MissingTranslation {
                        locale: code.clone(),
                        what: format!("{what} not found"),
                    }
                    .into());
                }
            }
        }
        entries.insert(default, default_entry);

        Ok(Self {
            order,
            entries,
            fallbacks,
        })
    }
}

/// Merge a locale's translated pages over the default locale's pages.
///
/// Pages are matched by `key`. Default-locale order is kept; translated pages
/// with no default counterpart are appended. Untranslated pages are copied from
/// the default locale, or rejected under the strict policy.
pub fn localize_pages<T: Clone>(
    default: &[T],
    translated: Vec<T>,
    key: impl Fn(&T) -> &str,
    policy: TranslationPolicy,
    locale: &LocaleCode,
    kind: &str,
) -> Result<Vec<T>, I18nError> {
    let mut by_key: BTreeMap<String, T> = translated
        .into_iter()
        .map(|page| (key(&page).to_string(), page))
        .collect();

    let mut merged = Vec::with_capacity(default.len() + by_key.len());
    for page in default {
        match by_key.remove(key(page)) {
            Some(own) => merged.push(own),
            None if policy == TranslationPolicy::Fallback => merged.push(page.clone()),
            None => {
                return Err(I18nError::MissingTranslation {
                    locale: locale.clone(),
                    what: format!("{kind} '{}' has no translation", key(page)),
                });
            }
        }
    }
    merged.extend(by_key.into_values());
    Ok(merged)
}

// =============================================================================
// Content bundles
// =============================================================================

/// Homepage strings of one locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomeContent {
    /// `<title>` of the homepage. Defaults to the resolved tagline.
    pub page_title: Option<String>,
    /// `<meta name="description">` of the homepage.
    pub description: Option<String>,
    /// Hero subtitle. Defaults to the resolved tagline.
    pub subtitle: Option<String>,
    /// Label of the internal "get started" button.
    pub get_started: String,
    /// Label of the external package registry button.
    pub registry: String,
}

impl Default for HomeContent {
    fn default() -> Self {
        Self {
            page_title: None,
            description: None,
            subtitle: None,
            get_started: "Get Started".to_string(),
            registry: "View Package".to_string(),
        }
    }
}

/// Everything a locale supplies besides its documentation tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentBundle {
    pub home: HomeContent,
    /// Homepage feature cards, in display order.
    pub features: FeatureList,
    /// Translations of navbar, footer, and page chrome labels, keyed by the
    /// label as written in `site.toml` (or the built-in English label).
    pub labels: BTreeMap<String, String>,
}

impl ContentBundle {
    /// Translate a built-in chrome label such as "Edit this page".
    pub fn label(&self, english: &str) -> String {
        self.labels
            .get(english)
            .cloned()
            .unwrap_or_else(|| english.to_string())
    }
}

/// Read `i18n/<locale>/content.toml`. Returns `Ok(None)` if the file is absent.
pub fn load_bundle(root: &Path, locale: &LocaleCode) -> Result<Option<ContentBundle>, I18nError> {
    let path = locale_dir(root, locale).join(BUNDLE_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    let bundle = toml::from_str(&content).map_err(|source| I18nError::Bundle {
        path: path.clone(),
        source,
    })?;
    Ok(Some(bundle))
}

/// Load content bundles for every configured locale.
pub fn load_bundles(root: &Path, i18n: &I18nConfig) -> Result<Localized<ContentBundle>, I18nError> {
    Localized::load(i18n, BUNDLE_FILE, |locale| load_bundle(root, locale))
}
