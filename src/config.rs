//! Site configuration module.
//!
//! Handles loading, validating, and resolving `site.toml`. The file is a single
//! declarative object describing metadata, locales, navigation, footer, and
//! theme. Stock defaults are overridden by whatever the user file specifies.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── site.toml                # Site config (optional, defaults apply)
//! ├── sidebars.toml            # Sidebar definition (optional)
//! ├── docs/                    # Documentation tree (default locale)
//! ├── static/                  # Assets copied to the output root
//! └── i18n/
//!     ├── en/content.toml      # Homepage strings + features per locale
//!     └── zh-Hans/
//!         ├── content.toml
//!         └── docs/            # Translated docs (optional)
//! ```
//!
//! ## Configuration Options
//!
//! Run `docsite gen-config` for a fully commented file. A minimal example:
//!
//! ```toml
//! title = "libvips_ffi"
//! tagline = "High-performance image processing for Flutter & Dart"
//! url = "https://fluttercandies.github.io"
//! base_url = "/libvips_ffi/"
//!
//! [i18n]
//! default_locale = "en"
//! locales = ["en", "zh-Hans"]
//!
//! [i18n.locale_configs.zh-Hans]
//! label = "简体中文"
//!
//! [[navbar.items]]
//! type = "doc_sidebar"
//! sidebar_id = "tutorial"
//! label = "Docs"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::i18n::{self, LocaleCode, LocaleInfo};
use crate::routes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the site configuration file in the site root.
pub const CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error in site.toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Unknown locale '{0}' (not listed in i18n.locales)")]
    UnknownLocale(String),
}

/// Site configuration loaded from `site.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title, shown in the navbar, hero banner, and `<title>`.
    pub title: String,
    /// One-line description, shown under the title on the homepage.
    pub tagline: String,
    /// Favicon asset path under `static/`.
    pub favicon: Option<String>,
    /// Absolute origin the site is deployed to, e.g. `https://example.github.io`.
    pub url: String,
    /// Path prefix the site is served under. Must start and end with `/`.
    pub base_url: String,
    /// Organization owning the repository (GitHub user or org). Metadata
    /// only; reported by `docsite resolve`.
    pub organization_name: String,
    /// Repository name. Metadata only, like `organization_name`.
    pub project_name: String,
    /// Locale list and per-locale display settings.
    pub i18n: I18nConfig,
    /// Documentation section settings.
    pub docs: DocsConfig,
    /// Blog section settings.
    pub blog: BlogConfig,
    /// Homepage call-to-action targets.
    pub home: HomeConfig,
    /// Styling, color mode, and syntax highlighting.
    pub theme: ThemeConfig,
    /// Top navigation bar.
    pub navbar: NavbarConfig,
    /// Footer link groups and copyright line.
    pub footer: FooterConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Project".to_string(),
            tagline: String::new(),
            favicon: None,
            url: "https://example.com".to_string(),
            base_url: "/".to_string(),
            organization_name: String::new(),
            project_name: String::new(),
            i18n: I18nConfig::default(),
            docs: DocsConfig::default(),
            blog: BlogConfig::default(),
            home: HomeConfig::default(),
            theme: ThemeConfig::default(),
            navbar: NavbarConfig::default(),
            footer: FooterConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate internal consistency. References to documents and assets are
    /// checked later, once the content tree is known.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        validate_site_url(&self.url)?;
        if !self.base_url.starts_with('/') || !self.base_url.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "base_url must start and end with '/', got '{}'",
                self.base_url
            )));
        }
        self.i18n.validate()?;
        for (key, base) in [
            ("docs.route_base_path", &self.docs.route_base_path),
            ("blog.route_base_path", &self.blog.route_base_path),
        ] {
            if !routes::is_clean_path(base) {
                return Err(ConfigError::Validation(format!(
                    "{key} '{base}' must be plain path segments (no '.', '..', or empty parts)"
                )));
            }
        }

        for (idx, item) in self.navbar.items.iter().enumerate() {
            item.validate()
                .map_err(|msg| ConfigError::Validation(format!("navbar.items[{idx}]: {msg}")))?;
        }
        for section in &self.footer.links {
            if section.title.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "footer.links sections must have a title".into(),
                ));
            }
            for link in &section.items {
                link.validate().map_err(|msg| {
                    ConfigError::Validation(format!("footer section '{}': {msg}", section.title))
                })?;
            }
        }
        Ok(())
    }

    /// Produce the configuration as seen by pages of one locale.
    ///
    /// Title and tagline are locale-invariant unless the locale's entry in
    /// `i18n.locale_configs` overrides them.
    pub fn resolve(&self, locale: &str) -> Result<ResolvedConfig, ConfigError> {
        let locales = i18n::locale_table(&self.i18n);
        let current = locales
            .iter()
            .find(|l| l.code.as_str() == locale)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownLocale(locale.to_string()))?;
        let overrides = self.i18n.locale_configs.get(locale);

        let title = overrides
            .and_then(|o| o.title.clone())
            .unwrap_or_else(|| self.title.clone());
        let tagline = overrides
            .and_then(|o| o.tagline.clone())
            .unwrap_or_else(|| self.tagline.clone());

        Ok(ResolvedConfig {
            locale: current,
            locales,
            navbar: ResolvedNavbar {
                title: self.navbar.title.clone().unwrap_or_else(|| title.clone()),
                logo: self.navbar.logo.clone(),
                items: self.navbar.items.clone(),
            },
            footer: ResolvedFooter {
                style: self.footer.style,
                sections: self.footer.links.clone(),
                copyright: self.footer.copyright.clone(),
            },
            title,
            tagline,
            url: self.url.clone(),
            base_url: self.base_url.clone(),
            organization_name: self.organization_name.clone(),
            project_name: self.project_name.clone(),
            favicon: self.favicon.clone(),
            theme: self.theme.clone(),
        })
    }
}

fn validate_site_url(raw: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| ConfigError::Validation(format!("url '{raw}' is not a valid URL: {e}")))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "url '{raw}' must use http or https"
        )));
    }
    if parsed.path() != "/" || parsed.query().is_some() {
        return Err(ConfigError::Validation(format!(
            "url '{raw}' must not contain a path; put it in base_url"
        )));
    }
    Ok(())
}

// =============================================================================
// Internationalization
// =============================================================================

/// What to do when a non-default locale lacks a translated bundle or document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationPolicy {
    /// Use the default locale's content in place of the missing translation.
    #[default]
    Fallback,
    /// Fail the build.
    Strict,
}

/// Writing direction of a locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct I18nConfig {
    /// Locale served without a path prefix.
    pub default_locale: String,
    /// All locales to build, in display order.
    pub locales: Vec<String>,
    /// Behavior for missing translations in non-default locales.
    pub missing_translations: TranslationPolicy,
    /// Per-locale display settings, keyed by locale code.
    pub locale_configs: BTreeMap<String, LocaleConfig>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            locales: vec!["en".to_string()],
            missing_translations: TranslationPolicy::default(),
            locale_configs: BTreeMap::new(),
        }
    }
}

impl I18nConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.locales.is_empty() {
            return Err(ConfigError::Validation(
                "i18n.locales must not be empty".into(),
            ));
        }
        for (idx, code) in self.locales.iter().enumerate() {
            LocaleCode::parse(code).map_err(ConfigError::Validation)?;
            if self.locales[..idx].contains(code) {
                return Err(ConfigError::Validation(format!(
                    "i18n.locales lists '{code}' more than once"
                )));
            }
        }
        if !self.locales.contains(&self.default_locale) {
            return Err(ConfigError::Validation(format!(
                "i18n.default_locale '{}' is not in i18n.locales",
                self.default_locale
            )));
        }
        if let Some(stray) = self
            .locale_configs
            .keys()
            .find(|code| !self.locales.contains(code))
        {
            return Err(ConfigError::Validation(format!(
                "i18n.locale_configs has an entry for '{stray}', which is not in i18n.locales"
            )));
        }
        Ok(())
    }
}

/// Display settings for a single locale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocaleConfig {
    /// Name shown in the locale dropdown. Defaults to the locale code.
    pub label: Option<String>,
    /// Value of `<html lang>`. Defaults to the locale code.
    pub html_lang: Option<String>,
    pub direction: Direction,
    /// Overrides the site title for this locale.
    pub title: Option<String>,
    /// Overrides the site tagline for this locale.
    pub tagline: Option<String>,
}

// =============================================================================
// Content sections
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocsConfig {
    /// Documentation directory, relative to the site root.
    pub path: String,
    /// URL segment docs are served under.
    pub route_base_path: String,
    /// Sidebar definition file. When absent, a sidebar is generated from the tree.
    pub sidebar_path: String,
    /// Base URL for "Edit this page" links; the source path is appended.
    pub edit_url: Option<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            path: "docs".to_string(),
            route_base_path: "docs".to_string(),
            sidebar_path: "sidebars.toml".to_string(),
            edit_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlogConfig {
    pub enabled: bool,
    /// Blog directory, relative to the site root.
    pub path: String,
    /// URL segment posts are served under.
    pub route_base_path: String,
    /// Heading of the blog index page.
    pub title: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "blog".to_string(),
            route_base_path: "blog".to_string(),
            title: "Blog".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomeConfig {
    /// Internal path of the primary call-to-action.
    pub get_started: String,
    /// External package registry page for the secondary call-to-action.
    pub registry_url: Option<String>,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            get_started: "/docs/".to_string(),
            registry_url: None,
        }
    }
}

// =============================================================================
// Navigation
// =============================================================================

/// Side of the navbar an item is placed on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavbarItemKind {
    /// Plain link: `to` (internal) or `href` (external).
    #[default]
    Link,
    /// Link to the first document of a sidebar.
    DocSidebar,
    /// Link to a single document by id.
    Doc,
    /// Menu of all configured locales.
    LocaleDropdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavbarItem {
    #[serde(rename = "type", default)]
    pub kind: NavbarItemKind,
    pub label: Option<String>,
    pub to: Option<String>,
    pub href: Option<String>,
    pub sidebar_id: Option<String>,
    pub doc_id: Option<String>,
    #[serde(default)]
    pub position: Position,
}

impl NavbarItem {
    fn validate(&self) -> Result<(), String> {
        match self.kind {
            NavbarItemKind::Link => {
                if self.label.is_none() {
                    return Err("link items need a label".into());
                }
                exactly_one_target(self.to.as_deref(), self.href.as_deref())
            }
            NavbarItemKind::DocSidebar if self.sidebar_id.is_none() => {
                Err("doc_sidebar items need a sidebar_id".into())
            }
            NavbarItemKind::Doc if self.doc_id.is_none() => Err("doc items need a doc_id".into()),
            _ => Ok(()),
        }
    }

    /// Human-readable name used in error messages.
    pub fn describe(&self) -> String {
        match (&self.label, self.kind) {
            (Some(label), _) => format!("navbar item '{label}'"),
            (None, NavbarItemKind::LocaleDropdown) => "navbar locale dropdown".to_string(),
            (None, _) => "unlabeled navbar item".to_string(),
        }
    }
}

fn exactly_one_target(to: Option<&str>, href: Option<&str>) -> Result<(), String> {
    match (to, href) {
        (Some(_), None) | (None, Some(_)) => Ok(()),
        (Some(_), Some(_)) => Err("set either `to` or `href`, not both".into()),
        (None, None) => Err("needs a `to` or `href` target".into()),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Logo {
    pub alt: String,
    /// Asset path under `static/`.
    pub src: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavbarConfig {
    /// Navbar brand text. Defaults to the site title.
    pub title: Option<String>,
    pub logo: Option<Logo>,
    pub items: Vec<NavbarItem>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FooterStyle {
    Light,
    #[default]
    Dark,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FooterLink {
    pub label: String,
    pub to: Option<String>,
    pub href: Option<String>,
}

impl FooterLink {
    fn validate(&self) -> Result<(), String> {
        exactly_one_target(self.to.as_deref(), self.href.as_deref())
            .map_err(|msg| format!("link '{}' {msg}", self.label))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FooterSection {
    pub title: String,
    #[serde(default)]
    pub items: Vec<FooterLink>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FooterConfig {
    pub style: FooterStyle,
    pub links: Vec<FooterSection>,
    /// Copyright line; `{year}` is replaced with the build year.
    pub copyright: Option<String>,
}

// =============================================================================
// Theme
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorModeConfig {
    /// Mode used before the visitor picks one.
    pub default_mode: ColorMode,
    /// Follow the visitor's `prefers-color-scheme` until they pick a mode.
    pub respect_prefers_color_scheme: bool,
    /// Hide the light/dark toggle button.
    pub disable_switch: bool,
}

/// Syntax-highlighting palettes for code blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SyntaxTheme {
    Github,
    Dracula,
    VsDark,
    VsLight,
    OneDark,
    OneLight,
    NightOwl,
}

impl SyntaxTheme {
    /// `(background, text)` colors of the palette.
    pub fn palette(self) -> (&'static str, &'static str) {
        match self {
            SyntaxTheme::Github => ("#f6f8fa", "#393a34"),
            SyntaxTheme::Dracula => ("#282a36", "#f8f8f2"),
            SyntaxTheme::VsDark => ("#1e1e1e", "#9cdcfe"),
            SyntaxTheme::VsLight => ("#ffffff", "#000000"),
            SyntaxTheme::OneDark => ("#282c34", "#abb2bf"),
            SyntaxTheme::OneLight => ("#fafafa", "#383a42"),
            SyntaxTheme::NightOwl => ("#011627", "#d6deeb"),
        }
    }
}

/// Languages code blocks may be tagged with without listing them in
/// `theme.prism.additional_languages`.
pub const DEFAULT_HIGHLIGHT_LANGUAGES: &[&str] = &[
    "markup", "html", "xml", "css", "javascript", "js", "jsx", "typescript", "ts", "tsx",
    "json", "markdown", "md", "c", "cpp", "go", "python", "py", "rust", "swift", "kotlin",
    "objectivec", "sql", "diff",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrismConfig {
    /// Code block palette in light mode.
    pub theme: SyntaxTheme,
    /// Code block palette in dark mode.
    pub dark_theme: SyntaxTheme,
    /// Extra languages accepted on fenced code blocks.
    pub additional_languages: Vec<String>,
}

impl Default for PrismConfig {
    fn default() -> Self {
        Self {
            theme: SyntaxTheme::Github,
            dark_theme: SyntaxTheme::Dracula,
            additional_languages: Vec::new(),
        }
    }
}

impl PrismConfig {
    /// Whether a fenced code block language gets a `language-*` class.
    pub fn highlights(&self, language: &str) -> bool {
        let language = language.to_ascii_lowercase();
        DEFAULT_HIGHLIGHT_LANGUAGES.contains(&language.as_str())
            || self
                .additional_languages
                .iter()
                .any(|l| l.eq_ignore_ascii_case(&language))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Extra stylesheet appended to the generated CSS, relative to the site root.
    pub custom_css: Option<String>,
    /// Social card image under `static/`, used for `og:image`.
    pub image: Option<String>,
    pub color_mode: ColorModeConfig,
    pub prism: PrismConfig,
    pub colors: ColorConfig,
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background color.
    pub background: String,
    /// Primary text color.
    pub text: String,
    /// Muted/secondary text color (sidebar, footer, captions).
    pub text_muted: String,
    /// Border color.
    pub border: String,
    /// Link color.
    pub link: String,
    /// Link hover color.
    pub link_hover: String,
    /// Brand color: hero banner, active sidebar entries, buttons.
    pub primary: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1c1e21".to_string(),
            text_muted: "#606770".to_string(),
            border: "#dadde1".to_string(),
            link: "#2e8555".to_string(),
            link_hover: "#205d3b".to_string(),
            primary: "#2e8555".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#1b1b1d".to_string(),
            text: "#e3e3e3".to_string(),
            text_muted: "#a0a0a8".to_string(),
            border: "#444950".to_string(),
            link: "#25c2a0".to_string(),
            link_hover: "#4fddbf".to_string(),
            primary: "#25c2a0".to_string(),
        }
    }

    fn css_vars(&self) -> [(&'static str, &str); 7] {
        [
            ("--color-bg", &self.background),
            ("--color-text", &self.text),
            ("--color-text-muted", &self.text_muted),
            ("--color-border", &self.border),
            ("--color-link", &self.link),
            ("--color-link-hover", &self.link_hover),
            ("--color-primary", &self.primary),
        ]
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of locales rendered in parallel.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Resolved (per-locale) configuration
// =============================================================================

/// Site configuration as seen by the pages of one locale.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    pub locale: LocaleInfo,
    /// Every configured locale, in configured order (for the locale dropdown).
    pub locales: Vec<LocaleInfo>,
    pub title: String,
    pub tagline: String,
    pub url: String,
    pub base_url: String,
    pub organization_name: String,
    pub project_name: String,
    pub favicon: Option<String>,
    pub navbar: ResolvedNavbar,
    pub footer: ResolvedFooter,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedNavbar {
    pub title: String,
    pub logo: Option<Logo>,
    pub items: Vec<NavbarItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedFooter {
    pub style: FooterStyle,
    pub sections: Vec<FooterSection>,
    pub copyright: Option<String>,
}

impl ResolvedFooter {
    /// Copyright line with `{year}` substituted.
    pub fn copyright_for(&self, year: i32) -> Option<String> {
        self.copyright
            .as_ref()
            .map(|c| c.replace("{year}", &year.to_string()))
    }
}

impl ResolvedConfig {
    /// Replace navbar and footer labels with their translations.
    ///
    /// Labels without an entry are kept as authored.
    pub fn translate_labels(&mut self, labels: &BTreeMap<String, String>) {
        let translate = |s: &mut String| {
            if let Some(t) = labels.get(s.as_str()) {
                *s = t.clone();
            }
        };
        for item in &mut self.navbar.items {
            if let Some(label) = item.label.as_mut() {
                translate(label);
            }
        }
        for section in &mut self.footer.sections {
            translate(&mut section.title);
            for link in &mut section.items {
                translate(&mut link.label);
            }
        }
        if let Some(copyright) = self.footer.copyright.as_mut() {
            translate(copyright);
        }
    }

    /// Prefix prepended to every internal link of this locale, e.g.
    /// `/libvips_ffi/zh-Hans/` (always ends with `/`).
    pub fn link_root(&self) -> String {
        if self.locale.prefix.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}{}/", self.base_url, self.locale.prefix)
        }
    }

    /// URL of a static asset (assets are shared by all locales).
    pub fn asset_url(&self, asset: &str) -> String {
        format!("{}{}", self.base_url, asset.trim_start_matches('/'))
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `site.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `site.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `site.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# docsite configuration
# =====================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Site title: navbar brand, homepage hero, and <title> suffix.
title = "My Project"

# Shown under the title on the homepage.
tagline = ""

# Favicon path under static/.
# favicon = "img/favicon.ico"

# Origin the site is deployed to (no path).
url = "https://example.com"

# Path prefix the site is served under. Must start and end with "/".
base_url = "/"

# Repository owner and name (used for deployment metadata).
organization_name = ""
project_name = ""

# ---------------------------------------------------------------------------
# Locales
# ---------------------------------------------------------------------------
[i18n]
# Served without a path prefix; other locales live under /<code>/.
default_locale = "en"
locales = ["en"]

# "fallback": use the default locale's content when a translation is missing.
# "strict":   fail the build instead.
missing_translations = "fallback"

# Per-locale display settings:
# [i18n.locale_configs.zh-Hans]
# label = "简体中文"
# html_lang = "zh-Hans"
# direction = "ltr"
# tagline = "..."          # overrides the site tagline for this locale

[i18n.locale_configs]

# ---------------------------------------------------------------------------
# Documentation
# ---------------------------------------------------------------------------
[docs]
path = "docs"
route_base_path = "docs"
sidebar_path = "sidebars.toml"
# edit_url = "https://github.com/org/project/tree/main/website/"

# ---------------------------------------------------------------------------
# Blog
# ---------------------------------------------------------------------------
[blog]
enabled = false
path = "blog"
route_base_path = "blog"
title = "Blog"

# ---------------------------------------------------------------------------
# Homepage call-to-action links
# ---------------------------------------------------------------------------
[home]
get_started = "/docs/"
# registry_url = "https://pub.dev/packages/my_package"

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
# custom_css = "src/css/custom.css"
# image = "img/social-card.jpg"

[theme.color_mode]
default_mode = "light"
respect_prefers_color_scheme = false
disable_switch = false

[theme.prism]
# github, dracula, vsDark, vsLight, oneDark, oneLight, nightOwl
theme = "github"
dark_theme = "dracula"
additional_languages = []

[theme.colors.light]
background = "#ffffff"
text = "#1c1e21"
text_muted = "#606770"
border = "#dadde1"
link = "#2e8555"
link_hover = "#205d3b"
primary = "#2e8555"

[theme.colors.dark]
background = "#1b1b1d"
text = "#e3e3e3"
text_muted = "#a0a0a8"
border = "#444950"
link = "#25c2a0"
link_hover = "#4fddbf"
primary = "#25c2a0"

# ---------------------------------------------------------------------------
# Navbar
# ---------------------------------------------------------------------------
[navbar]
# title = "My Project"     # defaults to the site title
items = []

# [navbar.logo]
# alt = "Logo"
# src = "img/logo.svg"
#
# [[navbar.items]]
# type = "doc_sidebar"     # link | doc_sidebar | doc | locale_dropdown
# sidebar_id = "docs"
# label = "Docs"
# position = "left"        # left | right

# ---------------------------------------------------------------------------
# Footer
# ---------------------------------------------------------------------------
[footer]
style = "dark"
links = []
# copyright = "Copyright © {year} My Org."
#
# [[footer.links]]
# title = "Docs"
# [[footer.links.items]]
# label = "Getting Started"
# to = "/docs/"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum locales rendered in parallel.
# Omit to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

fn push_block(css: &mut String, selector: &str, vars: &[(&str, &str)]) {
    css.push_str(selector);
    css.push_str(" {\n");
    for (name, value) in vars {
        css.push_str(&format!("    {name}: {value};\n"));
    }
    css.push_str("}\n");
}

fn push_media_block(css: &mut String, scheme: &str, vars: &[(&str, &str)]) {
    css.push_str(&format!("@media (prefers-color-scheme: {scheme}) {{\n"));
    css.push_str("    :root:not([data-theme]) {\n");
    for (name, value) in vars {
        css.push_str(&format!("        {name}: {value};\n"));
    }
    css.push_str("    }\n}\n");
}

/// Generate CSS custom properties for both color modes.
///
/// `:root` carries the default mode; `[data-theme]` selectors back the toggle.
/// With `respect_prefers_color_scheme`, pages without an explicit
/// `data-theme` follow the visitor's system preference.
pub fn generate_color_css(colors: &ColorConfig, mode: &ColorModeConfig) -> String {
    let light = colors.light.css_vars();
    let dark = colors.dark.css_vars();
    let default = match mode.default_mode {
        ColorMode::Light => &light,
        ColorMode::Dark => &dark,
    };

    let mut css = String::new();
    push_block(&mut css, ":root", default);
    push_block(&mut css, "[data-theme='light']", &light);
    push_block(&mut css, "[data-theme='dark']", &dark);
    if mode.respect_prefers_color_scheme {
        push_media_block(&mut css, "light", &light);
        push_media_block(&mut css, "dark", &dark);
    }
    css
}

/// Generate CSS custom properties for the code block palettes.
pub fn generate_syntax_css(prism: &PrismConfig, mode: &ColorModeConfig) -> String {
    let vars = |theme: SyntaxTheme| {
        let (bg, text) = theme.palette();
        [("--code-bg", bg), ("--code-text", text)]
    };
    let light = vars(prism.theme);
    let dark = vars(prism.dark_theme);
    let default = match mode.default_mode {
        ColorMode::Light => &light,
        ColorMode::Dark => &dark,
    };

    let mut css = String::new();
    push_block(&mut css, ":root", default);
    push_block(&mut css, "[data-theme='light']", &light);
    push_block(&mut css, "[data-theme='dark']", &dark);
    if mode.respect_prefers_color_scheme {
        push_media_block(&mut css, "light", &light);
        push_media_block(&mut css, "dark", &dark);
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn two_locale_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.i18n.locales = vec!["en".to_string(), "zh-Hans".to_string()];
        config.i18n.locale_configs.insert(
            "zh-Hans".to_string(),
            LocaleConfig {
                label: Some("简体中文".to_string()),
                tagline: Some("高性能图像处理".to_string()),
                ..LocaleConfig::default()
            },
        );
        config
    }

    #[test]
    fn default_config_is_single_english_locale() {
        let config = SiteConfig::default();
        assert_eq!(config.i18n.default_locale, "en");
        assert_eq!(config.i18n.locales, vec!["en"]);
        assert_eq!(config.i18n.missing_translations, TranslationPolicy::Fallback);
        assert_eq!(config.base_url, "/");
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
title = "libvips_ffi"
base_url = "/libvips_ffi/"

[theme.prism]
additional_languages = ["dart", "bash", "yaml"]
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.title, "libvips_ffi");
        assert_eq!(config.base_url, "/libvips_ffi/");
        assert_eq!(config.theme.prism.additional_languages.len(), 3);
        // Defaults preserved
        assert_eq!(config.theme.prism.dark_theme, SyntaxTheme::Dracula);
        assert_eq!(config.docs.route_base_path, "docs");
    }

    #[test]
    fn parse_navbar_items() {
        let toml = r#"
[[navbar.items]]
type = "doc_sidebar"
sidebar_id = "tutorial"
label = "Docs"

[[navbar.items]]
href = "https://pub.dev/packages/libvips_ffi"
label = "pub.dev"
position = "right"

[[navbar.items]]
type = "locale_dropdown"
position = "right"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        let items = &config.navbar.items;
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].kind, NavbarItemKind::DocSidebar);
        assert_eq!(items[0].position, Position::Left);
        assert_eq!(items[1].kind, NavbarItemKind::Link);
        assert_eq!(items[1].position, Position::Right);
        assert_eq!(items[2].kind, NavbarItemKind::LocaleDropdown);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_footer_sections() {
        let toml = r#"
[footer]
copyright = "Copyright © {year} FlutterCandies."

[[footer.links]]
title = "Docs"

[[footer.links.items]]
label = "Getting Started"
to = "/docs/"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.footer.links.len(), 1);
        assert_eq!(config.footer.links[0].items[0].to.as_deref(), Some("/docs/"));
        assert_eq!(config.footer.style, FooterStyle::Dark);
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_empty_locales() {
        let mut config = SiteConfig::default();
        config.i18n.locales.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn validate_default_locale_missing() {
        let mut config = SiteConfig::default();
        config.i18n.locales = vec!["fr".to_string()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default_locale 'en'"));
    }

    #[test]
    fn validate_duplicate_locale() {
        let mut config = SiteConfig::default();
        config.i18n.locales = vec!["en".to_string(), "en".to_string()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn validate_malformed_locale_code() {
        let mut config = SiteConfig::default();
        config.i18n.locales = vec!["en".to_string(), "zh Hans".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_stray_locale_config() {
        let mut config = SiteConfig::default();
        config
            .i18n
            .locale_configs
            .insert("de".to_string(), LocaleConfig::default());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'de'"));
    }

    #[test]
    fn validate_base_url_slashes() {
        let mut config = SiteConfig::default();
        config.base_url = "/libvips_ffi".to_string();
        assert!(config.validate().is_err());
        config.base_url = "libvips_ffi/".to_string();
        assert!(config.validate().is_err());
        config.base_url = "/libvips_ffi/".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_route_base_paths() {
        let mut config = SiteConfig::default();
        config.docs.route_base_path = "../site".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("docs.route_base_path '../site'"));

        config.docs.route_base_path = String::new();
        config.blog.route_base_path = "news/./2025".to_string();
        assert!(config.validate().is_err());

        config.blog.route_base_path = "news".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_url_without_path() {
        let mut config = SiteConfig::default();
        config.url = "https://fluttercandies.github.io/libvips_ffi".to_string();
        assert!(config.validate().is_err());
        config.url = "ftp://fluttercandies.github.io".to_string();
        assert!(config.validate().is_err());
        config.url = "https://fluttercandies.github.io".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_link_item_needs_one_target() {
        let mut config = SiteConfig::default();
        config.navbar.items.push(NavbarItem {
            kind: NavbarItemKind::Link,
            label: Some("GitHub".to_string()),
            to: Some("/docs/".to_string()),
            href: Some("https://github.com".to_string()),
            sidebar_id: None,
            doc_id: None,
            position: Position::Right,
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("navbar.items[0]"));
    }

    #[test]
    fn validate_doc_sidebar_needs_id() {
        let toml = r#"
[[navbar.items]]
type = "doc_sidebar"
label = "Docs"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_footer_link_target() {
        let toml = r#"
[[footer.links]]
title = "More"
[[footer.links.items]]
label = "libvips"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("libvips"));
    }

    // =========================================================================
    // resolve tests
    // =========================================================================

    #[test]
    fn resolve_default_locale_is_unprefixed() {
        let config = two_locale_config();
        let resolved = config.resolve("en").unwrap();
        assert_eq!(resolved.locale.prefix, "");
        assert!(resolved.locale.is_default);
        assert_eq!(resolved.link_root(), "/");
        assert_eq!(resolved.locales.len(), 2);
    }

    #[test]
    fn resolve_other_locale_is_prefixed() {
        let mut config = two_locale_config();
        config.base_url = "/libvips_ffi/".to_string();
        let resolved = config.resolve("zh-Hans").unwrap();
        assert_eq!(resolved.locale.prefix, "zh-Hans");
        assert_eq!(resolved.link_root(), "/libvips_ffi/zh-Hans/");
        assert_eq!(resolved.asset_url("img/logo.svg"), "/libvips_ffi/img/logo.svg");
        assert_eq!(resolved.locale.label, "简体中文");
    }

    #[test]
    fn resolve_carries_repository_metadata() {
        let mut config = two_locale_config();
        config.organization_name = "fluttercandies".to_string();
        config.project_name = "libvips_ffi".to_string();
        let json = serde_json::to_value(config.resolve("zh-Hans").unwrap()).unwrap();
        assert_eq!(json["organization_name"], "fluttercandies");
        assert_eq!(json["project_name"], "libvips_ffi");
    }

    #[test]
    fn resolve_applies_locale_overrides() {
        let mut config = two_locale_config();
        config.tagline = "High-performance image processing".to_string();
        assert_eq!(
            config.resolve("en").unwrap().tagline,
            "High-performance image processing"
        );
        assert_eq!(config.resolve("zh-Hans").unwrap().tagline, "高性能图像处理");
        // Title is locale-invariant unless overridden
        assert_eq!(config.resolve("zh-Hans").unwrap().title, config.title);
    }

    #[test]
    fn resolve_unknown_locale_is_error() {
        let config = two_locale_config();
        let result = config.resolve("fr");
        assert!(matches!(result, Err(ConfigError::UnknownLocale(code)) if code == "fr"));
    }

    #[test]
    fn resolve_navbar_title_defaults_to_site_title() {
        let config = two_locale_config();
        assert_eq!(config.resolve("en").unwrap().navbar.title, "My Project");
    }

    #[test]
    fn translate_labels_replaces_known_labels() {
        let mut config = two_locale_config();
        config.footer.links.push(FooterSection {
            title: "Docs".to_string(),
            items: vec![FooterLink {
                label: "Getting Started".to_string(),
                to: Some("/docs/".to_string()),
                href: None,
            }],
        });
        let mut resolved = config.resolve("zh-Hans").unwrap();
        let labels = BTreeMap::from([
            ("Docs".to_string(), "文档".to_string()),
            ("Getting Started".to_string(), "快速开始".to_string()),
        ]);
        resolved.translate_labels(&labels);
        assert_eq!(resolved.footer.sections[0].title, "文档");
        assert_eq!(resolved.footer.sections[0].items[0].label, "快速开始");
    }

    #[test]
    fn copyright_substitutes_year() {
        let footer = ResolvedFooter {
            style: FooterStyle::Dark,
            sections: vec![],
            copyright: Some("Copyright © {year} FlutterCandies.".to_string()),
        };
        assert_eq!(
            footer.copyright_for(2026).as_deref(),
            Some("Copyright © 2026 FlutterCandies.")
        );
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.title, "My Project");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
title = "libvips_ffi"

[i18n]
locales = ["en", "zh-Hans"]
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.title, "libvips_ffi");
        assert_eq!(config.i18n.locales, vec!["en", "zh-Hans"]);
        // Unspecified values should be defaults
        assert_eq!(config.i18n.default_locale, "en");
        assert_eq!(config.theme.colors.light.background, "#ffffff");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[i18n]
default_locale = "fr"
"#,
        )
        .unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[i18n]
default_lang = "en"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[navbr]\ntitle = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_syntax_theme_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[theme.prism]\ntheme = \"solarized\"\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[docs]
path = "docs"
route_base_path = "docs"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str("[docs]\npath = \"content\"\n").unwrap();
        let merged = merge_toml(base, overlay);
        let docs = merged.get("docs").unwrap();
        assert_eq!(docs.get("path").unwrap().as_str(), Some("content"));
        assert_eq!(docs.get("route_base_path").unwrap().as_str(), Some("docs"));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value = toml::from_str("locales = [\"en\"]").unwrap();
        let overlay: toml::Value = toml::from_str("locales = [\"en\", \"zh-Hans\"]").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("locales").unwrap().as_array().unwrap().len(), 2);
    }

    // =========================================================================
    // stock config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let default = SiteConfig::default();
        assert_eq!(config.title, default.title);
        assert_eq!(config.i18n.locales, default.i18n.locales);
        assert_eq!(config.theme.prism.theme, SyntaxTheme::Github);
        assert_eq!(config.theme.colors.dark.primary, default.theme.colors.dark.primary);
        assert_eq!(config.docs.sidebar_path, default.docs.sidebar_path);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value().unwrap();
        for section in ["i18n", "docs", "blog", "home", "theme", "navbar", "footer"] {
            assert!(val.get(section).is_some(), "missing section {section}");
        }
    }

    // =========================================================================
    // CSS generation tests
    // =========================================================================

    #[test]
    fn color_css_includes_both_modes() {
        let css = generate_color_css(&ColorConfig::default(), &ColorModeConfig::default());
        assert!(css.contains("[data-theme='dark']"));
        assert!(css.contains("--color-bg: #1b1b1d"));
        assert!(css.contains("--color-primary: #2e8555"));
        assert!(!css.contains("prefers-color-scheme"));
    }

    #[test]
    fn color_css_respects_system_preference() {
        let mode = ColorModeConfig {
            respect_prefers_color_scheme: true,
            ..ColorModeConfig::default()
        };
        let css = generate_color_css(&ColorConfig::default(), &mode);
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
        assert!(css.contains(":root:not([data-theme])"));
    }

    #[test]
    fn color_css_default_mode_dark_sets_root() {
        let mode = ColorModeConfig {
            default_mode: ColorMode::Dark,
            ..ColorModeConfig::default()
        };
        let css = generate_color_css(&ColorConfig::default(), &mode);
        let root = css.split("}\n").next().unwrap();
        assert!(root.contains("--color-bg: #1b1b1d"));
    }

    #[test]
    fn syntax_css_uses_theme_pair() {
        let css = generate_syntax_css(&PrismConfig::default(), &ColorModeConfig::default());
        assert!(css.contains("--code-bg: #f6f8fa"));
        assert!(css.contains("--code-bg: #282a36"));
    }

    #[test]
    fn prism_highlights_additional_languages() {
        let prism = PrismConfig {
            additional_languages: vec!["dart".to_string()],
            ..PrismConfig::default()
        };
        assert!(prism.highlights("rust"));
        assert!(prism.highlights("Dart"));
        assert!(!prism.highlights("yaml"));
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_zero_is_one() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }
}
