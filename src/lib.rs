//! # docsite
//!
//! A static site generator for localized project documentation. One
//! `site.toml` describes the project; the filesystem supplies the content. The
//! output is a landing page with feature cards, a documentation tree, and an
//! optional blog, rendered once per configured locale.
//!
//! # Architecture: Plan, Then Write
//!
//! ```text
//! 1. Load     site/        →  Site       (config, bundles, docs, sidebars, assets)
//! 2. Plan     Site         →  SitePlan   (per-locale resolve + render, in memory)
//! 3. Write    SitePlan     →  build/     (pages, stylesheet, static files)
//! ```
//!
//! Nothing is written until every locale has resolved and rendered. A missing
//! document, asset, sidebar, or translation fails the whole build, so a
//! deployed site never contains a half-updated tree or a dead navbar link.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `site.toml` loading, defaults merging, validation, per-locale resolution, CSS tokens |
//! | [`i18n`] | Locale codes, the locale table, `Localized` content, translation fallback |
//! | [`features`] | Feature card resolution and rendering |
//! | [`home`] | Homepage hero and composition |
//! | [`layout`] | Page shell: head, navbar, locale dropdown, footer |
//! | [`docs`] | Documentation tree scanning and front matter |
//! | [`sidebar`] | Sidebar definitions, autogeneration, resolution, rendering |
//! | [`blog`] | Dated blog posts |
//! | [`markdown`] | Markdown rendering with internal link checking |
//! | [`routes`] | Route tables, href construction, reference errors |
//! | [`assets`] | Static asset index and the hashed stylesheet |
//! | [`naming`] | `NNN-name` ordering prefix parser |
//! | [`generate`] | The build pipeline: locale states, parallel planning, writing |
//! | [`types`] | Rendered pages shared between the pipeline and CLI output |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Malformed markup is
//! a compile error, interpolation is escaped by default, and there is no
//! template directory to ship or keep in sync with the binary.
//!
//! ## Default Locale at the Root
//!
//! The default locale is served unprefixed (`/docs/`), every other locale
//! under its code (`/zh-Hans/docs/`). Static assets and the stylesheet are
//! shared by all locales and live once at the root.
//!
//! ## Translation Fallback
//!
//! A locale without its own content bundle or translated document borrows the
//! default locale's, unless `i18n.missing_translations = "strict"`. Fallback is
//! the default so a new locale can ship incrementally; strict mode is for CI on
//! sites that promise complete translations.
//!
//! ## Reproducible Output
//!
//! Given the same inputs and the same copyright year, a build is byte-for-byte
//! identical: directory walks are sorted, maps are ordered, and the stylesheet
//! name is a content hash.

pub mod assets;
pub mod blog;
pub mod config;
pub mod docs;
pub mod features;
pub mod generate;
pub mod home;
pub mod i18n;
pub mod layout;
pub mod markdown;
pub mod naming;
pub mod output;
pub mod routes;
pub mod sidebar;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
