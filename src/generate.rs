//! Site build pipeline.
//!
//! A build runs in two phases:
//!
//! ```text
//! 1. Plan   site/  →  SitePlan   (load, resolve, render every page in memory)
//! 2. Write  SitePlan  →  build/  (pages, stylesheet, static assets)
//! ```
//!
//! Planning touches the filesystem only to read. Every reference (navbar and
//! footer targets, sidebar entries, feature icons, markdown links) is checked
//! while a locale is resolved, so a broken site fails before a single byte is
//! written and the output directory is left as it was.
//!
//! ## Locales
//!
//! Each locale moves through three states:
//!
//! ```text
//! SelectedLocale  →  ResolvedLocale  →  EmittedLocale
//!   (code only)       (config, routes,    (rendered pages)
//!                      chrome, cards)
//! ```
//!
//! Locales are independent and run in parallel on the rayon pool. Results are
//! collected in configured order, so when several locales fail the reported
//! error is always the first one's.
//!
//! ## Output Structure
//!
//! ```text
//! build/
//! ├── index.html                       # Homepage (default locale)
//! ├── 404.html
//! ├── docs/
//! │   ├── index.html
//! │   └── packages/overview/index.html
//! ├── blog/...                         # When blog.enabled
//! ├── img/...                          # Copied from static/
//! ├── assets/css/styles.3f9a1c0e.css
//! └── zh-Hans/                         # One tree per extra locale
//!     ├── index.html
//!     ├── 404.html
//!     └── docs/...
//! ```

use crate::assets::{self, AssetIndex, STATIC_DIR, Stylesheet};
use crate::blog::{self, BlogError, BlogPost};
use crate::config::{self, ConfigError, ResolvedConfig, SiteConfig};
use crate::docs::{self, DocPage, DocsError};
use crate::features::{self, FeatureCard};
use crate::home::{self, Hero};
use crate::i18n::{self, ContentBundle, I18nError, LocaleCode, Localized};
use crate::layout::{self, Chrome, PageContext};
use crate::markdown::{self, LinkContext};
use crate::routes::{self, NOT_FOUND_ROUTE, ReferenceError, RouteTable};
use crate::sidebar::{self, SidebarDefs, SidebarError, Sidebars};
use crate::types::{PageKind, RenderedPage};
use maud::{Markup, PreEscaped, html};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    I18n(#[from] I18nError),
    #[error(transparent)]
    Docs(#[from] DocsError),
    #[error(transparent)]
    Sidebar(#[from] SidebarError),
    #[error(transparent)]
    Blog(#[from] BlogError),
    #[error(transparent)]
    Reference(#[from] ReferenceError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Knobs a build is run with.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Locales to build. Empty means every configured locale.
    pub locales: Vec<String>,
    /// Substituted for `{year}` in the footer copyright.
    pub year: i32,
}

/// Progress reported while planning.
#[derive(Debug, Clone)]
pub enum BuildEvent {
    LocaleStarted {
        locale: LocaleCode,
        /// Whether the locale borrows the default locale's content bundle.
        fallback: bool,
    },
    LocaleRendered {
        locale: LocaleCode,
        prefix: String,
        pages: usize,
        features: usize,
    },
}

// =============================================================================
// Loaded site
// =============================================================================

/// Everything read from the site directory, before any locale is resolved.
#[derive(Debug)]
pub struct Site {
    pub root: PathBuf,
    pub config: SiteConfig,
    assets: AssetIndex,
    stylesheet: Stylesheet,
    bundles: Localized<ContentBundle>,
    docs: Localized<Vec<DocPage>>,
    sidebars: SidebarDefs,
    posts: Localized<Vec<BlogPost>>,
}

impl Site {
    /// Read config, assets, bundles, docs, sidebars, and posts from `root`.
    pub fn load(root: &Path) -> Result<Self, BuildError> {
        let config = config::load_config(root)?;
        let assets = AssetIndex::scan(&root.join(STATIC_DIR))?;
        let custom_css = assets::read_custom_css(root, &config.theme)?;
        let stylesheet = assets::build_stylesheet(&config.theme, custom_css.as_deref());
        let bundles = i18n::load_bundles(root, &config.i18n)?;

        let default_docs = docs::scan_docs(root, &config.docs.path, &config.docs.route_base_path)?;
        let sidebars = sidebar::load_sidebars(root, &config.docs, &default_docs)?;
        let docs = Localized::load(&config.i18n, "docs", |code| {
            if code.as_str() == config.i18n.default_locale {
                return Ok::<_, BuildError>(Some(default_docs.clone()));
            }
            let dir = translated_dir(code, &config.docs.path);
            let translated = docs::scan_docs(root, &dir, &config.docs.route_base_path)?;
            let merged = i18n::localize_pages(
                &default_docs,
                translated,
                |d| d.id.as_str(),
                config.i18n.missing_translations,
                code,
                "document",
            )?;
            Ok(Some(merged))
        })?;

        let default_posts = if config.blog.enabled {
            blog::scan_posts(root, &config.blog.path, &config.blog.route_base_path)?
        } else {
            Vec::new()
        };
        let posts = Localized::load(&config.i18n, "blog", |code| {
            if !config.blog.enabled || code.as_str() == config.i18n.default_locale {
                return Ok::<_, BuildError>(Some(default_posts.clone()));
            }
            let dir = translated_dir(code, &config.blog.path);
            let translated = blog::scan_posts(root, &dir, &config.blog.route_base_path)?;
            let merged = i18n::localize_pages(
                &default_posts,
                translated,
                |p| p.slug.as_str(),
                config.i18n.missing_translations,
                code,
                "blog post",
            )?;
            Ok(Some(merged))
        })?;

        Ok(Self {
            root: root.to_path_buf(),
            config,
            assets,
            stylesheet,
            bundles,
            docs,
            sidebars,
            posts,
        })
    }

    fn bundle(&self, code: &LocaleCode) -> Result<&ContentBundle, BuildError> {
        lookup(&self.bundles, code, "content bundle")
    }

    /// Configuration of one locale with its navbar and footer labels translated.
    pub fn resolved_config(&self, locale: &str) -> Result<ResolvedConfig, BuildError> {
        let mut resolved = self.config.resolve(locale)?;
        let bundle = self.bundle(&resolved.locale.code)?;
        resolved.translate_labels(&bundle.labels);
        Ok(resolved)
    }

    /// Pick the locales to build, in configured order.
    ///
    /// Unknown requested locales are an error; duplicates are ignored.
    pub fn select(&self, requested: &[String]) -> Result<Vec<SelectedLocale<'_>>, BuildError> {
        if let Some(unknown) = requested
            .iter()
            .find(|code| !self.config.i18n.locales.contains(code))
        {
            return Err(ConfigError::UnknownLocale(unknown.clone()).into());
        }
        Ok(self
            .bundles
            .locales()
            .iter()
            .filter(|code| requested.is_empty() || requested.iter().any(|r| r == code.as_str()))
            .map(|code| SelectedLocale {
                site: self,
                code: code.clone(),
            })
            .collect())
    }

    /// Resolve and render the selected locales without writing anything.
    pub fn plan(&self, options: &BuildOptions, events: Option<&Sender<BuildEvent>>) -> Result<SitePlan, BuildError> {
        let selected = self.select(&options.locales)?;
        let results: Vec<Result<EmittedLocale, BuildError>> = selected
            .into_par_iter()
            .map(|locale| -> Result<EmittedLocale, BuildError> {
                if let Some(tx) = events {
                    tx.send(BuildEvent::LocaleStarted {
                        locale: locale.code.clone(),
                        fallback: self.bundles.is_fallback(&locale.code),
                    })
                    .ok();
                }
                let emitted = locale.resolve(options.year)?.emit()?;
                if let Some(tx) = events {
                    tx.send(BuildEvent::LocaleRendered {
                        locale: emitted.code.clone(),
                        prefix: emitted.prefix.clone(),
                        pages: emitted.pages.len(),
                        features: emitted.features,
                    })
                    .ok();
                }
                Ok(emitted)
            })
            .collect();

        let locales = results.into_iter().collect::<Result<Vec<_>, _>>()?;
        let plan = SitePlan {
            locales,
            stylesheet: self.stylesheet.clone(),
            assets: self.assets.clone(),
        };
        plan.check_outputs()?;
        Ok(plan)
    }
}

fn translated_dir(code: &LocaleCode, rel_dir: &str) -> String {
    format!("{}/{}/{}", i18n::I18N_DIR, code, rel_dir.trim_matches('/'))
}

fn lookup<'a, T>(localized: &'a Localized<T>, code: &LocaleCode, what: &str) -> Result<&'a T, BuildError> {
    localized.get(code).ok_or_else(|| {
        I18nError::MissingTranslation {
            locale: code.clone(),
            what: format!("{what} not loaded"),
        }
        .into()
    })
}

// =============================================================================
// Locale states
// =============================================================================

/// A locale chosen for this build.
pub struct SelectedLocale<'a> {
    site: &'a Site,
    pub code: LocaleCode,
}

/// A locale whose every reference has been checked.
pub struct ResolvedLocale<'a> {
    site: &'a Site,
    config: ResolvedConfig,
    bundle: &'a ContentBundle,
    docs: &'a [DocPage],
    posts: &'a [BlogPost],
    routes: RouteTable,
    sidebars: Sidebars,
    chrome: Chrome,
    hero: Hero,
    cards: Vec<FeatureCard>,
}

/// A locale rendered to memory.
#[derive(Debug, Clone)]
pub struct EmittedLocale {
    pub code: LocaleCode,
    /// Output subdirectory; empty for the default locale.
    pub prefix: String,
    pub fallback: bool,
    pub features: usize,
    pub pages: Vec<RenderedPage>,
}

impl<'a> SelectedLocale<'a> {
    /// Build the locale's route table and check every reference against it.
    pub fn resolve(self, year: i32) -> Result<ResolvedLocale<'a>, BuildError> {
        let site = self.site;
        let config = site.resolved_config(self.code.as_str())?;
        let bundle = site.bundle(&self.code)?;
        let docs = lookup(&site.docs, &self.code, "docs")?.as_slice();
        let posts = lookup(&site.posts, &self.code, "blog posts")?.as_slice();

        let mut routes = RouteTable::new();
        routes.insert("/", "homepage")?;
        routes.insert(NOT_FOUND_ROUTE, "404 page")?;
        for doc in docs {
            routes.insert_doc(&doc.source, &doc.rel_path, &doc.route)?;
        }
        if site.config.blog.enabled {
            routes.insert(&blog_index_route(&site.config), "blog index")?;
            for post in posts {
                routes.insert(&post.route, &format!("blog post '{}'", post.source))?;
            }
        }

        let sidebars = Sidebars::resolve(&site.sidebars, docs)?;
        let chrome = layout::build_chrome(
            &config,
            &routes,
            &sidebars,
            docs,
            &site.assets,
            &site.stylesheet.path,
            year,
        )?;
        let hero = home::resolve_hero(&config, &site.config.home, &bundle.home, &routes)?;
        let cards = features::resolve_cards(&bundle.features, &site.assets, &config)?;

        Ok(ResolvedLocale {
            site,
            config,
            bundle,
            docs,
            posts,
            routes,
            sidebars,
            chrome,
            hero,
            cards,
        })
    }
}

fn blog_index_route(config: &SiteConfig) -> String {
    routes::join_route(&config.blog.route_base_path, "")
}

impl ResolvedLocale<'_> {
    /// Render every page of the locale.
    pub fn emit(self) -> Result<EmittedLocale, BuildError> {
        let mut pages = Vec::with_capacity(self.docs.len() + self.posts.len() + 3);
        pages.push(self.render_home());
        for doc in self.docs {
            pages.push(self.render_doc(doc)?);
        }
        if self.site.config.blog.enabled {
            pages.push(self.render_blog_index());
            for post in self.posts {
                pages.push(self.render_post(post)?);
            }
        }
        pages.push(self.render_not_found());

        let code = self.config.locale.code.clone();
        Ok(EmittedLocale {
            fallback: self.site.bundles.is_fallback(&code),
            prefix: self.config.locale.prefix.clone(),
            features: self.cards.len(),
            code,
            pages,
        })
    }

    fn context<'b>(&'b self, route: &'b str, sidebar_id: Option<&'b str>) -> PageContext<'b> {
        PageContext {
            config: &self.config,
            chrome: &self.chrome,
            route,
            sidebar_id,
        }
    }

    fn page(&self, route: &str, kind: PageKind, title: String, markup: Markup) -> RenderedPage {
        let file = if kind == PageKind::NotFound {
            PathBuf::from("404.html")
        } else {
            routes::output_file(route)
        };
        let output = if self.config.locale.prefix.is_empty() {
            file
        } else {
            Path::new(&self.config.locale.prefix).join(file)
        };
        RenderedPage {
            route: route.to_string(),
            output,
            title,
            kind,
            html: markup.into_string(),
        }
    }

    fn link_context<'b>(&'b self, page: &'b str, route: &'b str, dir: &'b str) -> LinkContext<'b> {
        LinkContext {
            page,
            route,
            dir,
            routes: &self.routes,
            assets: &self.site.assets,
            config: &self.config,
        }
    }

    fn render_home(&self) -> RenderedPage {
        let content = &self.bundle.home;
        let title = content
            .page_title
            .clone()
            .unwrap_or_else(|| self.config.tagline.clone());
        let markup = home::render_homepage(&self.context("/", None), &self.hero, content, &self.cards);
        self.page("/", PageKind::Home, title, markup)
    }

    fn render_doc(&self, doc: &DocPage) -> Result<RenderedPage, BuildError> {
        let body = markdown::render(&doc.body, &self.link_context(&doc.source, &doc.route, doc.dir()))?;
        let sidebar = self.sidebars.sidebar_for(&doc.id);
        let ctx = self.context(&doc.route, sidebar.map(|s| s.id.as_str()));
        let link_root = self.config.link_root();
        let (prev, next) = sidebar.map(|s| s.neighbors(&doc.id)).unwrap_or((None, None));
        let edit_href = self
            .site
            .config
            .docs
            .edit_url
            .as_deref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), doc.source));

        let content = html! {
            div.docs-wrapper {
                @if let Some(sidebar) = sidebar {
                    aside.docs-sidebar {
                        (sidebar::render_sidebar(sidebar, &doc.route, &link_root))
                    }
                }
                main.docs-main {
                    article.markdown {
                        @if !doc.has_h1 {
                            h1 { (doc.title) }
                        }
                        (PreEscaped(body))
                    }
                    @if let Some(edit) = edit_href {
                        a.edit-this-page href=(edit) target="_blank" rel="noopener noreferrer" {
                            (self.bundle.label("Edit this page"))
                        }
                    }
                    @if prev.is_some() || next.is_some() {
                        nav.pagination-nav aria-label="Docs pages" {
                            @if let Some(prev) = prev {
                                a class="pagination-nav__link pagination-nav__link--prev"
                                    href=(routes::href(&link_root, prev.route)) {
                                    div.pagination-nav__sublabel { (self.bundle.label("Previous")) }
                                    div.pagination-nav__label { (prev.label) }
                                }
                            }
                            @if let Some(next) = next {
                                a class="pagination-nav__link pagination-nav__link--next"
                                    href=(routes::href(&link_root, next.route)) {
                                    div.pagination-nav__sublabel { (self.bundle.label("Next")) }
                                    div.pagination-nav__label { (next.label) }
                                }
                            }
                        }
                    }
                }
            }
        };
        let markup = layout::base_document(&ctx, &doc.title, doc.description.as_deref(), content);
        Ok(self.page(&doc.route, PageKind::Doc, doc.title.clone(), markup))
    }

    fn render_blog_index(&self) -> RenderedPage {
        let route = blog_index_route(&self.site.config);
        let title = self.bundle.label(&self.site.config.blog.title);
        let link_root = self.config.link_root();
        let content = html! {
            main.container.blog-list {
                h1 { (title) }
                @for post in self.posts {
                    article.blog-post-preview {
                        h2 {
                            a href=(routes::href(&link_root, &post.route)) { (post.title) }
                        }
                        time datetime=(post.date.format("%Y-%m-%d").to_string()) {
                            (post.date.format("%B %-d, %Y").to_string())
                        }
                        @if let Some(description) = &post.description {
                            p { (description) }
                        }
                    }
                }
            }
        };
        let markup = layout::base_document(&self.context(&route, None), &title, None, content);
        self.page(&route, PageKind::BlogIndex, title, markup)
    }

    fn render_post(&self, post: &BlogPost) -> Result<RenderedPage, BuildError> {
        let body = markdown::render(&post.body, &self.link_context(&post.source, &post.route, ""))?;
        let content = html! {
            main.container.blog-post {
                article.markdown {
                    @if !post.has_h1 {
                        h1 { (post.title) }
                    }
                    time datetime=(post.date.format("%Y-%m-%d").to_string()) {
                        (post.date.format("%B %-d, %Y").to_string())
                    }
                    (PreEscaped(body))
                }
            }
        };
        let markup = layout::base_document(
            &self.context(&post.route, None),
            &post.title,
            post.description.as_deref(),
            content,
        );
        Ok(self.page(&post.route, PageKind::BlogPost, post.title.clone(), markup))
    }

    fn render_not_found(&self) -> RenderedPage {
        let title = self.bundle.label("Page Not Found");
        let content = html! {
            main class="container margin-vert--xl not-found" {
                h1.hero__title { (title) }
                p { (self.bundle.label("We could not find what you were looking for.")) }
                a class="button button--primary" href=(self.config.link_root()) {
                    (self.bundle.label("Back to homepage"))
                }
            }
        };
        let markup = layout::base_document(&self.context(NOT_FOUND_ROUTE, None), &title, None, content);
        self.page(NOT_FOUND_ROUTE, PageKind::NotFound, title, markup)
    }
}

// =============================================================================
// Plan and output
// =============================================================================

/// A fully rendered site, held in memory until written.
#[derive(Debug, Clone)]
pub struct SitePlan {
    pub locales: Vec<EmittedLocale>,
    pub stylesheet: Stylesheet,
    assets: AssetIndex,
}

/// Summary of a build, for CLI output.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub locales: Vec<LocaleReport>,
    /// Stylesheet path relative to the output root.
    pub stylesheet: String,
    /// Number of static files copied (or that would be copied).
    pub assets: usize,
}

#[derive(Debug, Clone)]
pub struct LocaleReport {
    pub code: LocaleCode,
    pub prefix: String,
    pub fallback: bool,
    pub features: usize,
    pub pages: Vec<PageSummary>,
}

#[derive(Debug, Clone)]
pub struct PageSummary {
    pub kind: PageKind,
    pub title: String,
    pub output: PathBuf,
}

impl SitePlan {
    /// Reject two files planned for the same output path.
    ///
    /// Routes are unique within a locale, but a default-locale page can still
    /// land inside another locale's tree, or on a static file.
    fn check_outputs(&self) -> Result<(), ReferenceError> {
        let static_files = self
            .assets
            .files()
            .map(|rel| (PathBuf::from(rel), format!("static file '{rel}'")));
        let stylesheet = std::iter::once((PathBuf::from(&self.stylesheet.path), "stylesheet".to_string()));
        let pages = self.locales.iter().flat_map(|locale| {
            locale
                .pages
                .iter()
                .map(move |page| (page.output.clone(), format!("{} page '{}'", locale.code, page.route)))
        });

        let mut claimed: BTreeMap<PathBuf, String> = BTreeMap::new();
        for (path, owner) in static_files.chain(stylesheet).chain(pages) {
            if let Some(first) = claimed.get(&path) {
                return Err(ReferenceError::DuplicateOutput {
                    path: path.display().to_string(),
                    first: first.clone(),
                    second: owner,
                });
            }
            claimed.insert(path, owner);
        }
        Ok(())
    }

    pub fn page_count(&self) -> usize {
        self.locales.iter().map(|l| l.pages.len()).sum()
    }

    pub fn report(&self) -> BuildReport {
        BuildReport {
            locales: self
                .locales
                .iter()
                .map(|locale| LocaleReport {
                    code: locale.code.clone(),
                    prefix: locale.prefix.clone(),
                    fallback: locale.fallback,
                    features: locale.features,
                    pages: locale
                        .pages
                        .iter()
                        .map(|page| PageSummary {
                            kind: page.kind,
                            title: page.title.clone(),
                            output: page.output.clone(),
                        })
                        .collect(),
                })
                .collect(),
            stylesheet: self.stylesheet.path.clone(),
            assets: self.assets.len(),
        }
    }

    /// Write pages, stylesheet, and static assets under `output_dir`.
    pub fn write(&self, output_dir: &Path) -> Result<BuildReport, BuildError> {
        fs::create_dir_all(output_dir)?;
        self.assets.copy_to(output_dir)?;

        let css_path = output_dir.join(&self.stylesheet.path);
        if let Some(parent) = css_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&css_path, &self.stylesheet.contents)?;

        for page in self.locales.iter().flat_map(|l| &l.pages) {
            let path = output_dir.join(&page.output);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &page.html)?;
        }
        Ok(self.report())
    }
}

/// Load, plan, and write a site.
pub fn build(
    source: &Path,
    output_dir: &Path,
    options: &BuildOptions,
    events: Option<Sender<BuildEvent>>,
) -> Result<BuildReport, BuildError> {
    let site = Site::load(source)?;
    let plan = site.plan(options, events.as_ref())?;
    drop(events);
    plan.write(output_dir)
}

/// Load and plan a site without writing anything.
pub fn check(source: &Path, options: &BuildOptions) -> Result<BuildReport, BuildError> {
    let site = Site::load(source)?;
    Ok(site.plan(options, None)?.report())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{card_titles, find_page as page, setup_fixture_site, write_file};
    use std::sync::mpsc;
    use tempfile::TempDir;

    const SITE_TOML: &str = r#"
title = "libvips_ffi"
tagline = "Image processing for Dart"

[i18n]
locales = ["en", "fr"]

[docs]
edit_url = "https://github.com/fluttercandies/libvips_ffi/tree/main/website/"

[[navbar.items]]
type = "doc_sidebar"
sidebar_id = "docs"
label = "Docs"
"#;

    fn minimal_site() -> TempDir {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "site.toml", SITE_TOML);
        write_file(tmp.path(), "docs/index.md", "# Introduction\n\nSee [overview](guide.md).\n");
        write_file(tmp.path(), "docs/guide.md", "+++\ntitle = \"Guide\"\n+++\nSteps.\n");
        write_file(tmp.path(), "static/img/a.svg", "<svg/>");
        write_file(
            tmp.path(),
            "i18n/en/content.toml",
            "[[features]]\ntitle = \"Fast\"\nicon = \"img/a.svg\"\ndescription = \"Quick.\"\n",
        );
        tmp
    }

    /// The minimal site with docs served from the site root.
    fn root_docs_site() -> TempDir {
        let tmp = minimal_site();
        let toml = SITE_TOML.replace("[docs]\n", "[docs]\nroute_base_path = \"\"\n");
        write_file(
            tmp.path(),
            "site.toml",
            &format!("{toml}\n[home]\nget_started = \"/\"\n\n[blog]\nenabled = true\n"),
        );
        tmp
    }

    fn options() -> BuildOptions {
        BuildOptions {
            locales: Vec::new(),
            year: 2026,
        }
    }

    #[test]
    fn plan_renders_every_page_per_locale() {
        let tmp = minimal_site();
        let site = Site::load(tmp.path()).unwrap();
        let plan = site.plan(&options(), None).unwrap();

        let outputs: Vec<_> = plan.locales[1].pages.iter().map(|p| p.output.clone()).collect();
        assert_eq!(
            outputs,
            vec![
                PathBuf::from("fr/index.html"),
                PathBuf::from("fr/docs/guide/index.html"),
                PathBuf::from("fr/docs/index.html"),
                PathBuf::from("fr/404.html"),
            ]
        );
        assert!(plan.locales[1].fallback);
        assert_eq!(plan.page_count(), 8);
    }

    #[test]
    fn doc_page_has_sidebar_pagination_and_edit_link() {
        let tmp = minimal_site();
        let plan = Site::load(tmp.path()).unwrap().plan(&options(), None).unwrap();
        let html = &page(&plan, "docs/index.html").html;

        assert!(html.contains(r#"class="menu__link menu__link--active""#));
        assert!(html.contains(r#"href="/docs/guide/""#));
        assert!(html.contains("pagination-nav__link--next"));
        assert!(!html.contains("pagination-nav__link--prev"));
        assert!(html.contains(
            r#"href="https://github.com/fluttercandies/libvips_ffi/tree/main/website/docs/index.md""#
        ));
    }

    #[test]
    fn guide_without_heading_gets_title_heading() {
        let tmp = minimal_site();
        let plan = Site::load(tmp.path()).unwrap().plan(&options(), None).unwrap();
        let html = &page(&plan, "fr/docs/guide/index.html").html;
        assert!(html.contains("<h1>Guide</h1>"));
        assert!(html.contains(r#"href="/fr/docs/""#));
    }

    #[test]
    fn homepage_cards_follow_bundle() {
        let tmp = minimal_site();
        let plan = Site::load(tmp.path()).unwrap().plan(&options(), None).unwrap();
        assert_eq!(card_titles(&page(&plan, "index.html").html), vec!["Fast"]);
        assert_eq!(card_titles(&page(&plan, "fr/index.html").html), vec!["Fast"]);
    }

    #[test]
    fn selecting_one_locale_builds_only_that_tree() {
        let tmp = minimal_site();
        let site = Site::load(tmp.path()).unwrap();
        let opts = BuildOptions {
            locales: vec!["fr".to_string()],
            ..options()
        };
        let plan = site.plan(&opts, None).unwrap();
        assert_eq!(plan.locales.len(), 1);
        assert_eq!(plan.locales[0].prefix, "fr");
    }

    #[test]
    fn selecting_unknown_locale_is_error() {
        let tmp = minimal_site();
        let site = Site::load(tmp.path()).unwrap();
        let opts = BuildOptions {
            locales: vec!["de".to_string()],
            ..options()
        };
        assert!(matches!(
            site.plan(&opts, None),
            Err(BuildError::Config(ConfigError::UnknownLocale(code))) if code == "de"
        ));
    }

    #[test]
    fn broken_markdown_link_fails_plan() {
        for body in [
            "See [missing](missing.md).\n",
            "See [gone](missing-page).\n",
            "See [up](../nowhere/).\n",
        ] {
            let tmp = minimal_site();
            write_file(tmp.path(), "docs/guide.md", body);
            let site = Site::load(tmp.path()).unwrap();
            let err = site.plan(&options(), None).unwrap_err();
            assert!(
                matches!(err, BuildError::Reference(ReferenceError::BrokenLink { ref page, .. }) if page == "docs/guide.md"),
                "{body:?} should fail with a broken link"
            );
        }
    }

    #[test]
    fn relative_link_to_sibling_page_resolves() {
        let tmp = minimal_site();
        write_file(tmp.path(), "docs/guide.md", "Back to [the start](../) or the [logo](../../img/a.svg).\n");
        let plan = Site::load(tmp.path()).unwrap().plan(&options(), None).unwrap();
        let html = &page(&plan, "fr/docs/guide/index.html").html;
        assert!(html.contains(r#"href="/fr/docs/""#));
        assert!(html.contains(r#"href="/img/a.svg""#));
    }

    #[test]
    fn doc_cannot_take_the_homepage_route() {
        let tmp = root_docs_site();
        let err = Site::load(tmp.path()).unwrap().plan(&options(), None).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Reference(ReferenceError::DuplicateRoute { ref route, ref first, ref second })
                if route == "/" && first == "homepage" && second == "document 'docs/index.md'"
        ));
    }

    #[test]
    fn doc_cannot_take_reserved_routes() {
        let doc = "document 'docs/guide.md'";
        // The 404 route is claimed before docs, the blog index after them.
        for (slug, claimed_first, claimed_second) in [("/404", "404 page", doc), ("/blog", doc, "blog index")] {
            let tmp = root_docs_site();
            fs::remove_file(tmp.path().join("docs/index.md")).unwrap();
            write_file(tmp.path(), "docs/guide.md", &format!("+++\nslug = \"{slug}\"\n+++\nSteps.\n"));

            let err = Site::load(tmp.path()).unwrap().plan(&options(), None).unwrap_err();
            match err {
                BuildError::Reference(ReferenceError::DuplicateRoute { route, first, second }) => {
                    assert_eq!(route, slug);
                    assert_eq!(first, claimed_first);
                    assert_eq!(second, claimed_second);
                }
                other => panic!("expected a duplicate route for {slug}, got {other}"),
            }
        }
    }

    #[test]
    fn default_locale_page_cannot_land_in_another_locale_tree() {
        let tmp = root_docs_site();
        fs::remove_file(tmp.path().join("docs/index.md")).unwrap();
        write_file(tmp.path(), "docs/guide.md", "+++\nslug = \"/fr\"\n+++\nSteps.\n");

        let err = Site::load(tmp.path()).unwrap().plan(&options(), None).unwrap_err();
        match err {
            BuildError::Reference(ReferenceError::DuplicateOutput { path, first, second }) => {
                assert_eq!(path, "fr/index.html");
                assert_eq!(first, "en page '/fr'");
                assert_eq!(second, "fr page '/'");
            }
            other => panic!("expected a duplicate output, got {other}"),
        }
    }

    #[test]
    fn static_file_cannot_shadow_a_page() {
        let tmp = minimal_site();
        write_file(tmp.path(), "static/404.html", "<p>custom</p>");
        let err = Site::load(tmp.path()).unwrap().plan(&options(), None).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Reference(ReferenceError::DuplicateOutput { ref first, ref second, .. })
                if first == "static file '404.html'" && second == "en page '/404'"
        ));
    }

    #[test]
    fn events_report_each_locale() {
        let tmp = minimal_site();
        let site = Site::load(tmp.path()).unwrap();
        let (tx, rx) = mpsc::channel();
        site.plan(&options(), Some(&tx)).unwrap();
        drop(tx);
        let rendered = rx
            .iter()
            .filter(|e| matches!(e, BuildEvent::LocaleRendered { .. }))
            .count();
        assert_eq!(rendered, 2);
    }

    #[test]
    fn blog_pages_when_enabled() {
        let tmp = minimal_site();
        write_file(
            tmp.path(),
            "site.toml",
            &format!("{SITE_TOML}\n[blog]\nenabled = true\n"),
        );
        write_file(tmp.path(), "blog/2025-03-01-pipeline-api.md", "# Pipeline API\n\nChainable.\n");
        let plan = Site::load(tmp.path()).unwrap().plan(&options(), None).unwrap();

        let index = &page(&plan, "blog/index.html").html;
        assert!(index.contains(r#"<a href="/blog/pipeline-api/">Pipeline API</a>"#));
        assert!(index.contains("March 1, 2025"));
        let post = &page(&plan, "fr/blog/pipeline-api/index.html");
        assert_eq!(post.kind, PageKind::BlogPost);
    }

    #[test]
    fn not_found_page_uses_translated_label() {
        let tmp = minimal_site();
        write_file(
            tmp.path(),
            "i18n/fr/content.toml",
            "[labels]\n\"Page Not Found\" = \"Page introuvable\"\n",
        );
        let plan = Site::load(tmp.path()).unwrap().plan(&options(), None).unwrap();
        let not_found = page(&plan, "fr/404.html");
        assert_eq!(not_found.title, "Page introuvable");
        assert!(!plan.locales[1].fallback);
        assert_eq!(plan.locales[1].features, 0);
    }

    #[test]
    fn fixture_site_sidebar_and_chrome() {
        let tmp = setup_fixture_site();
        let plan = Site::load(tmp.path()).unwrap().plan(&options(), None).unwrap();

        let overview = &page(&plan, "zh-Hans/docs/packages/overview/index.html").html;
        assert!(overview.contains("<details open>"));
        assert!(overview.contains(r#"href="/libvips_ffi/zh-Hans/docs/packages/overview/""#));
        assert!(overview.contains(r#"<img src="/libvips_ffi/img/undraw_docusaurus_tree.svg" alt="Architecture""#));
        assert!(overview.contains("上一页"));
        assert!(overview.contains("下一页"));

        let not_found = page(&plan, "zh-Hans/404.html");
        assert_eq!(not_found.kind, PageKind::NotFound);
        assert!(not_found.html.contains(r#"href="/libvips_ffi/" hreflang="en-US""#));
    }

    #[test]
    fn write_creates_pages_stylesheet_and_assets() {
        let tmp = minimal_site();
        let out = TempDir::new().unwrap();
        let report = build(tmp.path(), out.path(), &options(), None).unwrap();

        assert!(out.path().join("index.html").is_file());
        assert!(out.path().join("fr/docs/guide/index.html").is_file());
        assert!(out.path().join("404.html").is_file());
        assert!(out.path().join("img/a.svg").is_file());
        assert!(out.path().join(&report.stylesheet).is_file());
        assert_eq!(report.assets, 1);
    }
}
