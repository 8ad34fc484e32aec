//! Shared page shell: document head, navbar, locale dropdown, footer.
//!
//! [`Chrome`] is everything around the page content that is the same for all
//! pages of a locale. It is built once per locale by [`build_chrome`], which is
//! also where navbar and footer targets are checked: a link to a document that
//! does not exist fails here, naming the item, before any page is rendered.

use crate::assets::{AssetIndex, COLOR_MODE_JS};
use crate::config::{FooterStyle, NavbarItem, NavbarItemKind, Position, ResolvedConfig};
use crate::docs::DocPage;
use crate::i18n::LocaleInfo;
use crate::routes::{self, NOT_FOUND_ROUTE, ReferenceError, RouteTable};
use crate::sidebar::Sidebars;
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// When a navbar link is highlighted.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveWhen {
    Never,
    /// On this route and everything below it.
    Route(String),
    /// On any document of this sidebar.
    Sidebar(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavEntry {
    Link {
        label: String,
        href: String,
        external: bool,
        active: ActiveWhen,
    },
    LocaleDropdown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FooterEntry {
    pub label: String,
    pub href: String,
    pub external: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FooterColumn {
    pub title: String,
    pub links: Vec<FooterEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrandLogo {
    pub alt: String,
    pub src: String,
}

/// Resolved navbar, footer, and head links of one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct Chrome {
    pub brand: String,
    pub logo: Option<BrandLogo>,
    pub left: Vec<NavEntry>,
    pub right: Vec<NavEntry>,
    pub footer_style: FooterStyle,
    pub footer: Vec<FooterColumn>,
    pub copyright: Option<String>,
    pub stylesheet_href: String,
    pub favicon_href: Option<String>,
    /// Absolute URL of the social card image.
    pub og_image: Option<String>,
}

/// Link root of any locale of the site.
pub fn locale_root(base_url: &str, locale: &LocaleInfo) -> String {
    if locale.prefix.is_empty() {
        base_url.to_string()
    } else {
        format!("{base_url}{}/", locale.prefix)
    }
}

/// Resolve a `to`/`href` pair into `(href, external, route)`.
fn resolve_target(
    config: &ResolvedConfig,
    routes: &RouteTable,
    referrer: &str,
    to: Option<&str>,
    href: Option<&str>,
) -> Result<(String, bool, Option<String>), ReferenceError> {
    match (to, href) {
        (Some(to), _) if !routes::is_external(to) => {
            let route = routes.resolve(referrer, to)?;
            Ok((routes::href(&config.link_root(), to), false, Some(route)))
        }
        (Some(url), _) | (None, Some(url)) => Ok((url.to_string(), true, None)),
        (None, None) => Err(ReferenceError::MissingDocument {
            referrer: referrer.to_string(),
            target: String::new(),
        }),
    }
}

fn nav_entry(
    item: &NavbarItem,
    config: &ResolvedConfig,
    routes: &RouteTable,
    sidebars: &Sidebars,
    docs: &[DocPage],
) -> Result<NavEntry, ReferenceError> {
    let referrer = item.describe();
    match item.kind {
        NavbarItemKind::LocaleDropdown => Ok(NavEntry::LocaleDropdown),
        NavbarItemKind::Link => {
            let (href, external, route) =
                resolve_target(config, routes, &referrer, item.to.as_deref(), item.href.as_deref())?;
            Ok(NavEntry::Link {
                label: item.label.clone().unwrap_or_default(),
                href,
                external,
                active: route.map(ActiveWhen::Route).unwrap_or(ActiveWhen::Never),
            })
        }
        NavbarItemKind::DocSidebar => {
            let id = item.sidebar_id.as_deref().unwrap_or_default();
            let sidebar = sidebars.get(id).ok_or_else(|| ReferenceError::UnknownSidebar {
                referrer: referrer.clone(),
                sidebar: id.to_string(),
            })?;
            let first = sidebar
                .first_doc()
                .ok_or_else(|| ReferenceError::EmptySidebar(id.to_string()))?;
            Ok(NavEntry::Link {
                label: item.label.clone().unwrap_or_else(|| id.to_string()),
                href: routes::href(&config.link_root(), first.route),
                external: false,
                active: ActiveWhen::Sidebar(id.to_string()),
            })
        }
        NavbarItemKind::Doc => {
            let id = item.doc_id.as_deref().unwrap_or_default();
            let doc = docs
                .iter()
                .find(|d| d.id == id)
                .ok_or_else(|| ReferenceError::MissingDocument {
                    referrer: referrer.clone(),
                    target: id.to_string(),
                })?;
            Ok(NavEntry::Link {
                label: item.label.clone().unwrap_or_else(|| doc.title.clone()),
                href: routes::href(&config.link_root(), &doc.route),
                external: false,
                active: ActiveWhen::Route(doc.route.clone()),
            })
        }
    }
}

/// Resolve navbar, footer, and head assets for one locale.
pub fn build_chrome(
    config: &ResolvedConfig,
    routes: &RouteTable,
    sidebars: &Sidebars,
    docs: &[DocPage],
    assets: &AssetIndex,
    stylesheet_path: &str,
    year: i32,
) -> Result<Chrome, ReferenceError> {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for item in &config.navbar.items {
        let entry = nav_entry(item, config, routes, sidebars, docs)?;
        match item.position {
            Position::Left => left.push(entry),
            Position::Right => right.push(entry),
        }
    }

    let mut footer = Vec::with_capacity(config.footer.sections.len());
    for section in &config.footer.sections {
        let mut links = Vec::with_capacity(section.items.len());
        for link in &section.items {
            let referrer = format!("footer link '{}'", link.label);
            let (href, external, _) =
                resolve_target(config, routes, &referrer, link.to.as_deref(), link.href.as_deref())?;
            links.push(FooterEntry {
                label: link.label.clone(),
                href,
                external,
            });
        }
        footer.push(FooterColumn {
            title: section.title.clone(),
            links,
        });
    }

    let favicon_href = config
        .favicon
        .as_deref()
        .map(|f| assets.require("favicon", f).map(|a| config.asset_url(&a)))
        .transpose()?;
    let logo = config
        .navbar
        .logo
        .as_ref()
        .map(|logo| {
            assets.require("navbar logo", &logo.src).map(|a| BrandLogo {
                alt: logo.alt.clone(),
                src: config.asset_url(&a),
            })
        })
        .transpose()?;
    let og_image = config
        .theme
        .image
        .as_deref()
        .map(|img| {
            assets.require("theme.image", img).map(|a| {
                format!("{}{}", config.url.trim_end_matches('/'), config.asset_url(&a))
            })
        })
        .transpose()?;

    Ok(Chrome {
        brand: config.navbar.title.clone(),
        logo,
        left,
        right,
        footer_style: config.footer.style,
        footer,
        copyright: config.footer.copyright_for(year),
        stylesheet_href: config.asset_url(stylesheet_path),
        favicon_href,
        og_image,
    })
}

// =============================================================================
// Rendering
// =============================================================================

/// Where a page sits, for highlighting and locale switching.
pub struct PageContext<'a> {
    pub config: &'a ResolvedConfig,
    pub chrome: &'a Chrome,
    pub route: &'a str,
    /// Sidebar the current document belongs to.
    pub sidebar_id: Option<&'a str>,
}

impl PageContext<'_> {
    fn is_active(&self, active: &ActiveWhen) -> bool {
        match active {
            ActiveWhen::Never => false,
            ActiveWhen::Route(route) if route == "/" => self.route == "/",
            ActiveWhen::Route(route) => {
                self.route == route || self.route.starts_with(&format!("{route}/"))
            }
            ActiveWhen::Sidebar(id) => self.sidebar_id == Some(id.as_str()),
        }
    }

    /// Route to link to when switching locale; the 404 page switches to home.
    fn switch_route(&self) -> &str {
        if self.route == NOT_FOUND_ROUTE {
            "/"
        } else {
            self.route
        }
    }
}

/// Render the full HTML document around `content`.
pub fn base_document(ctx: &PageContext<'_>, title: &str, description: Option<&str>, content: Markup) -> Markup {
    let config = ctx.config;
    let chrome = ctx.chrome;
    let mode = &config.theme.color_mode;
    let data_theme = (!mode.respect_prefers_color_scheme).then(|| mode.default_mode.as_str());
    let full_title = if title.is_empty() || title == config.title {
        config.title.clone()
    } else {
        format!("{title} | {}", config.title)
    };
    let origin = config.url.trim_end_matches('/');

    html! {
        (DOCTYPE)
        html lang=(config.locale.html_lang) dir=(config.locale.direction.as_str()) data-theme=[data_theme] {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (full_title) }
                meta property="og:title" content=(full_title);
                @if let Some(description) = description {
                    meta name="description" content=(description);
                    meta property="og:description" content=(description);
                }
                @if let Some(image) = &chrome.og_image {
                    meta property="og:image" content=(image);
                }
                @if let Some(favicon) = &chrome.favicon_href {
                    link rel="icon" href=(favicon);
                }
                @if ctx.route != NOT_FOUND_ROUTE {
                    @for locale in &config.locales {
                        link rel="alternate" hreflang=(locale.html_lang)
                            href={ (origin) (routes::href(&locale_root(&config.base_url, locale), ctx.route)) };
                    }
                }
                link rel="stylesheet" href=(chrome.stylesheet_href);
            }
            body {
                (render_navbar(ctx))
                (content)
                (render_footer(ctx))
                @if !mode.disable_switch {
                    script { (PreEscaped(COLOR_MODE_JS)) }
                }
            }
        }
    }
}

fn render_nav_entry(ctx: &PageContext<'_>, entry: &NavEntry) -> Markup {
    match entry {
        NavEntry::Link {
            label,
            href,
            external,
            active,
        } => {
            let class = if ctx.is_active(active) {
                "navbar__item navbar__link navbar__link--active"
            } else {
                "navbar__item navbar__link"
            };
            html! {
                a class=(class) href=(href)
                    target=[external.then_some("_blank")]
                    rel=[external.then_some("noopener noreferrer")] { (label) }
            }
        }
        NavEntry::LocaleDropdown => render_locale_dropdown(ctx),
    }
}

/// Menu linking the current page in every configured locale.
pub fn render_locale_dropdown(ctx: &PageContext<'_>) -> Markup {
    let config = ctx.config;
    let route = ctx.switch_route();
    html! {
        details class="navbar__item dropdown" {
            summary.navbar__link { (config.locale.label) }
            ul.dropdown__menu {
                @for locale in &config.locales {
                    @let class = if locale.code == config.locale.code {
                        "dropdown__link dropdown__link--active"
                    } else {
                        "dropdown__link"
                    };
                    li {
                        a class=(class)
                            href=(routes::href(&locale_root(&config.base_url, locale), route))
                            hreflang=(locale.html_lang)
                            lang=(locale.html_lang) { (locale.label) }
                    }
                }
            }
        }
    }
}

pub fn render_navbar(ctx: &PageContext<'_>) -> Markup {
    let chrome = ctx.chrome;
    html! {
        nav.navbar aria-label="Main" {
            div.navbar__inner {
                div.navbar__items {
                    a.navbar__brand href=(ctx.config.link_root()) {
                        @if let Some(logo) = &chrome.logo {
                            img.navbar__logo src=(logo.src) alt=(logo.alt);
                        }
                        b.navbar__title { (chrome.brand) }
                    }
                    @for entry in &chrome.left {
                        (render_nav_entry(ctx, entry))
                    }
                }
                div class="navbar__items navbar__items--right" {
                    @for entry in &chrome.right {
                        (render_nav_entry(ctx, entry))
                    }
                    @if !ctx.config.theme.color_mode.disable_switch {
                        button.color-mode-toggle type="button" title="Switch between dark and light mode" {
                            span.color-mode-toggle__icon {}
                        }
                    }
                }
            }
        }
    }
}

pub fn render_footer(ctx: &PageContext<'_>) -> Markup {
    let chrome = ctx.chrome;
    let class = match chrome.footer_style {
        FooterStyle::Light => "footer footer--light",
        FooterStyle::Dark => "footer footer--dark",
    };
    html! {
        footer class=(class) {
            div.container {
                @if !chrome.footer.is_empty() {
                    div class="row footer__links" {
                        @for column in &chrome.footer {
                            div class="col footer__col" {
                                div.footer__title { (column.title) }
                                ul.footer__items {
                                    @for link in &column.links {
                                        li.footer__item {
                                            a.footer__link-item href=(link.href)
                                                target=[link.external.then_some("_blank")]
                                                rel=[link.external.then_some("noopener noreferrer")] { (link.label) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                @if let Some(copyright) = &chrome.copyright {
                    div.footer__copyright { (copyright) }
                }
            }
        }
    }
}
