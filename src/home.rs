//! Homepage: hero banner and feature grid.
//!
//! The hero shows the site title, a subtitle (the locale's own subtitle or the
//! resolved tagline), and two calls to action: an internal "get started" link
//! and, when `home.registry_url` is set, an external package registry link.
//! Both targets are checked by [`resolve_hero`] before rendering.

use crate::config::{HomeConfig, ResolvedConfig};
use crate::features::{self, FeatureCard};
use crate::i18n::HomeContent;
use crate::layout::{self, PageContext};
use crate::routes::{self, ReferenceError, RouteTable};
use maud::{Markup, html};

/// Hero banner with every link resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    pub get_started_label: String,
    pub get_started_href: String,
    /// `(label, url)` of the external registry button.
    pub registry: Option<(String, String)>,
}

/// Build the hero banner of one locale.
pub fn resolve_hero(
    config: &ResolvedConfig,
    home: &HomeConfig,
    content: &HomeContent,
    routes: &RouteTable,
) -> Result<Hero, ReferenceError> {
    routes.resolve("homepage get-started button", &home.get_started)?;
    Ok(Hero {
        title: config.title.clone(),
        subtitle: content
            .subtitle
            .clone()
            .unwrap_or_else(|| config.tagline.clone()),
        get_started_label: content.get_started.clone(),
        get_started_href: routes::href(&config.link_root(), &home.get_started),
        registry: home
            .registry_url
            .as_ref()
            .map(|url| (content.registry.clone(), url.clone())),
    })
}

pub fn render_hero(hero: &Hero) -> Markup {
    html! {
        header class="hero hero--primary hero-banner" {
            div.container {
                h1.hero__title { (hero.title) }
                @if !hero.subtitle.is_empty() {
                    p.hero__subtitle { (hero.subtitle) }
                }
                div.buttons {
                    a class="button button--secondary button--lg" href=(hero.get_started_href) {
                        (hero.get_started_label)
                    }
                    @if let Some((label, url)) = &hero.registry {
                        a class="button button--outline button--lg" href=(url)
                            target="_blank" rel="noopener noreferrer" { (label) }
                    }
                }
            }
        }
    }
}

/// Compose the homepage of one locale.
///
/// The page title is the locale's `page_title`, falling back to the tagline.
pub fn render_homepage(ctx: &PageContext<'_>, hero: &Hero, content: &HomeContent, cards: &[FeatureCard]) -> Markup {
    let title = content
        .page_title
        .clone()
        .unwrap_or_else(|| ctx.config.tagline.clone());
    let description = content.description.as_deref().or_else(|| {
        Some(ctx.config.tagline.as_str()).filter(|t| !t.is_empty())
    });
    layout::base_document(
        ctx,
        &title,
        description,
        html! {
            (render_hero(hero))
            main {
                (features::render_features(cards))
            }
        },
    )
}
