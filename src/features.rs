//! Homepage feature cards.
//!
//! A locale's [`FeatureList`] is plain data from its content bundle. Before
//! rendering, each item's icon is resolved against the static asset index;
//! an icon that does not exist fails the build, so the renderer only ever sees
//! [`FeatureCard`]s whose images are known to be present.
//!
//! Rendering is pure: cards map one-to-one, in order, to grid columns.

use crate::assets::AssetIndex;
use crate::config::ResolvedConfig;
use crate::markdown;
use crate::routes::ReferenceError;
use maud::{Markup, PreEscaped, html};
use serde::{Deserialize, Serialize};

/// One capability card as authored in a content bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureItem {
    pub title: String,
    /// Asset path under `static/`, e.g. `img/undraw_docusaurus_tree.svg`.
    pub icon: String,
    /// Inline markdown.
    pub description: String,
}

/// Feature cards in display order (left-to-right, top-to-bottom).
pub type FeatureList = Vec<FeatureItem>;

/// A feature item with its icon resolved to a URL and its description rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCard {
    pub title: String,
    pub icon_src: String,
    pub description_html: String,
}

/// Resolve every item of a feature list, failing on the first missing icon.
pub fn resolve_cards(
    features: &[FeatureItem],
    assets: &AssetIndex,
    config: &ResolvedConfig,
) -> Result<Vec<FeatureCard>, ReferenceError> {
    features
        .iter()
        .map(|item| {
            let icon = assets.require(&format!("feature '{}'", item.title), &item.icon)?;
            Ok(FeatureCard {
                title: item.title.clone(),
                icon_src: config.asset_url(&icon),
                description_html: markdown::render_fragment(&item.description),
            })
        })
        .collect()
}

/// Render one card: icon, heading, description.
pub fn render_feature(card: &FeatureCard) -> Markup {
    html! {
        div class="col col--4 feature" {
            div class="text--center" {
                img.feature-svg src=(card.icon_src) role="img" alt="";
            }
            div class="text--center padding-horiz--md" {
                h3 { (card.title) }
                (PreEscaped(&card.description_html))
            }
        }
    }
}

/// Render the feature grid. An empty list renders an empty row.
pub fn render_features(cards: &[FeatureCard]) -> Markup {
    html! {
        section.features {
            div.container {
                div.row {
                    @for card in cards {
                        (render_feature(card))
                    }
                }
            }
        }
    }
}
