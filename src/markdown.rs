//! Markdown rendering for docs, blog posts, and feature descriptions.
//!
//! Documents may start with a TOML front matter block fenced by `+++` lines:
//!
//! ```text
//! +++
//! title = "Installation"
//! sidebar_position = 2
//! +++
//!
//! # Installation
//! ```
//!
//! Page bodies are rendered through [`render`], which rewrites and checks every
//! link and image:
//!
//! | Target                 | Result                                              |
//! |------------------------|-----------------------------------------------------|
//! | `https://…`, `mailto:` | unchanged                                           |
//! | `#anchor`              | unchanged                                           |
//! | `/docs/intro`          | route of this locale, prefixed with the link root   |
//! | `/img/arch.svg`        | static asset, prefixed with the base URL            |
//! | `../intro.md`          | the route of that document                          |
//! | `../install`, `a.svg`  | resolved against the page URL, then as above        |
//! | anything unresolved    | [`ReferenceError::BrokenLink`]                      |
//!
//! Pages are served as directory indexes (`/docs/intro/`), so a relative
//! target that is not a `.md` file resolves against the page's own route.

use crate::assets::AssetIndex;
use crate::config::ResolvedConfig;
use crate::routes::{self, ReferenceError, RouteTable};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html as md_html};
use serde::Deserialize;

const FRONT_MATTER_FENCE: &str = "+++";

/// Metadata block at the top of a document. All keys are optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub sidebar_label: Option<String>,
    pub sidebar_position: Option<i64>,
    /// Replaces the file-derived route segment.
    pub slug: Option<String>,
}

/// Split a document into its front matter and body.
///
/// Documents without an opening `+++` line (or without a closing one) have no
/// front matter and are returned whole.
pub fn split_front_matter(src: &str) -> Result<(FrontMatter, &str), toml::de::Error> {
    let src = src.strip_prefix('\u{feff}').unwrap_or(src);
    let Some(rest) = src
        .strip_prefix(FRONT_MATTER_FENCE)
        .and_then(|r| r.strip_prefix("\r\n").or_else(|| r.strip_prefix('\n')))
    else {
        return Ok((FrontMatter::default(), src));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_FENCE {
            let front: FrontMatter = toml::from_str(&rest[..offset])?;
            return Ok((front, &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    Ok((FrontMatter::default(), src))
}

/// Text of the first level-1 heading (ATX or setext), if any.
///
/// Lines inside code blocks are never headings.
pub fn first_heading(body: &str) -> Option<String> {
    let mut heading: Option<String> = None;
    for event in Parser::new_ext(body, options()) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => heading = Some(String::new()),
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                return heading.map(|text| text.trim().to_string());
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(heading) = heading.as_mut() {
                    heading.push_str(&text);
                }
            }
            _ => {}
        }
    }
    None
}

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Render a short markdown snippet without link checking.
pub fn render_fragment(md: &str) -> String {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new_ext(md, options()));
    out
}

/// Everything needed to resolve the links of one page.
pub struct LinkContext<'a> {
    /// Source file of the page, used in error messages (`docs/intro.md`).
    pub page: &'a str,
    /// Route of the page, the base for relative links (`/docs/intro`).
    pub route: &'a str,
    /// Directory of the page within its content root, for relative `.md` links.
    pub dir: &'a str,
    pub routes: &'a RouteTable,
    pub assets: &'a AssetIndex,
    pub config: &'a ResolvedConfig,
}

impl LinkContext<'_> {
    fn broken(&self, target: &str) -> ReferenceError {
        ReferenceError::BrokenLink {
            page: self.page.to_string(),
            target: target.to_string(),
        }
    }

    /// New destination for a link, or `None` to keep it as written.
    fn rewrite_link(&self, dest: &str) -> Result<Option<String>, ReferenceError> {
        if dest.is_empty() || dest.starts_with('#') || routes::is_external(dest) {
            return Ok(None);
        }
        let (path, suffix) = routes::split_suffix(dest);
        if path.starts_with('/') {
            if self.routes.contains(path) {
                return Ok(Some(routes::href(&self.config.link_root(), dest)));
            }
            if self.assets.contains(path) {
                return Ok(Some(format!("{}{suffix}", self.config.asset_url(path))));
            }
            return Err(self.broken(dest));
        }
        if path.ends_with(".md") {
            let route = routes::resolve_relative(self.dir, path)
                .and_then(|rel| self.routes.doc_file_route(&rel))
                .ok_or_else(|| self.broken(dest))?;
            return Ok(Some(routes::href(
                &self.config.link_root(),
                &format!("{route}{suffix}"),
            )));
        }
        let target = routes::resolve_relative(self.route, path).ok_or_else(|| self.broken(dest))?;
        if self.routes.contains(&target) {
            return Ok(Some(routes::href(
                &self.config.link_root(),
                &format!("{target}{suffix}"),
            )));
        }
        if self.assets.contains(&target) {
            return Ok(Some(format!("{}{suffix}", self.config.asset_url(&target))));
        }
        Err(self.broken(dest))
    }

    fn rewrite_image(&self, dest: &str) -> Result<Option<String>, ReferenceError> {
        if dest.is_empty() || routes::is_external(dest) {
            return Ok(None);
        }
        let asset = if dest.starts_with('/') {
            dest.to_string()
        } else {
            routes::resolve_relative(self.route, dest).ok_or_else(|| self.broken(dest))?
        };
        let asset = self
            .assets
            .require(self.page, &asset)
            .map_err(|_| self.broken(dest))?;
        Ok(Some(self.config.asset_url(&asset)))
    }
}

fn rewrite_event<'a>(event: Event<'a>, ctx: &LinkContext<'_>) -> Result<Event<'a>, ReferenceError> {
    Ok(match event {
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => {
            let dest_url = match ctx.rewrite_link(&dest_url)? {
                Some(new) => CowStr::from(new),
                None => dest_url,
            };
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            })
        }
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => {
            let dest_url = match ctx.rewrite_image(&dest_url)? {
                Some(new) => CowStr::from(new),
                None => dest_url,
            };
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            })
        }
        Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
            let lang = info.split_whitespace().next().unwrap_or_default();
            let lang = if ctx.config.theme.prism.highlights(lang) {
                CowStr::from(lang.to_string())
            } else {
                CowStr::from("")
            };
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(lang)))
        }
        other => other,
    })
}

/// Render a page body, rewriting internal links and failing on broken ones.
pub fn render(md: &str, ctx: &LinkContext<'_>) -> Result<String, ReferenceError> {
    let events = Parser::new_ext(md, options())
        .map(|event| rewrite_event(event, ctx))
        .collect::<Result<Vec<_>, _>>()?;

    let mut out = String::new();
    md_html::push_html(&mut out, events.into_iter());
    Ok(out)
}
