//! HTML site generation.
//!
//! Takes the loaded config and content and writes the final static site.
//!
//! ## Generated Pages
//!
//! - **Index** (`/index.html`): hero, impact stats band, story cards
//! - **Section pages** (`/{slug}.html`): problem, solution, get-involved
//! - **Stories index** (`/stories.html`): grid of all story cards
//! - **Story pages** (`/stories/{slug}.html`): full story with media
//!
//! ## Responsive media
//!
//! Images render as `<picture>` with AVIF and WebP `<source>` srcsets across
//! the four site breakpoints and a JPEG `<img>` fallback; videos render as
//! `<video>` with webm-before-mp4 sources. All URLs come from
//! [`crate::media::Cdn`] — this module never assembles a URL by hand.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping. Markdown
//! bodies go through pulldown-cmark. CSS is embedded at compile time from
//! `static/style.css`, with color custom properties generated from config.

use crate::config::{self, SiteConfig};
use crate::content::SiteContent;
use crate::media::{
    BREAKPOINT_WIDTHS, Cdn, FALLBACK_WIDTH, ImageFormat, RenderIntent, SourceEntry,
    breakpoint_height,
};
use crate::nav::render_nav;
use crate::types::{ImpactStat, Section, Story};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Navigation links to /{0}.html but no [[sections]] entry has slug \"{0}\"")]
    MissingSectionPage(String),
}

/// Portrait aspect ratio used for story photos (4:5).
pub const STORY_PHOTO_RATIO: f64 = 4.0 / 5.0;

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Generate the full site into `output_dir`.
///
/// Returns the written pages as `(title, relative path)` pairs, in write
/// order, for CLI reporting.
pub fn generate(
    config: &SiteConfig,
    content: &SiteContent,
    output_dir: &Path,
) -> Result<Vec<(String, String)>, GenerateError> {
    let cdn = Cdn::new(config.cdn_origin.clone());
    let css = site_css(config);
    let mut pages = Vec::new();

    // Every nav route must land on a page this call writes; the root and
    // the stories index are always written, the rest must have a section.
    for link in crate::nav::nav_links() {
        if link.path == "/" || link.path == "/stories" {
            continue;
        }
        let slug = link.path.trim_start_matches('/');
        if !content.sections.iter().any(|s| s.slug == slug) {
            return Err(GenerateError::MissingSectionPage(slug.to_string()));
        }
    }

    fs::create_dir_all(output_dir)?;

    let index = render_index(config, content, &cdn, &css);
    fs::write(output_dir.join("index.html"), index.into_string())?;
    pages.push(("Home".to_string(), "index.html".to_string()));

    for section in &content.sections {
        let page = render_section_page(config, section, &cdn, &css);
        let filename = format!("{}.html", section.slug);
        fs::write(output_dir.join(&filename), page.into_string())?;
        pages.push((section.heading.clone(), filename));
    }

    let stories_index = render_stories_index(config, content, &cdn, &css);
    fs::write(output_dir.join("stories.html"), stories_index.into_string())?;
    pages.push(("Stories".to_string(), "stories.html".to_string()));

    let stories_dir = output_dir.join("stories");
    fs::create_dir_all(&stories_dir)?;
    for story in &content.stories {
        // Per-story palette overrides append after the base CSS so they win.
        let story_css = match &story.palette {
            Some(palette) => format!("{}\n\n{}", css, config::generate_palette_css(palette)),
            None => css.clone(),
        };
        let page = render_story_page(config, story, &cdn, &story_css);
        let filename = format!("{}.html", story.slug);
        fs::write(stories_dir.join(&filename), page.into_string())?;
        pages.push((story.name.clone(), format!("stories/{filename}")));
    }

    Ok(pages)
}

/// Assemble the page CSS: generated color properties, then the static sheet.
fn site_css(config: &SiteConfig) -> String {
    format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC)
}

// ============================================================================
// Media components
// ============================================================================

/// `sizes` attribute derived from the breakpoint set: each breakpoint caps
/// itself via `max-width`, the widest is the unconditional tail.
fn sizes_attribute() -> String {
    let mut parts: Vec<String> = BREAKPOINT_WIDTHS[..BREAKPOINT_WIDTHS.len() - 1]
        .iter()
        .map(|w| format!("(max-width: {w}px) {w}px"))
        .collect();
    parts.push(format!("{}px", BREAKPOINT_WIDTHS[BREAKPOINT_WIDTHS.len() - 1]));
    parts.join(", ")
}

/// srcset string with `N w` width descriptors, in entry order.
fn srcset(entries: &[SourceEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{} {}w", e.url, e.width))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Responsive `<picture>`: AVIF source, WebP source, JPEG fallback `<img>`.
///
/// The fallback `<img>` carries explicit width/height (the dimensions its
/// URL was minted for) so the browser can reserve layout space before the
/// bytes arrive.
pub fn picture(cdn: &Cdn, path: &str, aspect_ratio: f64, alt: &str) -> Markup {
    let set = cdn.responsive_set(path, aspect_ratio);
    let sizes = sizes_attribute();
    let fallback_height = breakpoint_height(FALLBACK_WIDTH, aspect_ratio);
    html! {
        picture {
            source type="image/avif" srcset=(srcset(&set.avif)) sizes=(sizes);
            source type="image/webp" srcset=(srcset(&set.webp)) sizes=(sizes);
            img src=(set.fallback)
                width=(FALLBACK_WIDTH)
                height=(fallback_height)
                alt=(alt)
                loading="lazy";
        }
    }
}

/// `<video>` with webm-before-mp4 sources, poster from the story photo.
pub fn video_player(cdn: &Cdn, path: &str, poster_path: &str, quality: u8) -> Markup {
    let sources = cdn.video_sources(path);
    let poster = cdn.asset_url(
        poster_path,
        &RenderIntent {
            width: Some(BREAKPOINT_WIDTHS[2]),
            format: Some(ImageFormat::Jpeg),
            quality: Some(quality),
            ..RenderIntent::default()
        },
    );
    html! {
        video controls preload="metadata" poster=(poster) {
            source src=(sources.webm) type="video/webm";
            source src=(sources.mp4) type="video/mp4";
        }
    }
}

/// Single backdrop URL for section/hero backgrounds: wide breakpoint, WebP,
/// config-driven quality.
fn backdrop_url(cdn: &Cdn, path: &str, quality: u8) -> String {
    cdn.asset_url(
        path,
        &RenderIntent {
            width: Some(BREAKPOINT_WIDTHS[3]),
            format: Some(ImageFormat::Webp),
            quality: Some(quality),
            ..RenderIntent::default()
        },
    )
}

/// Render a markdown body to markup. pulldown-cmark output is trusted
/// (our own content file), hence the PreEscaped.
fn markdown(body: &str) -> Markup {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(body));
    PreEscaped(out)
}

// ============================================================================
// Page chrome
// ============================================================================

/// Renders the base HTML document structure.
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (css) }
            }
            body {
                (content)
            }
        }
    }
}

/// Site header: wordmark plus navigation for the page at `current`.
fn site_header(config: &SiteConfig, current: &str) -> Markup {
    html! {
        header.site-header {
            a.wordmark href="/" {
                span.wordmark-title { (config.site.title) }
                span.wordmark-tagline { (config.site.tagline) }
            }
            nav.site-nav {
                (render_nav(current))
            }
        }
    }
}

fn site_footer(config: &SiteConfig) -> Markup {
    html! {
        footer.site-footer {
            p { (config.site.title) " — " (config.site.tagline) }
        }
    }
}

/// One story card: portrait, name, role, pull quote, link to the story page.
fn story_card(cdn: &Cdn, story: &Story) -> Markup {
    html! {
        a.story-card href={ "/stories/" (story.slug) ".html" } {
            (picture(cdn, &story.photo, STORY_PHOTO_RATIO, &story.name))
            div.story-card-text {
                span.story-name { (story.name) }
                span.story-role { (story.role) }
                blockquote.story-quote { (story.quote) }
            }
        }
    }
}

fn stats_band(stats: &[ImpactStat]) -> Markup {
    html! {
        @if !stats.is_empty() {
            section.stats-band {
                @for stat in stats {
                    div.stat {
                        span.stat-value { (stat.value) }
                        span.stat-label { (stat.label) }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the index page: hero, stats band, story cards.
fn render_index(config: &SiteConfig, content: &SiteContent, cdn: &Cdn, css: &str) -> Markup {
    let hero = &content.hero;
    let body = html! {
        (site_header(config, "/"))
        main.index-page {
            section.hero {
                @if let Some(bg) = &hero.background {
                    img.hero-backdrop src=(backdrop_url(cdn, bg, config.images.quality)) alt="";
                }
                div.hero-text {
                    @if let Some(kicker) = &hero.kicker {
                        span.kicker { (kicker) }
                    }
                    h1 { (hero.heading) }
                    div.hero-body { (markdown(&hero.body)) }
                }
            }
            (stats_band(&content.stats))
            @if !content.stories.is_empty() {
                section.story-grid {
                    h2 { "Stories" }
                    div.cards {
                        @for story in &content.stories {
                            (story_card(cdn, story))
                        }
                    }
                }
            }
        }
        (site_footer(config))
    };
    base_document(&config.site.title, css, body)
}

/// Renders a standalone section page (problem, solution, get-involved).
fn render_section_page(config: &SiteConfig, section: &Section, cdn: &Cdn, css: &str) -> Markup {
    let current = format!("/{}", section.slug);
    let title = format!("{} - {}", section.heading, config.site.title);
    let body = html! {
        (site_header(config, &current))
        main.section-page {
            @if let Some(bg) = &section.background {
                img.section-backdrop src=(backdrop_url(cdn, bg, config.images.quality)) alt="";
            }
            article {
                @if let Some(kicker) = &section.kicker {
                    span.kicker { (kicker) }
                }
                h1 { (section.heading) }
                (markdown(&section.body))
            }
        }
        (site_footer(config))
    };
    base_document(&title, css, body)
}

/// Renders the stories index: the full card grid.
fn render_stories_index(config: &SiteConfig, content: &SiteContent, cdn: &Cdn, css: &str) -> Markup {
    let title = format!("Stories - {}", config.site.title);
    let body = html! {
        (site_header(config, "/stories"))
        main.stories-page {
            h1 { "Stories" }
            div.cards {
                @for story in &content.stories {
                    (story_card(cdn, story))
                }
            }
        }
        (site_footer(config))
    };
    base_document(&title, css, body)
}

/// Renders a single story page: media, quote, markdown body.
fn render_story_page(config: &SiteConfig, story: &Story, cdn: &Cdn, css: &str) -> Markup {
    let current = format!("/stories/{}", story.slug);
    let title = format!("{} - {}", story.name, config.site.title);
    let body = html! {
        (site_header(config, &current))
        main.story-page {
            figure.story-media {
                @if let Some(video) = &story.video {
                    (video_player(cdn, video, &story.photo, config.images.quality))
                } @else {
                    (picture(cdn, &story.photo, STORY_PHOTO_RATIO, &story.name))
                }
            }
            article {
                h1 { (story.name) }
                p.story-role { (story.role) }
                blockquote.story-quote { (story.quote) }
                (markdown(&story.body))
            }
        }
        (site_footer(config))
    };
    base_document(&title, css, body)
}
