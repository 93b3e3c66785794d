//! Shared content types.
//!
//! These are the passive shapes exchanged between the content file
//! (`content/site.toml`), the site config, and the renderer. They carry no
//! behavior — just fields with serde derives — and are serialized verbatim
//! into the debug manifest written by `build --manifest`.

use serde::{Deserialize, Serialize};

/// A participant story: the core unit of the site.
///
/// Stories render as cards on the index page and as standalone pages at
/// `/stories/{slug}.html`. The `photo` and `video` fields are relative CDN
/// asset paths, resolved through [`crate::media::Cdn`] at render time —
/// never absolute URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Story {
    /// URL slug (`stories/{slug}.html`). Must be unique and non-empty.
    pub slug: String,
    /// Participant's name, used as the page title and card heading.
    pub name: String,
    /// One-line role or program stage shown under the name.
    pub role: String,
    /// Pull quote displayed on the card and at the top of the story page.
    pub quote: String,
    /// CDN path of the portrait photo.
    pub photo: String,
    /// CDN path of an optional video clip (extension-less; `.webm`/`.mp4`
    /// siblings are assumed to exist at the origin).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    /// Markdown body of the full story.
    pub body: String,
    /// Optional palette override applied to this story's page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<ColorPalette>,
}

/// Color tokens for one rendering mode.
///
/// Generated into CSS custom properties by
/// [`crate::config::generate_color_css`]; values are emitted verbatim, so
/// any CSS color syntax works.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorPalette {
    /// Page background.
    pub background: String,
    /// Primary text color.
    pub ink: String,
    /// Muted/secondary text (nav, captions, stat labels).
    pub ink_muted: String,
    /// Accent color (links, stat values, buttons).
    pub accent: String,
    /// Accent hover state.
    pub accent_hover: String,
}

impl ColorPalette {
    pub fn default_light() -> Self {
        Self {
            background: "#faf7f2".to_string(),
            ink: "#1f2a24".to_string(),
            ink_muted: "#5c6660".to_string(),
            accent: "#b4552d".to_string(),
            accent_hover: "#8f3f1e".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#15201b".to_string(),
            ink: "#ece7de".to_string(),
            ink_muted: "#9aa49e".to_string(),
            accent: "#e0805a".to_string(),
            accent_hover: "#efa482".to_string(),
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::default_light()
    }
}

/// A generic page section: the hero and the standalone narrative pages
/// (problem, solution, get-involved) all share this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Section {
    /// URL slug (`/{slug}.html`). Empty for the hero, which renders inline
    /// on the index instead of as its own page.
    #[serde(default)]
    pub slug: String,
    /// Section heading.
    pub heading: String,
    /// Small label rendered above the heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kicker: Option<String>,
    /// CDN path of an optional backdrop image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Markdown body.
    pub body: String,
}

/// One entry of the impact stats band, e.g. `value = "87%"`,
/// `label = "retention after 12 months"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImpactStat {
    pub value: String,
    pub label: String,
}
