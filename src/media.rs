//! CDN media URL construction.
//!
//! Every image and video on the site lives on the CDN origin and is delivered
//! through its on-the-fly transform endpoint: a relative asset path plus a
//! query string of single-letter transform parameters (`w`, `h`, `f`, `q`,
//! `c`). This module is the single place those URLs are minted, so format and
//! quality policy changes happen in one spot.
//!
//! ## Responsive sets
//!
//! [`Cdn::responsive_set`] fans a path out across the four site breakpoints
//! ([`BREAKPOINT_WIDTHS`]) in each modern format ([`MODERN_FORMATS`], AVIF
//! preferred over WebP), plus a single JPEG fallback at the desktop
//! breakpoint. This mirrors `<picture>` negotiation: the browser takes the
//! best format it supports, and the universally decodable raster is the
//! safety net.
//!
//! ## Contract
//!
//! All functions here are pure, synchronous, and total. Absent intent fields
//! are omitted from the query string, never emitted empty. Paths and
//! parameter values are not validated — anything the caller passes is
//! forwarded to the CDN verbatim (the `format` field is already constrained
//! to the supported enum). Identical inputs always produce byte-identical
//! URLs.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Default CDN origin all relative asset paths resolve against.
pub const DEFAULT_CDN_ORIGIN: &str = "https://cdn.custodianeconomy.org";

/// The four site breakpoints in ascending order: mobile, tablet, desktop,
/// wide. Consumers depend on this exact cardinality and ordering when
/// computing `sizes` attributes — do not reorder or extend.
pub const BREAKPOINT_WIDTHS: [u32; 4] = [375, 768, 1024, 1440];

/// Modern image formats in preference order. `<picture>` sources are emitted
/// in this order so capable browsers pick AVIF before WebP.
pub const MODERN_FORMATS: [ImageFormat; 2] = [ImageFormat::Avif, ImageFormat::Webp];

/// Width of the single legacy-format fallback URL (the desktop breakpoint).
pub const FALLBACK_WIDTH: u32 = 1024;

/// Format of the fallback URL: the universally supported legacy raster.
pub const FALLBACK_FORMAT: ImageFormat = ImageFormat::Jpeg;

/// Aspect ratio used when a caller has no better information (16:9).
pub const DEFAULT_ASPECT_RATIO: f64 = 16.0 / 9.0;

/// Characters escaped in free-form query values (the crop parameter).
/// Everything the CDN treats as a delimiter, plus whitespace and quoting.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'\'')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'&')
    .add(b'=')
    .add(b'+')
    .add(b'%');

/// Image formats the CDN transform endpoint understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Avif,
    Webp,
    Jpeg,
}

impl ImageFormat {
    /// Value sent as the `f` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Avif => "avif",
            ImageFormat::Webp => "webp",
            ImageFormat::Jpeg => "jpeg",
        }
    }
}

/// Optional transform parameters for a single asset URL.
///
/// Every field is independent and optional; absent fields are simply left
/// out of the query string. There is no default substitution — an intent
/// with no fields set yields a bare asset URL with no query string at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderIntent {
    /// Target width in pixels (`w`).
    pub width: Option<u32>,
    /// Target height in pixels (`h`).
    pub height: Option<u32>,
    /// Output format (`f`).
    pub format: Option<ImageFormat>,
    /// Encoding quality 0-100 (`q`). Values outside the range are forwarded
    /// as-is; the CDN clamps.
    pub quality: Option<u8>,
    /// Crop mode (`c`), e.g. `"faces"` or `"entropy"`. Free-form, passed to
    /// the CDN percent-encoded but otherwise uninterpreted.
    pub crop: Option<String>,
}

/// One entry of a responsive source set: a URL and the width it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub url: String,
    pub width: u32,
}

/// A full responsive source set for one image asset.
///
/// `avif` and `webp` each hold exactly one entry per breakpoint, ascending
/// by width in [`BREAKPOINT_WIDTHS`] order. `fallback` is a single JPEG URL
/// at [`FALLBACK_WIDTH`] for browsers that negotiate neither modern format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsiveSet {
    pub avif: Vec<SourceEntry>,
    pub webp: Vec<SourceEntry>,
    pub fallback: String,
}

/// Sibling video URLs for a single clip. `{path}.webm` and `{path}.mp4` are
/// assumed to exist side by side at the origin; no existence check is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSources {
    pub webm: String,
    pub mp4: String,
}

/// Handle on a CDN origin. Construct one from config (or [`Cdn::default`])
/// and mint URLs through it; all methods are pure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cdn {
    origin: String,
}

impl Default for Cdn {
    fn default() -> Self {
        Self::new(DEFAULT_CDN_ORIGIN)
    }
}

impl Cdn {
    /// Create a handle for `origin`. A single trailing slash is trimmed so
    /// joined URLs never carry a double slash.
    pub fn new(origin: impl Into<String>) -> Self {
        let mut origin = origin.into();
        if origin.ends_with('/') {
            origin.pop();
        }
        Self { origin }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Build a single asset URL: origin + path + the query parameters present
    /// in `intent`, in fixed `w`, `h`, `f`, `q`, `c` order.
    ///
    /// The path is opaque — any string is accepted and joined uncritically.
    /// Numeric and enum-derived values need no escaping; the free-form crop
    /// value is percent-encoded.
    pub fn asset_url(&self, path: &str, intent: &RenderIntent) -> String {
        let mut url = format!("{}/{}", self.origin, path);
        let mut sep = '?';
        let mut push = |url: &mut String, key: char, value: &str| {
            url.push(sep);
            url.push(key);
            url.push('=');
            url.push_str(value);
            sep = '&';
        };

        if let Some(w) = intent.width {
            push(&mut url, 'w', &w.to_string());
        }
        if let Some(h) = intent.height {
            push(&mut url, 'h', &h.to_string());
        }
        if let Some(f) = intent.format {
            push(&mut url, 'f', f.as_str());
        }
        if let Some(q) = intent.quality {
            push(&mut url, 'q', &q.to_string());
        }
        if let Some(c) = &intent.crop {
            push(&mut url, 'c', &utf8_percent_encode(c, QUERY_VALUE).to_string());
        }
        url
    }

    /// Build the full responsive set for an image: one AVIF and one WebP
    /// entry per breakpoint (ascending), plus the JPEG fallback at 1024.
    ///
    /// Every entry's height is `round(width / aspect_ratio)` with ties
    /// rounding away from zero (`f64::round`): 375 at 16:9 gives 211.
    pub fn responsive_set(&self, path: &str, aspect_ratio: f64) -> ResponsiveSet {
        let entries = |format: ImageFormat| -> Vec<SourceEntry> {
            BREAKPOINT_WIDTHS
                .iter()
                .map(|&width| SourceEntry {
                    url: self.asset_url(
                        path,
                        &RenderIntent {
                            width: Some(width),
                            height: Some(breakpoint_height(width, aspect_ratio)),
                            format: Some(format),
                            ..RenderIntent::default()
                        },
                    ),
                    width,
                })
                .collect()
        };

        ResponsiveSet {
            avif: entries(MODERN_FORMATS[0]),
            webp: entries(MODERN_FORMATS[1]),
            fallback: self.asset_url(
                path,
                &RenderIntent {
                    width: Some(FALLBACK_WIDTH),
                    height: Some(breakpoint_height(FALLBACK_WIDTH, aspect_ratio)),
                    format: Some(FALLBACK_FORMAT),
                    ..RenderIntent::default()
                },
            ),
        }
    }

    /// Build the webm/mp4 sibling URLs for a video clip. Plain concatenation,
    /// no transform parameters — video is served as uploaded.
    pub fn video_sources(&self, path: &str) -> VideoSources {
        VideoSources {
            webm: format!("{}/{path}.webm", self.origin),
            mp4: format!("{}/{path}.mp4", self.origin),
        }
    }
}

/// Height for a breakpoint entry: `round(width / aspect_ratio)`.
///
/// Public so markup renderers can stamp the fallback `<img>` with the same
/// dimensions its URL was minted for.
pub fn breakpoint_height(width: u32, aspect_ratio: f64) -> u32 {
    (width as f64 / aspect_ratio).round() as u32
}
