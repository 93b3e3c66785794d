//! # Custodian Site
//!
//! Static site generator for the Custodian Economy storytelling site.
//! Content lives in one TOML file, media lives on a transform CDN, and the
//! output is plain HTML with responsive `<picture>`/`<video>` markup — no
//! JavaScript runtime on the published site.
//!
//! # Architecture
//!
//! ```text
//! site.toml + content/site.toml  →  build   →  dist/          (HTML pages)
//! SUPABASE_URL / SUPABASE_ANON_KEY → check  →  probe report   (stdout)
//! ```
//!
//! The build is a pure function from (config, content) to HTML: no network,
//! no image encoding, no cache. All media is delivered by the CDN's
//! on-the-fly transform endpoint, so the generator's only media job is
//! minting deterministic URLs — that logic is centralized in [`media`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`media`] | CDN URL construction: single asset URLs, responsive source sets, video source pairs |
//! | [`types`] | Shared content shapes (`Story`, `ColorPalette`, `Section`, `ImpactStat`) |
//! | [`content`] | Loads and validates `content/site.toml` |
//! | [`config`] | `site.toml` loading, validation, and palette-to-CSS generation |
//! | [`nav`] | Fixed route-to-label navigation with active-link detection |
//! | [`render`] | Maud HTML generation — pages, `<picture>`/`<video>` components |
//! | [`probe`] | Independent read probes against the hosted data backend |
//! | [`output`] | CLI output formatting — pure `format_*` + `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## CDN transforms over local encoding
//!
//! The generator never encodes pixels. Delegating to the CDN's query-string
//! transform API keeps the build instant and dependency-light: the
//! generator ships URLs, the CDN ships pixels. The trade-off is that URL
//! construction becomes a contract — format keys, breakpoint widths, and
//! rounding are pinned by tests in [`media`] because consumers depend on
//! them byte-for-byte.
//!
//! ## Two-tier `<picture>` negotiation
//!
//! Story and hero images emit AVIF and WebP sources across four fixed
//! breakpoints (375/768/1024/1440) with a single JPEG fallback at 1024.
//! Capable browsers take the best format they support; the raster fallback
//! is the universal safety net.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): compile-time
//! checked, type-safe, XSS-safe by default, and no template directory to
//! ship or drift out of sync.

pub mod config;
pub mod content;
pub mod media;
pub mod nav;
pub mod output;
pub mod probe;
pub mod render;
pub mod types;
