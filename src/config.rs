//! Site configuration module.
//!
//! Handles loading and validating `site.toml`. Config files are sparse:
//! stock defaults cover everything, and a user file only needs the keys it
//! wants to override. Unknown keys are rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! cdn_origin = "https://cdn.custodianeconomy.org"
//!
//! [site]
//! title = "Custodian Economy"
//! tagline = "Work that builds people"
//!
//! [images]
//! quality = 80              # CDN transform quality (0-100) for hero/backdrop URLs
//!
//! [colors.light]
//! background = "#faf7f2"
//! ink = "#1f2a24"
//! ink_muted = "#5c6660"
//! accent = "#b4552d"
//! accent_hover = "#8f3f1e"
//!
//! [colors.dark]
//! background = "#15201b"
//! ink = "#ece7de"
//! ink_muted = "#9aa49e"
//! accent = "#e0805a"
//! accent_hover = "#efa482"
//! ```
//!
//! The backend URL and API key for `custodian-site check` come from the
//! `SUPABASE_URL` / `SUPABASE_ANON_KEY` environment (or a `.env` file),
//! never from `site.toml` — keys don't belong in a committed config file.

use crate::types::ColorPalette;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
///
/// All fields have defaults; user files only specify overrides. Unknown
/// keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// CDN origin all relative asset paths resolve against.
    #[serde(default = "default_cdn_origin")]
    pub cdn_origin: String,
    /// Site identity (title, tagline).
    pub site: SiteMeta,
    /// CDN transform settings for single-URL renders (hero backdrops).
    pub images: ImagesConfig,
    /// Color palettes for light and dark modes.
    pub colors: ColorConfig,
}

fn default_cdn_origin() -> String {
    crate::media::DEFAULT_CDN_ORIGIN.to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            cdn_origin: default_cdn_origin(),
            site: SiteMeta::default(),
            images: ImagesConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.quality > 100 {
            return Err(ConfigError::Validation(
                "images.quality must be 0-100".into(),
            ));
        }
        if self.cdn_origin.is_empty() {
            return Err(ConfigError::Validation("cdn_origin must not be empty".into()));
        }
        if self.site.title.is_empty() {
            return Err(ConfigError::Validation("site.title must not be empty".into()));
        }
        Ok(())
    }
}

/// Site identity shown in the header, titles, and footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    /// Site title (header wordmark, `<title>` suffix).
    pub title: String,
    /// One-line tagline under the wordmark.
    pub tagline: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Custodian Economy".to_string(),
            tagline: "Work that builds people".to_string(),
        }
    }
}

/// CDN transform settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Quality (0-100) requested for hero and backdrop URLs. Responsive
    /// story sets carry no quality parameter — the CDN default applies.
    pub quality: u8,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self { quality: 80 }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode palette.
    pub light: ColorPalette,
    /// Dark mode palette.
    pub dark: ColorPalette,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorPalette::default_light(),
            dark: ColorPalette::default_dark(),
        }
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Load config from a `site.toml` file.
///
/// A missing file yields the stock defaults; a present file is parsed with
/// unknown-key rejection and validated.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let config = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Custodian Economy Site Configuration
# ====================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# CDN origin all relative asset paths resolve against.
cdn_origin = "https://cdn.custodianeconomy.org"

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
title = "Custodian Economy"
tagline = "Work that builds people"

# ---------------------------------------------------------------------------
# CDN image transforms
# ---------------------------------------------------------------------------
[images]
# Quality (0-100) requested for hero and backdrop image URLs.
quality = 80

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#faf7f2"
ink = "#1f2a24"
ink_muted = "#5c6660"     # Nav, captions, stat labels
accent = "#b4552d"
accent_hover = "#8f3f1e"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#15201b"
ink = "#ece7de"
ink_muted = "#9aa49e"
accent = "#e0805a"
accent_hover = "#efa482"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-ink: {light_ink};
    --color-ink-muted: {light_ink_muted};
    --color-accent: {light_accent};
    --color-accent-hover: {light_accent_hover};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-ink: {dark_ink};
        --color-ink-muted: {dark_ink_muted};
        --color-accent: {dark_accent};
        --color-accent-hover: {dark_accent_hover};
    }}
}}"#,
        light_bg = colors.light.background,
        light_ink = colors.light.ink,
        light_ink_muted = colors.light.ink_muted,
        light_accent = colors.light.accent,
        light_accent_hover = colors.light.accent_hover,
        dark_bg = colors.dark.background,
        dark_ink = colors.dark.ink,
        dark_ink_muted = colors.dark.ink_muted,
        dark_accent = colors.dark.accent,
        dark_accent_hover = colors.dark.accent_hover,
    )
}

/// Generate CSS custom properties for a single palette (per-story override).
pub fn generate_palette_css(palette: &ColorPalette) -> String {
    format!(
        r#":root {{
    --color-bg: {bg};
    --color-ink: {ink};
    --color-ink-muted: {ink_muted};
    --color-accent: {accent};
    --color-accent-hover: {accent_hover};
}}"#,
        bg = palette.background,
        ink = palette.ink,
        ink_muted = palette.ink_muted,
        accent = palette.accent,
        accent_hover = palette.accent_hover,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_colors() {
        let config = SiteConfig::default();
        assert_eq!(config.colors.light.background, "#faf7f2");
        assert_eq!(config.colors.dark.background, "#15201b");
    }

    #[test]
    fn default_config_has_cdn_origin() {
        let config = SiteConfig::default();
        assert_eq!(config.cdn_origin, crate::media::DEFAULT_CDN_ORIGIN);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors.light]
background = "#fafafa"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        // Overridden value
        assert_eq!(config.colors.light.background, "#fafafa");
        // Default values preserved
        assert_eq!(config.colors.light.ink, "#1f2a24");
        assert_eq!(config.colors.dark.background, "#15201b");
        assert_eq!(config.images.quality, 80);
    }

    #[test]
    fn parse_site_meta() {
        let toml = r#"
[site]
title = "CE"
tagline = "tag"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.site.title, "CE");
        assert_eq!(config.site.tagline, "tag");
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#f0f0f0".to_string();
        colors.dark.background = "#1a1a1a".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0"));
        assert!(css.contains("--color-bg: #1a1a1a"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("site.toml")).unwrap();
        assert_eq!(config.colors.light.background, "#faf7f2");
        assert_eq!(config.site.title, "Custodian Economy");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("site.toml");

        fs::write(
            &config_path,
            r##"
cdn_origin = "https://assets.example.org"

[colors.light]
background = "#123456"
"##,
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.cdn_origin, "https://assets.example.org");
        assert_eq!(config.colors.light.background, "#123456");
        // Unspecified values should be defaults
        assert_eq!(config.colors.dark.background, "#15201b");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("site.toml");

        fs::write(&config_path, "this is not valid toml [[[").unwrap();

        let result = load_config(&config_path);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("site.toml");
        fs::write(
            &config_path,
            r#"
[images]
quality = 200
"#,
        )
        .unwrap();

        let result = load_config(&config_path);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // CSS generation tests
    // =========================================================================

    #[test]
    fn generate_css_includes_all_variables() {
        let css = generate_color_css(&ColorConfig::default());
        assert!(css.contains("--color-bg:"));
        assert!(css.contains("--color-ink:"));
        assert!(css.contains("--color-ink-muted:"));
        assert!(css.contains("--color-accent:"));
        assert!(css.contains("--color-accent-hover:"));
    }

    #[test]
    fn generate_css_includes_dark_mode_media_query() {
        let css = generate_color_css(&ColorConfig::default());
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
    }

    #[test]
    fn palette_css_has_no_media_query() {
        let css = generate_palette_css(&ColorPalette::default_light());
        assert!(css.contains("--color-accent:"));
        assert!(!css.contains("@media"));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[images]
qualty = 80
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let toml_str = r#"
[imagez]
quality = 80
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let toml_str = r##"
[colors.light]
bg = "#fff"
"##;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_quality_boundary_ok() {
        let mut config = SiteConfig::default();
        config.images.quality = 100;
        assert!(config.validate().is_ok());

        config.images.quality = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_empty_origin_rejected() {
        let mut config = SiteConfig::default();
        config.cdn_origin = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cdn_origin"));
    }

    #[test]
    fn validate_empty_title_rejected() {
        let mut config = SiteConfig::default();
        config.site.title = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let content = stock_config_toml();
        let _: toml::Value = toml::from_str(content).expect("stock config must be valid TOML");
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let content = stock_config_toml();
        let config: SiteConfig = toml::from_str(content).unwrap();
        assert_eq!(config.cdn_origin, crate::media::DEFAULT_CDN_ORIGIN);
        assert_eq!(config.images.quality, 80);
        assert_eq!(config.colors.light.background, "#faf7f2");
        assert_eq!(config.colors.dark.background, "#15201b");
        assert_eq!(config.site.title, "Custodian Economy");
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[site]"));
        assert!(content.contains("[images]"));
        assert!(content.contains("[colors.light]"));
        assert!(content.contains("[colors.dark]"));
    }
}
