//! Content loading and validation.
//!
//! All site copy lives in a single `content/site.toml`: the hero, the impact
//! stats band, the participant stories, and the standalone sections. This
//! module parses that file into [`SiteContent`] and enforces the few
//! structural rules the renderer depends on.
//!
//! ## Content file layout
//!
//! ```toml
//! [hero]
//! kicker = "A different kind of economy"
//! heading = "Work that builds people"
//! background = "hero/workshop.jpg"
//! body = "Markdown intro copy."
//!
//! [[stats]]
//! value = "87%"
//! label = "retention after 12 months"
//!
//! [[stories]]
//! slug = "maria"
//! name = "Maria"
//! role = "Custodian, second year"
//! quote = "I found somewhere to belong."
//! photo = "stories/maria.jpg"
//! video = "stories/maria"        # optional, extension-less
//! body = "Full story in markdown."
//!
//! [[sections]]
//! slug = "problem"
//! heading = "The Problem"
//! body = "Markdown body."
//! ```
//!
//! ## Validation
//!
//! - Story slugs must be non-empty and unique (they become file names).
//! - Section slugs must be non-empty and unique for the same reason.

use crate::types::{ImpactStat, Section, Story};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Content file not found: {0}")]
    NotFound(PathBuf),
    #[error("Empty slug in {0}")]
    EmptySlug(&'static str),
    #[error("Duplicate slug \"{0}\"")]
    DuplicateSlug(String),
}

/// Everything the renderer needs, parsed from `content/site.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteContent {
    /// Index hero (its `slug` is ignored; it renders inline).
    pub hero: Section,
    /// Impact stats band, rendered in file order.
    #[serde(default)]
    pub stats: Vec<ImpactStat>,
    /// Participant stories, rendered in file order.
    #[serde(default)]
    pub stories: Vec<Story>,
    /// Standalone narrative pages (problem, solution, get-involved).
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl SiteContent {
    /// Enforce the slug rules the page writers depend on.
    pub fn validate(&self) -> Result<(), ContentError> {
        let mut story_slugs = BTreeSet::new();
        for story in &self.stories {
            if story.slug.is_empty() {
                return Err(ContentError::EmptySlug("stories"));
            }
            if !story_slugs.insert(story.slug.as_str()) {
                return Err(ContentError::DuplicateSlug(story.slug.clone()));
            }
        }

        let mut section_slugs = BTreeSet::new();
        for section in &self.sections {
            if section.slug.is_empty() {
                return Err(ContentError::EmptySlug("sections"));
            }
            if !section_slugs.insert(section.slug.as_str()) {
                return Err(ContentError::DuplicateSlug(section.slug.clone()));
            }
        }
        Ok(())
    }
}

/// Load and validate the content file.
pub fn load_content(path: &Path) -> Result<SiteContent, ContentError> {
    if !path.exists() {
        return Err(ContentError::NotFound(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path)?;
    let content: SiteContent = toml::from_str(&raw)?;
    content.validate()?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"
[hero]
heading = "Work that builds people"
body = "Intro."
"#;

    fn full_content() -> String {
        format!(
            r#"{MINIMAL}
[[stats]]
value = "87%"
label = "retention after 12 months"

[[stories]]
slug = "maria"
name = "Maria"
role = "Custodian"
quote = "I found somewhere to belong."
photo = "stories/maria.jpg"
body = "Story body."

[[sections]]
slug = "problem"
heading = "The Problem"
body = "Body."
"#
        )
    }

    #[test]
    fn minimal_content_parses() {
        let content: SiteContent = toml::from_str(MINIMAL).unwrap();
        assert_eq!(content.hero.heading, "Work that builds people");
        assert!(content.stats.is_empty());
        assert!(content.stories.is_empty());
        assert!(content.sections.is_empty());
        assert!(content.validate().is_ok());
    }

    #[test]
    fn full_content_parses_and_validates() {
        let content: SiteContent = toml::from_str(&full_content()).unwrap();
        assert_eq!(content.stories.len(), 1);
        assert_eq!(content.sections.len(), 1);
        assert!(content.validate().is_ok());
    }

    #[test]
    fn duplicate_story_slug_rejected() {
        let toml = format!(
            r#"{MINIMAL}
[[stories]]
slug = "maria"
name = "Maria"
role = "r"
quote = "q"
photo = "p.jpg"
body = "b"

[[stories]]
slug = "maria"
name = "Other Maria"
role = "r"
quote = "q"
photo = "p2.jpg"
body = "b"
"#
        );
        let content: SiteContent = toml::from_str(&toml).unwrap();
        let err = content.validate().unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSlug(s) if s == "maria"));
    }

    #[test]
    fn empty_story_slug_rejected() {
        let toml = format!(
            r#"{MINIMAL}
[[stories]]
slug = ""
name = "Maria"
role = "r"
quote = "q"
photo = "p.jpg"
body = "b"
"#
        );
        let content: SiteContent = toml::from_str(&toml).unwrap();
        assert!(matches!(
            content.validate(),
            Err(ContentError::EmptySlug("stories"))
        ));
    }

    #[test]
    fn sectionless_hero_slug_is_fine() {
        // The hero's slug is unused; it defaults to empty without tripping
        // section validation.
        let content: SiteContent = toml::from_str(MINIMAL).unwrap();
        assert_eq!(content.hero.slug, "");
        assert!(content.validate().is_ok());
    }

    #[test]
    fn empty_section_slug_rejected() {
        let toml = format!(
            r#"{MINIMAL}
[[sections]]
heading = "The Problem"
body = "b"
"#
        );
        let content: SiteContent = toml::from_str(&toml).unwrap();
        assert!(matches!(
            content.validate(),
            Err(ContentError::EmptySlug("sections"))
        ));
    }

    #[test]
    fn unknown_root_key_rejected() {
        let toml = format!("{MINIMAL}\nheros = 1\n");
        let result: Result<SiteContent, _> = toml::from_str(&toml);
        assert!(result.is_err());
    }

    // =========================================================================
    // load_content tests
    // =========================================================================

    #[test]
    fn load_content_missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = load_content(&tmp.path().join("site.toml"));
        assert!(matches!(result, Err(ContentError::NotFound(_))));
    }

    #[test]
    fn load_content_reads_and_validates() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        fs::write(&path, full_content()).unwrap();

        let content = load_content(&path).unwrap();
        assert_eq!(content.stories[0].slug, "maria");
    }

    #[test]
    fn load_content_surfaces_validation_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        fs::write(
            &path,
            format!(
                r#"{MINIMAL}
[[sections]]
heading = "No slug"
body = "b"
"#
            ),
        )
        .unwrap();

        assert!(matches!(
            load_content(&path),
            Err(ContentError::EmptySlug("sections"))
        ));
    }
}
