//! Advisory lint over canonical records.
//!
//! Everything here is legal input that renders anyway; the linter points
//! out what will probably render badly: images without an aspect hint,
//! references that classify as nothing in particular, sections with nothing
//! to show, and vocabulary typos. Findings are returned and also emitted as
//! `tracing` warnings under the `folio::lint` target.

use std::fmt;

use crate::media::{MediaKind, MediaRef};
use crate::record::canonical::{Project, Section, SectionKind};

/// One advisory finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintWarning {
    /// Id of the section the finding concerns, or `None` for the project
    /// itself.
    pub section: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl LintWarning {
    fn project(message: impl Into<String>) -> Self {
        Self { section: None, message: message.into() }
    }

    fn section(section: &Section, message: impl Into<String>) -> Self {
        Self { section: Some(section.id.clone()), message: message.into() }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.section {
            Some(id) => write!(f, "section '{id}': {}", self.message),
            None => write!(f, "project: {}", self.message),
        }
    }
}

/// Lint a canonical record, covering the hero media and every section.
pub fn lint_project(project: &Project) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    if let Some(media) = project.hero.as_ref().and_then(|hero| hero.media.as_ref()) {
        lint_media(&media.to_media(), None, &mut warnings);
    }

    for section in &project.sections {
        if section.kind.is_unknown() {
            warnings.push(LintWarning::section(
                section,
                format!("unknown section kind '{}'", section.kind.as_str()),
            ));
        }
        if section.layout.is_unknown() {
            warnings.push(LintWarning::section(
                section,
                format!("unknown layout '{}'", section.layout.as_str()),
            ));
        }
        if !section.has_content && !section.has_media {
            warnings.push(LintWarning::section(section, "section has neither content nor media"));
        }

        for media in &section.media {
            lint_media(media, Some(section), &mut warnings);
        }
        if section.kind == SectionKind::Gallery {
            for media in section.items.iter().filter_map(MediaRef::from_value) {
                lint_media(&media, Some(section), &mut warnings);
            }
        }
    }

    for warning in &warnings {
        match &warning.section {
            Some(id) => tracing::warn!(target: "folio::lint", section = %id, "{}", warning.message),
            None => tracing::warn!(target: "folio::lint", "{}", warning.message),
        }
    }
    warnings
}

fn lint_media(media: &MediaRef, section: Option<&Section>, warnings: &mut Vec<LintWarning>) {
    let mut push = |message: String| {
        warnings.push(match section {
            Some(section) => LintWarning::section(section, message),
            None => LintWarning::project(message),
        });
    };

    if media.kind == MediaKind::Other {
        push(format!("unclassifiable media reference '{}'", media.src));
    }
    if media.kind == MediaKind::Image && media.aspect == "auto" {
        push(format!("image '{}' has no aspect hint", media.src));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_value;
    use serde_json::json;

    fn findings(input: serde_json::Value) -> Vec<String> {
        lint_project(&normalize_value(&input))
            .into_iter()
            .map(|w| w.to_string())
            .collect()
    }

    #[test]
    fn clean_record_has_no_findings() {
        let warnings = findings(json!({
            "sections": [{
                "id": "build",
                "content": "how" ,
                "media": [{ "src": "a.png", "aspect": "16:9" }]
            }]
        }));
        // The synthesized gallery repeats the section media, so its items
        // are linted too; a hinted image stays quiet in both places.
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn flags_images_without_aspect_hints() {
        let warnings = findings(json!({
            "sections": [{ "id": "shots", "media": ["bare.png"] }]
        }));
        assert!(warnings.iter().any(|w| w.contains("'bare.png' has no aspect hint")));
    }

    #[test]
    fn flags_unclassifiable_references() {
        let warnings = findings(json!({
            "hero": { "media": "mystery.bin" }
        }));
        assert!(warnings.iter().any(|w| w.starts_with("project:")
            && w.contains("unclassifiable media reference 'mystery.bin'")));
    }

    #[test]
    fn flags_empty_sections_and_unknown_vocabulary() {
        let warnings = findings(json!({
            "sections": [
                { "id": "blank" },
                { "id": "odd", "type": "case-study", "layout": "masonry", "content": "x" }
            ]
        }));
        assert!(warnings.iter().any(|w| w.contains("section 'blank'")
            && w.contains("neither content nor media")));
        assert!(warnings.iter().any(|w| w.contains("unknown section kind 'case-study'")));
        assert!(warnings.iter().any(|w| w.contains("unknown layout 'masonry'")));
    }
}
