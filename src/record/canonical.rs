//! Canonical project model produced by normalization.
//!
//! Everything here is fully resolved: every section has an id, title, kind,
//! layout, and positional metadata; every media reference is classified.
//! Renderers consume this model directly and never look at raw records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::media::MediaRef;
use crate::record::model::{HeroDef, LinkDef, OneOrMany, RawMediaRef};

/// A normalized project record.
///
/// The six canonical fields (`sections`, `outcomes`, `takeaways`,
/// `fullContent`, `sectionCount`, `allMedia`) always serialize, explicit
/// `null`s included; passthrough fields appear only when the raw record
/// carried them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<LinkDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<OneOrMany<RawMediaRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<HeroDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Enriched sections in final display order, synthesized ones included.
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub outcomes: Value,
    #[serde(default)]
    pub takeaways: Vec<Value>,
    #[serde(default)]
    pub full_content: Value,
    /// Length of `sections`, kept denormalized for renderers.
    #[serde(default)]
    pub section_count: usize,
    /// Flat ordered media manifest: hero media first, then every section's
    /// contributions in section order. Never deduplicated.
    #[serde(default)]
    pub all_media: Vec<MediaRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    /// The canonical empty shape, returned for absent or non-object input.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A fully enriched content section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: SectionKind,
    pub title: String,
    #[serde(default)]
    pub content: Value,
    /// Classified refs extracted from this section's own fields. Omitted
    /// when empty so a round trip does not manufacture a present-but-empty
    /// `media` field.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaRef>,
    /// Kind-specific display items (cards, steps, gallery entries). Always
    /// serialized: an explicit empty list is meaningful to gallery
    /// processing.
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub is_first: bool,
    #[serde(default)]
    pub is_last: bool,
    #[serde(default)]
    pub has_media: bool,
    #[serde(default)]
    pub has_content: bool,
    /// Authored navigation overrides, kept so navigation metadata derives
    /// identically when a canonical record is normalized again.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation_order: Option<i64>,
    /// Absent when the section opted out of navigation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation_meta: Option<NavigationMeta>,
    /// Serialized only when `false`; `true` is the unstated default.
    #[serde(default = "default_true", skip_serializing_if = "skip_if_true")]
    pub navigable: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry for the page-level section navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationMeta {
    pub label: String,
    pub anchor: String,
    /// Sort key. May be negative: the synthesized overview uses `-1` so it
    /// sorts ahead of authored sections.
    pub order: i64,
}

/// Closed section-kind vocabulary plus a passthrough for unknown tags.
///
/// Matching is exact and case-sensitive; an unrecognized tag round-trips
/// verbatim through [`SectionKind::Other`] and receives default handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionKind {
    Overview,
    Problem,
    Research,
    Methodology,
    Process,
    Technical,
    Features,
    Iteration,
    Outcomes,
    Takeaways,
    Future,
    Gallery,
    Video,
    Impact,
    Concept,
    Content,
    Default,
    Other(String),
}

impl SectionKind {
    /// Resolve a raw kind tag.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "overview" => Self::Overview,
            "problem" => Self::Problem,
            "research" => Self::Research,
            "methodology" => Self::Methodology,
            "process" => Self::Process,
            "technical" => Self::Technical,
            "features" => Self::Features,
            "iteration" => Self::Iteration,
            "outcomes" => Self::Outcomes,
            "takeaways" => Self::Takeaways,
            "future" => Self::Future,
            "gallery" => Self::Gallery,
            "video" => Self::Video,
            "impact" => Self::Impact,
            "concept" => Self::Concept,
            "content" => Self::Content,
            "default" => Self::Default,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The wire tag, identical to what [`SectionKind::parse`] accepted.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Overview => "overview",
            Self::Problem => "problem",
            Self::Research => "research",
            Self::Methodology => "methodology",
            Self::Process => "process",
            Self::Technical => "technical",
            Self::Features => "features",
            Self::Iteration => "iteration",
            Self::Outcomes => "outcomes",
            Self::Takeaways => "takeaways",
            Self::Future => "future",
            Self::Gallery => "gallery",
            Self::Video => "video",
            Self::Impact => "impact",
            Self::Concept => "concept",
            Self::Content => "content",
            Self::Default => "default",
            Self::Other(tag) => tag,
        }
    }

    /// True for tags outside the known vocabulary.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Other(_))
    }
}

impl Default for SectionKind {
    fn default() -> Self {
        Self::Default
    }
}

impl Serialize for SectionKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SectionKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::parse(&tag))
    }
}

/// Resolved layout hint for a section.
///
/// An explicit out-of-vocabulary layout is carried verbatim in
/// [`Layout::Custom`] rather than corrected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    Hero,
    Gallery,
    Cards,
    Steps,
    Split,
    FullMedia,
    TextOnly,
    Default,
    Custom(String),
}

impl Layout {
    /// Resolve a raw layout tag.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "hero" => Self::Hero,
            "gallery" => Self::Gallery,
            "cards" => Self::Cards,
            "steps" => Self::Steps,
            "split" => Self::Split,
            "fullMedia" => Self::FullMedia,
            "textOnly" => Self::TextOnly,
            "default" => Self::Default,
            other => Self::Custom(other.to_owned()),
        }
    }

    /// The wire tag.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Hero => "hero",
            Self::Gallery => "gallery",
            Self::Cards => "cards",
            Self::Steps => "steps",
            Self::Split => "split",
            Self::FullMedia => "fullMedia",
            Self::TextOnly => "textOnly",
            Self::Default => "default",
            Self::Custom(tag) => tag,
        }
    }

    /// True for tags outside the known vocabulary.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::Default
    }
}

impl Serialize for Layout {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Layout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::parse(&tag))
    }
}

fn default_true() -> bool {
    true
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn skip_if_true(value: &bool) -> bool {
    *value
}
