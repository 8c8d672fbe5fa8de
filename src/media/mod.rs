//! Media classification, path resolution, and per-section extraction.
//!
//! The canonical [`MediaRef`] is the one media shape the rest of the crate
//! deals in: wherever a raw record carries a bare path string, an object
//! with a `src`, or a gallery item, it is lifted into this form.

pub mod extract;
pub mod kind;
pub mod paths;

pub use kind::{is_video, MediaKind};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A fully classified media reference.
///
/// `kind` serializes as `type` and `is_video` as `isVideoContent`; both are
/// derived from `src` at construction, never trusted from input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    /// Raw reference string: URL, absolute path, or bare filename.
    pub src: String,
    /// Suffix-derived classification.
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Convenience flag for renderers, equal to `kind == Video`.
    #[serde(rename = "isVideoContent")]
    pub is_video: bool,
    /// Display caption, empty when the source carried none.
    #[serde(default)]
    pub caption: String,
    /// Aspect-ratio hint for layout, `"auto"` when unspecified.
    #[serde(default = "default_aspect")]
    pub aspect: String,
}

fn default_aspect() -> String {
    "auto".to_owned()
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|text| !text.is_empty())
}

impl MediaRef {
    /// Classify a bare reference string.
    pub fn from_path(src: impl Into<String>) -> Self {
        let src = src.into();
        let kind = MediaKind::from_source(&src);
        Self { src, is_video: kind.is_video(), kind, caption: String::new(), aspect: default_aspect() }
    }

    /// Lift an untyped JSON value into a reference, when it has a usable
    /// shape: a string, or an object with a string `src`. Anything else
    /// yields `None` and is skipped by callers. The caption reads from
    /// `caption`, falling back to `alt` when that is missing or empty.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(path) => Some(Self::from_path(path.clone())),
            Value::Object(map) => {
                let src = map.get("src")?.as_str()?.to_owned();
                let mut media = Self::from_path(src);
                let caption = non_empty_str(map.get("caption"))
                    .or_else(|| non_empty_str(map.get("alt")));
                if let Some(caption) = caption {
                    media.caption = caption.to_owned();
                }
                if let Some(aspect) = map.get("aspect").and_then(Value::as_str) {
                    media.aspect = aspect.to_owned();
                }
                Some(media)
            }
            _ => None,
        }
    }
}
