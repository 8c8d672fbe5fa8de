//! Per-section media extraction.
//!
//! A raw section can carry media in three places, collected strictly in
//! this order: its direct `media` field, its gallery `items`, and entries
//! of an array-shaped `content` payload tagged as media. Contributions are
//! concatenated as found; the same reference appearing in two places is
//! reported twice. Only the direct field becomes a section's canonical
//! `media`; the other two sources feed the project-wide manifest.

use serde_json::Value;

use crate::media::MediaRef;
use crate::record::canonical::{Section, SectionKind};
use crate::record::model::SectionDef;

/// Classify a raw section's directly declared media. This is the canonical
/// `media` field of the enriched section, so it must not fold in gallery
/// items or content blocks: those reappear on a second pass and would
/// compound.
pub fn declared(def: &SectionDef) -> Vec<MediaRef> {
    match &def.media {
        Some(direct) => direct.iter().map(|raw| raw.to_media()).collect(),
        None => Vec::new(),
    }
}

/// Extract every media reference from a raw section, in source order.
pub fn from_def(def: &SectionDef) -> Vec<MediaRef> {
    let mut media = declared(def);
    if def.kind.as_deref() == Some("gallery") {
        if let Some(items) = &def.items {
            media.extend(items.iter().filter_map(MediaRef::from_value));
        }
    }
    media.extend(content_media(&def.content));
    media
}

/// Manifest contributions that exist only on the built section: gallery
/// items materialized by specialization, and media blocks in the canonical
/// content payload. Appended after [`from_def`] when aggregating `allMedia`,
/// never stored back on the section.
pub fn section_extras(section: &Section) -> Vec<MediaRef> {
    let mut media = Vec::new();
    if section.kind == SectionKind::Gallery {
        media.extend(section.items.iter().filter_map(MediaRef::from_value));
    }
    media.extend(content_media(&section.content));
    media
}

/// Media embedded in an array-shaped content payload: entries tagged
/// `media`, `image`, or `video` that carry a usable `src`.
fn content_media(content: &Value) -> Vec<MediaRef> {
    let Value::Array(entries) = content else {
        return Vec::new();
    };
    entries
        .iter()
        .filter(|entry| {
            matches!(
                entry.get("type").and_then(Value::as_str),
                Some("media" | "image" | "video")
            )
        })
        .filter_map(MediaRef::from_value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn def(value: Value) -> SectionDef {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn direct_media_comes_before_gallery_items() {
        let section = def(json!({
            "type": "gallery",
            "media": ["direct.png"],
            "items": ["item.mp4"]
        }));
        let media = from_def(&section);
        let srcs: Vec<_> = media.iter().map(|m| m.src.as_str()).collect();
        assert_eq!(srcs, ["direct.png", "item.mp4"]);
    }

    #[test]
    fn gallery_items_only_count_for_gallery_sections() {
        let section = def(json!({
            "type": "process",
            "items": ["item.png"]
        }));
        assert!(from_def(&section).is_empty());
    }

    #[test]
    fn content_blocks_tagged_as_media_contribute() {
        let section = def(json!({
            "content": [
                { "type": "text", "body": "intro" },
                { "type": "image", "src": "inline.png", "caption": "Inline" },
                { "type": "video", "src": "inline.mp4" },
                { "type": "media" }
            ]
        }));
        let media = from_def(&section);
        assert_eq!(media.len(), 2);
        assert_eq!(media[0].src, "inline.png");
        assert_eq!(media[0].caption, "Inline");
        assert!(media[1].is_video);
    }

    #[test]
    fn duplicates_across_sources_are_kept() {
        let section = def(json!({
            "type": "gallery",
            "media": ["same.png"],
            "items": ["same.png"]
        }));
        assert_eq!(from_def(&section).len(), 2);
    }

    #[test]
    fn declared_media_excludes_items_and_content_blocks() {
        let section = def(json!({
            "type": "gallery",
            "media": ["direct.png"],
            "items": ["item.mp4"],
            "content": [{ "type": "image", "src": "inline.png" }]
        }));
        let media = declared(&section);
        assert_eq!(media.len(), 1);
        assert_eq!(media[0].src, "direct.png");
    }

    #[test]
    fn section_extras_cover_gallery_items_and_content_blocks() {
        let section: Section = serde_json::from_value(json!({
            "id": "g",
            "type": "gallery",
            "title": "G",
            "layout": "gallery",
            "media": [
                { "src": "direct.png", "type": "image", "isVideoContent": false, "caption": "", "aspect": "auto" }
            ],
            "items": ["clip.mp4"],
            "content": [{ "type": "image", "src": "inline.png" }]
        }))
        .unwrap();
        let extras = section_extras(&section);
        let srcs: Vec<_> = extras.iter().map(|m| m.src.as_str()).collect();
        assert_eq!(srcs, ["clip.mp4", "inline.png"]);
    }

    #[test]
    fn section_extras_skip_items_outside_galleries() {
        let section: Section = serde_json::from_value(json!({
            "id": "press",
            "type": "default",
            "title": "Press",
            "layout": "cards",
            "items": ["quote.png"]
        }))
        .unwrap();
        assert!(section_extras(&section).is_empty());
    }
}
