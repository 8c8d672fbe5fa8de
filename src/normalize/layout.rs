//! Layout resolution for raw sections.
//!
//! A fixed precedence list, first match wins, evaluated on the raw shape
//! before any specialized processing. Total: every section resolves to
//! exactly one layout.

use serde_json::Value;

use crate::record::canonical::Layout;
use crate::record::model::SectionDef;

/// Resolve the layout for a raw section.
///
/// Precedence: explicit `layout` verbatim, then kind-specific defaults
/// (gallery, overview, outcomes/takeaways, methodology/process,
/// technical/features/iteration), then presence heuristics over declared
/// media and content, then `default`.
pub fn resolve(def: &SectionDef) -> Layout {
    if let Some(tag) = def.layout.as_deref().filter(|tag| !tag.is_empty()) {
        return Layout::parse(tag);
    }
    match def.kind.as_deref() {
        Some("gallery") => return Layout::Gallery,
        Some("overview") => return Layout::Hero,
        Some("outcomes" | "takeaways") => return Layout::Cards,
        Some("methodology" | "process") => return Layout::Steps,
        Some("technical" | "features" | "iteration") => return Layout::Split,
        _ => {}
    }
    // Media presence means at least one usable ref, matching `hasMedia`.
    let media = def.media.as_ref().is_some_and(|refs| !refs.is_empty());
    let content = content_present(&def.content);
    match (media, content) {
        (true, true) => Layout::Split,
        (true, false) => Layout::FullMedia,
        (false, true) => Layout::TextOnly,
        (false, false) => Layout::Default,
    }
}

/// Whether a content payload counts as present: non-null and not the empty
/// string. This is also the `hasContent` rule.
pub(crate) fn content_present(content: &Value) -> bool {
    match content {
        Value::Null => false,
        Value::String(text) => !text.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn def(value: serde_json::Value) -> SectionDef {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn explicit_layout_wins_verbatim() {
        let section = def(json!({ "type": "gallery", "layout": "cards" }));
        assert_eq!(resolve(&section), Layout::Cards);
        let section = def(json!({ "layout": "masonry" }));
        assert_eq!(resolve(&section), Layout::Custom("masonry".to_owned()));
    }

    #[test]
    fn empty_layout_string_is_ignored() {
        let section = def(json!({ "type": "overview", "layout": "" }));
        assert_eq!(resolve(&section), Layout::Hero);
    }

    #[test]
    fn kind_defaults_apply_in_order() {
        assert_eq!(resolve(&def(json!({ "type": "gallery" }))), Layout::Gallery);
        assert_eq!(resolve(&def(json!({ "type": "overview" }))), Layout::Hero);
        assert_eq!(resolve(&def(json!({ "type": "outcomes" }))), Layout::Cards);
        assert_eq!(resolve(&def(json!({ "type": "takeaways" }))), Layout::Cards);
        assert_eq!(resolve(&def(json!({ "type": "methodology" }))), Layout::Steps);
        assert_eq!(resolve(&def(json!({ "type": "process" }))), Layout::Steps);
        assert_eq!(resolve(&def(json!({ "type": "technical" }))), Layout::Split);
        assert_eq!(resolve(&def(json!({ "type": "features" }))), Layout::Split);
        assert_eq!(resolve(&def(json!({ "type": "iteration" }))), Layout::Split);
    }

    #[test]
    fn presence_heuristics_cover_the_rest() {
        let both = def(json!({ "media": "a.png", "content": "text" }));
        assert_eq!(resolve(&both), Layout::Split);
        let media_only = def(json!({ "media": "a.png" }));
        assert_eq!(resolve(&media_only), Layout::FullMedia);
        let content_only = def(json!({ "content": "text" }));
        assert_eq!(resolve(&content_only), Layout::TextOnly);
        let neither = def(json!({}));
        assert_eq!(resolve(&neither), Layout::Default);
    }

    #[test]
    fn empty_string_content_counts_as_absent() {
        let section = def(json!({ "content": "" }));
        assert_eq!(resolve(&section), Layout::Default);
        let section = def(json!({ "content": "", "media": "a.png" }));
        assert_eq!(resolve(&section), Layout::FullMedia);
    }

    #[test]
    fn media_without_usable_refs_counts_as_absent() {
        let section = def(json!({ "media": [] }));
        assert_eq!(resolve(&section), Layout::Default);
        let section = def(json!({ "media": [], "content": "text" }));
        assert_eq!(resolve(&section), Layout::TextOnly);
        let section = def(json!({ "media": 0, "content": "text" }));
        assert_eq!(resolve(&section), Layout::TextOnly);
        let section = def(json!({ "media": [17], "content": "text" }));
        assert_eq!(resolve(&section), Layout::TextOnly);
    }

    #[test]
    fn unknown_kinds_fall_through_to_presence_rules() {
        let section = def(json!({ "type": "case-study", "content": "text" }));
        assert_eq!(resolve(&section), Layout::TextOnly);
    }

    #[test]
    fn resolution_is_deterministic() {
        let section = def(json!({ "type": "research", "media": ["a.png"], "content": ["x"] }));
        assert_eq!(resolve(&section), resolve(&section));
    }
}
