//! Whole-project normalization: section enrichment, media aggregation, and
//! synthesis of the overview/outcomes/takeaways/gallery sections.
//!
//! The pass is total and pure: any input produces a canonical [`Project`],
//! absent or non-object input produces [`Project::empty`], and nothing is
//! mutated in place. Normalizing a canonical record again reproduces it:
//! synthesized sections are recognized and not duplicated, the synthesized
//! gallery is excluded from media aggregation, and positional metadata is
//! re-derived over the final order.

use serde_json::Value;

use crate::media::extract;
use crate::normalize::section;
use crate::record::canonical::{Layout, NavigationMeta, Project, Section, SectionKind};
use crate::record::lenient;
use crate::record::model::ProjectDef;

/// Reserved id of the synthesized project-wide gallery section. A section
/// carrying it is treated as synthesized: never duplicated, never counted
/// into `allMedia` again.
pub const GALLERY_SECTION_ID: &str = "section-media-gallery";

const OVERVIEW_SECTION_ID: &str = "section-overview";
const OUTCOMES_SECTION_ID: &str = "section-outcomes";
const TAKEAWAYS_SECTION_ID: &str = "section-takeaways";

/// Keys the pass itself writes; stale copies from a re-ingested canonical
/// record are dropped from the passthrough extras.
const DERIVED_PROJECT_KEYS: [&str; 2] = ["sectionCount", "allMedia"];

/// Normalize a parsed raw record into its canonical form.
#[tracing::instrument(skip(def))]
pub fn normalize(def: &ProjectDef) -> Project {
    let mut sections: Vec<Section> = def
        .sections
        .iter()
        .enumerate()
        .map(|(index, raw)| section::build(raw, index))
        .collect();

    // Hero media leads the manifest; then every section in display order
    // contributes its raw extraction plus the extras specialization put on
    // the built section (materialized gallery items, content blocks). The
    // synthesized gallery only mirrors the manifest, so it never feeds back
    // into it.
    let mut all_media = Vec::new();
    if let Some(hero) = &def.hero {
        if let Some(media) = &hero.media {
            all_media.push(media.to_media());
        }
    }
    for (raw, built) in def.sections.iter().zip(&sections) {
        if built.id == GALLERY_SECTION_ID {
            continue;
        }
        all_media.extend(extract::from_def(raw));
        all_media.extend(extract::section_extras(built));
    }

    let outcomes = passthrough_or_null(&def.outcomes);

    // Synthesis order matters: the overview goes in first so the appended
    // sections' navigation orders count it.
    let description = def.description.as_deref().filter(|text| !text.is_empty());
    if let Some(description) = description {
        if !has_kind(&sections, &SectionKind::Overview) {
            let mut synthesized = synthesized_section(
                OVERVIEW_SECTION_ID,
                SectionKind::Overview,
                "Overview",
                "Overview",
                -1,
                Layout::Hero,
            );
            synthesized.content = Value::String(description.to_owned());
            sections.insert(0, synthesized);
        }
    }

    // Falsy payloads (`false`, zero, the empty string) carry no outcomes
    // worth a section; empty arrays and objects still get one.
    if lenient::truthy(&outcomes) && !has_kind(&sections, &SectionKind::Outcomes) {
        let mut synthesized = synthesized_section(
            OUTCOMES_SECTION_ID,
            SectionKind::Outcomes,
            "Project Outcomes",
            "Outcomes",
            sections.len() as i64,
            Layout::Cards,
        );
        synthesized.content = outcomes.clone();
        synthesized.items = section::wrap_content(&outcomes);
        sections.push(synthesized);
    }

    if !def.takeaways.is_empty() && !has_kind(&sections, &SectionKind::Takeaways) {
        let mut synthesized = synthesized_section(
            TAKEAWAYS_SECTION_ID,
            SectionKind::Takeaways,
            "Key Takeaways",
            "Takeaways",
            sections.len() as i64,
            Layout::Cards,
        );
        // Items double as array content so a re-run re-wraps them intact.
        synthesized.content = Value::Array(def.takeaways.clone());
        synthesized.items = def.takeaways.clone();
        sections.push(synthesized);
    }

    let has_synthesized_gallery = sections
        .iter()
        .any(|section| section.kind == SectionKind::Gallery && section.id == GALLERY_SECTION_ID);
    if !all_media.is_empty() && !has_synthesized_gallery {
        let mut synthesized = synthesized_section(
            GALLERY_SECTION_ID,
            SectionKind::Gallery,
            "Project Gallery",
            "Gallery",
            sections.len() as i64,
            Layout::Gallery,
        );
        synthesized.items = section::media_values(all_media.clone());
        sections.push(synthesized);
    }

    section::refresh_positions(&mut sections);
    tracing::debug!(
        sections = sections.len(),
        media = all_media.len(),
        "normalized project record"
    );

    let mut extra = def.extra.clone();
    for key in DERIVED_PROJECT_KEYS {
        extra.remove(key);
    }

    Project {
        id: def.id.clone(),
        title: def.title.clone(),
        description: def.description.clone(),
        short_description: def.short_description.clone(),
        categories: def.categories.clone(),
        technologies: def.technologies.clone(),
        links: def.links.clone(),
        media: def.media.clone(),
        hero: def.hero.clone(),
        date: def.date.clone(),
        section_count: sections.len(),
        sections,
        outcomes,
        takeaways: def.takeaways.clone(),
        full_content: passthrough_or_null(&def.full_content),
        all_media,
        extra,
    }
}

/// Total boundary over untyped input: `null` and non-object values produce
/// the canonical empty shape instead of an error.
#[tracing::instrument(skip(value))]
pub fn normalize_value(value: &Value) -> Project {
    if value.is_null() {
        return Project::empty();
    }
    if !value.is_object() {
        tracing::warn!("non-object project record, returning the empty shape");
        return Project::empty();
    }
    match serde_json::from_value::<ProjectDef>(value.clone()) {
        Ok(def) => normalize(&def),
        Err(error) => {
            tracing::warn!(%error, "unreadable project record, returning the empty shape");
            Project::empty()
        }
    }
}

fn has_kind(sections: &[Section], kind: &SectionKind) -> bool {
    sections.iter().any(|section| &section.kind == kind)
}

/// Skeleton for a synthesized section. Navigation fields are written both
/// resolved (`navigation_meta`) and as authored-equivalent overrides, so a
/// later pass re-derives the same metadata.
fn synthesized_section(
    id: &str,
    kind: SectionKind,
    title: &str,
    nav_label: &str,
    nav_order: i64,
    layout: Layout,
) -> Section {
    Section {
        id: id.to_owned(),
        kind,
        title: title.to_owned(),
        content: Value::Null,
        media: Vec::new(),
        items: Vec::new(),
        layout,
        index: 0,
        is_first: false,
        is_last: false,
        has_media: false,
        has_content: false,
        anchor: Some(id.to_owned()),
        navigation_label: Some(nav_label.to_owned()),
        navigation_order: Some(nav_order),
        navigation_meta: Some(NavigationMeta {
            label: nav_label.to_owned(),
            anchor: id.to_owned(),
            order: nav_order,
        }),
        navigable: true,
        extra: serde_json::Map::new(),
    }
}

/// Passthrough rule for root `outcomes`/`fullContent`: `null` stays `null`
/// and the empty string collapses to `null`; everything else is kept.
fn passthrough_or_null(value: &Value) -> Value {
    match value {
        Value::String(text) if text.is_empty() => Value::Null,
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalized(value: Value) -> Project {
        normalize_value(&value)
    }

    #[test]
    fn null_and_non_object_inputs_yield_the_empty_shape() {
        assert_eq!(normalized(Value::Null), Project::empty());
        assert_eq!(normalized(json!("just a string")), Project::empty());
        assert_eq!(normalized(json!([1, 2, 3])), Project::empty());
    }

    #[test]
    fn description_synthesizes_a_leading_overview() {
        let project = normalized(json!({ "description": "X", "sections": [] }));
        assert_eq!(project.section_count, 1);
        let overview = &project.sections[0];
        assert_eq!(overview.kind, SectionKind::Overview);
        assert_eq!(overview.layout, Layout::Hero);
        assert_eq!(overview.id, "section-overview");
        assert_eq!(overview.title, "Overview");
        assert_eq!(overview.content, json!("X"));
        let nav = overview.navigation_meta.as_ref().unwrap();
        assert_eq!(nav.order, -1);
        assert!(project.all_media.is_empty());
    }

    #[test]
    fn an_authored_overview_suppresses_synthesis() {
        let project = normalized(json!({
            "description": "X",
            "sections": [{ "type": "overview", "content": "authored" }]
        }));
        assert_eq!(project.section_count, 1);
        assert_eq!(project.sections[0].content, json!("authored"));
    }

    #[test]
    fn root_outcomes_become_a_cards_section() {
        let project = normalized(json!({ "outcomes": ["fast", "cheap"] }));
        assert_eq!(project.section_count, 1);
        let outcomes = &project.sections[0];
        assert_eq!(outcomes.id, "section-outcomes");
        assert_eq!(outcomes.title, "Project Outcomes");
        assert_eq!(outcomes.layout, Layout::Cards);
        assert_eq!(outcomes.items, vec![json!("fast"), json!("cheap")]);
        assert_eq!(outcomes.navigation_meta.as_ref().unwrap().label, "Outcomes");
        assert_eq!(project.outcomes, json!(["fast", "cheap"]));
    }

    #[test]
    fn scalar_outcomes_wrap_into_one_item() {
        let project = normalized(json!({ "outcomes": "shipped on time" }));
        assert_eq!(project.sections[0].items, vec![json!("shipped on time")]);
    }

    #[test]
    fn takeaways_become_a_key_takeaways_section() {
        let project = normalized(json!({ "takeaways": ["keep it simple"] }));
        assert_eq!(project.section_count, 1);
        let takeaways = &project.sections[0];
        assert_eq!(takeaways.id, "section-takeaways");
        assert_eq!(takeaways.title, "Key Takeaways");
        assert_eq!(takeaways.items, vec![json!("keep it simple")]);
    }

    #[test]
    fn gallery_aggregates_hero_and_section_media() {
        let project = normalized(json!({
            "hero": { "media": "hero.mp4" },
            "sections": [
                { "media": ["a.png", "b.png"] },
                { "type": "gallery", "items": ["c.webp"] }
            ]
        }));
        // The authored gallery's items count once as raw input and once as
        // the materialized gallery entries.
        let srcs: Vec<_> = project.all_media.iter().map(|m| m.src.as_str()).collect();
        assert_eq!(srcs, ["hero.mp4", "a.png", "b.png", "c.webp", "c.webp"]);
        assert!(project.all_media[0].is_video);

        let gallery = project.sections.last().unwrap();
        assert_eq!(gallery.id, GALLERY_SECTION_ID);
        assert_eq!(gallery.title, "Project Gallery");
        assert_eq!(gallery.items.len(), 5);
        assert_eq!(gallery.navigation_meta.as_ref().unwrap().order, 2);
    }

    #[test]
    fn raw_gallery_media_and_items_both_count() {
        // A raw gallery section contributes its media array, its authored
        // items, and the gallery entries built from those items; the
        // manifest keeps all of them, never deduplicated.
        let project = normalized(json!({
            "sections": [{ "type": "gallery", "media": ["same.png"], "items": ["same.png"] }]
        }));
        assert_eq!(project.all_media.len(), 3);
        assert!(project.all_media.iter().all(|m| m.src == "same.png"));
    }

    #[test]
    fn positions_are_derived_over_the_final_order() {
        let project = normalized(json!({
            "description": "intro",
            "sections": [{ "title": "Build", "media": "a.png" }],
            "takeaways": ["t"]
        }));
        assert_eq!(project.section_count, 4);
        let ids: Vec<_> = project.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            ["section-overview", "section-0", "section-takeaways", GALLERY_SECTION_ID]
        );
        for (position, section) in project.sections.iter().enumerate() {
            assert_eq!(section.index, position);
            assert_eq!(section.is_first, position == 0);
            assert_eq!(section.is_last, position == 3);
        }
    }

    #[test]
    fn empty_string_passthroughs_collapse_to_null() {
        let project = normalized(json!({ "outcomes": "", "fullContent": "" }));
        assert!(project.outcomes.is_null());
        assert!(project.full_content.is_null());
        assert_eq!(project.section_count, 0);
    }

    #[test]
    fn falsy_outcomes_do_not_synthesize_a_section() {
        for falsy in [json!(false), json!(0), json!("")] {
            let project = normalized(json!({ "outcomes": falsy }));
            assert_eq!(project.section_count, 0, "outcomes {falsy} made a section");
        }
        // An empty array is still a present payload.
        let project = normalized(json!({ "outcomes": [] }));
        assert_eq!(project.section_count, 1);
        assert!(project.sections[0].items.is_empty());
    }

    #[test]
    fn stale_project_aggregates_are_not_carried_as_extras() {
        let project = normalized(json!({
            "sectionCount": 99,
            "allMedia": ["stale.png"],
            "palette": "warm"
        }));
        assert_eq!(project.section_count, 0);
        assert!(project.all_media.is_empty());
        assert_eq!(project.extra["palette"], json!("warm"));
        assert!(!project.extra.contains_key("sectionCount"));
    }

    #[test]
    fn normalizing_canonical_output_is_idempotent() {
        let input = json!({
            "id": "atlas",
            "title": "Atlas",
            "description": "A mapping tool",
            "hero": { "media": "hero.mp4" },
            "sections": [
                { "title": "Build", "media": ["a.png"], "content": "how it was built" },
                { "type": "gallery", "items": ["c.webp", { "src": "d.mov", "caption": "Cut" }] }
            ],
            "outcomes": ["adopted"],
            "takeaways": ["t1", "t2"]
        });
        let first = serde_json::to_value(normalize_value(&input)).unwrap();
        assert_eq!(first["allMedia"].as_array().unwrap().len(), 6);
        let second = serde_json::to_value(normalize_value(&first)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn second_pass_leaves_the_synthesized_gallery_media_free() {
        let first = normalized(json!({ "sections": [{ "media": ["a.png"] }] }));
        let gallery = first.sections.last().unwrap();
        assert_eq!(gallery.id, GALLERY_SECTION_ID);
        assert!(gallery.media.is_empty());

        let second = normalize_value(&serde_json::to_value(&first).unwrap());
        let gallery = second.sections.last().unwrap();
        assert!(gallery.media.is_empty());
        assert_eq!(second.all_media.len(), first.all_media.len());
    }

    #[test]
    fn content_block_media_count_without_sticking_to_the_section() {
        let project = normalized(json!({
            "sections": [{
                "media": ["m.png"],
                "content": [{ "type": "image", "src": "x.png" }]
            }]
        }));
        // Raw extraction and the built section's content both contribute
        // the block; the section itself keeps only its declared ref.
        let srcs: Vec<_> = project.all_media.iter().map(|m| m.src.as_str()).collect();
        assert_eq!(srcs, ["m.png", "x.png", "x.png"]);
        assert_eq!(project.sections[0].media.len(), 1);

        let again = normalize_value(&serde_json::to_value(&project).unwrap());
        assert_eq!(again.all_media.len(), project.all_media.len());
        assert_eq!(again.sections[0].media.len(), 1);
    }
}
