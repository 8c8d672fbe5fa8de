//! Per-section enrichment and kind-specialized processing.
//!
//! [`build`] lifts one raw section into its canonical form in two steps:
//! generic enrichment (defaulted id/title/kind, layout resolution,
//! classification of the declared media, navigation metadata) followed by a
//! specialized pass keyed on the section kind that shapes `items` and, for
//! a few kinds, overrides the layout. Raw inputs are never mutated.
//! Positional fields are provisional until [`refresh_positions`] runs over
//! the final section order.

use serde_json::{Map, Value};

use crate::media::{extract, MediaRef};
use crate::normalize::layout;
use crate::record::canonical::{Layout, NavigationMeta, Section, SectionKind};
use crate::record::model::SectionDef;

/// Keys recomputed on every pass; stale copies from a re-ingested canonical
/// record are dropped rather than carried as passthrough.
const DERIVED_KEYS: [&str; 6] =
    ["index", "isFirst", "isLast", "hasMedia", "hasContent", "navigationMeta"];

/// Build the canonical form of one raw section at the given position.
pub(crate) fn build(def: &SectionDef, index: usize) -> Section {
    let mut section = specialize(def, enrich(def, index));
    derive_flags(&mut section);
    section
}

/// Re-derive positional metadata and presence flags over the final order.
/// Idempotent, and the single source of truth for these fields.
pub(crate) fn refresh_positions(sections: &mut [Section]) {
    let count = sections.len();
    for (index, section) in sections.iter_mut().enumerate() {
        section.index = index;
        section.is_first = index == 0;
        section.is_last = index + 1 == count;
        derive_flags(section);
    }
}

/// Wrap a content payload into display items: arrays pass through, a
/// present scalar becomes a single item, absent content becomes no items.
pub(crate) fn wrap_content(content: &Value) -> Vec<Value> {
    if !layout::content_present(content) {
        return Vec::new();
    }
    match content {
        Value::Array(entries) => entries.clone(),
        other => vec![other.clone()],
    }
}

fn enrich(def: &SectionDef, index: usize) -> Section {
    let id = non_empty(&def.id)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("section-{index}"));
    let title = non_empty(&def.title)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("Section {}", index + 1));
    let kind = SectionKind::parse(non_empty(&def.kind).unwrap_or("default"));
    let navigable = def.navigable != Some(false);
    // An explicit zero (or negative) order is honored; only absence falls
    // back to the section position.
    let navigation_order = def.navigation_order.unwrap_or(index as i64);
    let navigation_meta = navigable.then(|| NavigationMeta {
        label: non_empty(&def.navigation_label).unwrap_or(&title).to_owned(),
        anchor: non_empty(&def.anchor).unwrap_or(&id).to_owned(),
        order: navigation_order,
    });

    Section {
        id,
        kind,
        title,
        content: def.content.clone(),
        media: extract::declared(def),
        items: def.items.clone().unwrap_or_default(),
        layout: layout::resolve(def),
        index,
        is_first: index == 0,
        is_last: false,
        has_media: false,
        has_content: false,
        anchor: def.anchor.clone(),
        navigation_label: def.navigation_label.clone(),
        // The resolved order is pinned so it survives a re-run even when
        // synthesis shifts this section's position.
        navigation_order: if navigable { Some(navigation_order) } else { def.navigation_order },
        navigation_meta,
        navigable,
        extra: strip_derived(&def.extra),
    }
}

/// The kind-keyed second pass over an enriched section.
fn specialize(def: &SectionDef, mut section: Section) -> Section {
    match section.kind {
        SectionKind::Iteration | SectionKind::Outcomes | SectionKind::Takeaways => {
            section.items = wrap_content(&def.content);
        }
        SectionKind::Gallery => {
            // Gallery always renders as a gallery, explicit layout included.
            section.layout = Layout::Gallery;
            section.items = gallery_items(def);
        }
        SectionKind::Methodology | SectionKind::Process => {
            section.layout = Layout::Steps;
            section.items = step_items(&def.content);
        }
        _ => {}
    }
    section
}

/// Gallery items come from authored `items` when that field is present
/// (an explicit empty list stays empty), else from every media reference
/// the section carries, declared media and tagged content blocks alike.
/// Every entry is classified and serialized in canonical media shape.
fn gallery_items(def: &SectionDef) -> Vec<Value> {
    let media = match &def.items {
        Some(items) => items.iter().filter_map(MediaRef::from_value).collect(),
        None => extract::from_def(def),
    };
    media_values(media)
}

/// Array content maps to step items with a 1-based `stepNumber` injected on
/// objects that lack one; non-array content yields no steps.
fn step_items(content: &Value) -> Vec<Value> {
    let Value::Array(entries) = content else {
        return Vec::new();
    };
    entries
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            let mut step = entry.clone();
            if let Value::Object(fields) = &mut step {
                fields
                    .entry("stepNumber")
                    .or_insert_with(|| Value::from(position as u64 + 1));
            }
            step
        })
        .collect()
}

pub(crate) fn media_values(media: Vec<MediaRef>) -> Vec<Value> {
    media
        .into_iter()
        .filter_map(|item| serde_json::to_value(item).ok())
        .collect()
}

fn derive_flags(section: &mut Section) {
    section.has_media = !section.media.is_empty()
        || (section.kind == SectionKind::Gallery && !section.items.is_empty());
    section.has_content = layout::content_present(&section.content);
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|text| !text.is_empty())
}

fn strip_derived(extra: &Map<String, Value>) -> Map<String, Value> {
    let mut extra = extra.clone();
    for key in DERIVED_KEYS {
        extra.remove(key);
    }
    extra
}
