//! Boundary model for raw project records.
//!
//! These types mirror what authors actually write: optional everything,
//! string-or-object media, arrays that are sometimes scalars. Parsing is
//! deliberately forgiving: fields that do not fit degrade to their empty
//! form rather than failing the record. The canonical model produced by
//! normalization lives in [`crate::record::canonical`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::foundation::error::{FolioError, FolioResult};
use crate::media::MediaRef;
use crate::record::lenient;

/// A raw project record as authored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDef {
    #[serde(default, deserialize_with = "lenient::opt_string::deserialize")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string::deserialize")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string::deserialize")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string::deserialize")]
    pub short_description: Option<String>,
    #[serde(default, deserialize_with = "lenient::seq::deserialize")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "lenient::seq::deserialize")]
    pub technologies: Vec<String>,
    #[serde(default, deserialize_with = "lenient::seq::deserialize")]
    pub links: Vec<LinkDef>,
    /// Project-level media, passed through to the canonical record as-is.
    #[serde(default, deserialize_with = "lenient_media")]
    pub media: Option<OneOrMany<RawMediaRef>>,
    /// Hero banner block; anything other than an object reads as absent.
    #[serde(default, deserialize_with = "lenient::opt::deserialize")]
    pub hero: Option<HeroDef>,
    #[serde(default, deserialize_with = "lenient::seq::deserialize")]
    pub sections: Vec<SectionDef>,
    /// Opaque outcomes payload; a dedicated section is synthesized from it.
    #[serde(default)]
    pub outcomes: Value,
    #[serde(default, deserialize_with = "lenient::seq::deserialize")]
    pub takeaways: Vec<Value>,
    #[serde(default)]
    pub full_content: Value,
    #[serde(default, deserialize_with = "lenient::opt_string::deserialize")]
    pub date: Option<String>,
    /// Unrecognized fields, preserved verbatim through normalization.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProjectDef {
    /// Parse a raw record from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FolioResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FolioError::parse(format!("parse project record JSON: {e}")))
    }

    /// Parse a raw record from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FolioResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .map_err(|e| FolioError::io(format!("open project record '{}': {e}", path.display())))?;
        Self::from_reader(BufReader::new(f))
    }
}

/// A raw content section as authored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDef {
    #[serde(default, deserialize_with = "lenient::opt_string::deserialize")]
    pub id: Option<String>,
    /// Section kind tag (`type` on the wire).
    #[serde(rename = "type", default, deserialize_with = "lenient::opt_string::deserialize")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string::deserialize")]
    pub title: Option<String>,
    /// Opaque content payload: string, array, object, or absent.
    #[serde(default)]
    pub content: Value,
    #[serde(default, deserialize_with = "lenient_media")]
    pub media: Option<OneOrMany<RawMediaRef>>,
    /// Pre-built items. An explicit empty array is distinct from absence:
    /// gallery processing falls back to `media` only when `items` is absent.
    #[serde(default, deserialize_with = "lenient::opt_seq::deserialize")]
    pub items: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient::opt_string::deserialize")]
    pub layout: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string::deserialize")]
    pub anchor: Option<String>,
    /// Only a literal `false` opts the section out of navigation.
    #[serde(default, deserialize_with = "lenient::opt_bool::deserialize")]
    pub navigable: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_string::deserialize")]
    pub navigation_label: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64::deserialize")]
    pub navigation_order: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An external link attached to a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDef {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_in_popup: Option<bool>,
}

/// Hero banner block; its media leads the aggregated gallery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroDef {
    #[serde(default, deserialize_with = "lenient_raw_media", skip_serializing_if = "Option::is_none")]
    pub media: Option<RawMediaRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A media reference as authored: either a bare path or an object carrying
/// presentation hints alongside `src`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawMediaRef {
    Path(String),
    Detailed(MediaDef),
}

impl<'de> Deserialize<'de> for RawMediaRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Path(String),
            Detailed(MediaDef),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Path(path) => Ok(Self::Path(path)),
            Repr::Detailed(def) => Ok(Self::Detailed(def)),
        }
    }
}

impl RawMediaRef {
    /// The reference string, regardless of shape.
    pub fn src(&self) -> &str {
        match self {
            Self::Path(path) => path,
            Self::Detailed(def) => &def.src,
        }
    }

    /// Lift into the canonical classified form, keeping caption and aspect
    /// hints where present. An absent or empty `caption` falls back to
    /// `alt` text.
    pub fn to_media(&self) -> MediaRef {
        match self {
            Self::Path(path) => MediaRef::from_path(path.clone()),
            Self::Detailed(def) => {
                let mut media = MediaRef::from_path(def.src.clone());
                let caption = non_empty(&def.caption).or_else(|| non_empty(&def.alt));
                if let Some(caption) = caption {
                    media.caption = caption.to_owned();
                }
                if let Some(aspect) = &def.aspect {
                    media.aspect = aspect.clone();
                }
                media
            }
        }
    }
}

/// Object-shaped media reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaDef {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A field that accepts either a single value or an array of values.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Iterate the contained values in authored order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Self::One(one) => std::slice::from_ref(one).iter(),
            Self::Many(many) => many.iter(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(many) => many.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OneOrMany<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            One(T),
            Many(Vec<T>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::One(one) => Ok(Self::One(one)),
            Repr::Many(many) => Ok(Self::Many(many)),
        }
    }
}

impl<T: Serialize> Serialize for OneOrMany<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::One(one) => one.serialize(serializer),
            Self::Many(many) => many.serialize(serializer),
        }
    }
}

/// Lenient reader for `media` fields: `null`, missing, and falsy scalars
/// read as absent, while truthy values of an unusable shape stay present
/// with no extractable refs.
fn lenient_media<'de, D>(deserializer: D) -> Result<Option<OneOrMany<RawMediaRef>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(media_from_value(value))
}

fn media_from_value(value: Value) -> Option<OneOrMany<RawMediaRef>> {
    if !lenient::truthy(&value) {
        return None;
    }
    match value {
        Value::String(path) => Some(OneOrMany::One(RawMediaRef::Path(path))),
        Value::Array(entries) => Some(OneOrMany::Many(
            entries.into_iter().filter_map(raw_media_from_value).collect(),
        )),
        value @ Value::Object(_) => match serde_json::from_value::<MediaDef>(value) {
            Ok(def) => Some(OneOrMany::One(RawMediaRef::Detailed(def))),
            Err(_) => Some(OneOrMany::Many(Vec::new())),
        },
        _ => Some(OneOrMany::Many(Vec::new())),
    }
}

fn raw_media_from_value(value: Value) -> Option<RawMediaRef> {
    match value {
        Value::String(path) if !path.is_empty() => Some(RawMediaRef::Path(path)),
        value @ Value::Object(_) => {
            serde_json::from_value::<MediaDef>(value).ok().map(RawMediaRef::Detailed)
        }
        _ => None,
    }
}

fn lenient_raw_media<'de, D>(deserializer: D) -> Result<Option<RawMediaRef>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(raw_media_from_value(value))
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|text| !text.is_empty())
}
