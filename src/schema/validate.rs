//! Authoring-time validation of raw project records.
//!
//! Normalization itself never fails; this pass exists so authors hear about
//! broken records before they ship. Errors carry a JSON-pointer-like path
//! (`$.sections[3].media[1]`) and accumulate instead of short-circuiting.

use std::collections::HashSet;
use std::fmt;

use crate::record::model::{OneOrMany, ProjectDef, RawMediaRef};

/// One element of a schema error path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaPathElem {
    /// A named object field.
    Field(&'static str),
    /// An array index.
    Index(usize),
}

/// A single validation finding, located by path.
#[derive(Debug, Clone)]
pub struct SchemaError {
    /// Path from the record root to the offending value.
    pub path: Vec<SchemaPathElem>,
    /// Human-readable description.
    pub message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

/// Every validation finding for one record, newline-joined when displayed.
#[derive(Debug, Clone)]
pub struct SchemaErrors {
    /// Findings in record order.
    pub errors: Vec<SchemaError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl From<SchemaErrors> for crate::foundation::error::FolioError {
    fn from(errors: SchemaErrors) -> Self {
        Self::validation(errors.to_string())
    }
}

/// Validate a raw record against the authoring schema.
///
/// Checks: project `id` and `title` present and non-empty, link labels and
/// urls non-empty, every media reference carrying a non-empty `src`, and no
/// duplicate section ids. Unknown kinds and layouts are legal here (they
/// degrade to default handling) and are the linter's business instead.
pub fn validate_project(def: &ProjectDef) -> Result<(), SchemaErrors> {
    let mut errors = Vec::new();

    if def.id.as_deref().is_none_or(|id| id.trim().is_empty()) {
        errors.push(SchemaError::at(
            &[SchemaPathElem::Field("id")],
            "project id must be non-empty",
        ));
    }
    if def.title.as_deref().is_none_or(|title| title.trim().is_empty()) {
        errors.push(SchemaError::at(
            &[SchemaPathElem::Field("title")],
            "project title must be non-empty",
        ));
    }

    for (i, link) in def.links.iter().enumerate() {
        if link.label.trim().is_empty() {
            errors.push(SchemaError::at(
                &[
                    SchemaPathElem::Field("links"),
                    SchemaPathElem::Index(i),
                    SchemaPathElem::Field("label"),
                ],
                "link label must be non-empty",
            ));
        }
        if link.url.trim().is_empty() {
            errors.push(SchemaError::at(
                &[
                    SchemaPathElem::Field("links"),
                    SchemaPathElem::Index(i),
                    SchemaPathElem::Field("url"),
                ],
                "link url must be non-empty",
            ));
        }
    }

    validate_media(def.media.as_ref(), &[SchemaPathElem::Field("media")], &mut errors);
    if let Some(hero) = &def.hero {
        if let Some(media) = &hero.media {
            validate_media_ref(
                media,
                &[SchemaPathElem::Field("hero"), SchemaPathElem::Field("media")],
                &mut errors,
            );
        }
    }

    let mut section_ids = HashSet::<&str>::new();
    for (i, section) in def.sections.iter().enumerate() {
        let base = [SchemaPathElem::Field("sections"), SchemaPathElem::Index(i)];

        if let Some(id) = section.id.as_deref().filter(|id| !id.trim().is_empty()) {
            if !section_ids.insert(id) {
                errors.push(SchemaError::at(
                    &[base.as_slice(), &[SchemaPathElem::Field("id")]].concat(),
                    format!("duplicate section id \"{id}\""),
                ));
            }
        }

        validate_media(
            section.media.as_ref(),
            &[base.as_slice(), &[SchemaPathElem::Field("media")]].concat(),
            &mut errors,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaErrors { errors })
    }
}

fn validate_media(
    media: Option<&OneOrMany<RawMediaRef>>,
    base: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) {
    match media {
        None => {}
        Some(OneOrMany::One(media)) => validate_media_ref(media, base, errors),
        Some(OneOrMany::Many(refs)) => {
            for (i, media) in refs.iter().enumerate() {
                validate_media_ref(
                    media,
                    &[base, &[SchemaPathElem::Index(i)]].concat(),
                    errors,
                );
            }
        }
    }
}

fn validate_media_ref(media: &RawMediaRef, path: &[SchemaPathElem], errors: &mut Vec<SchemaError>) {
    if media.src().trim().is_empty() {
        errors.push(SchemaError::at(path, "media src must be non-empty"));
    }
}
