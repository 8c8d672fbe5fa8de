//! Folio turns raw portfolio project records into a canonical, enriched model.
//!
//! Authors write loose JSON: optional fields, media as a bare path or a
//! detailed object, sections in any order. The pipeline is record-oriented:
//!
//! - Load a raw [`ProjectDef`] from JSON
//! - [`validate_project`] for structural problems worth refusing
//! - [`normalize`] into a canonical [`Project`] with positions, navigation
//!   metadata, synthesized sections, and an aggregated media list
//! - [`lint_project`] the result for content smells worth a warning
//!
//! Normalizing a canonical record again is a no-op, so stored output can be
//! fed back through the pipeline safely.
#![forbid(unsafe_code)]

mod foundation;

/// Media classification, path resolution, and extraction.
pub mod media;
/// The normalization pass and its section-level rules.
pub mod normalize;
/// Viewer preferences (theme, consent) over pluggable storage.
pub mod prefs;
/// Raw and canonical record models.
pub mod record;
/// Structural validation and content linting.
pub mod schema;

pub use crate::foundation::error::{FolioError, FolioResult};

pub use crate::media::{is_video, MediaKind, MediaRef};
pub use crate::normalize::{normalize, normalize_value, GALLERY_SECTION_ID};
pub use crate::prefs::{Consent, KeyValueStore, SitePrefs, ThemeMode};
pub use crate::record::{
    Layout, NavigationMeta, Project, ProjectDef, Section, SectionDef, SectionKind,
};
pub use crate::schema::{lint_project, validate_project, LintWarning, SchemaErrors};
