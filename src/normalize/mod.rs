//! The normalization pipeline: layout resolution, section enrichment, and
//! the whole-project aggregation pass.

pub mod layout;
pub mod pass;
pub(crate) mod section;

pub use pass::{normalize, normalize_value, GALLERY_SECTION_ID};
