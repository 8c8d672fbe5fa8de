//! Project record models: the raw boundary shapes and the canonical
//! normalized form, plus the lenient serde adapters the boundary uses.

pub mod canonical;
pub mod lenient;
pub mod model;

pub use canonical::{Layout, NavigationMeta, Project, Section, SectionKind};
pub use model::{HeroDef, LinkDef, MediaDef, OneOrMany, ProjectDef, RawMediaRef, SectionDef};
