//! Authoring-time record checks: hard validation of raw records and
//! advisory lint over canonical ones.

pub mod lint;
pub mod validate;

pub use lint::{lint_project, LintWarning};
pub use validate::{validate_project, SchemaError, SchemaErrors, SchemaPathElem};
