//! Crate-wide foundations: the error taxonomy shared by every surface.

pub mod error;
