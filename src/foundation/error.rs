/// Convenience result type used across Folio.
pub type FolioResult<T> = Result<T, FolioError>;

/// Top-level error taxonomy used by the library and CLI surfaces.
///
/// Normalization itself is total and never returns these; they cover the
/// fallible edges around it (parsing records from JSON, strict schema
/// validation, preference persistence).
#[derive(thiserror::Error, Debug)]
pub enum FolioError {
    /// Invalid user-provided record data (strict validation only).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when reading a record out of JSON text.
    #[error("parse error: {0}")]
    Parse(String),

    /// Wrapped filesystem errors from record or preference stores.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FolioError {
    /// Build a [`FolioError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FolioError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`FolioError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}
