/// Convenience result type used across the crate.
pub type SvgaResult<T> = Result<T, SvgaError>;

/// Top-level error taxonomy used by decode and load APIs.
///
/// Render-phase problems never surface here: a drawable that cannot be drawn is skipped.
#[derive(thiserror::Error, Debug)]
pub enum SvgaError {
    /// Corrupt or truncated compressed stream.
    #[error("decompression error: {0}")]
    Decompression(String),

    /// Malformed binary schema payload.
    #[error("schema decode error: {0}")]
    SchemaDecode(String),

    /// Archive is missing a mandatory entry (`movie.binary`).
    #[error("missing required entry: {0}")]
    MissingRequiredEntry(String),

    /// File, network or other origin could not deliver bytes.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// A cached entry could not be read back. The loader recovers from this itself.
    #[error("cache corrupted: {0}")]
    CacheCorrupted(String),

    /// Invalid caller-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// The load was cancelled through its handle.
    #[error("load cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SvgaError {
    /// Build a [`SvgaError::Decompression`] value.
    pub fn decompression(msg: impl Into<String>) -> Self {
        Self::Decompression(msg.into())
    }

    /// Build a [`SvgaError::SchemaDecode`] value.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::SchemaDecode(msg.into())
    }

    /// Build a [`SvgaError::MissingRequiredEntry`] value.
    pub fn missing_entry(msg: impl Into<String>) -> Self {
        Self::MissingRequiredEntry(msg.into())
    }

    /// Build a [`SvgaError::SourceUnavailable`] value.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable(msg.into())
    }

    /// Build a [`SvgaError::CacheCorrupted`] value.
    pub fn cache(msg: impl Into<String>) -> Self {
        Self::CacheCorrupted(msg.into())
    }

    /// Build a [`SvgaError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Prefix the message with a stage label while keeping the variant.
    ///
    /// `Cancelled` passes through untouched.
    pub fn with_stage(self, stage: &str) -> Self {
        match self {
            Self::Decompression(m) => Self::Decompression(format!("{stage}: {m}")),
            Self::SchemaDecode(m) => Self::SchemaDecode(format!("{stage}: {m}")),
            Self::MissingRequiredEntry(m) => Self::MissingRequiredEntry(format!("{stage}: {m}")),
            Self::SourceUnavailable(m) => Self::SourceUnavailable(format!("{stage}: {m}")),
            Self::CacheCorrupted(m) => Self::CacheCorrupted(format!("{stage}: {m}")),
            Self::Validation(m) => Self::Validation(format!("{stage}: {m}")),
            Self::Cancelled => Self::Cancelled,
            Self::Other(e) => Self::Other(e.context(stage.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
