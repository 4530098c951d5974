/// Convenience result type used across pixrender.
pub type PixResult<T> = Result<T, PixError>;

/// Top-level error taxonomy for the fallible edges of the renderer.
///
/// The drawing core itself never returns errors: precondition violations assert and
/// degenerate geometry is a no-op. Errors come from configuration, pool construction
/// and the decode/encode adapters.
#[derive(thiserror::Error, Debug)]
pub enum PixError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Pixel data that cannot be represented by the requested pixmap format.
    #[error("format error: {0}")]
    Format(String),

    /// Filesystem errors while loading or saving images and configs.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixError {
    /// Build a [`PixError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PixError::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
