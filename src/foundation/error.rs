/// Convenience result type used across reviewgrid.
pub type GridResult<T> = Result<T, GridError>;

/// Top-level error taxonomy used by rasterizer APIs.
///
/// Call-level variants (`Validation`, `Font`, `CanvasUnavailable`, `Encode`) abort a render.
/// [`GridError::ImageLoad`] is per-cell: the pipeline catches it, logs it, and keeps drawing.
#[derive(thiserror::Error, Debug)]
pub enum GridError {
    /// Invalid user-provided grid, theme or option data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An image source could not be read or decoded.
    #[error("image load error for '{source_ref}': {reason}")]
    ImageLoad {
        /// Short description of the failing source (data URIs are abbreviated).
        source_ref: String,
        /// Underlying failure.
        reason: String,
    },

    /// Font data could not be registered, so text cannot be measured.
    #[error("font error: {0}")]
    Font(String),

    /// No drawing surface could be created for the requested dimensions.
    #[error("canvas unavailable: {0}")]
    CanvasUnavailable(String),

    /// The rendered surface could not be serialized to PNG.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GridError {
    /// Build a [`GridError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GridError::ImageLoad`] value.
    pub fn image_load(source_ref: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ImageLoad {
            source_ref: source_ref.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`GridError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`GridError::CanvasUnavailable`] value.
    pub fn canvas(msg: impl Into<String>) -> Self {
        Self::CanvasUnavailable(msg.into())
    }

    /// Build a [`GridError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`GridError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for errors that only affect a single cell.
    pub fn is_cell_local(&self) -> bool {
        matches!(self, Self::ImageLoad { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
