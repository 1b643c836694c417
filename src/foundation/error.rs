/// Convenience result type used across rainbow-roads.
pub type RoadsResult<T> = Result<T, RoadsError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum RoadsError {
    /// Projection scale is undefined (coincident points, or no horizontal extent).
    #[error("invalid bounds: {0}")]
    InvalidBounds(String),

    /// No activities, or an activity without points.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Zero canvas width or zero frame count.
    #[error("invalid canvas size: {0}")]
    CanvasSizeInvalid(String),

    /// Invalid user-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors raised while writing frames to an output format.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RoadsError {
    /// Build a [`RoadsError::InvalidBounds`] value.
    pub fn invalid_bounds(msg: impl Into<String>) -> Self {
        Self::InvalidBounds(msg.into())
    }

    /// Build a [`RoadsError::EmptyInput`] value.
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    /// Build a [`RoadsError::CanvasSizeInvalid`] value.
    pub fn canvas_size(msg: impl Into<String>) -> Self {
        Self::CanvasSizeInvalid(msg.into())
    }

    /// Build a [`RoadsError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RoadsError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

impl From<std::io::Error> for RoadsError {
    fn from(e: std::io::Error) -> Self {
        Self::Other(anyhow::Error::new(e))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
