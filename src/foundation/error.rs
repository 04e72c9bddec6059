/// Convenience result type used across chalkboard.
pub type ChalkResult<T> = Result<T, ChalkError>;

/// Top-level error taxonomy used by the figure pipelines.
#[derive(thiserror::Error, Debug)]
pub enum ChalkError {
    /// Invalid caller-provided data: shapes, ranges, configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while building or rasterizing a figure.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while encoding PNG or GIF output.
    #[error("encode error: {0}")]
    Encode(String),

    /// Malformed input datasets (CSV rows, missing columns).
    #[error("data error: {0}")]
    Data(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChalkError {
    /// Build a [`ChalkError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ChalkError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ChalkError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`ChalkError::Data`] value.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
