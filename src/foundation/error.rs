/// Result type used across the crate.
pub type SpotlightResult<T> = Result<T, SpotlightError>;

/// Error taxonomy for loading, validating, and persisting tutorials.
#[derive(thiserror::Error, Debug)]
pub enum SpotlightError {
    /// A step was declared with zero or two selectors.
    #[error("invalid step definition: {0}")]
    InvalidStep(String),

    /// Invalid configuration, style, or host-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Reading or writing files (snapshots, trees, state).
    #[error("io error: {0}")]
    Io(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or the runtime.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpotlightError {
    /// Build a [`SpotlightError::InvalidStep`] value.
    pub fn invalid_step(msg: impl Into<String>) -> Self {
        Self::InvalidStep(msg.into())
    }

    /// Build a [`SpotlightError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SpotlightError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Build a [`SpotlightError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
