/// Convenience result type used across reelmark.
pub type ReelmarkResult<T> = Result<T, ReelmarkError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Interactive operations (capture, undo, submit, seek) never fail; they degrade to a safe
/// default instead. Errors only surface at the boundaries: configuration, seeding,
/// rendering and script replay.
#[derive(thiserror::Error, Debug)]
pub enum ReelmarkError {
    /// Invalid user-provided configuration, seed or script data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing an overlay plan.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelmarkError {
    /// Build a [`ReelmarkError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelmarkError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ReelmarkError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
