/// Convenience result type used across folio-motion.
pub type MotionResult<T> = Result<T, MotionError>;

/// Top-level error taxonomy for construction and configuration APIs.
///
/// Runtime failures (missing geometry, failed media, late timers) never surface here; they are
/// absorbed by the component that observes them.
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// Invalid user-provided configuration or content data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid mapping tables, easing curves or spring parameters.
    #[error("animation error: {0}")]
    Animation(String),

    /// Timer or sequencing misuse (for example an out-of-order transition).
    #[error("schedule error: {0}")]
    Schedule(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MotionError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`MotionError::Schedule`] value.
    pub fn schedule(msg: impl Into<String>) -> Self {
        Self::Schedule(msg.into())
    }

    /// Build a [`MotionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
