//! Typewriter errors.

/// Errors produced by the typewriter library.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypewriterError {
    #[error("Nothing to play: add at least one fragment with add_text before calling play")]
    EmptyQueue,

    #[error("Fragment index {index} is out of range (queue holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid {field} '{value}': {reason}")]
    InvalidStyle {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl TypewriterError {
    /// Shorthand for building an `InvalidStyle` error.
    pub fn invalid_style(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidStyle {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, TypewriterError>;
