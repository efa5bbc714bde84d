//! Error types for the rating engine
//!
//! Engine construction returns a typed [`ConfigError`]. Everything above the
//! engine (file loading, season replay, the CLI) uses anyhow for consistent
//! error handling.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Broad category of a configuration failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// A field has the wrong type
    Type,
    /// `k` does not hold exactly three factors
    Shape,
}

/// Errors raised while validating a rating configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("rating must be a number")]
    RatingType,

    #[error("k must be an array")]
    KType,

    #[error("k must have length 3")]
    KShape { len: usize },

    #[error("each element of k must be a number")]
    KElementType { index: usize },
}

impl ConfigError {
    /// Category of this error
    pub fn kind(&self) -> ConfigErrorKind {
        match self {
            ConfigError::KShape { .. } => ConfigErrorKind::Shape,
            ConfigError::RatingType | ConfigError::KType | ConfigError::KElementType { .. } => {
                ConfigErrorKind::Type
            }
        }
    }
}
