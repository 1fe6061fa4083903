//! Error types for wind field generation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WindFieldError {
    /// Bounds, resolution, level list or bias constants rejected before generation
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid standard deviation {value}: must be finite and non-negative")]
    InvalidStandardDeviation { value: f64 },
}

impl WindFieldError {
    pub fn config(message: impl Into<String>) -> Self {
        WindFieldError::InvalidConfiguration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WindFieldError>;
