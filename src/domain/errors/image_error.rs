//! Profile-image error types.

use thiserror::Error;

/// Errors raised while loading or compressing a profile image.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ImageError {
    #[error("failed to read image file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to decode image: {message}")]
    Decode { message: String },

    #[error("failed to encode image: {message}")]
    Encode { message: String },
}

impl ImageError {
    /// Creates a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates an encode error.
    #[must_use]
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }
}
