//! User-directory error types.

use thiserror::Error;

/// Errors raised while fetching or decoding directory data.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum DirectoryError {
    #[error("network error while reaching the directory: {message}")]
    Network { message: String },

    #[error("directory returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode directory response: {message}")]
    Decode { message: String },

    #[error("unexpected directory error: {message}")]
    Unexpected { message: String },
}

impl DirectoryError {
    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a non-success status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates an unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether the error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
