//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation and provide
//! clear error messages with context.

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the business card crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid user input (unknown language code, unknown image slot, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing file, profile or stored image.
    #[error("not found: {0}")]
    NotFound(String),

    /// A contact save is already in flight.
    #[error("busy: {0}")]
    Busy(String),

    /// Profile photo could not be resolved. Never escapes vCard generation.
    #[error("image fetch failed: {0}")]
    ImageFetch(String),

    /// Malformed configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Internal errors.
    #[error("internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP transport errors.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience constructors
impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn busy(msg: impl Into<String>) -> Self {
        Self::Busy(msg.into())
    }

    pub fn image_fetch(msg: impl Into<String>) -> Self {
        Self::ImageFetch(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
