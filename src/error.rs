//! Error types for talking to the chat endpoint.

use thiserror::Error;

/// Why a chat round-trip failed.
///
/// The widget renders every variant the same way (a fixed fallback bubble);
/// the variants exist for diagnostics only.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The body was not a valid `{"response": ...}` document.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured endpoint is not an absolute URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// No endpoint was configured for this transport.
    #[error("No upstream endpoint configured")]
    NotConfigured,
}

/// Result type alias for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;
