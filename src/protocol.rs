//! Wire types for the chat endpoint.
//!
//! The endpoint contract is a single JSON request/response pair. No other
//! fields are defined; unknown response fields are ignored on decode.

use serde::{Deserialize, Serialize};

// =============================================================================
// Chat API Types
// =============================================================================

/// Request body sent to the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message, already trimmed.
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body returned by the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Raw reply text, before formatting.
    pub response: String,
}
