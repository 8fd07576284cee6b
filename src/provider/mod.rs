//! The generative-text service boundary.
//!
//! The rest of the crate only sees the [`ChatProvider`] / [`Conversation`]
//! capability: open a conversation, send a prompt, get text back. No format,
//! latency, or idempotence guarantees — every reply is treated as free-form
//! text by the extraction passes.

mod gemini;

pub use gemini::{GeminiConfig, GeminiConversation, GeminiProvider};

use std::fmt;

/// Errors surfaced by calls into the generative-text service.
#[derive(Debug)]
pub enum UpstreamError {
    /// No API key was configured for the provider.
    MissingApiKey(String),
    /// The HTTP round trip itself failed (transport error or non-2xx status).
    Request(String),
    /// The reply arrived but did not parse as the expected structure.
    Malformed(String),
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UpstreamError::MissingApiKey(provider) => {
                write!(f, "No API key configured for provider '{}'", provider)
            }
            UpstreamError::Request(details) => {
                write!(f, "Upstream request failed: {}", details)
            }
            UpstreamError::Malformed(details) => {
                write!(f, "Upstream reply was malformed: {}", details)
            }
        }
    }
}

impl std::error::Error for UpstreamError {}

/// A stateful dialogue handle with the generative-text service.
///
/// Each `send` appends the prompt and the service's reply to the handle's
/// history, so later turns are answered in the context of earlier ones.
pub trait Conversation {
    /// Sends one prompt and returns the reply text.
    ///
    /// A failed send must leave the history as it was before the call.
    async fn send(&mut self, prompt: &str) -> Result<String, UpstreamError>;
}

/// Factory for conversations against one configured provider.
pub trait ChatProvider {
    type Conversation: Conversation;

    /// Opens a fresh conversation with empty history.
    fn new_conversation(&self) -> Self::Conversation;
}
