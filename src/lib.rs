//! dsolve — turns free-form generative-AI replies into structured,
//! multi-language solution bundles for algorithm problems.
//!
//! The pipeline: for each requested output language a conversation is opened
//! and a solution prompt sent; the reply is segmented into named sections,
//! fenced code is extracted and re-tagged, conversational filler is stripped,
//! and the per-language records are merged into one bundle. Fields the
//! upstream service omitted are backfilled with supplementary queries on the
//! primary language's conversation.

pub mod engine;
pub mod extract;
pub mod provider;
pub mod session;

pub use engine::{ContentBundle, Engine, EngineError, StructuredRecord};
pub use extract::{extract_code, segment, Sanitizer, Section};
pub use provider::{ChatProvider, Conversation, GeminiConfig, GeminiProvider, UpstreamError};
pub use session::SessionStore;
