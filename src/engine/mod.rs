//! Structured response extraction and reconciliation.
//!
//! The engine owns the provider and the sanitizer and exposes the boundary
//! operations: `solve` (per-language structuring plus reconciliation into one
//! bundle), `follow_up` and `refresh` (turns on an existing conversation),
//! and the one-shot `inspect_code` variants.

mod prompts;
mod reconcile;
mod records;

pub use records::{ContentBundle, StructuredRecord};

use crate::extract::{extract_code, segment, Sanitizer, Section};
use crate::provider::{ChatProvider, Conversation, UpstreamError};
use crate::session::SessionStore;
use std::fmt;

/// Errors surfaced by engine operations.
///
/// All failures bubble to the request boundary: either a complete bundle is
/// produced or a failure is reported. Nothing is retried beyond the single
/// designed repair attempt per missing field.
#[derive(Debug)]
pub enum EngineError {
    /// A required input (problem statement, language, section name, ...) was
    /// absent; no upstream call was attempted.
    MissingInput(String),
    /// No conversation exists for the addressed language key.
    UnknownSession(String),
    /// A call into the generative-text service failed.
    Upstream(UpstreamError),
    /// The supplementary repair call for a field failed; the bundle is not
    /// emitted partially filled.
    Reconciliation { field: &'static str, details: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EngineError::MissingInput(what) => {
                write!(f, "{} is required", what)
            }
            EngineError::UnknownSession(language) => {
                write!(f, "No conversation exists for language '{}'", language)
            }
            EngineError::Upstream(e) => write!(f, "{}", e),
            EngineError::Reconciliation { field, details } => {
                write!(f, "Failed to backfill missing field '{}': {}", field, details)
            }
        }
    }
}

impl std::error::Error for EngineError {}

impl From<UpstreamError> for EngineError {
    fn from(e: UpstreamError) -> Self {
        EngineError::Upstream(e)
    }
}

/// Facade over per-language structuring, reconciliation and aggregation.
pub struct Engine<P: ChatProvider> {
    provider: P,
    sanitizer: Sanitizer,
}

impl<P: ChatProvider> Engine<P> {
    pub fn new(provider: P, sanitizer: Sanitizer) -> Self {
        Self {
            provider,
            sanitizer,
        }
    }

    /// Solves a problem statement for every requested output language and
    /// merges the results into one content bundle.
    ///
    /// Languages are processed sequentially in request order. Each language
    /// gets a fresh conversation that replaces whatever the store held for
    /// that key; the conversations stay in the store afterwards so follow-up
    /// and refresh can address them. The first requested language is the
    /// designated primary used for reconciliation repair calls.
    pub async fn solve(
        &self,
        store: &mut SessionStore<P::Conversation>,
        problem: &str,
        languages: &[String],
    ) -> Result<ContentBundle, EngineError> {
        if problem.trim().is_empty() {
            return Err(EngineError::MissingInput("Problem statement".to_string()));
        }
        if languages.is_empty() {
            return Err(EngineError::MissingInput(
                "At least one output language".to_string(),
            ));
        }

        let mut records: Vec<(String, StructuredRecord)> = Vec::with_capacity(languages.len());

        for language in languages {
            if language.trim().is_empty() {
                return Err(EngineError::MissingInput("Language name".to_string()));
            }

            let mut conversation = self.provider.new_conversation();
            let reply = conversation
                .send(&prompts::solution(problem, language))
                .await?;

            let record = self.structure_reply(language, &reply);
            store.insert(language, conversation);
            records.push((language.clone(), record));
        }

        reconcile::reconcile(&self.sanitizer, store, &languages[0], &records).await
    }

    /// Runs both extraction passes and the sanitizer over one raw reply.
    pub fn structure_reply(&self, language: &str, reply: &str) -> StructuredRecord {
        let sections = segment(reply);
        let field = |section: Section| {
            self.sanitizer
                .apply(sections.get(&section).map(String::as_str).unwrap_or(""))
        };

        StructuredRecord {
            code: self.sanitizer.apply(&extract_code(reply, language)),
            logic: field(Section::Logic),
            time_complexity: field(Section::TimeComplexity),
            space_complexity: field(Section::SpaceComplexity),
            improvements: field(Section::Improvements),
        }
    }

    /// Sends a follow-up question on an existing conversation and returns
    /// the sanitized answer. Other languages' conversations are untouched.
    pub async fn follow_up(
        &self,
        store: &mut SessionStore<P::Conversation>,
        language: &str,
        question: &str,
    ) -> Result<String, EngineError> {
        if question.trim().is_empty() {
            return Err(EngineError::MissingInput(format!(
                "Follow-up question for {} code",
                language
            )));
        }

        let conversation = store
            .get_mut(language)
            .ok_or_else(|| EngineError::UnknownSession(language.to_string()))?;

        let reply = conversation.send(question).await?;
        Ok(self.sanitizer.apply(&reply))
    }

    /// Asks an existing conversation to regenerate one section and returns
    /// the sanitized regenerated text.
    pub async fn refresh(
        &self,
        store: &mut SessionStore<P::Conversation>,
        language: &str,
        section: &str,
    ) -> Result<String, EngineError> {
        if language.trim().is_empty() || section.trim().is_empty() {
            return Err(EngineError::MissingInput(
                "Language and section name".to_string(),
            ));
        }

        let conversation = store
            .get_mut(language)
            .ok_or_else(|| EngineError::UnknownSession(language.to_string()))?;

        let reply = conversation.send(&prompts::refresh(section)).await?;
        Ok(self.sanitizer.apply(&reply))
    }

    /// One-shot code analysis on a fresh conversation; nothing is stored.
    pub async fn inspect_code(&self, code: &str) -> Result<String, EngineError> {
        if code.trim().is_empty() {
            return Err(EngineError::MissingInput("Code".to_string()));
        }

        let mut conversation = self.provider.new_conversation();
        Ok(conversation.send(&prompts::inspect(code)).await?)
    }

    /// One-shot analysis with an explicit task to solve against the code.
    pub async fn inspect_code_task(
        &self,
        code: &str,
        task: &str,
    ) -> Result<String, EngineError> {
        if code.trim().is_empty() || task.trim().is_empty() {
            return Err(EngineError::MissingInput("Code and task".to_string()));
        }

        let mut conversation = self.provider.new_conversation();
        Ok(conversation.send(&prompts::inspect_task(code, task)).await?)
    }
}
