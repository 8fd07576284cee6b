use super::records::{ContentBundle, StructuredRecord};
use super::{prompts, EngineError};
use crate::extract::{Sanitizer, Section};
use crate::provider::Conversation;
use crate::session::SessionStore;

/// Merges per-language records into one bundle and repairs empty fields.
///
/// The explanatory fields are collapsed to a single canonical value: per
/// field, the first non-empty value found across records in request order
/// wins. Every field still empty after the collapse is backfilled with
/// exactly one supplementary query on the primary language's conversation —
/// no loop, no backoff. A failed or empty supplementary reply fails the
/// whole request; the bundle is never emitted with an empty field.
pub(super) async fn reconcile<C: Conversation>(
    sanitizer: &Sanitizer,
    store: &mut SessionStore<C>,
    primary_language: &str,
    records: &[(String, StructuredRecord)],
) -> Result<ContentBundle, EngineError> {
    let mut bundle = ContentBundle::default();

    for (language, record) in records {
        bundle.codes.insert(language.clone(), record.code.clone());
    }

    for section in Section::ALL {
        let collapsed = records
            .iter()
            .map(|(_, record)| record.section(section))
            .find(|value| !value.is_empty())
            .unwrap_or("")
            .to_string();
        bundle.set_section(section, collapsed);
    }

    for section in Section::ALL {
        if !bundle.section(section).is_empty() {
            continue;
        }

        let conversation = store
            .get_mut(primary_language)
            .ok_or_else(|| EngineError::UnknownSession(primary_language.to_string()))?;

        let reply = conversation
            .send(&prompts::repair(section))
            .await
            .map_err(|source| EngineError::Reconciliation {
                field: section.name(),
                details: source.to_string(),
            })?;

        let value = sanitizer.apply(&reply);
        if value.is_empty() {
            return Err(EngineError::Reconciliation {
                field: section.name(),
                details: "supplementary reply was empty".to_string(),
            });
        }

        bundle.set_section(section, value);
    }

    Ok(bundle)
}
