use crate::extract::Section;
use serde::Serialize;
use std::collections::BTreeMap;

/// The five-field extraction result for one language's reply.
///
/// `code` is always wrapped as `` ```<language>\n...\n``` ``; the other
/// fields hold sanitized section text and may be empty when the upstream
/// reply omitted or mislabeled the section.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StructuredRecord {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Logic")]
    pub logic: String,
    #[serde(rename = "Time_Complexity")]
    pub time_complexity: String,
    #[serde(rename = "Space_Complexity")]
    pub space_complexity: String,
    #[serde(rename = "Improvements")]
    pub improvements: String,
}

impl StructuredRecord {
    pub fn section(&self, section: Section) -> &str {
        match section {
            Section::Logic => &self.logic,
            Section::TimeComplexity => &self.time_complexity,
            Section::SpaceComplexity => &self.space_complexity,
            Section::Improvements => &self.improvements,
        }
    }
}

/// The merged, per-request output: one code variant per language plus one
/// shared set of explanatory fields.
///
/// Serde names match the payload the original service emitted, so consumers
/// see `Codes`, `Logic`, `Time_Complexity`, `Space_Complexity`,
/// `Improvements`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentBundle {
    #[serde(rename = "Codes")]
    pub codes: BTreeMap<String, String>,
    #[serde(rename = "Logic")]
    pub logic: String,
    #[serde(rename = "Time_Complexity")]
    pub time_complexity: String,
    #[serde(rename = "Space_Complexity")]
    pub space_complexity: String,
    #[serde(rename = "Improvements")]
    pub improvements: String,
}

impl ContentBundle {
    pub fn section(&self, section: Section) -> &str {
        match section {
            Section::Logic => &self.logic,
            Section::TimeComplexity => &self.time_complexity,
            Section::SpaceComplexity => &self.space_complexity,
            Section::Improvements => &self.improvements,
        }
    }

    pub fn set_section(&mut self, section: Section, value: String) {
        match section {
            Section::Logic => self.logic = value,
            Section::TimeComplexity => self.time_complexity = value,
            Section::SpaceComplexity => self.space_complexity = value,
            Section::Improvements => self.improvements = value,
        }
    }
}
