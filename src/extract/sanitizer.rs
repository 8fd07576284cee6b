use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Errors that can occur while loading the filter phrase list.
#[derive(Debug)]
pub enum FilterConfigError {
    Read(String),
    Parse(String),
}

impl fmt::Display for FilterConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FilterConfigError::Read(details) => {
                write!(f, "Failed to read filter config: {}", details)
            }
            FilterConfigError::Parse(details) => {
                write!(f, "Filter config is invalid: {}", details)
            }
        }
    }
}

impl std::error::Error for FilterConfigError {}

/// Schema of the optional `filters.yml` file.
#[derive(Deserialize)]
struct FilterFile {
    phrases: Vec<String>,
}

/// Removes canned conversational filler from extracted text.
///
/// The phrase list is a content-policy decision, not a structural one, so it
/// lives in an editable YAML file; the built-in defaults cover the phrases the
/// upstream service is known to emit. Removal is plain literal substring
/// replacement followed by a trim, which makes the operation idempotent as
/// long as the phrases are disjoint.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    phrases: Vec<String>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self {
            phrases: vec![
                "Let me know if you'd like to explore any specific aspect of the code in more detail."
                    .to_string(),
                "Let's delve into".to_string(),
                "Feel free to ask if".to_string(),
                "I hope this helps".to_string(),
            ],
        }
    }
}

impl Sanitizer {
    /// Creates a sanitizer with an explicit phrase list.
    pub fn new(phrases: Vec<String>) -> Self {
        Self { phrases }
    }

    /// Loads the phrase list from a YAML file.
    ///
    /// # Arguments
    /// * `path` - Optional path to the config file (defaults to "filters.yml")
    ///
    /// If the file does not exist the built-in defaults are used; an existing
    /// but unreadable or malformed file is an error.
    pub fn load(path: Option<PathBuf>) -> Result<Self, FilterConfigError> {
        let path = path.unwrap_or_else(|| PathBuf::from("filters.yml"));

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            FilterConfigError::Read(format!("{}: {}", path.display(), e))
        })?;

        let file: FilterFile = serde_yaml::from_str(&content)
            .map_err(|e| FilterConfigError::Parse(e.to_string()))?;

        Ok(Self::new(file.phrases))
    }

    /// Strips every denylisted phrase from the text and trims the result.
    pub fn apply(&self, text: &str) -> String {
        let mut result = text.to_string();
        for phrase in &self.phrases {
            result = result.replace(phrase.as_str(), "").trim().to_string();
        }
        result.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_removes_known_phrases() {
        let sanitizer = Sanitizer::default();
        let text = "The algorithm sorts in place. I hope this helps";

        assert_eq!(sanitizer.apply(text), "The algorithm sorts in place.");
    }

    #[test]
    fn test_apply_removes_mid_text_occurrences() {
        let sanitizer = Sanitizer::default();
        let text = "Feel free to ask if anything is unclear about the pivot.";

        assert_eq!(
            sanitizer.apply(text),
            "anything is unclear about the pivot."
        );
    }

    #[test]
    fn test_apply_is_idempotent() {
        let sanitizer = Sanitizer::default();
        let inputs = [
            "  plain text  ",
            "I hope this helps. Let's delve into quicksort.",
            "",
            "Let me know if you'd like to explore any specific aspect of the code in more detail.",
        ];

        for input in inputs {
            let once = sanitizer.apply(input);
            assert_eq!(sanitizer.apply(&once), once);
        }
    }

    #[test]
    fn test_apply_trims_whitespace() {
        let sanitizer = Sanitizer::default();
        assert_eq!(sanitizer.apply("   O(n log n)   \n"), "O(n log n)");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let sanitizer =
            Sanitizer::load(Some(PathBuf::from("/nonexistent/filters.yml"))).unwrap();
        assert_eq!(sanitizer.apply("I hope this helps"), "");
    }

    #[test]
    fn test_load_reads_yaml_phrases() {
        let dir = std::env::temp_dir().join(format!("dsolve_test_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("filters.yml");
        fs::write(&path, "phrases:\n  - \"As an AI\"\n").unwrap();

        let sanitizer = Sanitizer::load(Some(path)).unwrap();
        assert_eq!(sanitizer.apply("As an AI I think"), "I think");
        // Default phrases are replaced, not merged.
        assert_eq!(sanitizer.apply("I hope this helps"), "I hope this helps");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_rejects_malformed_yaml() {
        let dir = std::env::temp_dir().join(format!("dsolve_test_bad_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("filters.yml");
        fs::write(&path, "phrases: {not a list").unwrap();

        let result = Sanitizer::load(Some(path));
        assert!(matches!(result, Err(FilterConfigError::Parse(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
