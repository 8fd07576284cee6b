use std::collections::HashMap;

/// Conversations keyed by output language.
///
/// This is the only shared mutable state in the system. A conversation is
/// inserted (or replaced) when a solve pass starts for its language and is
/// then reused by every follow-up and refresh addressed to that language key
/// for the lifetime of the store. The store is passed by reference into
/// whichever component needs it — there is no ambient global.
pub struct SessionStore<C> {
    sessions: HashMap<String, C>,
}

impl<C> SessionStore<C> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Inserts a conversation for a language, replacing any previous one.
    pub fn insert(&mut self, language: &str, conversation: C) {
        self.sessions.insert(language.to_string(), conversation);
    }

    /// Addresses an existing conversation for follow-up turns.
    pub fn get_mut(&mut self, language: &str) -> Option<&mut C> {
        self.sessions.get_mut(language)
    }

    /// Evicts a language's conversation, returning it if present.
    pub fn remove(&mut self, language: &str) -> Option<C> {
        self.sessions.remove(language)
    }

    /// Whether a conversation exists for the language.
    pub fn contains(&self, language: &str) -> bool {
        self.sessions.contains_key(language)
    }

    /// Language keys with a live conversation, sorted for stable output.
    pub fn languages(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.sessions.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl<C> Default for SessionStore<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut store = SessionStore::new();
        store.insert("python", 1u32);

        assert!(store.contains("python"));
        assert_eq!(store.get_mut("python"), Some(&mut 1));
        assert_eq!(store.get_mut("java"), None);
    }

    #[test]
    fn test_insert_replaces_existing_conversation() {
        let mut store = SessionStore::new();
        store.insert("python", 1u32);
        store.insert("python", 2u32);

        assert_eq!(store.get_mut("python"), Some(&mut 2));
        assert_eq!(store.languages(), vec!["python".to_string()]);
    }

    #[test]
    fn test_remove_evicts() {
        let mut store = SessionStore::new();
        store.insert("java", 7u32);

        assert_eq!(store.remove("java"), Some(7));
        assert!(!store.contains("java"));
        assert_eq!(store.remove("java"), None);
    }

    #[test]
    fn test_keys_are_verbatim() {
        // No case normalization: "Python" and "python" are distinct sessions.
        let mut store = SessionStore::new();
        store.insert("Python", 1u32);

        assert!(!store.contains("python"));
    }

    #[test]
    fn test_languages_sorted() {
        let mut store = SessionStore::new();
        store.insert("java", 1u32);
        store.insert("c++", 2u32);
        store.insert("python", 3u32);

        assert_eq!(
            store.languages(),
            vec!["c++".to_string(), "java".to_string(), "python".to_string()]
        );
    }
}
