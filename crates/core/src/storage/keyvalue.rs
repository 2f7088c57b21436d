use std::collections::HashMap;

use crate::errors::CoreError;

/// Opaque key-value persistence collaborator.
///
/// The core never performs I/O itself: the embedding application brings
/// whatever medium it has (browser localStorage, a file, a database row)
/// behind this trait. Values are strings — the persisted documents are
/// JSON, and the original medium stores strings anyway.
pub trait KeyValueStore {
    /// Load the value under `key`, or `None` when nothing was ever saved.
    fn load(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Save `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: &str) -> Result<(), CoreError>;
}

/// In-memory store for tests and ephemeral embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
