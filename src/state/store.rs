//! Key-value persistence seam
//!
//! The gallery persists two things: free-text annotations per photo and the
//! list of local uploads. Both go through [`KeyValueStore`], a plain string
//! get/set in the spirit of browser local storage. Writes are fire-and-forget:
//! a backend that can fail logs the failure instead of returning it.

use std::collections::HashMap;

/// Prefix for persisted annotation keys
pub const ANNOTATION_KEY_PREFIX: &str = "photo-description-";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Per-photo notes, keyed by photo id
pub trait AnnotationStore {
    fn annotation(&self, id: &str) -> Option<String>;
    /// Save a note; a blank note deletes it
    fn set_annotation(&mut self, id: &str, value: &str);
}

pub fn annotation_key(id: &str) -> String {
    format!("{ANNOTATION_KEY_PREFIX}{id}")
}

impl<S: KeyValueStore + ?Sized> AnnotationStore for S {
    fn annotation(&self, id: &str) -> Option<String> {
        self.get(&annotation_key(id))
    }

    fn set_annotation(&mut self, id: &str, value: &str) {
        let key = annotation_key(id);
        if value.trim().is_empty() {
            self.remove(&key);
        } else {
            self.set(&key, value);
        }
    }
}

/// In-memory store, for tests and sessions that should not persist
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
