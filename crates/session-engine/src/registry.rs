//! Active-session registry.
//!
//! Sessions never share state; the registry only answers "which sessions are
//! live right now", so a coarse mutex over insert/remove is all the locking
//! the engine needs.

use std::collections::HashSet;
use std::sync::Mutex;

/// Tracks the ids of sessions currently running.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    active: Mutex<HashSet<String>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session. Returns false if the id was already registered.
    pub fn insert(&self, session_id: &str) -> bool {
        let mut active = self.active.lock().expect("registry lock poisoned");
        let inserted = active.insert(session_id.to_string());
        if !inserted {
            tracing::warn!(session_id, "Session id already registered");
        }
        inserted
    }

    /// Deregister a session. Returns false if the id was not registered.
    pub fn remove(&self, session_id: &str) -> bool {
        let mut active = self.active.lock().expect("registry lock poisoned");
        active.remove(session_id)
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.active
            .lock()
            .expect("registry lock poisoned")
            .contains(session_id)
    }

    pub fn len(&self) -> usize {
        self.active.lock().expect("registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of all live sessions, unordered.
    pub fn active_ids(&self) -> Vec<String> {
        self.active
            .lock()
            .expect("registry lock poisoned")
            .iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove() {
        let registry = SessionRegistry::new();
        assert!(registry.insert("a"));
        assert!(registry.insert("b"));
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("a"));

        assert!(registry.remove("a"));
        assert!(!registry.remove("a"));
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains("a"));
    }

    #[test]
    fn test_duplicate_insert_is_reported() {
        let registry = SessionRegistry::new();
        assert!(registry.insert("a"));
        assert!(!registry.insert("a"));
        assert_eq!(registry.len(), 1);
    }
}
