//! Registry - create, delete and query operations over the storage tree.
//!
//! All access goes through a single lock around the whole tree. Lookups hand
//! out clones so no caller holds the lock across an `.await`.

use super::path::{normalize_path, segments};
use super::tree::{StorageNode, StorageTree, MOCK_KEY};
use super::types::{MockEntry, MockError, StoredMock};
use parking_lot::RwLock;
use tracing::{debug, info};

/// Owns the registered mocks for one server instance.
#[derive(Debug, Default)]
pub struct Registry {
    tree: RwLock<StorageTree>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the mock at the entry's path.
    ///
    /// The root path and paths containing the `_mock` segment are rejected:
    /// the root is never dispatched, and `_mock` is where a node's own entry
    /// is serialized.
    pub fn register(&self, mut entry: MockEntry) -> Result<StoredMock, MockError> {
        entry.path = normalize_path(&entry.path);
        if segments(&entry.path).next().is_none() {
            return Err(MockError::EmptyPath);
        }
        if segments(&entry.path).any(|segment| segment == MOCK_KEY) {
            return Err(MockError::ReservedSegment(MOCK_KEY.to_string()));
        }

        let stored = entry.to_stored();
        let path = entry.path.clone();
        let binary = entry.body.is_binary();
        let replaced = self.tree.write().insert(entry).is_some();

        let kind = if binary { "binary mock" } else { "mock" };
        if replaced {
            info!("Replaced {} {}", kind, path);
        } else {
            info!("Registered {} {}", kind, path);
        }
        Ok(stored)
    }

    /// Remove the mock exactly at `path`. Returns whether one was removed.
    pub fn delete(&self, path: &str) -> bool {
        let path = normalize_path(path);
        let removed = self.tree.write().remove(&path).is_some();
        if removed {
            info!("Deleted mock {}", path);
        } else {
            debug!("No mock to delete at {}", path);
        }
        removed
    }

    /// Remove every mock.
    pub fn clear(&self) -> bool {
        let mut tree = self.tree.write();
        let count = tree.len();
        tree.clear();
        info!("Cleared mock storage ({} mocks removed)", count);
        true
    }

    /// Exact lookup for dispatch.
    pub fn get(&self, path: &str) -> Option<MockEntry> {
        self.tree.read().get(&normalize_path(path)).cloned()
    }

    /// Introspection lookup: the subtree at a possibly partial path.
    pub fn find(&self, path: &str) -> Option<StorageNode> {
        self.tree.read().find(&normalize_path(path)).cloned()
    }

    pub fn snapshot(&self) -> StorageTree {
        self.tree.read().clone()
    }

    pub fn len(&self) -> usize {
        self.tree.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBody;
    use bytes::Bytes;

    fn text(path: &str, body: &str) -> MockEntry {
        MockEntry::new(path).with_body(MockBody::Text(body.to_string()))
    }

    #[test]
    fn test_register_normalizes_path() {
        let registry = Registry::new();
        let stored = registry.register(text("api/users/", "x")).unwrap();

        assert_eq!(stored.path, "/api/users");
        assert!(registry.get("/api/users").is_some());
        assert!(registry.get("/api/users/").is_some());
    }

    #[test]
    fn test_register_rejects_empty_path() {
        let registry = Registry::new();
        assert!(matches!(registry.register(text("", "x")), Err(MockError::EmptyPath)));
        assert!(matches!(registry.register(text("/", "x")), Err(MockError::EmptyPath)));
        assert!(matches!(registry.register(text("//", "x")), Err(MockError::EmptyPath)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_rejects_reserved_segment() {
        let registry = Registry::new();
        registry.register(text("/a", "parent")).unwrap();

        let err = registry.register(text("/a/_mock", "child")).unwrap_err();
        assert!(matches!(err, MockError::ReservedSegment(_)));
        assert!(registry.register(text("/_mock/b", "x")).is_err());
        assert!(registry.register(text("/a/_mocks", "ok")).is_ok());

        let json = serde_json::to_value(registry.snapshot()).unwrap();
        assert_eq!(json["a"]["_mock"]["path"], "/a");
    }

    #[test]
    fn test_reregister_keeps_single_entry() {
        let registry = Registry::new();
        registry.register(text("/a", "first")).unwrap();
        registry.register(text("/a", "second")).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("/a").unwrap().body, MockBody::Text("second".into()));
    }

    #[test]
    fn test_binary_register_returns_display_string() {
        let registry = Registry::new();
        let entry = MockEntry::new("/bin").with_body(MockBody::Binary(Bytes::from_static(b"ab\x01")));
        let stored = registry.register(entry).unwrap();

        assert_eq!(stored.mock_data.body.as_deref(), Some(r#"b"ab\x01""#));
        assert!(registry.get("/bin").unwrap().body.is_binary());
    }

    #[test]
    fn test_delete_scoped_to_one_path() {
        let registry = Registry::new();
        registry.register(text("/a/b", "1")).unwrap();
        registry.register(text("/a/c", "2")).unwrap();

        assert!(registry.delete("/a/b"));
        assert!(!registry.delete("/a/b"));
        assert!(registry.get("/a/c").is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clear_empties_everything() {
        let registry = Registry::new();
        registry.register(text("/a", "1")).unwrap();
        registry.register(text("/b/c", "2")).unwrap();

        assert!(registry.clear());
        assert!(registry.is_empty());
        assert!(registry.clear());
    }

    #[test]
    fn test_find_returns_subtree() {
        let registry = Registry::new();
        registry.register(text("/a/b", "1")).unwrap();

        let subtree = registry.find("/a").unwrap();
        assert_eq!(subtree.child("b").unwrap().entry().unwrap().path, "/a/b");
        assert!(registry.find("/x").is_none());
        assert!(registry.get("/a").is_none());
    }
}
