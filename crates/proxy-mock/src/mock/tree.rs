//! Segment tree holding every registered mock.
//!
//! Each node is addressed by one path segment and may carry a mock of its own
//! as well as children. Dispatch uses [`StorageTree::get`] (exact lookup);
//! introspection uses [`StorageTree::find`], which returns the whole subtree
//! under a partial path.
//!
//! Serialized form: a node is a JSON object whose children appear under their
//! segment names and whose own mock (if any) appears under `"_mock"`.

use super::path::segments;
use super::types::MockEntry;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Key under which a node's own mock is serialized.
pub const MOCK_KEY: &str = "_mock";

/// A node in the storage tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorageNode {
    entry: Option<MockEntry>,
    children: BTreeMap<String, StorageNode>,
}

impl StorageNode {
    pub fn entry(&self) -> Option<&MockEntry> {
        self.entry.as_ref()
    }

    pub fn child(&self, segment: &str) -> Option<&StorageNode> {
        self.children.get(segment)
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none() && self.children.is_empty()
    }

    /// Number of mocks in this subtree, including this node's own.
    pub fn len(&self) -> usize {
        usize::from(self.entry.is_some()) + self.children.values().map(|c| c.len()).sum::<usize>()
    }

    /// Remove the entry at `segments`, pruning nodes left with nothing in them.
    fn remove<'a>(&mut self, mut segments: impl Iterator<Item = &'a str>) -> Option<MockEntry> {
        let Some(segment) = segments.next() else {
            return self.entry.take();
        };

        let child = self.children.get_mut(segment)?;
        let removed = child.remove(segments);
        if child.is_empty() {
            self.children.remove(segment);
        }
        removed
    }
}

impl Serialize for StorageNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = self.children.len() + usize::from(self.entry.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(entry) = &self.entry {
            map.serialize_entry(MOCK_KEY, &entry.to_stored())?;
        }
        for (segment, child) in &self.children {
            map.serialize_entry(segment, child)?;
        }
        map.end()
    }
}

/// The full mock registry, rooted at `/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StorageTree {
    root: StorageNode,
}

impl StorageTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &StorageNode {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Insert an entry at its (already normalized) path, returning the entry
    /// it replaced.
    pub fn insert(&mut self, entry: MockEntry) -> Option<MockEntry> {
        let mut node = &mut self.root;
        for segment in segments(&entry.path) {
            node = node.children.entry(segment.to_string()).or_default();
        }
        node.entry.replace(entry)
    }

    /// Remove the entry exactly at `path`. Descendants are left in place.
    pub fn remove(&mut self, path: &str) -> Option<MockEntry> {
        self.root.remove(segments(path))
    }

    /// Exact lookup used for dispatch. No fallback to ancestors.
    pub fn get(&self, path: &str) -> Option<&MockEntry> {
        self.find(path).and_then(StorageNode::entry)
    }

    /// Follow `path` segment by segment and return the node it names, or
    /// `None` as soon as a segment is missing.
    pub fn find(&self, path: &str) -> Option<&StorageNode> {
        segments(path).try_fold(&self.root, |node, segment| node.child(segment))
    }

    pub fn clear(&mut self) {
        self.root = StorageNode::default();
    }
}
