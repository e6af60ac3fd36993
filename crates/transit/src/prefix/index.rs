//! Character trie mapping keys to the entries stored under them.
//!
//! The index is case-sensitive; callers wanting case-insensitive lookup
//! normalise keys before both insertion and lookup.

use std::sync::Arc;

use crate::prefix::node::{PrefixNode, PrefixNodeId};

/// Trie stored as an arena of nodes, slot 0 being the root.
#[derive(Clone, Debug)]
pub struct PrefixIndex<T> {
    nodes: Vec<PrefixNode<T>>,
    len: usize,
}

impl<T> PrefixIndex<T> {
    pub fn new() -> Self {
        Self {
            nodes: vec![PrefixNode::new()],
            len: 0,
        }
    }

    fn node(&self, id: PrefixNodeId) -> &PrefixNode<T> {
        &self.nodes[id.0]
    }

    /// Store `entry` under `key`. Keys need not be unique.
    pub fn insert(&mut self, key: &str, entry: Arc<T>) {
        let mut id = PrefixNodeId::ROOT;
        for c in key.chars() {
            id = match self.nodes[id.0].child(c) {
                Some(child) => child,
                None => {
                    let child = PrefixNodeId(self.nodes.len());
                    self.nodes.push(PrefixNode::new());
                    self.nodes[id.0].link(c, child);
                    child
                }
            };
        }
        self.nodes[id.0].push(entry);
        self.len += 1;
    }

    fn walk(&self, key: &str) -> Option<&PrefixNode<T>> {
        key.chars()
            .try_fold(PrefixNodeId::ROOT, |id, c| self.node(id).child(c))
            .map(|id| self.node(id))
    }

    /// Entries stored under exactly `key`.
    ///
    /// `None` means no key starts with `key`; `Some` with an empty slice
    /// means longer keys pass through it but nothing was stored under it.
    pub fn lookup_exact(&self, key: &str) -> Option<&[Arc<T>]> {
        self.walk(key).map(PrefixNode::entries)
    }

    /// Entries stored under `key` or any key extending it.
    ///
    /// Results come in pre-order: entries at a node before those of its
    /// children, children in ascending character order, each node's entries in
    /// insertion order. An unknown prefix yields an empty list.
    pub fn lookup_prefix(&self, key: &str) -> Vec<Arc<T>> {
        let mut found = Vec::new();
        let Some(start) = self.walk(key) else {
            return found;
        };

        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            found.extend(node.entries().iter().cloned());
            stack.extend(node.children().rev().map(|child| self.node(child)));
        }

        found
    }

    /// True if some stored key starts with `key`.
    pub fn contains_prefix(&self, key: &str) -> bool {
        self.walk(key).is_some()
    }

    /// Characters that can follow `key`, in ascending order.
    pub fn next_chars(&self, key: &str) -> Vec<char> {
        self.walk(key)
            .map(|node| node.child_keys().collect())
            .unwrap_or_default()
    }

    /// Discard every key and entry.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(PrefixNode::new());
        self.len = 0;
    }

    /// Number of stored entries, counting repeats under the same key.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of trie nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl<T> Default for PrefixIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(entries: &[Arc<&'static str>]) -> Vec<&'static str> {
        entries.iter().map(|e| **e).collect()
    }

    fn bus_index() -> PrefixIndex<&'static str> {
        let mut index = PrefixIndex::new();
        index.insert("busstop", Arc::new("busstop-1"));
        index.insert("bus", Arc::new("bus-1"));
        index.insert("bust", Arc::new("bust-1"));
        index.insert("bus", Arc::new("bus-2"));
        index.insert("bar", Arc::new("bar-1"));
        index
    }

    #[test]
    fn test_exact_lookup_returns_only_literal_key() {
        let index = bus_index();

        assert_eq!(ids(index.lookup_exact("bus").unwrap()), vec!["bus-1", "bus-2"]);
        assert_eq!(ids(index.lookup_exact("bust").unwrap()), vec!["bust-1"]);
    }

    #[test]
    fn test_exact_lookup_distinguishes_missing_from_empty() {
        let index = bus_index();

        // "busst" is on the path to "busstop" but holds nothing itself
        assert_eq!(index.lookup_exact("busst").map(<[_]>::len), Some(0));
        assert!(index.lookup_exact("train").is_none());
        assert!(index.lookup_exact("busstops").is_none());
    }

    #[test]
    fn test_prefix_lookup_is_pre_order() {
        let index = bus_index();

        assert_eq!(
            ids(&index.lookup_prefix("bus")),
            vec!["bus-1", "bus-2", "busstop-1", "bust-1"]
        );
        assert_eq!(
            ids(&index.lookup_prefix("b")),
            vec!["bar-1", "bus-1", "bus-2", "busstop-1", "bust-1"]
        );
        assert_eq!(index.lookup_prefix("").len(), 5);
    }

    #[test]
    fn test_unknown_prefix_is_empty() {
        let index = bus_index();

        assert!(index.lookup_prefix("x").is_empty());
        assert!(index.lookup_prefix("buss!").is_empty());
        assert!(!index.contains_prefix("x"));
        assert!(index.contains_prefix("bu"));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut index = PrefixIndex::new();
        index.insert("Bus", Arc::new("upper"));

        assert!(index.lookup_exact("bus").is_none());
        assert_eq!(ids(&index.lookup_prefix("B")), vec!["upper"]);
    }

    #[test]
    fn test_unicode_keys() {
        let mut index = PrefixIndex::new();
        index.insert("ōtaki", Arc::new("otaki"));
        index.insert("ōhāriu", Arc::new("ohariu"));

        assert_eq!(ids(&index.lookup_prefix("ō")), vec!["ohariu", "otaki"]);
        assert_eq!(index.next_chars("ō"), vec!['h', 't']);
    }

    #[test]
    fn test_empty_key() {
        let mut index = PrefixIndex::new();
        assert_eq!(index.lookup_exact("").map(<[_]>::len), Some(0));

        index.insert("", Arc::new("root"));
        assert_eq!(ids(index.lookup_exact("").unwrap()), vec!["root"]);
    }

    #[test]
    fn test_clear_matches_fresh_index() {
        let mut index = bus_index();
        index.clear();
        let fresh: PrefixIndex<&'static str> = PrefixIndex::new();

        assert!(index.is_empty());
        assert_eq!(index.lookup_exact("bus").is_none(), fresh.lookup_exact("bus").is_none());
        assert_eq!(index.lookup_prefix("").len(), fresh.lookup_prefix("").len());
        assert_eq!(index.lookup_exact("").map(<[_]>::len), Some(0));
    }

    #[test]
    fn test_long_key_survives_clear_and_drop() {
        let key = "a".repeat(100_000);
        let mut index = PrefixIndex::new();
        index.insert(&key, Arc::new("long"));

        assert_eq!(index.node_count(), 100_001);
        assert_eq!(ids(index.lookup_exact(&key).unwrap()), vec!["long"]);
        assert_eq!(ids(&index.lookup_prefix("a")), vec!["long"]);

        let copy = index.clone();
        index.clear();
        assert_eq!(index.node_count(), 1);
        assert!(index.lookup_exact("a").is_none());

        assert_eq!(copy.lookup_prefix("aaaa").len(), 1);
        drop(copy);
        drop(index);
    }

    #[test]
    fn test_shared_prefixes_reuse_nodes() {
        let index = bus_index();

        // Root, seven for "busstop", "t" of "bust", "a" and "r" of "bar"
        assert_eq!(index.node_count(), 11);
    }
}
