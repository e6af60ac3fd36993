//! Trie nodes keyed by single characters.
//!
//! Nodes live in the owning index's arena and refer to their children by
//! slot, so no operation on the trie recurses per key character.

use std::collections::BTreeMap;
use std::sync::Arc;

/// Slot of a node in a [`PrefixIndex`](super::PrefixIndex) arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct PrefixNodeId(pub(crate) usize);

impl PrefixNodeId {
    pub(crate) const ROOT: PrefixNodeId = PrefixNodeId(0);
}

/// One step of a key path. Holds the entries inserted under exactly the key
/// that leads here, in insertion order.
#[derive(Clone, Debug)]
pub(crate) struct PrefixNode<T> {
    children: BTreeMap<char, PrefixNodeId>,
    entries: Vec<Arc<T>>,
}

impl<T> PrefixNode<T> {
    pub(crate) fn new() -> Self {
        Self {
            children: BTreeMap::new(),
            entries: Vec::new(),
        }
    }

    pub(crate) fn child(&self, c: char) -> Option<PrefixNodeId> {
        self.children.get(&c).copied()
    }

    pub(crate) fn link(&mut self, c: char, child: PrefixNodeId) {
        self.children.insert(c, child);
    }

    /// Children in ascending key order.
    pub(crate) fn children(&self) -> impl DoubleEndedIterator<Item = PrefixNodeId> + '_ {
        self.children.values().copied()
    }

    pub(crate) fn child_keys(&self) -> impl Iterator<Item = char> + '_ {
        self.children.keys().copied()
    }

    pub(crate) fn entries(&self) -> &[Arc<T>] {
        &self.entries
    }

    pub(crate) fn push(&mut self, entry: Arc<T>) {
        self.entries.push(entry);
    }
}
