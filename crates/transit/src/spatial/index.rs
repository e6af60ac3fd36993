//! Region quadtree over located entries.
//!
//! Nodes are kept in an arena and addressed by [`NodeId`]; the root is always
//! [`NodeId::ROOT`]. A leaf subdivides into four equal quadrants the first
//! time an insertion would push it past the configured capacity, and never
//! merges back. The tree is built once per data load and is read-only for
//! queries.
//!
//! ## Coincident points
//!
//! Entries that share coordinates cannot be separated by subdivision. Leaves
//! at `IndexConfig::max_depth` stop subdividing and keep accepting entries
//! past capacity instead.

use std::sync::Arc;

use tracing::warn;

use crate::config::IndexConfig;
use crate::models::{Located, Result, TransitError};
use crate::spatial::node::{NodeId, NodeKind, QuadNode};
use crate::spatial::region::Region;

enum Step {
    Store,
    Split,
    Descend([NodeId; 4]),
}

#[derive(Clone, Debug)]
pub struct SpatialIndex<T> {
    pub(crate) nodes: Vec<QuadNode<T>>,
    config: IndexConfig,
    len: usize,
}

impl<T: Located> SpatialIndex<T> {
    /// Empty index covering `region` with the default configuration.
    pub fn build(region: Region) -> Self {
        Self::with_config(region, IndexConfig::default())
    }

    /// Empty index covering `region`. A capacity of zero is treated as one.
    pub fn with_config(region: Region, config: IndexConfig) -> Self {
        let config = IndexConfig {
            capacity: config.capacity.max(1),
            ..config
        };

        Self {
            nodes: vec![QuadNode::leaf(region, 0)],
            config,
            len: 0,
        }
    }

    /// Insert an entry, returning `false` without side effects when its
    /// location is outside the root region or not finite.
    pub fn insert(&mut self, entry: Arc<T>) -> bool {
        let inserted = self.insert_at(NodeId::ROOT, &entry);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Like [`insert`](Self::insert), reporting a rejected location as
    /// [`TransitError::OutOfBounds`].
    pub fn try_insert(&mut self, entry: Arc<T>) -> Result<()> {
        let location = entry.location();
        if self.insert(entry) {
            Ok(())
        } else {
            Err(TransitError::OutOfBounds {
                x: location.x(),
                y: location.y(),
            })
        }
    }

    fn insert_at(&mut self, mut id: NodeId, entry: &Arc<T>) -> bool {
        let point = entry.location();
        if !(point.x().is_finite() && point.y().is_finite()) {
            return false;
        }
        if !self.nodes[id.0].region().contains(point) {
            return false;
        }

        loop {
            let node = &self.nodes[id.0];
            let step = match &node.kind {
                NodeKind::Leaf(entries) if entries.len() < self.config.capacity => Step::Store,
                NodeKind::Leaf(entries) if node.depth() >= self.config.max_depth => {
                    if entries.len() == self.config.capacity {
                        warn!(
                            depth = node.depth(),
                            x = point.x(),
                            y = point.y(),
                            "leaf at maximum depth is over capacity; entries are too close to separate"
                        );
                    }
                    Step::Store
                }
                NodeKind::Leaf(_) => Step::Split,
                NodeKind::Internal(children) => Step::Descend(*children),
            };

            match step {
                Step::Store => {
                    if let NodeKind::Leaf(entries) = &mut self.nodes[id.0].kind {
                        entries.push(Arc::clone(entry));
                    }
                    return true;
                }
                Step::Split => self.subdivide(id),
                Step::Descend(children) => {
                    // Shared edges go to the first quadrant in index order
                    match children
                        .into_iter()
                        .find(|child| self.nodes[child.0].region().contains(point))
                    {
                        Some(child) => id = child,
                        None => return false,
                    }
                }
            }
        }
    }

    /// Turn leaf `id` into an internal node with four empty quadrant leaves
    /// and move its entries down, preserving their order.
    ///
    /// # Panics
    ///
    /// Panics if `id` is already internal.
    fn subdivide(&mut self, id: NodeId) {
        let node = &mut self.nodes[id.0];
        let NodeKind::Leaf(entries) = &mut node.kind else {
            panic!("subdividing a non-leaf node");
        };
        let entries = std::mem::take(entries);
        let region = *node.region();
        let depth = node.depth() + 1;

        let first = self.nodes.len();
        let children: [NodeId; 4] = std::array::from_fn(|i| NodeId(first + i));
        self.nodes
            .extend(region.quadrants().map(|quadrant| QuadNode::leaf(quadrant, depth)));
        self.nodes[id.0].kind = NodeKind::Internal(children);

        for entry in entries {
            let placed = children.iter().any(|&child| self.insert_at(child, &entry));
            debug_assert!(placed, "quadrants must cover their parent region");
        }
    }

    /// Discard every entry and node, leaving an empty root over the same
    /// region.
    pub fn clear(&mut self) {
        let region = *self.region();
        self.nodes.clear();
        self.nodes.push(QuadNode::leaf(region, 0));
        self.len = 0;
    }

    pub fn region(&self) -> &Region {
        self.root().region()
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn root(&self) -> &QuadNode<T> {
        &self.nodes[NodeId::ROOT.0]
    }

    pub fn node(&self, id: NodeId) -> Option<&QuadNode<T>> {
        self.nodes.get(id.0)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth of the deepest node; 0 while the root is still a leaf.
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(QuadNode::depth).max().unwrap_or(0)
    }

    /// Every entry stored in the subtree rooted at `id`.
    pub fn entries_within(&self, id: NodeId) -> Vec<&Arc<T>> {
        let mut found = Vec::new();
        let mut stack = vec![id];

        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            found.extend(node.entries());
            stack.extend(node.children().into_iter().flatten());
        }

        found
    }

    /// Every stored entry, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.nodes.iter().flat_map(|node| node.entries())
    }
}
