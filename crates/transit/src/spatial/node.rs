//! Quadtree nodes and the per-node primitives used by nearest-stop search.

use std::sync::Arc;

use geo::{EuclideanDistance, Point};

use crate::models::Located;
use crate::spatial::region::Region;

/// Position of a node inside its index's node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub(crate) enum NodeKind<T> {
    /// Holds entries directly.
    Leaf(Vec<Arc<T>>),
    /// Four children, indexed by `Quadrant::index`.
    Internal([NodeId; 4]),
}

#[derive(Clone, Debug)]
pub struct QuadNode<T> {
    region: Region,
    depth: usize,
    pub(crate) kind: NodeKind<T>,
}

impl<T: Located> QuadNode<T> {
    pub(crate) fn leaf(region: Region, depth: usize) -> Self {
        Self {
            region,
            depth,
            kind: NodeKind::Leaf(Vec::new()),
        }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Distance from the root, which has depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Entries stored directly in this node. Always empty for internal nodes.
    pub fn entries(&self) -> &[Arc<T>] {
        match &self.kind {
            NodeKind::Leaf(entries) => entries,
            NodeKind::Internal(_) => &[],
        }
    }

    pub fn children(&self) -> Option<[NodeId; 4]> {
        match self.kind {
            NodeKind::Internal(children) => Some(children),
            NodeKind::Leaf(_) => None,
        }
    }

    /// The directly stored entry closest to `target`, provided it is strictly
    /// closer than `best_distance`. Returns the entry with its distance.
    pub fn best_among_direct(&self, target: Point, best_distance: f64) -> Option<(&Arc<T>, f64)> {
        let mut best = None;
        let mut best_distance = best_distance;

        for entry in self.entries() {
            let distance = entry.location().euclidean_distance(&target);
            if distance < best_distance {
                best_distance = distance;
                best = Some((entry, distance));
            }
        }

        best
    }

    /// True when nothing under this node can be closer to `target` than
    /// `best_distance`.
    pub fn prunable(&self, target: Point, best_distance: f64) -> bool {
        self.region.is_beyond(target, best_distance)
    }

    /// Children in the order a LIFO search should push them: the quadrant
    /// towards `target` comes last so it is popped first. Yields nothing for
    /// a leaf.
    pub fn child_traversal_order(&self, target: Point) -> impl Iterator<Item = NodeId> {
        let ordered = self.children().map(|children| {
            self.region
                .search_order(target)
                .map(|quadrant| children[quadrant.index()])
        });
        ordered.into_iter().flatten()
    }
}
