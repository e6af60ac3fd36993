//! Nearest-entry search over a [`SpatialIndex`].
//!
//! The search is an explicit-stack branch-and-bound traversal. Children are
//! pushed with the quadrant towards the target last, so it is explored first
//! and tightens the best distance early; any node whose region cannot hold a
//! closer entry is skipped without looking at its subtree.
//!
//! When several entries are equally close, the first one found wins. Which
//! one that is depends on traversal order and is not part of the contract.

use std::collections::HashSet;
use std::sync::Arc;

use geo::Point;
use tracing::debug;

use crate::models::Located;
use crate::spatial::index::SpatialIndex;
use crate::spatial::node::NodeId;

/// Counters describing how much of the tree a search touched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub visited: usize,
    pub pruned: usize,
}

/// Progress reported to the observer of [`SpatialIndex::nearest_traced`].
#[derive(Debug)]
pub enum SearchEvent<'a, T> {
    /// Node was expanded.
    Visited { node: NodeId },
    /// Node was skipped because nothing in it could beat `best_distance`.
    Pruned { node: NodeId, best_distance: f64 },
    /// A strictly closer entry was found.
    Improved { entry: &'a Arc<T>, distance: f64 },
}

impl<T: Located> SpatialIndex<T> {
    /// Entry closest to `target`, or `None` if the index is empty.
    pub fn nearest(&self, target: Point) -> Option<Arc<T>> {
        self.nearest_traced(target, |_| {})
    }

    /// Like [`nearest`](Self::nearest), also reporting visited and pruned
    /// node counts.
    pub fn nearest_with_stats(&self, target: Point) -> (Option<Arc<T>>, SearchStats) {
        let mut stats = SearchStats::default();
        let found = self.nearest_traced(target, |event| match event {
            SearchEvent::Visited { .. } => stats.visited += 1,
            SearchEvent::Pruned { .. } => stats.pruned += 1,
            SearchEvent::Improved { .. } => {}
        });
        (found, stats)
    }

    /// Nearest-entry search that reports every step to `observe`.
    pub fn nearest_traced<F>(&self, target: Point, mut observe: F) -> Option<Arc<T>>
    where
        F: FnMut(SearchEvent<'_, T>),
    {
        let mut best_distance = f64::INFINITY;
        let mut best: Option<&Arc<T>> = None;
        let mut stack = vec![NodeId::ROOT];
        let mut visited = HashSet::new();
        let mut stats = SearchStats::default();

        while let Some(id) = stack.pop() {
            if visited.contains(&id) {
                continue;
            }
            let node = &self.nodes[id.0];
            if node.prunable(target, best_distance) {
                stats.pruned += 1;
                observe(SearchEvent::Pruned {
                    node: id,
                    best_distance,
                });
                continue;
            }

            visited.insert(id);
            stats.visited += 1;
            observe(SearchEvent::Visited { node: id });

            if let Some((entry, distance)) = node.best_among_direct(target, best_distance) {
                best_distance = distance;
                best = Some(entry);
                observe(SearchEvent::Improved { entry, distance });
            }

            stack.extend(node.child_traversal_order(target));
        }

        debug!(
            visited = stats.visited,
            pruned = stats.pruned,
            distance = best_distance,
            "nearest-entry search finished"
        );

        best.cloned()
    }
}
