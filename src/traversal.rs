use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::graph::Graph;
use crate::types::{Depth, NodeKey};

/// Per-source results of a bounded traversal: source -> (reached vertex -> result).
pub type TraversalResult<N, R> = BTreeMap<N, BTreeMap<N, R>>;

/// Run an independent breadth-first search from every source, at most
/// `max_depth` hops deep (inclusive).
///
/// Every vertex reached at `depth` for which `selector(vertex, depth)` holds
/// is recorded as `vertex -> result(vertex, depth)` in that source's map.
/// Sources do not share visited state. A negative `max_depth` records
/// nothing; every source still gets an (empty) entry.
pub fn bounded_multi_source_bfs<N, R, S, F>(
    graph: &Graph<N>,
    sources: &BTreeSet<N>,
    mut selector: S,
    mut result: F,
    max_depth: Depth,
) -> TraversalResult<N, R>
where
    N: NodeKey,
    S: FnMut(&N, Depth) -> bool,
    F: FnMut(&N, Depth) -> R,
{
    let mut traversal = TraversalResult::new();
    for source in sources {
        let reached = if max_depth < 0 {
            BTreeMap::new()
        } else {
            graph
                .bfs_with(
                    source,
                    |vertex, depth| {
                        let depth = depth as Depth;
                        if selector(vertex, depth) {
                            Some(result(vertex, depth))
                        } else {
                            None
                        }
                    },
                    |_, depth| (depth as Depth) < max_depth,
                )
                .into_iter()
                .collect()
        };
        traversal.insert(source.clone(), reached);
    }
    debug!(
        "bounded bfs from {} sources (max depth {}) recorded {} vertices",
        sources.len(),
        max_depth,
        traversal.values().map(|reached| reached.len()).sum::<usize>()
    );
    traversal
}
