use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::graph::Graph;
use crate::types::NodeKey;

/// Weighted co-occurrence graph of the vertices appearing in `sets`.
///
/// The weight of u-v is the number of sets holding both u and v. Every member
/// of some set becomes a vertex; self-loops are never produced.
pub fn set_coincidence_graph<N: NodeKey>(sets: &[BTreeSet<N>]) -> Graph<N> {
    // Step 1. Reverse index: vertex -> sets containing it.
    let mut vertex_sets = BTreeMap::<&N, Vec<usize>>::new();
    for (set_idx, set) in sets.iter().enumerate() {
        for vertex in set {
            vertex_sets.entry(vertex).or_default().push(set_idx);
        }
    }

    // Step 2. Count co-occurrences per vertex, emit each pair once.
    let mut graph = Graph::new_weighted();
    for (&u, set_ids) in &vertex_sets {
        graph.insert_vertex(u.clone());
        let mut counts = BTreeMap::<&N, usize>::new();
        for &set_idx in set_ids {
            for v in sets[set_idx].iter().filter(|v| *v != u) {
                *counts.entry(v).or_insert(0) += 1;
            }
        }
        for (v, count) in counts.into_iter().filter(|(v, _)| u < *v) {
            graph.insert_weighted_edge(u.clone(), v.clone(), count as f64);
        }
    }
    debug!(
        "coincidence graph from {} sets: {} vertices, {} edges",
        sets.len(),
        graph.get_vertex_count(),
        graph.get_edge_count()
    );
    graph
}
