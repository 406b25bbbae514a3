use std::collections::BTreeSet;

use itertools::iproduct;
use log::debug;
use serde::Serialize;

use crate::attribute::AttrValue;
use crate::graph::Graph;
use crate::types::NodeKey;

/// Attribute key under which `group_graph` stores each group's size.
pub const GROUP_SIZE_ATTR: &str = "size";

/// A set of vertices treated as one vertex of the group graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupNode<N: NodeKey> {
    pub name: String, // Position of the group in the input, as a string.
    pub size: usize,
    pub members: BTreeSet<N>,
}

/// Directed pair of distinct groups weighted by their number of shared members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupEdge {
    pub src: String,
    pub dst: String,
    pub weight: usize,
}

pub fn group_nodes<N: NodeKey>(groups: &[BTreeSet<N>]) -> Vec<GroupNode<N>> {
    groups
        .iter()
        .enumerate()
        .map(|(idx, members)| GroupNode {
            name: idx.to_string(),
            size: members.len(),
            members: members.clone(),
        })
        .collect()
}

/// Edges between every ordered pair of distinct groups sharing members.
/// Both orientations of a pair are returned.
pub fn group_edges<N: NodeKey>(nodes: &[GroupNode<N>]) -> Vec<GroupEdge> {
    iproduct!(nodes.iter(), nodes.iter())
        .filter(|(src, dst)| src.name != dst.name)
        .filter_map(|(src, dst)| {
            let weight = src.members.intersection(&dst.members).count();
            (weight > 0).then(|| GroupEdge {
                src: src.name.clone(),
                dst: dst.name.clone(),
                weight,
            })
        })
        .collect()
}

/// Weighted graph over group names. Every group is a vertex carrying its size,
/// even when it shares no member with any other group.
pub fn group_graph<N: NodeKey>(groups: &[BTreeSet<N>]) -> Graph<String> {
    let nodes = group_nodes(groups);
    let mut graph = Graph::new_weighted();
    for node in &nodes {
        graph.insert_vertex(node.name.clone());
        graph.set_node_attr(&node.name, GROUP_SIZE_ATTR, AttrValue::from(node.size));
    }
    // The undirected graph folds each symmetric pair into a single edge.
    for edge in group_edges(&nodes) {
        graph.insert_weighted_edge(edge.src, edge.dst, edge.weight as f64);
    }
    debug!(
        "group graph: {} groups, {} edges",
        graph.get_vertex_count(),
        graph.get_edge_count()
    );
    graph
}
