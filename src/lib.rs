//! Derivation of higher-level weighted graphs from a base graph and from
//! collections of vertex sets: community-distance graphs, set-coincidence
//! graphs and group graphs, together with adjacency materialization,
//! component and subgraph extraction, and tree-path enumeration.
//!
//! Every operation is a pure function: inputs are borrowed, results are new
//! values.

pub mod attribute;
pub mod coincidence;
pub mod community;
pub mod component;
pub mod config;
pub mod graph;
pub mod graph_file;
pub mod group;
pub mod logger;
pub mod matrix;
pub mod span_tree;
pub mod subgraph;
pub mod traversal;
pub mod types;

pub use attribute::{annotate, AttrValue, NodeAttrs};
pub use coincidence::set_coincidence_graph;
pub use community::{
    communities_from_assignment, community_distance_graph, membership_graph, CommunityMap, MetaNode,
};
pub use component::largest_component;
pub use graph::Graph;
pub use group::{group_edges, group_graph, group_nodes, GroupEdge, GroupNode};
pub use matrix::{
    adjacency_matrix, node_index, symmetric_adjacency_matrix, Matrix, MatrixBuilder, NodeIndex,
    Storage,
};
pub use span_tree::{span_tree, tree_paths, SpanTree};
pub use subgraph::{edges_within, edges_within_by_id};
pub use traversal::{bounded_multi_source_bfs, TraversalResult};
pub use types::{Depth, NodeKey, Weight, WeightedEdge};
