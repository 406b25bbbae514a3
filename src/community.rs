use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};

use crate::graph::Graph;
use crate::traversal::bounded_multi_source_bfs;
use crate::types::{Depth, NodeKey, UNIT_WEIGHT};

/// Community label -> member vertices.
pub type CommunityMap<C, N> = BTreeMap<C, BTreeSet<N>>;

/// Hops added by the two synthetic label edges at the ends of a community path.
pub const COMMUNITY_HOPS: Depth = 2;

/// Vertex of the membership graph: either an original vertex or the meta-node
/// standing for a community. The two namespaces never collide.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetaNode<N, C> {
    Member(N),
    Community(C),
}

/// Fold a `(vertex, label)` assignment into a community map.
pub fn communities_from_assignment<N, C>(
    assignment: impl IntoIterator<Item = (N, C)>,
) -> CommunityMap<C, N>
where
    N: NodeKey,
    C: NodeKey,
{
    assignment.into_iter().fold(CommunityMap::new(), |mut acc, (vertex, label)| {
        acc.entry(label).or_default().insert(vertex);
        acc
    })
}

/// Copy of `graph` with one meta-node per community, linked by a unit edge to
/// each of its members. Labels are never linked to each other.
pub fn membership_graph<N, C>(
    graph: &Graph<N>,
    communities: &CommunityMap<C, N>,
) -> Graph<MetaNode<N, C>>
where
    N: NodeKey,
    C: NodeKey,
{
    let mut augmented = Graph::new_weighted();
    augmented.extend_vertices(graph.vertices().cloned().map(MetaNode::Member));
    for (u, v, weight) in graph.edges() {
        augmented.insert_weighted_edge(
            MetaNode::Member(u.clone()),
            MetaNode::Member(v.clone()),
            weight,
        );
    }
    for (label, members) in communities {
        augmented.insert_vertex(MetaNode::Community(label.clone()));
        for member in members {
            augmented.insert_weighted_edge(
                MetaNode::Community(label.clone()),
                MetaNode::Member(member.clone()),
                UNIT_WEIGHT,
            );
        }
    }
    augmented
}

/// Weighted graph over community labels whose edge weights approximate the hop
/// distance between communities, up to `max_depth` real hops.
///
/// Distances are measured on the membership graph and reduced by the two label
/// hops, so communities sharing a member are at distance 0. A path that passes
/// through other community meta-nodes counts their label hops too, which can
/// undercount the base-graph distance; callers rely on this approximation.
pub fn community_distance_graph<N, C>(
    graph: &Graph<N>,
    communities: &CommunityMap<C, N>,
    max_depth: Depth,
) -> Graph<C>
where
    N: NodeKey,
    C: NodeKey,
{
    let augmented = membership_graph(graph, communities);
    let sources: BTreeSet<MetaNode<N, C>> = communities
        .keys()
        .cloned()
        .map(MetaNode::Community)
        .collect();

    let distances = bounded_multi_source_bfs(
        &augmented,
        &sources,
        |vertex, depth| depth > 0 && matches!(vertex, MetaNode::Community(_)),
        |_, depth| depth - COMMUNITY_HOPS,
        max_depth.saturating_add(COMMUNITY_HOPS),
    );

    let mut distance_graph = Graph::new_weighted();
    distance_graph.extend_vertices(communities.keys().cloned());
    for (source, reached) in distances {
        let MetaNode::Community(src_label) = source else {
            continue;
        };
        for (target, distance) in reached {
            if let MetaNode::Community(dst_label) = target {
                distance_graph.insert_weighted_edge(src_label.clone(), dst_label, distance as f64);
            }
        }
    }
    debug!(
        "membership graph: {} vertices, {} edges",
        augmented.get_vertex_count(),
        augmented.get_edge_count()
    );
    info!(
        "community distance graph: {} communities, {} edges (max depth {})",
        distance_graph.get_vertex_count(),
        distance_graph.get_edge_count(),
        max_depth
    );
    distance_graph
}
