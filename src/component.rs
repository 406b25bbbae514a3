use std::collections::BTreeSet;

use log::debug;

use crate::graph::Graph;
use crate::types::NodeKey;

/// Graph induced on the largest connected component.
///
/// Among components of equal size the first discovered one wins; components
/// are discovered in vertex key order. An empty graph yields an empty graph.
pub fn largest_component<N: NodeKey>(graph: &Graph<N>) -> Graph<N> {
    let mut components = graph.connected_components();
    // Stable: ties keep discovery order.
    components.sort_by(|a, b| b.len().cmp(&a.len()));

    let largest: BTreeSet<N> = components
        .into_iter()
        .next()
        .unwrap_or_default()
        .into_iter()
        .collect();
    debug!(
        "largest component keeps {} of {} vertices",
        largest.len(),
        graph.get_vertex_count()
    );
    graph.induced_subgraph(&largest)
}

#[cfg(test)]
mod test_component {
    use crate::attribute::annotate;
    use crate::component::largest_component;
    use crate::graph::Graph;

    #[test]
    fn test_keeps_largest() {
        // A five-vertex cycle and a three-vertex path.
        let g = Graph::from_edges(vec![
            (1, 2), (2, 3), (3, 4), (4, 5), (5, 1),
            (10, 11), (11, 12),
        ]);
        let largest = largest_component(&g);
        assert_eq!(largest.get_vertex_count(), 5);
        assert_eq!(largest.get_edge_count(), 5);
        assert!(largest.vertices().all(|v| *v <= 5));
        assert!(largest.edges().all(|(u, v, _)| *u <= 5 && *v <= 5));
    }

    #[test]
    fn test_tie_keeps_first_discovered() {
        let g = Graph::from_edges(vec![(7, 8), (1, 2)]);
        let largest = largest_component(&g);
        let vertices: Vec<_> = largest.vertices().copied().collect();
        assert_eq!(vertices, vec![1, 2]);
    }

    #[test]
    fn test_attributes_survive() {
        let g = Graph::from_edges(vec![("a", "b"), ("c", "d"), ("d", "e")]);
        let labelled = annotate(&g, "name", |v| v.to_string());
        let largest = largest_component(&labelled);
        assert_eq!(largest.get_vertex_count(), 3);
        assert!(largest.node_attr(&"e", "name").is_some());
        assert!(!largest.has_vertex(&"a"));
    }

    #[test]
    fn test_empty_graph() {
        let g: Graph<u32> = Graph::new();
        assert!(largest_component(&g).is_empty());
    }
}
