use std::collections::{BTreeMap, HashSet, VecDeque};

use anyhow::{bail, Result};

use crate::graph::Graph;
use crate::types::NodeKey;

/// Vertex -> ordered children, as recorded by one traversal from a root.
pub type SpanTree<N> = BTreeMap<N, Vec<N>>;

/// Successor map of a breadth-first traversal of `graph` rooted at `source`.
/// Every vertex reached gets exactly one parent; leaves have no entry.
pub fn span_tree<N: NodeKey>(graph: &Graph<N>, source: &N) -> SpanTree<N> {
    let mut tree = SpanTree::new();
    if !graph.has_vertex(source) {
        return tree;
    }
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(source);
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for neighbor in graph.neighbors(u) {
            if visited.insert(neighbor) {
                tree.entry(u.clone()).or_insert_with(Vec::new).push(neighbor.clone());
                queue.push_back(neighbor);
            }
        }
    }
    tree
}

/// Every root-to-vertex path of `tree` starting at `source`, `[source]` first.
///
/// Paths are grown from a worklist, one child at a time, so each vertex
/// reachable from `source` ends exactly one path. Fails if a vertex is reached
/// twice, i.e. the map is not a tree below `source`.
pub fn tree_paths<N: NodeKey>(tree: &SpanTree<N>, source: &N) -> Result<Vec<Vec<N>>> {
    let children_of = |vertex: &N| tree.get(vertex).map(Vec::as_slice).unwrap_or(&[]);

    let mut paths = vec![vec![source.clone()]];
    let mut reached = HashSet::new();
    reached.insert(source.clone());
    // Each pending path is paired with its last vertex.
    let mut pending: VecDeque<(Vec<N>, &N)> = children_of(source)
        .iter()
        .map(|child| (vec![source.clone(), child.clone()], child))
        .collect();

    while let Some((path, last)) = pending.pop_front() {
        if !reached.insert(last.clone()) {
            bail!("vertex {:?} is reached more than once from {:?}", last, source);
        }
        for child in children_of(last) {
            let mut extended = path.clone();
            extended.push(child.clone());
            pending.push_back((extended, child));
        }
        paths.push(path);
    }
    Ok(paths)
}

#[cfg(test)]
mod test_span_tree {
    use std::collections::BTreeSet;

    use crate::graph::Graph;
    use crate::span_tree::{span_tree, tree_paths, SpanTree};

    fn sample_tree() -> SpanTree<&'static str> {
        [("A", vec!["B", "C"]), ("B", vec!["D"])].into_iter().collect()
    }

    #[test]
    fn test_paths_of_small_tree() {
        let paths = tree_paths(&sample_tree(), &"A").unwrap();
        assert_eq!(
            paths,
            vec![
                vec!["A"],
                vec!["A", "B"],
                vec!["A", "C"],
                vec!["A", "B", "D"],
            ]
        );
        let ends: BTreeSet<_> = paths.iter().filter_map(|p| p.last().copied()).collect();
        assert_eq!(ends.len(), paths.len());
    }

    #[test]
    fn test_paths_from_inner_vertex() {
        let paths = tree_paths(&sample_tree(), &"B").unwrap();
        assert_eq!(paths, vec![vec!["B"], vec!["B", "D"]]);

        let leaf = tree_paths(&sample_tree(), &"D").unwrap();
        assert_eq!(leaf, vec![vec!["D"]]);
    }

    #[test]
    fn test_paths_of_deep_chain() {
        let chain: SpanTree<u32> = (0..5).map(|v| (v, vec![v + 1])).collect();
        let paths = tree_paths(&chain, &0).unwrap();
        assert_eq!(paths.len(), 6);
        assert_eq!(paths[5], vec![0, 1, 2, 3, 4, 5]);
        for (depth, path) in paths.iter().enumerate() {
            assert_eq!(path.last(), Some(&(depth as u32)));
        }
    }

    #[test]
    fn test_rejects_non_tree() {
        // D has two parents.
        let dag: SpanTree<&str> = [("A", vec!["B", "C"]), ("B", vec!["D"]), ("C", vec!["D"])]
            .into_iter()
            .collect();
        assert!(tree_paths(&dag, &"A").is_err());

        let cycle: SpanTree<u32> = [(1, vec![2]), (2, vec![1])].into_iter().collect();
        assert!(tree_paths(&cycle, &1).is_err());
    }

    #[test]
    fn test_span_tree_of_graph() {
        // 1 - 2 - 4, 1 - 3 - 4: BFS gives 4 a single parent.
        let g = Graph::from_edges(vec![(1, 2), (1, 3), (2, 4), (3, 4), (8, 9)]);
        let tree = span_tree(&g, &1);
        assert_eq!(tree.get(&1), Some(&vec![2, 3]));
        assert_eq!(tree.get(&2), Some(&vec![4]));
        assert!(tree.get(&3).is_none());

        let paths = tree_paths(&tree, &1).unwrap();
        assert_eq!(paths.len(), 4);
        assert!(paths.iter().all(|p| !p.contains(&8)));
    }

    #[test]
    fn test_span_tree_unknown_source() {
        let g = Graph::from_edges(vec![(1, 2)]);
        assert!(span_tree(&g, &5).is_empty());
        assert_eq!(tree_paths(&span_tree(&g, &5), &5).unwrap(), vec![vec![5]]);
    }
}
