use std::collections::{BTreeSet, HashSet};

use fixedbitset::FixedBitSet;
use log::debug;
use rayon::prelude::*;

use crate::config::{BITMAP_SLACK_BITS, MAX_BITMAP_SPARSITY, PAR_REDUCE_THRESHOLD};
use crate::graph::Graph;
use crate::types::{NodeKey, WeightedEdge};

/// Edges of `graph` with both endpoints in `subset`. Unweighted graphs report
/// the unit weight.
pub fn edges_within<N: NodeKey>(graph: &Graph<N>, subset: &BTreeSet<N>) -> Vec<WeightedEdge<N>> {
    graph
        .edges()
        .filter(|(u, v, _)| subset.contains(*u) && subset.contains(*v))
        .map(|(u, v, weight)| (u.clone(), v.clone(), weight))
        .collect()
}

/// Membership test over integer ids.
#[derive(Debug)]
enum Membership {
    Bitmap(FixedBitSet),
    Hashed(HashSet<usize>),
}

impl Membership {
    fn build(ids: impl Iterator<Item = usize>, max_id: usize, subset_len: usize) -> Self {
        let bits = max_id.saturating_add(1);
        let bitmap_limit = subset_len
            .saturating_mul(MAX_BITMAP_SPARSITY)
            .saturating_add(BITMAP_SLACK_BITS);
        if bits <= bitmap_limit {
            let mut bitmap = FixedBitSet::with_capacity(bits);
            for id in ids {
                bitmap.insert(id);
            }
            Membership::Bitmap(bitmap)
        } else {
            Membership::Hashed(ids.collect())
        }
    }

    fn contains(&self, id: usize) -> bool {
        match self {
            // Ids past the bitmap are reported absent.
            Membership::Bitmap(bitmap) => bitmap.contains(id),
            Membership::Hashed(set) => set.contains(&id),
        }
    }
}

/// Largest id of the subset, 0 when empty. Large subsets reduce in parallel.
fn max_id<N, F>(subset: &BTreeSet<N>, id: &F) -> usize
where
    N: NodeKey + Sync,
    F: Fn(&N) -> usize + Sync,
{
    if subset.len() >= PAR_REDUCE_THRESHOLD {
        subset.par_iter().map(|vertex| id(vertex)).reduce(|| 0, usize::max)
    } else {
        subset.iter().map(|vertex| id(vertex)).fold(0, usize::max)
    }
}

/// Edges of `edges` whose endpoints both map into the ids of `subset`.
///
/// `id` must be injective on the vertices involved. Compact ids are tested
/// against a bitmap of `max_id + 1` bits, sparse id spaces against a hashed
/// set; both give the same result as `edges_within`.
pub fn edges_within_by_id<N, F>(
    edges: &[WeightedEdge<N>],
    id: F,
    subset: &BTreeSet<N>,
) -> Vec<WeightedEdge<N>>
where
    N: NodeKey + Sync,
    F: Fn(&N) -> usize + Sync,
{
    let max_id = max_id(subset, &id);
    let membership = Membership::build(subset.iter().map(&id), max_id, subset.len());
    debug!(
        "filtering {} edges against {} ids (max id {}, {})",
        edges.len(),
        subset.len(),
        max_id,
        match membership {
            Membership::Bitmap(_) => "bitmap",
            Membership::Hashed(_) => "hashed",
        }
    );
    edges
        .iter()
        .filter(|(u, v, _)| membership.contains(id(u)) && membership.contains(id(v)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod test_subgraph {
    use std::collections::BTreeSet;

    use crate::graph::Graph;
    use crate::subgraph::{edges_within, edges_within_by_id, max_id};

    fn sample_graph() -> Graph<usize> {
        Graph::from_edges(vec![(0, 1), (1, 2), (2, 3), (3, 0), (1, 3), (4, 5)])
    }

    #[test]
    fn test_edges_within_subset() {
        let subset: BTreeSet<usize> = [0, 1, 3].into_iter().collect();
        let edges = edges_within(&sample_graph(), &subset);
        assert_eq!(edges, vec![(0, 1, 1.0), (0, 3, 1.0), (1, 3, 1.0)]);
    }

    #[test]
    fn test_variants_agree() {
        let g = sample_graph();
        let edges = g.edge_list();
        for subset in [vec![0, 1, 3], vec![1, 2, 4, 5], vec![], vec![5]] {
            let subset: BTreeSet<usize> = subset.into_iter().collect();
            assert_eq!(
                edges_within(&g, &subset),
                edges_within_by_id(&edges, |v| *v, &subset)
            );
        }
    }

    #[test]
    fn test_sparse_ids_use_hashed_fallback() {
        let g = Graph::from_edges(vec![
            (0usize, 1_000_000_000usize),
            (1_000_000_000, 7),
            (7, 9),
        ]);
        let subset: BTreeSet<usize> = [0, 1_000_000_000, 7].into_iter().collect();
        let filtered = edges_within_by_id(&g.edge_list(), |v| *v, &subset);
        assert_eq!(filtered, edges_within(&g, &subset));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_ids_outside_subset_excluded() {
        // "z" maps beyond every id of the subset.
        let g = Graph::from_edges(vec![("a", "b"), ("b", "z")]);
        let ids = |v: &&str| match *v {
            "a" => 0,
            "b" => 1,
            _ => 99,
        };
        let subset: BTreeSet<&str> = ["a", "b"].into_iter().collect();
        let filtered = edges_within_by_id(&g.edge_list(), ids, &subset);
        assert_eq!(filtered, vec![("a", "b", 1.0)]);
    }

    #[test]
    fn test_max_id() {
        let empty = BTreeSet::<usize>::new();
        assert_eq!(max_id(&empty, &|v: &usize| *v), 0);
        let large: BTreeSet<usize> = (0..100_000).collect();
        assert_eq!(max_id(&large, &|v: &usize| *v * 2), 199_998);
    }
}
