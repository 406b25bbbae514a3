use std::fmt::Debug;
use std::hash::Hash;

/// Any value usable as a vertex key: comparable, hashable, cloneable.
/// Ordering keeps every derived graph deterministic.
pub trait NodeKey: Clone + Ord + Hash + Debug {}

impl<T: Clone + Ord + Hash + Debug> NodeKey for T {}

/// Edge weight. Unweighted graphs report 1.0 for every edge.
pub type Weight = f64;

/// Hop count handed to traversal callbacks. Signed so that adjusted
/// distances and negative bounds can be expressed.
pub type Depth = i64;

/// An undirected edge carrying its weight, `(src, dst, weight)`.
pub type WeightedEdge<N> = (N, N, Weight);

pub(crate) const UNIT_WEIGHT: Weight = 1.0;
