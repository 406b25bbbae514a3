use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::attribute::{AttrValue, NodeAttrs};
use crate::types::{NodeKey, Weight, WeightedEdge, UNIT_WEIGHT};

/// Undirected graph over any `NodeKey`, optionally weighted.
///
/// Each edge is stored in the adjacency of both endpoints. An unweighted graph
/// stores the unit weight for every edge so that weight queries stay uniform.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<N: NodeKey> {
    pub(crate) adj_map: BTreeMap<N, BTreeMap<N, Weight>>,
    pub(crate) attributes: BTreeMap<N, NodeAttrs>,
    weighted: bool,
    e_size: usize,
}

impl<N: NodeKey> Default for Graph<N> {
    fn default() -> Self {
        Graph::new()
    }
}

impl<N: NodeKey> Graph<N> {
    /// Create an empty unweighted graph.
    pub fn new() -> Graph<N> {
        Graph {
            adj_map: BTreeMap::new(),
            attributes: BTreeMap::new(),
            weighted: false,
            e_size: 0,
        }
    }

    /// Create an empty weighted graph.
    pub fn new_weighted() -> Graph<N> {
        Graph {
            weighted: true,
            ..Graph::new()
        }
    }

    /// Build an unweighted graph from an edge iterator.
    pub fn from_edges(edges_iter: impl IntoIterator<Item = (N, N)>) -> Graph<N> {
        let mut graph = Graph::new();
        graph.extend_edges(edges_iter);
        graph
    }

    /// Build a weighted graph from `(u, v, weight)` triples. Endpoints are added
    /// as vertices; a repeated pair keeps the last weight.
    pub fn from_weighted_edges(edges_iter: impl IntoIterator<Item = WeightedEdge<N>>) -> Graph<N> {
        let mut graph = Graph::new_weighted();
        for (u, v, weight) in edges_iter {
            graph.insert_weighted_edge(u, v, weight);
        }
        graph
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    pub fn get_vertex_count(&self) -> usize {
        self.adj_map.len()
    }

    pub fn get_edge_count(&self) -> usize {
        self.e_size
    }

    pub fn is_empty(&self) -> bool {
        self.adj_map.is_empty()
    }

    pub fn insert_vertex(&mut self, u: N) {
        self.adj_map.entry(u).or_default();
    }

    pub fn extend_vertices(&mut self, vertices: impl IntoIterator<Item = N>) {
        for u in vertices {
            self.insert_vertex(u);
        }
    }

    /// Insert an undirected edge with the unit weight.
    pub fn insert_edge(&mut self, u: N, v: N) {
        self.put_edge(u, v, UNIT_WEIGHT);
    }

    pub fn extend_edges(&mut self, edges: impl IntoIterator<Item = (N, N)>) {
        for (u, v) in edges {
            self.insert_edge(u, v);
        }
    }

    /// Insert an undirected edge carrying `weight`. The graph becomes weighted.
    pub fn insert_weighted_edge(&mut self, u: N, v: N, weight: Weight) {
        self.weighted = true;
        self.put_edge(u, v, weight);
    }

    fn put_edge(&mut self, u: N, v: N, weight: Weight) {
        // RMW: the edge counts once, whichever direction is looked at.
        let is_new = self
            .adj_map
            .entry(u.clone())
            .or_default()
            .insert(v.clone(), weight)
            .is_none();
        self.adj_map.entry(v).or_default().insert(u, weight);
        if is_new {
            self.e_size += 1;
        }
    }

    pub fn has_vertex(&self, u: &N) -> bool {
        self.adj_map.contains_key(u)
    }

    pub fn has_edge(&self, u: &N, v: &N) -> bool {
        self.weight(u, v).is_some()
    }

    /// Weight of edge u-v, `None` when the edge does not exist.
    pub fn weight(&self, u: &N, v: &N) -> Option<Weight> {
        self.adj_map.get(u).and_then(|neighbors| neighbors.get(v)).copied()
    }

    /// Vertices in key order.
    pub fn vertices(&self) -> impl Iterator<Item = &N> {
        self.adj_map.keys()
    }

    pub fn neighbors<'a>(&'a self, u: &N) -> impl Iterator<Item = &'a N> {
        self.adj_map.get(u).into_iter().flat_map(|neighbors| neighbors.keys())
    }

    /// Every undirected edge exactly once, oriented from the smaller endpoint.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N, Weight)> {
        self.adj_map.iter().flat_map(|(u, neighbors)| {
            neighbors
                .iter()
                .filter(move |(v, _)| u <= *v)
                .map(move |(v, weight)| (u, v, *weight))
        })
    }

    /// Owned copy of `edges()`, the input shape of the edge-list filters.
    pub fn edge_list(&self) -> Vec<WeightedEdge<N>> {
        self.edges()
            .map(|(u, v, weight)| (u.clone(), v.clone(), weight))
            .collect()
    }

    pub fn node_attr(&self, u: &N, key: &str) -> Option<&AttrValue> {
        self.attributes.get(u).and_then(|attrs| attrs.get(key))
    }

    pub fn node_attrs(&self, u: &N) -> Option<&NodeAttrs> {
        self.attributes.get(u)
    }

    pub(crate) fn set_node_attr(&mut self, u: &N, key: &str, value: AttrValue) {
        self.attributes
            .entry(u.clone())
            .or_default()
            .insert(key.to_string(), value);
    }

    /// The graph induced on `vertices`, keeping weights and attributes.
    /// Keys that are not vertices of this graph are ignored.
    pub fn induced_subgraph(&self, vertices: &BTreeSet<N>) -> Graph<N> {
        let mut subgraph = Graph {
            weighted: self.weighted,
            ..Graph::new()
        };
        for u in vertices.iter().filter(|u| self.has_vertex(u)) {
            subgraph.insert_vertex(u.clone());
            if let Some(attrs) = self.attributes.get(u) {
                subgraph.attributes.insert(u.clone(), attrs.clone());
            }
        }
        for (u, v, weight) in self.edges() {
            if vertices.contains(u) && vertices.contains(v) {
                subgraph.put_edge(u.clone(), v.clone(), weight);
            }
        }
        subgraph
    }

    /// Generic breadth-first walk from `start`.
    ///
    /// Each vertex is visited once at its hop distance. `visit` decides whether
    /// the vertex contributes a result, `expand` whether its neighbors are
    /// queued. Results come back in visiting order. An unknown `start` yields
    /// nothing.
    pub fn bfs_with<R>(
        &self,
        start: &N,
        mut visit: impl FnMut(&N, usize) -> Option<R>,
        mut expand: impl FnMut(&N, usize) -> bool,
    ) -> Vec<(N, R)> {
        let mut results = Vec::new();
        if !self.has_vertex(start) {
            return results;
        }
        let mut visited = HashSet::<&N>::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back((start, 0usize));

        while let Some((u, depth)) = queue.pop_front() {
            if let Some(result) = visit(u, depth) {
                results.push((u.clone(), result));
            }
            if !expand(u, depth) {
                continue;
            }
            for neighbor in self.neighbors(u) {
                if visited.insert(neighbor) {
                    queue.push_back((neighbor, depth + 1));
                }
            }
        }
        results
    }

    // Using bfs to walk through a component.
    fn bfs_component<'a>(&'a self, start_vertex: &'a N, visited: &mut HashSet<&'a N>) -> Vec<N> {
        let mut component = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(start_vertex);
        visited.insert(start_vertex);

        while let Some(u) = queue.pop_front() {
            component.push(u.clone());
            for neighbor in self.neighbors(u) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        component
    }

    /// Connected components, discovered by scanning vertices in key order.
    pub fn connected_components(&self) -> Vec<Vec<N>> {
        let mut visited = HashSet::new();
        let mut components = vec![];
        for u in self.adj_map.keys() {
            if !visited.contains(u) {
                components.push(self.bfs_component(u, &mut visited));
            }
        }
        components
    }
}

impl<N: NodeKey + Display> Display for Graph<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (u, neighbors) in &self.adj_map {
            write!(f, "{} ->", u)?;
            for (v, weight) in neighbors {
                if self.weighted {
                    write!(f, " {}({})", v, weight)?;
                } else {
                    write!(f, " {}", v)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
