use std::collections::BTreeMap;

use anyhow::{ensure, Context, Result};
use log::debug;

use crate::graph::Graph;
use crate::types::NodeKey;

/// Vertex -> row/column position. Expected to be a bijection onto `0..len`.
pub type NodeIndex<N> = BTreeMap<N, usize>;

/// Backing storage of a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Dense,
    Sparse,
}

#[derive(Debug, Clone, PartialEq)]
enum Cells {
    Dense(Vec<f64>), // Row-major.
    Sparse(BTreeMap<(usize, usize), f64>), // Non-zero entries only.
}

/// Mutable matrix under construction. `freeze` turns it into a `Matrix`.
#[derive(Debug, Clone)]
pub struct MatrixBuilder {
    rows: usize,
    cols: usize,
    cells: Cells,
}

impl MatrixBuilder {
    /// All-zero `rows` x `cols` matrix. Fails if a dense shape has more cells
    /// than `usize` can count.
    pub fn zeros(rows: usize, cols: usize, storage: Storage) -> Result<Self> {
        let cells = match storage {
            Storage::Dense => {
                let len = rows
                    .checked_mul(cols)
                    .with_context(|| format!("a dense {}x{} matrix is too large", rows, cols))?;
                Cells::Dense(vec![0.0; len])
            }
            Storage::Sparse => Cells::Sparse(BTreeMap::new()),
        };
        Ok(Self { rows, cols, cells })
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        ensure!(
            row < self.rows && col < self.cols,
            "cell ({}, {}) is outside a {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        match &mut self.cells {
            Cells::Dense(values) => values[row * self.cols + col] = value,
            Cells::Sparse(entries) => {
                if value == 0.0 {
                    entries.remove(&(row, col));
                } else {
                    entries.insert((row, col), value);
                }
            }
        }
        Ok(())
    }

    pub fn freeze(self) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells,
        }
    }
}

/// Immutable 2D matrix of `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    cells: Cells,
}

impl Matrix {
    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self.cells, Cells::Sparse(_))
    }

    /// Value at (row, col), `None` outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let value = match &self.cells {
            Cells::Dense(values) => values[row * self.cols + col],
            Cells::Sparse(entries) => entries.get(&(row, col)).copied().unwrap_or(0.0),
        };
        Some(value)
    }

    pub fn row(&self, row: usize) -> Option<Vec<f64>> {
        (row < self.rows).then(|| (0..self.cols).filter_map(|col| self.get(row, col)).collect())
    }

    pub fn column(&self, col: usize) -> Option<Vec<f64>> {
        (col < self.cols).then(|| (0..self.rows).filter_map(|row| self.get(row, col)).collect())
    }

    /// Positions of the non-zero entries in row-major order.
    pub fn non_zero_indices(&self) -> Vec<(usize, usize)> {
        match &self.cells {
            Cells::Dense(values) => values
                .iter()
                .enumerate()
                .filter(|(_, value)| **value != 0.0)
                .map(|(idx, _)| (idx / self.cols, idx % self.cols))
                .collect(),
            Cells::Sparse(entries) => entries.keys().copied().collect(),
        }
    }
}

/// Index vertices by their position in key order.
pub fn node_index<N: NodeKey>(graph: &Graph<N>) -> NodeIndex<N> {
    graph
        .vertices()
        .enumerate()
        .map(|(idx, vertex)| (vertex.clone(), idx))
        .collect()
}

/// Sparse adjacency matrix of `graph`. Each undirected edge is iterated once,
/// from its smaller endpoint, and only that (row, col) entry is set.
pub fn adjacency_matrix<N: NodeKey>(graph: &Graph<N>, index: &NodeIndex<N>) -> Result<Matrix> {
    materialize(graph, index, false)
}

/// Like `adjacency_matrix`, with both (row, col) and (col, row) set per edge.
pub fn symmetric_adjacency_matrix<N: NodeKey>(
    graph: &Graph<N>,
    index: &NodeIndex<N>,
) -> Result<Matrix> {
    materialize(graph, index, true)
}

fn materialize<N: NodeKey>(
    graph: &Graph<N>,
    index: &NodeIndex<N>,
    symmetric: bool,
) -> Result<Matrix> {
    let size = index.len();
    let mut builder = MatrixBuilder::zeros(size, size, Storage::Sparse)?;
    let position = |vertex: &N| -> Result<usize> {
        index
            .get(vertex)
            .copied()
            .with_context(|| format!("vertex {:?} is missing from the node index", vertex))
    };
    for (u, v, weight) in graph.edges() {
        let (row, col) = (position(u)?, position(v)?);
        // Unweighted graphs already report the unit weight.
        builder
            .set(row, col, weight)
            .with_context(|| format!("edge {:?} - {:?} does not fit the node index", u, v))?;
        if symmetric {
            builder.set(col, row, weight)?;
        }
    }
    let matrix = builder.freeze();
    debug!(
        "materialized {}x{} adjacency with {} non-zeros",
        size,
        size,
        matrix.non_zero_indices().len()
    );
    Ok(matrix)
}
