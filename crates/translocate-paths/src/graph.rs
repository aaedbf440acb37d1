//! Adjacency-list graph with directed, weighted edges.

/// A directed graph over dense vertex ids `0..len()`.
///
/// Each vertex keeps its outgoing edges in the order they were added;
/// duplicates are allowed. Undirected links are two directed edges.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    edges: Vec<Vec<usize>>,
    weights: Vec<Vec<f64>>,
}

impl Graph {
    /// Create a graph with `len` vertices and no edges.
    pub fn new(len: usize) -> Self {
        Self {
            edges: vec![Vec::new(); len],
            weights: vec![Vec::new(); len],
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Append a vertex with no edges and return its id.
    pub fn add_vertex(&mut self) -> usize {
        self.edges.push(Vec::new());
        self.weights.push(Vec::new());
        self.edges.len() - 1
    }

    /// Append a directed edge `from -> to`.
    ///
    /// `weight` must not be negative; Dijkstra relies on it.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is not a vertex of the graph.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: f64) {
        debug_assert!(weight >= 0.0, "negative edge weight {weight}");
        assert!(to < self.len(), "edge target {to} out of range");
        self.edges[from].push(to);
        self.weights[from].push(weight);
    }

    /// Append edges in both directions with the same weight.
    pub fn add_undirected(&mut self, a: usize, b: usize, weight: f64) {
        self.add_edge(a, b, weight);
        self.add_edge(b, a, weight);
    }

    /// Outgoing `(neighbor, weight)` pairs of `v`, in insertion order.
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.edges[v]
            .iter()
            .copied()
            .zip(self.weights[v].iter().copied())
    }

    /// Number of outgoing edges of `v`.
    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.edges[v].len()
    }
}
