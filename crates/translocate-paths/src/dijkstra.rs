use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::Graph;
use crate::traits::{Incremental, Step};

/// The search suspends every time this many more vertices have been settled.
pub const PROGRESS_INTERVAL: usize = 1000;

const NO_PARENT: usize = usize::MAX;

/// Heap entry, ordered so that `BinaryHeap` (a max-heap) pops the smallest
/// distance first and, among equal distances, the smallest vertex id.
#[derive(Clone, Copy, Debug)]
struct NodeRef {
    idx: usize,
    dist: f64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

/// Single-pair Dijkstra that settles every vertex of the graph and reports
/// progress while doing so.
///
/// Among unsettled vertices with equal tentative distance the lowest id is
/// settled first, which keeps results deterministic on graphs with many
/// ties (zero-weight translocator links produce plenty). Vertices the
/// source cannot reach are settled last, in id order.
///
/// `G` is either a borrowed `&Graph` or an owned [`Graph`].
#[derive(Debug)]
pub struct DijkstraSearch<G> {
    graph: G,
    from: usize,
    to: usize,
    dist: Vec<f64>,
    parent: Vec<usize>,
    settled: Vec<bool>,
    open: BinaryHeap<NodeRef>,
    /// Lowest id that may still be unsettled once `open` runs dry.
    sweep: usize,
    remaining: usize,
}

impl<G: Borrow<Graph>> DijkstraSearch<G> {
    /// Prepare a search from `from` to `to`. No work is done until stepped.
    ///
    /// # Panics
    ///
    /// Panics if `from` or `to` is not a vertex of `graph`.
    pub fn new(graph: G, from: usize, to: usize) -> Self {
        let len = {
            let g: &Graph = graph.borrow();
            g.len()
        };
        assert!(from < len && to < len, "search endpoints out of range");
        let mut dist = vec![f64::INFINITY; len];
        dist[from] = 0.0;
        let mut open = BinaryHeap::new();
        open.push(NodeRef { idx: from, dist: 0.0 });
        Self {
            graph,
            from,
            to,
            dist,
            parent: vec![NO_PARENT; len],
            settled: vec![false; len],
            open,
            sweep: 0,
            remaining: len,
        }
    }

    /// The graph being searched.
    #[inline]
    pub fn graph(&self) -> &Graph {
        self.graph.borrow()
    }

    /// Number of vertices not yet settled.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Completion percentage, `(1 - remaining / total) * 100`.
    pub fn progress(&self) -> f64 {
        let total = self.graph().len();
        (1.0 - self.remaining as f64 / total as f64) * 100.0
    }

    /// Tentative distance from the source to `v`; infinite if unreached.
    /// Final once the search is done.
    #[inline]
    pub fn distance(&self, v: usize) -> f64 {
        self.dist[v]
    }

    /// Shortest path from source to target, both included.
    ///
    /// Returns `None` if the target was not reached. Only meaningful once
    /// [`step`](Incremental::step) has returned [`Step::Done`].
    pub fn path(&self) -> Option<Vec<usize>> {
        if self.to == self.from {
            return Some(vec![self.from]);
        }
        if self.parent[self.to] == NO_PARENT {
            return None;
        }
        let mut path = Vec::new();
        let mut v = self.to;
        while v != NO_PARENT {
            path.push(v);
            v = self.parent[v];
        }
        path.reverse();
        Some(path)
    }

    /// Settle one vertex and relax its outgoing edges.
    fn settle_next(&mut self) {
        while let Some(NodeRef { idx, .. }) = self.open.pop() {
            // Stale entry left over from an earlier, longer distance.
            if self.settled[idx] {
                continue;
            }
            self.settled[idx] = true;
            self.remaining -= 1;
            let base = self.dist[idx];
            let graph: &Graph = self.graph.borrow();
            for (n, w) in graph.neighbors(idx) {
                let alt = base + w;
                if alt < self.dist[n] {
                    self.dist[n] = alt;
                    self.parent[n] = idx;
                    self.open.push(NodeRef { idx: n, dist: alt });
                }
            }
            return;
        }

        // Everything left is unreachable: distances stay infinite, so
        // relaxing their edges could not change anything.
        while self.sweep < self.settled.len() && self.settled[self.sweep] {
            self.sweep += 1;
        }
        if self.sweep < self.settled.len() {
            self.settled[self.sweep] = true;
            self.remaining -= 1;
        }
    }
}

impl<G: Borrow<Graph>> Incremental for DijkstraSearch<G> {
    type Output = Option<Vec<usize>>;

    fn step(&mut self) -> Step {
        while self.remaining > 0 {
            self.settle_next();
            if self.remaining % PROGRESS_INTERVAL == 0 {
                return Step::Progress(self.progress());
            }
        }
        Step::Done
    }

    fn finish(mut self) -> Self::Output {
        while self.step() != Step::Done {}
        self.path()
    }
}

impl Graph {
    /// Compute the shortest path from `from` to `to` using Dijkstra.
    ///
    /// Returns the full path (including both endpoints) or `None` if `to` is
    /// unreachable. Equivalent to running a [`DijkstraSearch`] to the end.
    pub fn shortest_path(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        DijkstraSearch::new(self, from, to).finish()
    }
}
