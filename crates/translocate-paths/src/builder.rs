//! Proximity graph construction.
//!
//! Nodes come in translocator pairs: ids `2k` and `2k + 1` are the two ends
//! of pair `k`. Each pair is linked at a fixed cost, and every node is linked
//! to whatever the quadtree finds in a square window around it, at walking
//! distance. When the window is too sparse it is widened a few times. The
//! result is not a k-nearest-neighbour graph and may be disconnected in very
//! sparse regions.

use std::borrow::Borrow;

use translocate_core::{Aabb, Point, QuadTree};

use crate::dijkstra::PROGRESS_INTERVAL;
use crate::distance::Metric;
use crate::graph::Graph;
use crate::traits::{Incremental, Step};

/// A window with fewer candidates than this is widened (if enabled).
pub const MIN_CANDIDATES: usize = 10;

/// Successive window sizes, as multiples of the base distance, tried after
/// the initial `2×` window comes back too sparse.
pub const EXPANSION_FACTORS: [f64; 3] = [10.0, 100.0, 1000.0];

/// Tuning for [`GraphBuilder`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuildConfig {
    /// Cost of using a translocator (the edge between the two ends of a pair).
    pub translocator_weight: f64,
    /// Half the side of the initial proximity window.
    pub query_expansion_start_dist: f64,
    /// Whether to widen sparse windows.
    pub enable_query_expansion: bool,
    /// Cost metric for walking edges.
    pub metric: Metric,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            translocator_weight: 0.0,
            query_expansion_start_dist: 2000.0,
            enable_query_expansion: true,
            metric: Metric::Euclidean,
        }
    }
}

/// Builds a [`Graph`] with one vertex per node, reporting progress every
/// [`PROGRESS_INTERVAL`] nodes.
///
/// `index` must hold the nodes keyed by their position in `nodes`; index
/// entries whose id is not a node are ignored. Both inputs may be borrowed
/// or owned; owned inputs are handed back by
/// [`into_parts`](Self::into_parts).
#[derive(Debug)]
pub struct GraphBuilder<N, Q> {
    nodes: N,
    index: Q,
    config: BuildConfig,
    graph: Graph,
    next: usize,
    /// Whether the checkpoint before `next` still has to be reported.
    tick_due: bool,
    buf: Vec<(Point, usize)>,
}

impl<N, Q> GraphBuilder<N, Q>
where
    N: Borrow<[Point]>,
    Q: Borrow<QuadTree<usize>>,
{
    /// Prepare a build. No work is done until stepped.
    pub fn new(nodes: N, index: Q, config: BuildConfig) -> Self {
        let nodes_ref: &[Point] = nodes.borrow();
        let len = nodes_ref.len();
        Self {
            nodes,
            index,
            config,
            graph: Graph::new(len),
            next: 0,
            tick_due: true,
            buf: Vec::new(),
        }
    }

    /// Complete any remaining work and return the graph with the inputs.
    pub fn into_parts(mut self) -> (Graph, N, Q) {
        while self.step() != Step::Done {}
        log::debug!(
            "built graph: {} vertices, {} edges",
            self.graph.len(),
            self.graph.edge_count()
        );
        (self.graph, self.nodes, self.index)
    }

    /// Fill `self.buf` with the candidates around `p`.
    fn query_around(&mut self, p: Point) {
        let d = self.config.query_expansion_start_dist;
        let corner = p.shift(-d, -d);
        let index: &QuadTree<usize> = self.index.borrow();

        self.buf.clear();
        index.query_range_into(&Aabb::square(corner, d * 2.0), &mut self.buf);
        if !self.config.enable_query_expansion {
            return;
        }
        for factor in EXPANSION_FACTORS {
            if self.buf.len() >= MIN_CANDIDATES {
                break;
            }
            // Same lower corner, so a wider window only grows up and right.
            self.buf.clear();
            index.query_range_into(&Aabb::square(corner, d * factor), &mut self.buf);
        }
    }

    fn connect(&mut self, i: usize) {
        let nodes: &[Point] = self.nodes.borrow();
        let len = nodes.len();
        let here = nodes[i];
        if i % 2 == 0 && i + 1 < len {
            self.graph
                .add_undirected(i, i + 1, self.config.translocator_weight);
        }

        self.query_around(here);
        for &(p, id) in &self.buf {
            if id == i || id >= len {
                continue;
            }
            let w = self.config.metric.distance(here, p);
            self.graph.add_undirected(i, id, w);
        }
    }
}

impl<N, Q> Incremental for GraphBuilder<N, Q>
where
    N: Borrow<[Point]>,
    Q: Borrow<QuadTree<usize>>,
{
    type Output = Graph;

    fn step(&mut self) -> Step {
        let nodes: &[Point] = self.nodes.borrow();
        let len = nodes.len();
        while self.next < len {
            let i = self.next;
            if self.tick_due && i % PROGRESS_INTERVAL == 0 {
                self.tick_due = false;
                return Step::Progress(i as f64 / len as f64 * 100.0);
            }
            self.connect(i);
            self.next += 1;
            self.tick_due = true;
        }
        Step::Done
    }

    fn finish(self) -> Graph {
        self.into_parts().0
    }
}
