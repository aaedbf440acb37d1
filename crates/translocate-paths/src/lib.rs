//! Graph search for translocator routing.
//!
//! This crate turns a list of map points into a weighted graph and searches
//! it:
//!
//! - **Graph** adjacency lists with directed, non-negative edges ([`Graph`])
//! - **Dijkstra** single-pair shortest path ([`Graph::shortest_path`]) and its
//!   progress-reporting form ([`DijkstraSearch`])
//! - **Graph building** from translocator endpoints and a
//!   [`QuadTree`](translocate_core::QuadTree) proximity index ([`GraphBuilder`])
//!
//! Long-running work implements [`Incremental`]: the caller drives it with
//! [`step`](Incremental::step) and receives a progress percentage at every
//! checkpoint, then collects the result with
//! [`finish`](Incremental::finish).

mod builder;
mod dijkstra;
mod distance;
mod graph;
mod traits;

pub use builder::{BuildConfig, EXPANSION_FACTORS, GraphBuilder, MIN_CANDIDATES};
pub use dijkstra::{DijkstraSearch, PROGRESS_INTERVAL};
pub use distance::{Metric, euclidean, manhattan};
pub use graph::Graph;
pub use traits::{Incremental, Step};
