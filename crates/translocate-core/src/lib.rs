//! **translocate-core** — Geometry and spatial indexing for translocator
//! route planning.
//!
//! This crate provides the foundational types used across the *translocate*
//! workspace: floating-point map coordinates, axis-aligned boxes, and a
//! point quadtree for proximity queries.

pub mod geom;
pub mod quadtree;

pub use geom::{Aabb, Point};
pub use quadtree::{MAX_DEPTH, NODE_CAPACITY, QuadTree};
