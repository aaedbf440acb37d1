//! Point quadtree for proximity queries.
//!
//! Each node covers a half-open [`Aabb`]. A node starts as a leaf holding up
//! to [`NODE_CAPACITY`] points; the insert that would overflow it splits the
//! node into four children at its centre and pushes the held points down.
//! Nodes never merge back.

use std::fmt;

use crate::geom::{Aabb, Point};

/// Number of points a leaf holds before it subdivides.
pub const NODE_CAPACITY: usize = 10;

/// Depth at which leaves stop subdividing and grow past capacity instead.
///
/// Without it, more than [`NODE_CAPACITY`] identical coordinates would split
/// until the quadrants underflow to empty boxes.
pub const MAX_DEPTH: u32 = 32;

/// A recursive point index. `T` is the id stored alongside each point.
#[derive(Clone, Debug)]
pub struct QuadTree<T = usize> {
    boundary: Aabb,
    depth: u32,
    points: Vec<(Point, T)>,
    /// NW, NE, SW, SE once subdivided.
    children: Option<Box<[QuadTree<T>; 4]>>,
}

impl<T: Copy> QuadTree<T> {
    /// Create an empty tree covering `boundary`.
    pub fn new(boundary: Aabb) -> Self {
        Self::with_depth(boundary, 0)
    }

    fn with_depth(boundary: Aabb, depth: u32) -> Self {
        Self {
            boundary,
            depth,
            points: Vec::new(),
            children: None,
        }
    }

    /// The region covered by this node.
    #[inline]
    pub fn boundary(&self) -> Aabb {
        self.boundary
    }

    /// Points held directly by this node (empty for internal nodes).
    #[inline]
    pub fn points(&self) -> &[(Point, T)] {
        &self.points
    }

    /// The four children in NW, NE, SW, SE order, if subdivided.
    #[inline]
    pub fn children(&self) -> Option<&[QuadTree<T>; 4]> {
        self.children.as_deref()
    }

    /// Whether this node holds points directly.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Total number of points stored in this subtree.
    pub fn len(&self) -> usize {
        self.points.len()
            + self
                .children
                .as_deref()
                .map_or(0, |c| c.iter().map(QuadTree::len).sum())
    }

    /// Whether the subtree stores no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert `p` with `id`.
    ///
    /// Returns `false` and leaves the tree untouched if `p` lies outside
    /// the boundary.
    pub fn insert(&mut self, p: Point, id: T) -> bool {
        if !self.boundary.contains(p) {
            return false;
        }
        if self.children.is_none() {
            if self.points.len() < NODE_CAPACITY || self.depth >= MAX_DEPTH {
                self.points.push((p, id));
                return true;
            }
            self.subdivide();
        }
        match self.children.as_deref_mut() {
            Some(children) => children.iter_mut().any(|c| c.insert(p, id)),
            None => false,
        }
    }

    fn subdivide(&mut self) {
        let depth = self.depth + 1;
        let [nw, ne, sw, se] = self.boundary.quadrants();
        let mut children = Box::new([
            QuadTree::with_depth(nw, depth),
            QuadTree::with_depth(ne, depth),
            QuadTree::with_depth(sw, depth),
            QuadTree::with_depth(se, depth),
        ]);
        // Quadrants tile the boundary, so nothing should be left behind.
        self.points
            .retain(|&(p, id)| !children.iter_mut().any(|c| c.insert(p, id)));
        self.children = Some(children);
    }

    /// Every stored point contained in `range`.
    ///
    /// Results are ordered by a depth-first walk visiting NW, NE, SW, SE.
    pub fn query_range(&self, range: &Aabb) -> Vec<(Point, T)> {
        let mut out = Vec::new();
        self.query_range_into(range, &mut out);
        out
    }

    /// Like [`query_range`](Self::query_range) but appends into `out`, so a
    /// caller issuing many queries can reuse one buffer.
    pub fn query_range_into(&self, range: &Aabb, out: &mut Vec<(Point, T)>) {
        if !self.boundary.intersects(range) {
            return;
        }
        out.extend(self.points.iter().filter(|(p, _)| range.contains(*p)));
        if let Some(children) = self.children.as_deref() {
            for c in children {
                c.query_range_into(range, out);
            }
        }
    }
}

impl<T> fmt::Display for QuadTree<T> {
    /// Indented dump: one `Tree` line per node followed by its points, with
    /// one `-` of indentation per level.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(self, 0usize)];
        let mut first = true;
        while let Some((tree, indent)) = stack.pop() {
            let pad = "-".repeat(indent);
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{pad}Tree {}", tree.boundary)?;
            for (p, _) in &tree.points {
                write!(f, "\n{pad}>Point {p}")?;
            }
            if let Some(children) = tree.children.as_deref() {
                for c in children.iter().rev() {
                    stack.push((c, indent + 1));
                }
            }
        }
        Ok(())
    }
}
