use translocate_core::Point;

/// Euclidean (L2) distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Walking-cost metric used for proximity edges.
///
/// Manhattan can fit better where travel follows a road grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Metric {
    #[default]
    Euclidean,
    Manhattan,
}

impl Metric {
    /// Distance between `a` and `b` under this metric.
    #[inline]
    pub fn distance(self, a: Point, b: Point) -> f64 {
        match self {
            Self::Euclidean => euclidean(a, b),
            Self::Manhattan => manhattan(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_agree_on_axis() {
        let a = Point::new(1.0, 5.0);
        let b = Point::new(1.0, -3.0);
        assert_eq!(euclidean(a, b), 8.0);
        assert_eq!(manhattan(a, b), 8.0);
    }

    #[test]
    fn metrics_differ_on_diagonal() {
        let a = Point::ZERO;
        let b = Point::new(3.0, 4.0);
        assert_eq!(Metric::Euclidean.distance(a, b), 5.0);
        assert_eq!(Metric::Manhattan.distance(a, b), 7.0);
    }
}
