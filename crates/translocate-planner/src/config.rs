use serde::{Deserialize, Serialize};
use translocate_core::{Aabb, Point};
use translocate_paths::BuildConfig;

use crate::error::PlanError;

/// Everything a [`Planner`](crate::Planner) needs besides the translocators.
///
/// Deserializes from a flat JSON object; missing fields take their defaults:
///
/// ```json
/// { "translocator_weight": 50, "from": { "x": 0, "y": 0 }, "to": { "x": 8000, "y": -300 } }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Graph construction settings.
    #[serde(flatten)]
    pub build: BuildConfig,
    /// Where the route starts.
    pub from: Point,
    /// Where the route ends.
    pub to: Point,
    /// Extent of the spatial index. Translocator ends outside it are never
    /// found by proximity queries.
    pub world_bounds: Aabb,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            build: BuildConfig::default(),
            from: Point::ZERO,
            to: Point::ZERO,
            world_bounds: Aabb::square(Point::new(-1_000_000.0, -1_000_000.0), 2_000_000.0),
        }
    }
}

impl PlannerConfig {
    /// A default configuration routing from `from` to `to`.
    pub fn route(from: Point, to: Point) -> Self {
        Self {
            from,
            to,
            ..Self::default()
        }
    }

    /// Check that the configuration can be planned with.
    pub fn validate(&self) -> Result<(), PlanError> {
        let w = self.build.translocator_weight;
        if !(w.is_finite() && w >= 0.0) {
            return Err(PlanError::NegativeWeight(w));
        }
        let d = self.build.query_expansion_start_dist;
        if !(d.is_finite() && d > 0.0) {
            return Err(PlanError::InvalidQueryDistance(d));
        }
        for p in [self.from, self.to] {
            if !p.is_finite() {
                return Err(PlanError::NonFinitePoint(p));
            }
        }
        let b = &self.world_bounds;
        if b.is_empty() || !b.start().is_finite() || !b.end().is_finite() {
            return Err(PlanError::EmptyBounds);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use translocate_paths::Metric;

    #[test]
    fn default_is_valid() {
        let c = PlannerConfig::default();
        assert_eq!(c.validate(), Ok(()));
        assert_eq!(c.world_bounds.start(), Point::new(-1e6, -1e6));
        assert_eq!(c.world_bounds.end(), Point::new(1e6, 1e6));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{"translocator_weight": 50, "metric": "manhattan", "to": {"x": 8000, "y": -300}}"#;
        let c: PlannerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(c.build.translocator_weight, 50.0);
        assert_eq!(c.build.metric, Metric::Manhattan);
        assert_eq!(c.build.query_expansion_start_dist, 2000.0);
        assert!(c.build.enable_query_expansion);
        assert_eq!(c.from, Point::ZERO);
        assert_eq!(c.to, Point::new(8000.0, -300.0));
        assert_eq!(c.world_bounds, PlannerConfig::default().world_bounds);
    }

    #[test]
    fn empty_json_is_default() {
        let c: PlannerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(c, PlannerConfig::default());
    }

    #[test]
    fn serializes_flat() {
        let c = PlannerConfig::route(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        let v = serde_json::to_value(c).unwrap();
        assert_eq!(v["query_expansion_start_dist"], 2000.0);
        assert_eq!(v["metric"], "euclidean");
        assert_eq!(v["from"]["y"], 2.0);
        assert!(v.get("build").is_none());
        let back: PlannerConfig = serde_json::from_value(v).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn rejects_bad_values() {
        let mut c = PlannerConfig::default();
        c.build.translocator_weight = -1.0;
        assert_eq!(c.validate(), Err(PlanError::NegativeWeight(-1.0)));

        let mut c = PlannerConfig::default();
        c.build.translocator_weight = f64::INFINITY;
        assert!(matches!(c.validate(), Err(PlanError::NegativeWeight(_))));

        let mut c = PlannerConfig::default();
        c.build.query_expansion_start_dist = 0.0;
        assert_eq!(c.validate(), Err(PlanError::InvalidQueryDistance(0.0)));

        let mut c = PlannerConfig::default();
        c.build.query_expansion_start_dist = f64::NAN;
        assert!(matches!(c.validate(), Err(PlanError::InvalidQueryDistance(_))));

        let c = PlannerConfig::route(Point::ZERO, Point::new(f64::NAN, 0.0));
        assert!(matches!(c.validate(), Err(PlanError::NonFinitePoint(_))));

        let c = PlannerConfig {
            world_bounds: Aabb::square(Point::ZERO, 0.0),
            ..PlannerConfig::default()
        };
        assert_eq!(c.validate(), Err(PlanError::EmptyBounds));

        let c = PlannerConfig {
            world_bounds: Aabb::new(Point::ZERO, Point::new(f64::INFINITY, 10.0)),
            ..PlannerConfig::default()
        };
        assert_eq!(c.validate(), Err(PlanError::EmptyBounds));
    }
}
