//! Translocator GeoJSON, as exported by the web map.
//!
//! Every feature is a two-point `LineString` joining the two ends of one
//! translocator. Positions may carry a third (height) coordinate, which is
//! dropped.

use serde::{Deserialize, Serialize};
use translocate_core::Point;

use crate::error::FeatureError;

/// The two ends of one translocator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleporterPair {
    pub a: Point,
    pub b: Point,
}

impl TeleporterPair {
    /// Create a pair from its two ends.
    #[inline]
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }
}

/// A map position. Reads `[x, y]` or `[x, y, z]`, always writes `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
pub struct Position(pub Point);

impl TryFrom<Vec<f64>> for Position {
    type Error = FeatureError;

    fn try_from(v: Vec<f64>) -> Result<Self, Self::Error> {
        match v.as_slice() {
            [x, y] | [x, y, _] => Ok(Self(Point::new(*x, *y))),
            _ => Err(FeatureError::PositionLength(v.len())),
        }
    }
}

impl From<Position> for [f64; 2] {
    fn from(p: Position) -> Self {
        [p.0.x, p.0.y]
    }
}

/// Feature geometry, tagged by its GeoJSON `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    LineString { coordinates: Vec<Position> },
}

/// Descriptive fields attached to a translocator. The router ignores them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslocatorProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    #[default]
    Feature,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionKind {
    #[default]
    FeatureCollection,
}

/// One translocator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslocatorFeature {
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    #[serde(default)]
    pub properties: TranslocatorProperties,
    pub geometry: Geometry,
}

impl TranslocatorFeature {
    /// A feature joining `a` and `b`, with empty properties.
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            kind: FeatureKind::Feature,
            properties: TranslocatorProperties::default(),
            geometry: Geometry::LineString {
                coordinates: vec![Position(a), Position(b)],
            },
        }
    }

    /// The validated pair of ends.
    pub fn pair(&self) -> Result<TeleporterPair, FeatureError> {
        match &self.geometry {
            Geometry::LineString { coordinates } => match coordinates.as_slice() {
                [a, b] => Ok(TeleporterPair::new(a.0, b.0)),
                other => Err(FeatureError::EndpointCount(other.len())),
            },
        }
    }
}

/// A translocator export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: CollectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub features: Vec<TranslocatorFeature>,
}

impl FeatureCollection {
    /// Parse a GeoJSON document.
    pub fn from_json(s: &str) -> Result<Self, FeatureError> {
        serde_json::from_str(s).map_err(|e| FeatureError::Json(e.to_string()))
    }

    /// Serialize back to GeoJSON.
    pub fn to_json(&self) -> Result<String, FeatureError> {
        serde_json::to_string(self).map_err(|e| FeatureError::Json(e.to_string()))
    }

    /// Pairs of every well-formed feature, in document order.
    ///
    /// Malformed features are skipped with a warning so one bad entry
    /// does not block routing over the rest of the network.
    pub fn pairs(&self) -> Vec<TeleporterPair> {
        self.features
            .iter()
            .enumerate()
            .filter_map(|(i, f)| match f.pair() {
                Ok(pair) => Some(pair),
                Err(e) => {
                    log::warn!("skipping translocator feature {i}: {e}");
                    None
                }
            })
            .collect()
    }
}

impl FromIterator<TeleporterPair> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = TeleporterPair>>(iter: I) -> Self {
        Self {
            kind: CollectionKind::FeatureCollection,
            name: None,
            features: iter
                .into_iter()
                .map(|p| TranslocatorFeature::new(p.a, p.b))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"{
        "type": "FeatureCollection",
        "name": "translocators",
        "features": [
            {
                "type": "Feature",
                "properties": {"depth1": 110, "depth2": 95, "label": "", "tag": "TL"},
                "geometry": {"type": "LineString", "coordinates": [[-1200, 300], [5400.5, -80]]}
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {"type": "LineString", "coordinates": [[0, 0, 120], [10, 20, 64]]}
            }
        ]
    }"#;

    #[test]
    fn parses_export() {
        let fc = FeatureCollection::from_json(EXPORT).unwrap();
        assert_eq!(fc.name.as_deref(), Some("translocators"));
        assert_eq!(fc.features.len(), 2);
        assert_eq!(fc.features[0].properties.depth1, Some(110.0));
        assert_eq!(fc.features[0].properties.tag.as_deref(), Some("TL"));
        assert_eq!(
            fc.pairs(),
            vec![
                TeleporterPair::new(Point::new(-1200.0, 300.0), Point::new(5400.5, -80.0)),
                TeleporterPair::new(Point::new(0.0, 0.0), Point::new(10.0, 20.0)),
            ]
        );
    }

    #[test]
    fn skips_features_with_wrong_endpoint_count() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[1, 1]]}},
                {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[1, 1], [2, 2]]}},
                {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[1, 1], [2, 2], [3, 3]]}}
            ]
        }"#;
        let fc = FeatureCollection::from_json(json).unwrap();
        assert_eq!(fc.features[0].pair(), Err(FeatureError::EndpointCount(1)));
        assert_eq!(fc.features[2].pair(), Err(FeatureError::EndpointCount(3)));
        assert_eq!(
            fc.pairs(),
            vec![TeleporterPair::new(Point::new(1.0, 1.0), Point::new(2.0, 2.0))]
        );
    }

    #[test]
    fn rejects_bad_positions() {
        let json = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[1], [2, 2]]}}
        ]}"#;
        let err = FeatureCollection::from_json(json).unwrap_err();
        assert!(matches!(err, FeatureError::Json(ref m) if m.contains("expected 2 or 3")));
    }

    #[test]
    fn rejects_wrong_type_tags() {
        let not_collection = r#"{"type": "Feature", "features": []}"#;
        assert!(FeatureCollection::from_json(not_collection).is_err());

        let point_geometry = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1, 2]}}
        ]}"#;
        assert!(FeatureCollection::from_json(point_geometry).is_err());
    }

    #[test]
    fn built_collection_round_trips() {
        let fc: FeatureCollection = [
            TeleporterPair::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0)),
            TeleporterPair::new(Point::new(-5.0, 0.5), Point::new(6.0, 7.0)),
        ]
        .into_iter()
        .collect();
        let json = fc.to_json().unwrap();
        assert!(json.contains(r#""type":"FeatureCollection""#));
        assert!(json.contains(r#""coordinates":[[1.0,2.0],[3.0,4.0]]"#));
        assert_eq!(FeatureCollection::from_json(&json).unwrap(), fc);
    }
}
