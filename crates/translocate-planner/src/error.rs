use std::fmt;

use translocate_core::Point;

/// Errors raised when a planner configuration is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanError {
    /// The translocator weight is negative or not finite.
    NegativeWeight(f64),
    /// The proximity window distance is not a positive finite number.
    InvalidQueryDistance(f64),
    /// `from` or `to` has a NaN or infinite coordinate.
    NonFinitePoint(Point),
    /// The world bounds cover no area or are not finite.
    EmptyBounds,
    /// Translocator `pair` has an end with a NaN or infinite coordinate.
    NonFiniteEndpoint { pair: usize, point: Point },
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeWeight(w) => write!(f, "translocator weight must be >= 0, got {w}"),
            Self::InvalidQueryDistance(d) => {
                write!(f, "query expansion distance must be > 0, got {d}")
            }
            Self::NonFinitePoint(p) => write!(f, "route endpoint {p} is not finite"),
            Self::EmptyBounds => f.write_str("world bounds are empty"),
            Self::NonFiniteEndpoint { pair, point } => {
                write!(f, "translocator {pair} has a non-finite end {point}")
            }
        }
    }
}

impl std::error::Error for PlanError {}

/// Errors raised while reading translocator features.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureError {
    /// A line geometry does not have exactly two positions.
    EndpointCount(usize),
    /// A position does not have two or three coordinates.
    PositionLength(usize),
    /// The document is not valid translocator GeoJSON.
    Json(String),
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndpointCount(n) => write!(f, "translocator has {n} endpoints, expected 2"),
            Self::PositionLength(n) => write!(f, "position has {n} coordinates, expected 2 or 3"),
            Self::Json(msg) => write!(f, "invalid translocator geojson: {msg}"),
        }
    }
}

impl std::error::Error for FeatureError {}
