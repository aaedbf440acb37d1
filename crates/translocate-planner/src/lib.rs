//! Route planning over translocator networks.
//!
//! Feed the planner a list of [`TeleporterPair`]s (usually read from a
//! translocator [`FeatureCollection`]) and a [`PlannerConfig`]. It builds a
//! proximity graph, searches it, and trims the raw path into a [`Route`].
//! [`Planner`] is an iterator of [`PlanEvent`]s so a caller can show stage
//! labels and progress while the search runs.

pub mod collapse;
pub mod config;
pub mod error;
pub mod feature;
pub mod planner;

pub use collapse::{are_linked, collapse_pass_through};
pub use config::PlannerConfig;
pub use error::{FeatureError, PlanError};
pub use feature::{FeatureCollection, Geometry, Position, TeleporterPair, TranslocatorFeature};
pub use planner::{PlanEvent, Planner, Route, Stage, find_path};
pub use translocate_core::{Aabb, Point};
pub use translocate_paths::{BuildConfig, Metric};
