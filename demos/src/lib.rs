//! Helpers shared by the command-line demos: argument parsing, input
//! loading, logger setup and route printing.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::Parser;
use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};
use translocate_planner::{
    FeatureCollection, FeatureError, PlanError, PlannerConfig, Point, Route, TeleporterPair,
};

/// Plan a route over a translocator GeoJSON export.
#[derive(Debug, Parser)]
#[command(name = "route")]
pub struct RouteArgs {
    /// Translocator GeoJSON export.
    pub input: PathBuf,
    /// Start point, as x,y.
    #[arg(value_parser = parse_point, allow_hyphen_values = true)]
    pub from: Point,
    /// End point, as x,y.
    #[arg(value_parser = parse_point, allow_hyphen_values = true)]
    pub to: Point,
    /// JSON planner config. Missing fields keep their defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Anything that can stop a demo.
#[derive(Debug)]
pub enum DemoError {
    Io(String, std::io::Error),
    Feature(FeatureError),
    Config(String),
    Plan(PlanError),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(path, e) => write!(f, "{path}: {e}"),
            Self::Feature(e) => write!(f, "{e}"),
            Self::Config(msg) => write!(f, "invalid config: {msg}"),
            Self::Plan(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(_, e) => Some(e),
            Self::Feature(e) => Some(e),
            Self::Plan(e) => Some(e),
            Self::Config(_) => None,
        }
    }
}

impl From<FeatureError> for DemoError {
    fn from(e: FeatureError) -> Self {
        Self::Feature(e)
    }
}

impl From<PlanError> for DemoError {
    fn from(e: PlanError) -> Self {
        Self::Plan(e)
    }
}

/// Log to stderr at `info`, or at whatever `RUST_LOG` asks for.
///
/// The returned handle must be kept alive for as long as logging is needed.
pub fn setup_logging() -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str("info")?.log_to_stderr().start()
}

/// Parse `"x,y"` into a point.
pub fn parse_point(s: &str) -> Result<Point, String> {
    let bad = || format!("expected a point as x,y, got {s:?}");
    let (x, y) = s.split_once(',').ok_or_else(bad)?;
    let x: f64 = x.trim().parse().map_err(|_| bad())?;
    let y: f64 = y.trim().parse().map_err(|_| bad())?;
    Ok(Point::new(x, y))
}

/// Read the translocator pairs from a GeoJSON export.
pub fn load_pairs(path: &Path) -> Result<Vec<TeleporterPair>, DemoError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| DemoError::Io(path.display().to_string(), e))?;
    let fc = FeatureCollection::from_json(&text)?;
    let pairs = fc.pairs();
    log::info!(
        "loaded {} of {} translocators from {}",
        pairs.len(),
        fc.features.len(),
        path.display()
    );
    Ok(pairs)
}

/// Read a JSON planner config. Missing fields keep their defaults.
pub fn load_config(path: &Path) -> Result<PlannerConfig, DemoError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| DemoError::Io(path.display().to_string(), e))?;
    serde_json::from_str(&text).map_err(|e| DemoError::Config(e.to_string()))
}

/// Render a route as numbered waypoints, one per line.
pub fn format_route(route: &Route) -> String {
    match route {
        Route::NoRoute => "no route\n".to_string(),
        Route::Found { points, cost } => {
            let mut out: String = points
                .iter()
                .enumerate()
                .map(|(i, p)| format!("{i:>3}  {:.0}, {:.0}\n", p.x, p.y))
                .collect();
            out.push_str(&format!("cost {cost:.1} over {} waypoints\n", points.len()));
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_parse() {
        assert_eq!(parse_point("12,-3.5"), Ok(Point::new(12.0, -3.5)));
        assert_eq!(parse_point(" 1 , 2 "), Ok(Point::new(1.0, 2.0)));
        assert!(parse_point("12").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn args_parse() {
        let args = RouteArgs::try_parse_from([
            "route",
            "data/translocators.geojson",
            "-120,340",
            "130000,52000",
            "--config",
            "cfg.json",
        ])
        .unwrap();
        assert_eq!(args.input, PathBuf::from("data/translocators.geojson"));
        assert_eq!(args.from, Point::new(-120.0, 340.0));
        assert_eq!(args.to, Point::new(130_000.0, 52_000.0));
        assert_eq!(args.config, Some(PathBuf::from("cfg.json")));

        let args = RouteArgs::try_parse_from(["route", "in.geojson", "0,0", "1,1"]).unwrap();
        assert_eq!(args.config, None);
    }

    #[test]
    fn args_reject_bad_input() {
        assert!(RouteArgs::try_parse_from(["route", "in.geojson", "0,0"]).is_err());
        assert!(RouteArgs::try_parse_from(["route", "in.geojson", "0;0", "1,1"]).is_err());
    }

    #[test]
    fn route_text() {
        let route = Route::Found {
            points: vec![Point::new(0.0, 0.0), Point::new(120.4, -8.0)],
            cost: 120.65,
        };
        assert_eq!(
            format_route(&route),
            "  0  0, 0\n  1  120, -8\ncost 120.7 over 2 waypoints\n"
        );
        assert_eq!(format_route(&Route::NoRoute), "no route\n");
    }

    #[test]
    fn bundled_data_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/translocators.geojson");
        let pairs = load_pairs(&path).unwrap();
        assert_eq!(pairs.len(), 6);
    }
}
