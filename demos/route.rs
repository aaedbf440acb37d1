//! Plan a route over a translocator GeoJSON export.
//!
//! Run: cargo run --bin route -- demos/data/translocators.geojson 0,0 130000,52000 [--config config.json]
//!
//! Set `RUST_LOG=debug` for progress and graph sizes.

use std::process::ExitCode;

use clap::Parser;
use translocate_demos::{
    DemoError, RouteArgs, format_route, load_config, load_pairs, setup_logging,
};
use translocate_planner::{PlanEvent, Planner, PlannerConfig};

fn run(args: RouteArgs) -> Result<(), DemoError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => PlannerConfig::default(),
    };
    config.from = args.from;
    config.to = args.to;

    let pairs = load_pairs(&args.input)?;
    let route = Planner::new(pairs, config)?.run(|event| match event {
        PlanEvent::Stage(stage) => log::info!("{stage}"),
        PlanEvent::Progress(p) => log::debug!("{p:.0}%"),
        PlanEvent::Finished(_) => {}
    });
    print!("{}", format_route(&route));
    Ok(())
}

fn main() -> ExitCode {
    let args = RouteArgs::parse();
    let _logger = match setup_logging() {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("logging disabled: {e}");
            None
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
