use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use intersection_sim::simulation;
use log::info;
use rand::Rng;

#[derive(Parser)]
#[command(name = "intersection_sim")]
#[command(about = "Many vehicle threads crossing one synchronized intersection")]
struct Cli {
    /// Number of vehicle threads
    #[arg(long, default_value = "10")]
    vehicles: usize,

    /// Trips each vehicle makes
    #[arg(long, default_value = "20")]
    trips: usize,

    /// Time a vehicle spends inside the intersection, in milliseconds
    #[arg(long, default_value = "2")]
    crossing_ms: u64,

    /// Maximum random pause before each arrival, in milliseconds
    #[arg(long, default_value = "5")]
    arrival_ms: u64,

    /// Seed for trip selection (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());

    let config = simulation::SimulationConfig {
        vehicles: cli.vehicles,
        trips_per_vehicle: cli.trips,
        crossing_time: Duration::from_millis(cli.crossing_ms),
        max_arrival_delay: Duration::from_millis(cli.arrival_ms),
        seed,
    };

    info!(
        "Running {} vehicles x {} trips (seed {})",
        config.vehicles, config.trips_per_vehicle, config.seed
    );

    let controller = Arc::new(simulation::IntersectionController::new());
    let mut stats = simulation::run_simulation(Arc::clone(&controller), &config)
        .context("simulation failed")?;
    stats.iterations = controller.iterations_completed();
    stats.log_summary();

    match Arc::try_unwrap(controller) {
        Ok(controller) => controller.shutdown(),
        Err(_) => bail!("controller still shared after all vehicles finished"),
    }

    if stats.violations > 0 {
        bail!("{} conflicting vehicle pairs observed", stats.violations);
    }
    Ok(())
}
