//! Multi-threaded vehicle driver
//!
//! Spawns one thread per vehicle. Each vehicle makes a number of random
//! trips through the intersection, calling the entry and exit hooks around
//! its crossing while the conflict monitor watches who is inside.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, ensure, Context, Result};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::intersection::IntersectionSync;
use super::monitor::ConflictMonitor;
use super::stats::SimulationStats;
use super::types::{Direction, Trip, VehicleId};

/// Parameters for a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of vehicle threads
    pub vehicles: usize,
    /// Trips each vehicle makes before finishing
    pub trips_per_vehicle: usize,
    /// How long a vehicle stays inside the intersection
    pub crossing_time: Duration,
    /// Upper bound of the random pause before each arrival
    pub max_arrival_delay: Duration,
    /// Base seed; vehicle `n` uses `seed + n`
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            vehicles: 10,
            trips_per_vehicle: 20,
            crossing_time: Duration::from_millis(2),
            max_arrival_delay: Duration::from_millis(5),
            seed: 0,
        }
    }
}

/// Pick a random trip; the destination is never the origin
pub fn random_trip<R: Rng>(rng: &mut R) -> Trip {
    let origin: usize = rng.random_range(0..4);
    let destination = (origin + rng.random_range(1..4)) % 4;
    Trip::new(Direction::ALL[origin], Direction::ALL[destination])
}

/// Run every vehicle to completion against `sync`
pub fn run_simulation<S>(sync: Arc<S>, config: &SimulationConfig) -> Result<SimulationStats>
where
    S: IntersectionSync + 'static,
{
    ensure!(config.vehicles > 0, "simulation needs at least one vehicle");
    ensure!(
        config.trips_per_vehicle > 0,
        "each vehicle needs at least one trip"
    );
    let max_delay_micros = u64::try_from(config.max_arrival_delay.as_micros())
        .ok()
        .context("max arrival delay does not fit in u64 microseconds")?;

    let monitor = Arc::new(ConflictMonitor::new());
    let mut handles = Vec::with_capacity(config.vehicles);

    for n in 0..config.vehicles {
        let vehicle = VehicleId(n);
        let sync = Arc::clone(&sync);
        let monitor = Arc::clone(&monitor);
        let config = config.clone();

        let handle = thread::Builder::new()
            .name(vehicle.to_string())
            .spawn(move || {
                drive_vehicle(vehicle, &*sync, &monitor, &config, max_delay_micros)
            })
            .with_context(|| format!("failed to spawn {}", vehicle))?;
        handles.push((vehicle, handle));
    }

    let mut trips_completed = 0;
    for (vehicle, handle) in handles {
        trips_completed += handle
            .join()
            .map_err(|_| anyhow!("{} panicked", vehicle))?;
    }

    Ok(SimulationStats {
        vehicles: config.vehicles,
        trips_completed,
        violations: monitor.violations(),
        max_concurrent: monitor.max_concurrent(),
        iterations: 0,
    })
}

/// One vehicle's lifetime; returns the number of trips it made
fn drive_vehicle<S: IntersectionSync + ?Sized>(
    vehicle: VehicleId,
    sync: &S,
    monitor: &ConflictMonitor,
    config: &SimulationConfig,
    max_delay: u64,
) -> usize {
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(vehicle.0 as u64));

    for _ in 0..config.trips_per_vehicle {
        if max_delay > 0 {
            thread::sleep(Duration::from_micros(rng.random_range(0..=max_delay)));
        }

        let trip = random_trip(&mut rng);
        sync.on_before_entry(trip.origin, trip.destination);
        monitor.enter(vehicle, trip);
        thread::sleep(config.crossing_time);
        monitor.leave(vehicle);
        sync.on_after_exit(trip.origin, trip.destination);
    }

    debug!("{} finished {} trips", vehicle, config.trips_per_vehicle);
    config.trips_per_vehicle
}
