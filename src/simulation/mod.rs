//! Intersection synchronization and its simulation harness
//!
//! The controller in `intersection` is the only shared state vehicles touch.
//! Everything else here exists to drive it from many threads and to check
//! that no two conflicting vehicles are ever inside together.

mod driver;
mod intersection;
mod monitor;
mod occupancy;
mod stats;
mod types;

pub use driver::{random_trip, run_simulation, SimulationConfig};
pub use intersection::{IntersectionController, IntersectionSync};
pub use monitor::ConflictMonitor;
pub use occupancy::OccupancySummary;
pub use stats::SimulationStats;
pub use types::{Direction, Trip, VehicleId};
