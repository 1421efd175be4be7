//! Summary statistics for a simulation run

use log::info;

/// Totals collected over one simulation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub vehicles: usize,
    pub trips_completed: usize,
    pub violations: usize,
    pub max_concurrent: usize,
    /// Iterations drained by the controller; filled in by the caller
    pub iterations: u64,
}

impl SimulationStats {
    pub fn log_summary(&self) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Total vehicles: {}", self.vehicles);
        info!("Total trips completed: {}", self.trips_completed);
        info!("Max concurrent vehicles: {}", self.max_concurrent);
        info!("Iterations drained: {}", self.iterations);
        info!("Conflict violations: {}", self.violations);
    }
}
