//! Independent safety checker for the simulation
//!
//! Tracks which vehicles are inside the intersection and compares every new
//! arrival pairwise against them, without trusting the controller's counters.

use std::sync::{Mutex, MutexGuard};

use log::warn;

use super::types::{Trip, VehicleId};

#[derive(Debug, Default)]
struct MonitorState {
    inside: Vec<(VehicleId, Trip)>,
    entries: usize,
    violations: usize,
    max_concurrent: usize,
}

/// Records vehicles inside the intersection and counts conflicting pairs
#[derive(Debug, Default)]
pub struct ConflictMonitor {
    state: Mutex<MonitorState>,
}

impl ConflictMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MonitorState> {
        self.state.lock().expect("monitor lock poisoned")
    }

    /// Record `vehicle` as inside. Returns the number of vehicles already
    /// inside whose trips conflict with `trip`.
    pub fn enter(&self, vehicle: VehicleId, trip: Trip) -> usize {
        let mut state = self.lock();
        let conflicts = state
            .inside
            .iter()
            .filter(|(other, other_trip)| {
                let ok = trip.can_coexist(other_trip);
                if !ok {
                    warn!(
                        "conflict: {} ({}) entered alongside {} ({})",
                        vehicle, trip, other, other_trip
                    );
                }
                !ok
            })
            .count();

        state.inside.push((vehicle, trip));
        state.entries += 1;
        state.violations += conflicts;
        state.max_concurrent = state.max_concurrent.max(state.inside.len());
        conflicts
    }

    /// Remove `vehicle`. Panics if it was never recorded as inside.
    pub fn leave(&self, vehicle: VehicleId) {
        let mut state = self.lock();
        let position = state
            .inside
            .iter()
            .position(|(id, _)| *id == vehicle);
        match position {
            Some(index) => {
                state.inside.swap_remove(index);
            }
            None => panic!("{} left without entering", vehicle),
        }
    }

    pub fn inside(&self) -> usize {
        self.lock().inside.len()
    }

    pub fn entries(&self) -> usize {
        self.lock().entries
    }

    pub fn violations(&self) -> usize {
        self.lock().violations
    }

    pub fn max_concurrent(&self) -> usize {
        self.lock().max_concurrent
    }
}
