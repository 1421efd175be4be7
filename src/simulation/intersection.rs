//! Admission control for the shared intersection
//!
//! Vehicles are grouped into iterations. While an iteration is running, any
//! vehicle compatible with the vehicles inside is let in. A vehicle that has
//! crossed does not return until the whole iteration has drained, so nobody
//! waits through more than one round of the other vehicles.

use std::sync::{Condvar, Mutex, MutexGuard};

use log::{debug, trace};

use super::occupancy::OccupancySummary;
use super::types::{Direction, Trip};

/// Entry and exit hooks called by the simulation for every vehicle
pub trait IntersectionSync: Send + Sync {
    /// Blocks until the vehicle may enter the intersection
    fn on_before_entry(&self, origin: Direction, destination: Direction);

    /// Called once the vehicle has left the intersection, with the same
    /// origin and destination passed to `on_before_entry`
    fn on_after_exit(&self, origin: Direction, destination: Direction);
}

#[derive(Debug, Default)]
struct IntersectionState {
    occupancy: OccupancySummary,
    /// Number of times the intersection has fully drained
    iterations: u64,
}

/// Monitor guarding the intersection: one lock, two condition variables
#[derive(Debug, Default)]
pub struct IntersectionController {
    state: Mutex<IntersectionState>,
    /// Vehicles blocked on the conflict test
    admission: Condvar,
    /// Vehicles that have exited and wait for the iteration to drain
    iteration: Condvar,
}

impl IntersectionController {
    /// Create a controller with an empty intersection
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, IntersectionState> {
        self.state.lock().expect("intersection lock poisoned")
    }

    /// Block until `trip` can be admitted, then admit it
    pub fn request_entry(&self, trip: Trip) {
        let mut state = self.lock();
        while !state.occupancy.can_admit(trip) {
            // Give another waiter of this iteration a chance
            self.admission.notify_one();
            state.occupancy.waiting_count += 1;
            state = self
                .admission
                .wait(state)
                .expect("intersection lock poisoned");
            state.occupancy.waiting_count -= 1;
        }

        state.occupancy.admit(trip);
        trace!(
            "admitted {} (passing={}, waiting={})",
            trip,
            state.occupancy.passing_count,
            state.occupancy.waiting_count
        );
        // Let compatible waiters join the same iteration
        self.admission.notify_one();
    }

    /// Release `trip` and block until the current iteration has drained
    pub fn notify_exit(&self, trip: Trip) {
        let mut state = self.lock();
        state.occupancy.release(trip);
        trace!(
            "released {} (passing={}, waiting={})",
            trip,
            state.occupancy.passing_count,
            state.occupancy.waiting_count
        );

        if state.occupancy.waiting_count > 0 {
            self.admission.notify_one();
        }

        if state.occupancy.is_drained() {
            state.iterations += 1;
            debug!(
                "iteration {} drained ({} vehicles exiting)",
                state.iterations, state.occupancy.exiting_count
            );
        }

        while !state.occupancy.is_drained() {
            state.occupancy.exiting_count += 1;
            state = self
                .iteration
                .wait(state)
                .expect("intersection lock poisoned");
            state.occupancy.exiting_count -= 1;
        }

        self.iteration.notify_all();
    }

    /// Copy of the current counters
    pub fn snapshot(&self) -> OccupancySummary {
        self.lock().occupancy
    }

    /// How many iterations have drained since construction
    pub fn iterations_completed(&self) -> u64 {
        self.lock().iterations
    }

    /// Tear the controller down. Panics if any vehicle is still inside,
    /// waiting to enter, or waiting for its iteration to drain.
    pub fn shutdown(self) {
        let state = self
            .state
            .into_inner()
            .expect("intersection lock poisoned");
        let occupancy = state.occupancy;
        assert!(
            occupancy.passing_count == 0
                && occupancy.waiting_count == 0
                && occupancy.exiting_count == 0,
            "shutdown with vehicles still active: {:?}",
            occupancy
        );
        debug!(
            "intersection shut down after {} iterations",
            state.iterations
        );
    }
}

impl IntersectionSync for IntersectionController {
    fn on_before_entry(&self, origin: Direction, destination: Direction) {
        self.request_entry(Trip::new(origin, destination));
    }

    fn on_after_exit(&self, origin: Direction, destination: Direction) {
        self.notify_exit(Trip::new(origin, destination));
    }
}
