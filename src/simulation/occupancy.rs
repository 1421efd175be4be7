//! Aggregate occupancy counters for the intersection
//!
//! The admission test works on these counters instead of comparing a new trip
//! against every admitted trip, so each check is O(1).

use super::types::{Direction, Trip};

/// Counters derived from the trips currently inside the intersection,
/// plus the number of vehicles blocked entering or exiting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OccupancySummary {
    /// Admitted vehicles per origin
    pub origin_count: [usize; 4],
    /// Admitted vehicles per destination
    pub destination_count: [usize; 4],
    /// Admitted vehicles that are not making a right turn
    pub non_right_turn_count: usize,
    /// Vehicles currently inside the intersection
    pub passing_count: usize,
    /// Vehicles blocked waiting to enter
    pub waiting_count: usize,
    /// Vehicles that have left and are waiting for the iteration to drain
    pub exiting_count: usize,
}

impl OccupancySummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every admitted vehicle comes from `origin`
    pub fn all_from(&self, origin: Direction) -> bool {
        Direction::ALL
            .iter()
            .all(|d| *d == origin || self.origin_count[d.index()] == 0)
    }

    /// Every admitted vehicle is headed to `destination`
    pub fn all_to(&self, destination: Direction) -> bool {
        Direction::ALL
            .iter()
            .all(|d| *d == destination || self.destination_count[d.index()] == 0)
    }

    /// No admitted vehicle is headed to `destination`
    pub fn none_to(&self, destination: Direction) -> bool {
        self.destination_count[destination.index()] == 0
    }

    /// Whether `trip` may enter alongside everything currently admitted
    pub fn can_admit(&self, trip: Trip) -> bool {
        let Trip {
            origin,
            destination,
        } = trip;

        self.passing_count == 0
            || self.all_from(origin)
            || (self.all_from(destination) && self.all_to(origin))
            || (self.none_to(destination)
                && (trip.is_right_turn() || self.non_right_turn_count == 0))
    }

    pub fn admit(&mut self, trip: Trip) {
        self.origin_count[trip.origin.index()] += 1;
        self.destination_count[trip.destination.index()] += 1;
        self.passing_count += 1;
        if !trip.is_right_turn() {
            self.non_right_turn_count += 1;
        }
        debug_assert!(self.is_consistent(), "inconsistent occupancy: {:?}", self);
    }

    /// Inverse of [`admit`](Self::admit). Panics if `trip` is not inside.
    pub fn release(&mut self, trip: Trip) {
        let origin = trip.origin.index();
        let destination = trip.destination.index();
        assert!(
            self.passing_count > 0
                && self.origin_count[origin] > 0
                && self.destination_count[destination] > 0
                && (trip.is_right_turn() || self.non_right_turn_count > 0),
            "exit for {} without a matching entry",
            trip
        );

        self.origin_count[origin] -= 1;
        self.destination_count[destination] -= 1;
        self.passing_count -= 1;
        if !trip.is_right_turn() {
            self.non_right_turn_count -= 1;
        }
        debug_assert!(self.is_consistent(), "inconsistent occupancy: {:?}", self);
    }

    /// Nobody inside and nobody queued: the current iteration is over
    pub fn is_drained(&self) -> bool {
        self.waiting_count + self.passing_count == 0
    }

    pub fn is_consistent(&self) -> bool {
        let origins: usize = self.origin_count.iter().sum();
        let destinations: usize = self.destination_count.iter().sum();
        origins == self.passing_count
            && destinations == self.passing_count
            && self.non_right_turn_count <= self.passing_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_of(trips: &[Trip]) -> OccupancySummary {
        let mut summary = OccupancySummary::new();
        for trip in trips {
            summary.admit(*trip);
        }
        summary
    }

    #[test]
    fn aggregate_test_never_admits_a_conflict() {
        let trips: Vec<Trip> = Trip::all().collect();

        // Every pairwise-compatible set of distinct trips
        for mask in 0u32..(1 << trips.len()) {
            let admitted: Vec<Trip> = trips
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, t)| *t)
                .collect();
            let compatible = admitted
                .iter()
                .all(|a| admitted.iter().all(|b| a.can_coexist(b)));
            if !compatible {
                continue;
            }

            let summary = summary_of(&admitted);
            for candidate in &trips {
                if summary.can_admit(*candidate) {
                    assert!(
                        admitted.iter().all(|b| candidate.can_coexist(b)),
                        "{} admitted alongside {:?}",
                        candidate,
                        admitted
                    );
                }
            }
        }
    }

    #[test]
    fn release_restores_empty_summary() {
        let north_south = Trip::new(Direction::North, Direction::South);
        let north_west = Trip::new(Direction::North, Direction::West);
        let mut summary = summary_of(&[north_south, north_west]);
        assert_eq!(summary.passing_count, 2);
        assert_eq!(summary.non_right_turn_count, 1);

        summary.release(north_west);
        summary.release(north_south);
        assert_eq!(summary, OccupancySummary::new());
    }

    #[test]
    #[should_panic(expected = "without a matching entry")]
    fn release_without_entry_panics() {
        let mut summary = OccupancySummary::new();
        summary.release(Trip::new(Direction::East, Direction::West));
    }
}
