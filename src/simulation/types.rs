//! Core types for the intersection simulation
//!
//! Directions, trips and the pairwise conflict rule between trips.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;

/// A unique identifier for a simulated vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub usize);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vehicle-{}", self.0)
    }
}

/// A side of the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All four directions, in index order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Index into per-direction counter arrays
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Direction::North),
            "e" | "east" => Ok(Direction::East),
            "s" | "south" => Ok(Direction::South),
            "w" | "west" => Ok(Direction::West),
            other => bail!("unknown direction '{}'", other),
        }
    }
}

/// A vehicle's path through the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Trip {
    pub origin: Direction,
    pub destination: Direction,
}

impl Trip {
    /// Create a trip. Panics if origin and destination are the same side.
    pub fn new(origin: Direction, destination: Direction) -> Self {
        assert!(
            origin != destination,
            "trip origin and destination must differ (both {})",
            origin
        );
        Self {
            origin,
            destination,
        }
    }

    /// Every valid trip (12 of them)
    pub fn all() -> impl Iterator<Item = Trip> {
        Direction::ALL.into_iter().flat_map(|origin| {
            Direction::ALL
                .into_iter()
                .filter(move |destination| *destination != origin)
                .map(move |destination| Trip::new(origin, destination))
        })
    }

    pub fn is_right_turn(&self) -> bool {
        matches!(
            (self.origin, self.destination),
            (Direction::North, Direction::West)
                | (Direction::West, Direction::South)
                | (Direction::South, Direction::East)
                | (Direction::East, Direction::North)
        )
    }

    /// The trip in the opposite direction
    pub fn reversed(&self) -> Trip {
        Trip::new(self.destination, self.origin)
    }

    /// Pairwise conflict rule: true if both trips may be inside the
    /// intersection at the same time.
    pub fn can_coexist(&self, other: &Trip) -> bool {
        let same_origin = self.origin == other.origin;
        let opposite = self.origin == other.destination && self.destination == other.origin;
        let right_turn_apart = self.destination != other.destination
            && (self.is_right_turn() || other.is_right_turn());
        same_origin || opposite || right_turn_apart
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.origin, self.destination)
    }
}
