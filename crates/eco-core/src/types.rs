//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, Key};
use std::fmt;

/// A cell coordinate in the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub row: i32,
    pub col: i32,
}

impl Location {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn offset(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Chebyshev distance to another location
    pub fn chebyshev_distance(&self, other: &Location) -> i32 {
        (self.row - other.row).abs().max((self.col - other.col).abs())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The eight compass directions around a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// Row/column delta, rows growing southwards.
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::NorthEast => (-1, 1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (1, -1),
        }
    }

    pub fn all() -> [Direction; 8] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::NorthEast,
            Direction::NorthWest,
            Direction::SouthEast,
            Direction::SouthWest,
        ]
    }
}

/// The closed set of animal species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    Rabbit,
    Fox,
    Eagle,
    Cow,
    Elephant,
}

impl Species {
    pub fn all() -> [Species; 5] {
        [
            Species::Rabbit,
            Species::Fox,
            Species::Eagle,
            Species::Cow,
            Species::Elephant,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Species::Rabbit => "rabbit",
            Species::Fox => "fox",
            Species::Eagle => "eagle",
            Species::Cow => "cow",
            Species::Elephant => "elephant",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub fn opposite(self) -> Sex {
        match self {
            Sex::Female => Sex::Male,
            Sex::Male => Sex::Female,
        }
    }
}

/// Weather for a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Raining,
    Windy,
    Snowing,
}

impl Weather {
    pub fn all() -> [Weather; 4] {
        [
            Weather::Sunny,
            Weather::Raining,
            Weather::Windy,
            Weather::Snowing,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Weather::Sunny => "sunny",
            Weather::Raining => "raining",
            Weather::Windy => "windy",
            Weather::Snowing => "snowing",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What kind of organism sits in a cell, without identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrganismKind {
    Animal(Species),
    Plant,
}

impl fmt::Display for OrganismKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrganismKind::Animal(species) => write!(f, "{}", species),
            OrganismKind::Plant => f.write_str("plant"),
        }
    }
}

new_key_type! {
    /// Generational handle to an animal; goes stale once the animal is
    /// removed, even if its slot is reused.
    pub struct AnimalId;
    /// Generational handle to a plant.
    pub struct PlantId;
}

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "animal#{:?}", self.data())
    }
}

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plant#{:?}", self.data())
    }
}

/// A field entry: identity plus the tags neighbor scans match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    Animal { id: AnimalId, species: Species },
    Plant { id: PlantId },
}

impl Occupant {
    pub fn kind(&self) -> OrganismKind {
        match self {
            Occupant::Animal { species, .. } => OrganismKind::Animal(*species),
            Occupant::Plant { .. } => OrganismKind::Plant,
        }
    }

    pub fn animal(&self) -> Option<(AnimalId, Species)> {
        match self {
            Occupant::Animal { id, species } => Some((*id, *species)),
            Occupant::Plant { .. } => None,
        }
    }

    pub fn plant(&self) -> Option<PlantId> {
        match self {
            Occupant::Plant { id } => Some(*id),
            Occupant::Animal { .. } => None,
        }
    }
}
