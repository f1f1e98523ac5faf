//! Core types and utilities for the ecosystem simulation.

pub mod types;
pub mod species;
pub mod config;
pub mod error;
pub mod rng;

pub use error::{Error, Result};
pub use types::*;
pub use species::{Diet, PlantDescriptor, SnowSurvival, SpeciesDescriptor, PLANT};
pub use config::*;
pub use rng::SimRng;
