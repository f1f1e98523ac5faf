//! Organism state and lifecycle.
//!
//! Organisms know where they stand but hold no handle to the field; the
//! world applies every placement and removal to both sides.

use eco_core::{Location, SimRng, Species, SpeciesDescriptor, Sex, PLANT};
use serde::{Deserialize, Serialize};

/// An animal in the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    species: Species,
    sex: Option<Sex>,
    pub age: u32,
    pub food_level: i32,
    infected: bool,
    alive: bool,
    location: Option<Location>,
}

impl Animal {
    /// A newborn: age zero and a full stomach.
    pub fn newborn(species: Species, sex: Option<Sex>) -> Self {
        Self {
            species,
            sex: Self::sex_for(species, sex),
            age: 0,
            food_level: species.descriptor().food_value,
            infected: false,
            alive: true,
            location: None,
        }
    }

    /// An animal of random age and food level, as seeded at reset.
    pub fn random(species: Species, sex: Option<Sex>, rng: &mut SimRng) -> Self {
        let descriptor = species.descriptor();
        let age = rng.next_index(descriptor.max_age as usize) as u32;
        let food_level = rng.next_index(descriptor.food_value as usize) as i32;
        Self {
            age,
            food_level,
            ..Self::newborn(species, sex)
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn with_food_level(mut self, food_level: i32) -> Self {
        self.food_level = food_level;
        self
    }

    // Sex only exists for sex-gated species; default to female there.
    fn sex_for(species: Species, sex: Option<Sex>) -> Option<Sex> {
        if species.descriptor().sex_gated {
            Some(sex.unwrap_or(Sex::Female))
        } else {
            None
        }
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn descriptor(&self) -> &'static SpeciesDescriptor {
        self.species.descriptor()
    }

    pub fn sex(&self) -> Option<Sex> {
        self.sex
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_infected(&self) -> bool {
        self.infected
    }

    pub fn infect(&mut self) {
        if self.alive {
            self.infected = true;
        }
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub(crate) fn set_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    /// Old enough to breed
    pub fn is_mature(&self) -> bool {
        self.age >= self.descriptor().breeding_age
    }

    /// Ages one step. Returns false once past the species' lifespan.
    pub fn increment_age(&mut self) -> bool {
        self.age += 1;
        self.age <= self.descriptor().max_age
    }

    /// Burns one unit of food. Returns false once starved.
    pub fn increment_hunger(&mut self) -> bool {
        self.food_level -= 1;
        self.food_level > 0
    }

    pub fn feed(&mut self) {
        self.food_level = self.descriptor().food_value;
    }

    pub fn snow_survival_probability(&self) -> f64 {
        self.descriptor().snow_survival_probability(self.age)
    }

    /// Marks the animal dead for good, returning the cell it vacates.
    pub(crate) fn die(&mut self) -> Option<Location> {
        self.alive = false;
        self.infected = false;
        self.location.take()
    }
}

/// A plant in the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub age: u32,
    size: u32,
    alive: bool,
    location: Option<Location>,
}

impl Default for Plant {
    fn default() -> Self {
        Self::new()
    }
}

impl Plant {
    pub fn new() -> Self {
        Self {
            age: 0,
            size: PLANT.initial_size,
            alive: true,
            location: None,
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub(crate) fn set_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    pub fn is_mature(&self) -> bool {
        self.age >= PLANT.breeding_age
    }

    /// Ages one step. Returns false once past the plant lifespan.
    pub fn increment_age(&mut self) -> bool {
        self.age += 1;
        self.age <= PLANT.max_age
    }

    pub fn grow(&mut self) {
        if self.alive {
            self.size += PLANT.growth_rate;
        }
    }

    /// Takes a bite out of the plant. A bite at least as large as the
    /// plant kills it; the vacated cell is returned in that case.
    pub fn reduce_size(&mut self, amount: u32) -> Option<Location> {
        if amount >= self.size {
            return self.die();
        }
        self.size -= amount;
        None
    }

    pub fn wind_survival_probability(&self) -> f64 {
        PLANT.wind_survival_probability(self.size)
    }

    pub fn snow_survival_probability(&self) -> f64 {
        PLANT.snow_survival_probability(self.size)
    }

    pub(crate) fn die(&mut self) -> Option<Location> {
        self.alive = false;
        self.size = 0;
        self.location.take()
    }
}
