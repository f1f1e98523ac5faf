//! Fixed rule parameters for every species.

use crate::types::Species;
use serde::Serialize;

/// What an animal searches its neighborhood for when it is hungry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Diet {
    /// Bites plants, removing `food_capacity` of their size.
    Plants,
    /// Kills the first live animal of the given species it finds.
    Prey(Species),
}

/// How likely an animal is to live through a snowy step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SnowSurvival {
    Constant(f64),
    /// `0.5 + 1.6 * age^2 / max_age^2`
    AgeCurve,
}

/// Rule parameters governing one animal species
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeciesDescriptor {
    pub species: Species,
    /// Age at which the animal may start to breed
    pub breeding_age: u32,
    /// Age past which the animal dies
    pub max_age: u32,
    pub breeding_probability: f64,
    pub max_litter_size: u32,
    /// Plant size removed per bite
    pub food_capacity: u32,
    /// Food level granted by a meal, i.e. steps until the next meal is due
    pub food_value: i32,
    /// Chance per step of an infected animal dying
    pub disease_death_probability: f64,
    pub diet: Diet,
    /// Sleeps at night: no feeding, movement or birth
    pub nocturnal: bool,
    /// Only females give birth, and only next to an eligible male
    pub sex_gated: bool,
    /// Births need strictly more free neighbors than this
    pub min_free_for_birth: usize,
    /// Loses extra food in the rain
    pub rain_hunger: bool,
    pub snow_survival: SnowSurvival,
}

const RABBIT: SpeciesDescriptor = SpeciesDescriptor {
    species: Species::Rabbit,
    breeding_age: 5,
    max_age: 40,
    breeding_probability: 0.37,
    max_litter_size: 4,
    food_capacity: 1,
    food_value: 8,
    disease_death_probability: 0.37,
    diet: Diet::Plants,
    nocturnal: false,
    sex_gated: false,
    min_free_for_birth: 0,
    rain_hunger: false,
    snow_survival: SnowSurvival::Constant(0.9),
};

const FOX: SpeciesDescriptor = SpeciesDescriptor {
    species: Species::Fox,
    breeding_age: 15,
    max_age: 150,
    breeding_probability: 0.08,
    max_litter_size: 2,
    food_capacity: 0,
    food_value: 9,
    disease_death_probability: 0.27,
    diet: Diet::Prey(Species::Rabbit),
    nocturnal: false,
    sex_gated: false,
    min_free_for_birth: 0,
    rain_hunger: false,
    snow_survival: SnowSurvival::AgeCurve,
};

const EAGLE: SpeciesDescriptor = SpeciesDescriptor {
    species: Species::Eagle,
    breeding_age: 12,
    max_age: 250,
    breeding_probability: 0.18,
    max_litter_size: 4,
    food_capacity: 0,
    food_value: 10,
    disease_death_probability: 0.27,
    diet: Diet::Prey(Species::Rabbit),
    nocturnal: false,
    sex_gated: false,
    min_free_for_birth: 0,
    rain_hunger: true,
    snow_survival: SnowSurvival::AgeCurve,
};

const COW: SpeciesDescriptor = SpeciesDescriptor {
    species: Species::Cow,
    breeding_age: 8,
    max_age: 100,
    breeding_probability: 0.16,
    max_litter_size: 4,
    food_capacity: 5,
    food_value: 7,
    disease_death_probability: 0.37,
    diet: Diet::Plants,
    nocturnal: true,
    sex_gated: false,
    min_free_for_birth: 0,
    rain_hunger: false,
    snow_survival: SnowSurvival::AgeCurve,
};

const ELEPHANT: SpeciesDescriptor = SpeciesDescriptor {
    species: Species::Elephant,
    breeding_age: 5,
    max_age: 200,
    breeding_probability: 0.9,
    max_litter_size: 4,
    food_capacity: 8,
    food_value: 10,
    disease_death_probability: 0.17,
    diet: Diet::Plants,
    nocturnal: false,
    sex_gated: true,
    min_free_for_birth: 4,
    rain_hunger: false,
    snow_survival: SnowSurvival::AgeCurve,
};

impl Species {
    pub fn descriptor(self) -> &'static SpeciesDescriptor {
        match self {
            Species::Rabbit => &RABBIT,
            Species::Fox => &FOX,
            Species::Eagle => &EAGLE,
            Species::Cow => &COW,
            Species::Elephant => &ELEPHANT,
        }
    }
}

impl SpeciesDescriptor {
    pub fn snow_survival_probability(&self, age: u32) -> f64 {
        match self.snow_survival {
            SnowSurvival::Constant(p) => p,
            SnowSurvival::AgeCurve => {
                let age = age as f64;
                let max_age = self.max_age as f64;
                0.5 + (age * age * 1.6) / (max_age * max_age)
            }
        }
    }

    pub fn eats_plants(&self) -> bool {
        matches!(self.diet, Diet::Plants)
    }
}

/// Rule parameters for the single plant species
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlantDescriptor {
    pub breeding_age: u32,
    pub max_age: u32,
    pub breeding_probability: f64,
    pub max_litter_size: u32,
    /// Size gained per grow
    pub growth_rate: u32,
    pub initial_size: u32,
}

pub const PLANT: PlantDescriptor = PlantDescriptor {
    breeding_age: 2,
    max_age: 40,
    breeding_probability: 0.09,
    max_litter_size: 4,
    growth_rate: 3,
    initial_size: 1,
};

impl PlantDescriptor {
    /// Larger plants ride out wind better; every 20 size units is a full step.
    pub fn wind_survival_probability(&self, size: u32) -> f64 {
        0.7 + (size / 20) as f64
    }

    pub fn snow_survival_probability(&self, size: u32) -> f64 {
        0.7 + (size / 50) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptors_are_consistent() {
        for species in Species::all() {
            let d = species.descriptor();
            assert_eq!(d.species, species);
            assert!(d.breeding_age < d.max_age);
            assert!((0.0..=1.0).contains(&d.breeding_probability));
            assert!((0.0..=1.0).contains(&d.disease_death_probability));
            assert!(d.max_litter_size >= 1);
            assert!(d.food_value > 0);
            if d.eats_plants() {
                assert!(d.food_capacity > 0);
            }
        }
    }

    #[test]
    fn test_only_elephants_are_sex_gated() {
        for species in Species::all() {
            assert_eq!(species.descriptor().sex_gated, species == Species::Elephant);
        }
        assert_eq!(Species::Elephant.descriptor().min_free_for_birth, 4);
    }

    #[test]
    fn test_predators_hunt_rabbits() {
        assert_eq!(Species::Fox.descriptor().diet, Diet::Prey(Species::Rabbit));
        assert_eq!(Species::Eagle.descriptor().diet, Diet::Prey(Species::Rabbit));
        assert!(Species::Eagle.descriptor().rain_hunger);
        assert!(Species::Cow.descriptor().nocturnal);
    }

    #[test]
    fn test_snow_survival_grows_with_age() {
        let cow = Species::Cow.descriptor();
        assert_eq!(cow.snow_survival_probability(0), 0.5);
        assert!(cow.snow_survival_probability(50) > cow.snow_survival_probability(10));
        assert_eq!(Species::Rabbit.descriptor().snow_survival_probability(30), 0.9);
    }

    #[test]
    fn test_plant_survival_steps_with_size() {
        assert_eq!(PLANT.wind_survival_probability(1), 0.7);
        assert_eq!(PLANT.wind_survival_probability(19), 0.7);
        assert!(PLANT.wind_survival_probability(20) >= 1.0);
        assert_eq!(PLANT.snow_survival_probability(49), 0.7);
        assert!(PLANT.snow_survival_probability(50) >= 1.0);
    }
}
