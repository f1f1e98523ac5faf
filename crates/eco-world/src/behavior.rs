//! Per-step actions of animals and plants.

use crate::organism::{Animal, Plant};
use crate::world::{DeathCause, World};
use eco_core::{AnimalId, Diet, Location, Occupant, PlantId, Sex, SimRng, PLANT};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Day or night phase of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    Day,
    Night,
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeOfDay::Day => f.write_str("day"),
            TimeOfDay::Night => f.write_str("night"),
        }
    }
}

impl World {
    /// One step of an animal's life. Newborns are appended to `newborns`.
    ///
    /// Ages, hungers and suffers disease; then, unless it sleeps at night,
    /// breeds, feeds, and moves if it found nothing to eat.
    pub fn animal_act(
        &mut self,
        id: AnimalId,
        time: TimeOfDay,
        rng: &mut SimRng,
        newborns: &mut Vec<AnimalId>,
    ) {
        let Some(animal) = self.animal(id) else {
            return;
        };
        if !animal.is_alive() {
            return;
        }
        let descriptor = animal.descriptor();

        if !self.age_animal(id) || !self.starve_animal(id) {
            return;
        }
        if !self.spread_disease(id, rng) {
            return;
        }
        if descriptor.nocturnal && time == TimeOfDay::Night {
            return;
        }

        self.give_birth(id, rng, newborns);

        if let Some(food) = self.find_food(id, rng) {
            trace!(animal_id = %id, food = %food, "Animal fed");
            return;
        }

        let Some(here) = self.animal_location(id) else {
            return;
        };
        match self.field.free_adjacent_location(here, rng) {
            Some(next) => self.move_animal(id, next),
            None => self.kill_animal(id, DeathCause::Overcrowding),
        }
    }

    /// Scans the neighborhood for the first live meal matching the diet.
    ///
    /// Any bite resets the food level. Returns the meal's cell only when
    /// the meal did not survive the bite.
    pub fn find_food(&mut self, id: AnimalId, rng: &mut SimRng) -> Option<Location> {
        let animal = self.animal(id)?;
        let descriptor = animal.descriptor();
        let here = animal.location()?;

        for loc in self.field.adjacent_locations(here, rng) {
            match (descriptor.diet, self.field.occupant_at(loc)) {
                (Diet::Plants, Some(Occupant::Plant { id: plant_id }))
                    if self.is_plant_alive(plant_id) =>
                {
                    let eaten = self.bite_plant(plant_id, descriptor.food_capacity);
                    self.feed(id);
                    return eaten.then_some(loc);
                }
                (Diet::Prey(prey), Some(Occupant::Animal { id: prey_id, species }))
                    if species == prey && self.is_animal_alive(prey_id) =>
                {
                    self.kill_animal(prey_id, DeathCause::Eaten);
                    self.feed(id);
                    return Some(loc);
                }
                _ => {}
            }
        }
        None
    }

    fn feed(&mut self, id: AnimalId) {
        if let Some(animal) = self.animal_mut(id) {
            animal.feed();
        }
    }

    /// Places a litter into free neighboring cells, if the animal breeds.
    /// Returns how many young were placed.
    pub fn give_birth(
        &mut self,
        id: AnimalId,
        rng: &mut SimRng,
        newborns: &mut Vec<AnimalId>,
    ) -> usize {
        let Some(animal) = self.animal(id) else {
            return 0;
        };
        let Some(here) = animal.location() else {
            return 0;
        };
        let species = animal.species();
        let descriptor = animal.descriptor();
        if descriptor.sex_gated && animal.sex() != Some(Sex::Female) {
            return 0;
        }

        let free = self.field.free_adjacent_locations(here, rng);
        let births = self.breed(id, rng);
        if births == 0 || free.len() <= descriptor.min_free_for_birth {
            return 0;
        }

        let mut placed = 0;
        for loc in free.into_iter().take(births) {
            let sex = if descriptor.sex_gated {
                Some(random_sex(rng))
            } else {
                None
            };
            let young = self.spawn_animal(Animal::newborn(species, sex), loc);
            newborns.push(young);
            placed += 1;
        }
        trace!(
            event = "birth",
            parent_id = %id,
            species = %species,
            litter = placed,
            location = %here,
            "Animal gave birth"
        );
        placed
    }

    /// Litter size for this step; zero unless eligible and the roll succeeds.
    fn breed(&self, id: AnimalId, rng: &mut SimRng) -> usize {
        let Some(animal) = self.animal(id) else {
            return 0;
        };
        let descriptor = animal.descriptor();
        if self.can_breed(id, rng) && rng.chance(descriptor.breeding_probability) {
            rng.next_index(descriptor.max_litter_size as usize) + 1
        } else {
            0
        }
    }

    pub fn can_breed(&self, id: AnimalId, rng: &mut SimRng) -> bool {
        let Some(animal) = self.animal(id) else {
            return false;
        };
        if animal.descriptor().sex_gated {
            // The partner search runs whether or not the animal is mature.
            self.has_breeding_partner(id, rng) && animal.is_mature()
        } else {
            animal.is_mature()
        }
    }

    /// A live, mature animal of the same species and opposite sex next door.
    pub fn has_breeding_partner(&self, id: AnimalId, rng: &mut SimRng) -> bool {
        let Some(animal) = self.animal(id) else {
            return false;
        };
        let (Some(here), Some(sex)) = (animal.location(), animal.sex()) else {
            return false;
        };
        let species = animal.species();

        self.field
            .adjacent_locations(here, rng)
            .into_iter()
            .filter_map(|loc| self.field.occupant_at(loc).and_then(|o| o.animal()))
            .filter(|(_, neighbor_species)| *neighbor_species == species)
            .filter_map(|(neighbor_id, _)| self.animal(neighbor_id))
            .any(|partner| {
                partner.is_alive() && partner.sex() == Some(sex.opposite()) && partner.is_mature()
            })
    }

    /// One step of a plant's life: age, seed, grow, and die if boxed in.
    pub fn plant_act(&mut self, id: PlantId, rng: &mut SimRng, newborns: &mut Vec<PlantId>) {
        if !self.is_plant_alive(id) {
            return;
        }
        if !self.age_plant(id) {
            return;
        }

        self.seed_plants(id, rng, newborns);
        if let Some(plant) = self.plant_mut(id) {
            plant.grow();
        }

        let Some(here) = self.plant_location(id) else {
            return;
        };
        if self.field.free_adjacent_location(here, rng).is_none() {
            self.kill_plant(id, DeathCause::Overcrowding);
        }
    }

    fn seed_plants(&mut self, id: PlantId, rng: &mut SimRng, newborns: &mut Vec<PlantId>) {
        let Some(plant) = self.plant(id) else {
            return;
        };
        let Some(here) = plant.location() else {
            return;
        };
        let mature = plant.is_mature();

        let free = self.field.free_adjacent_locations(here, rng);
        let births = if mature && rng.chance(PLANT.breeding_probability) {
            rng.next_index(PLANT.max_litter_size as usize) + 1
        } else {
            0
        };

        for loc in free.into_iter().take(births) {
            let young = self.spawn_plant(Plant::new(), loc);
            newborns.push(young);
        }
    }
}

/// A fair coin between the two sexes.
pub fn random_sex(rng: &mut SimRng) -> Sex {
    if rng.next_index(2) == 0 {
        Sex::Female
    } else {
        Sex::Male
    }
}
