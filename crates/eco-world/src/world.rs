//! The field together with the slot maps owning every organism on it.

use crate::field::Field;
use crate::organism::{Animal, Plant};
use eco_core::{AnimalId, Location, Occupant, PlantId, Weather};
use slotmap::SlotMap;
use std::fmt;
use tracing::{trace, warn};

/// Why an organism died
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    OldAge,
    Starvation,
    Disease,
    Eaten,
    Overcrowding,
    Weather(Weather),
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeathCause::OldAge => f.write_str("old_age"),
            DeathCause::Starvation => f.write_str("starvation"),
            DeathCause::Disease => f.write_str("disease"),
            DeathCause::Eaten => f.write_str("eaten"),
            DeathCause::Overcrowding => f.write_str("overcrowding"),
            DeathCause::Weather(weather) => write!(f, "weather_{}", weather),
        }
    }
}

/// Field plus organism storage. Every live organism has exactly one cell
/// and every occupied cell names a live organism.
#[derive(Debug, Clone)]
pub struct World {
    pub(crate) field: Field,
    pub(crate) animals: SlotMap<AnimalId, Animal>,
    pub(crate) plants: SlotMap<PlantId, Plant>,
}

impl World {
    pub fn new(depth: i32, width: i32) -> Self {
        Self {
            field: Field::new(depth, width),
            animals: SlotMap::with_key(),
            plants: SlotMap::with_key(),
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn animal(&self, id: AnimalId) -> Option<&Animal> {
        self.animals.get(id)
    }

    pub fn animal_mut(&mut self, id: AnimalId) -> Option<&mut Animal> {
        self.animals.get_mut(id)
    }

    pub fn plant(&self, id: PlantId) -> Option<&Plant> {
        self.plants.get(id)
    }

    pub fn plant_mut(&mut self, id: PlantId) -> Option<&mut Plant> {
        self.plants.get_mut(id)
    }

    pub fn is_animal_alive(&self, id: AnimalId) -> bool {
        self.animal(id).is_some_and(Animal::is_alive)
    }

    pub fn is_plant_alive(&self, id: PlantId) -> bool {
        self.plant(id).is_some_and(Plant::is_alive)
    }

    pub fn animal_location(&self, id: AnimalId) -> Option<Location> {
        self.animal(id).and_then(Animal::location)
    }

    pub fn plant_location(&self, id: PlantId) -> Option<Location> {
        self.plant(id).and_then(Plant::location)
    }

    /// Registers `animal` at `loc`, which must be a free cell.
    pub fn spawn_animal(&mut self, mut animal: Animal, loc: Location) -> AnimalId {
        let species = animal.species();
        animal.set_location(loc);
        let id = self.animals.insert(animal);
        self.occupy(Occupant::Animal { id, species }, loc);
        id
    }

    /// Registers `plant` at `loc`, which must be a free cell.
    pub fn spawn_plant(&mut self, mut plant: Plant, loc: Location) -> PlantId {
        plant.set_location(loc);
        let id = self.plants.insert(plant);
        self.occupy(Occupant::Plant { id }, loc);
        id
    }

    pub fn move_animal(&mut self, id: AnimalId, to: Location) {
        let Some(animal) = self.animals.get_mut(id) else {
            return;
        };
        if !animal.is_alive() {
            return;
        }
        let species = animal.species();
        animal.set_location(to);
        self.occupy(Occupant::Animal { id, species }, to);
    }

    fn occupy(&mut self, occupant: Occupant, loc: Location) {
        if let Some(evicted) = self.field.place(occupant, loc) {
            warn!(
                location = %loc,
                evicted = ?evicted,
                "Placed an organism over a live occupant"
            );
            match evicted {
                Occupant::Animal { id, .. } => {
                    if let Some(animal) = self.animals.get_mut(id) {
                        animal.die();
                    }
                }
                Occupant::Plant { id } => {
                    if let Some(plant) = self.plants.get_mut(id) {
                        plant.die();
                    }
                }
            }
        }
    }

    pub fn kill_animal(&mut self, id: AnimalId, cause: DeathCause) {
        let Some(animal) = self.animals.get_mut(id) else {
            return;
        };
        if !animal.is_alive() {
            return;
        }
        let species = animal.species();
        let age = animal.age;
        if let Some(loc) = animal.die() {
            self.field.clear(loc);
        }
        trace!(
            event = "animal_death",
            animal_id = %id,
            species = %species,
            age = age,
            cause = %cause,
            "Animal died"
        );
    }

    pub fn kill_plant(&mut self, id: PlantId, cause: DeathCause) {
        let Some(plant) = self.plants.get_mut(id) else {
            return;
        };
        if !plant.is_alive() {
            return;
        }
        if let Some(loc) = plant.die() {
            self.field.clear(loc);
        }
        trace!(event = "plant_death", plant_id = %id, cause = %cause, "Plant died");
    }

    /// Bites `amount` off a plant. Returns true if the bite killed it.
    pub fn bite_plant(&mut self, id: PlantId, amount: u32) -> bool {
        let Some(plant) = self.plants.get_mut(id) else {
            return false;
        };
        if let Some(loc) = plant.reduce_size(amount) {
            self.field.clear(loc);
            trace!(event = "plant_death", plant_id = %id, cause = %DeathCause::Eaten, "Plant died");
        }
        !plant.is_alive()
    }

    /// Ages an animal, killing it past its lifespan. Returns whether it lives.
    pub fn age_animal(&mut self, id: AnimalId) -> bool {
        let Some(animal) = self.animals.get_mut(id) else {
            return false;
        };
        if !animal.increment_age() {
            self.kill_animal(id, DeathCause::OldAge);
            return false;
        }
        true
    }

    /// One step of hunger, killing a starved animal. Returns whether it lives.
    pub fn starve_animal(&mut self, id: AnimalId) -> bool {
        let Some(animal) = self.animals.get_mut(id) else {
            return false;
        };
        if !animal.increment_hunger() {
            self.kill_animal(id, DeathCause::Starvation);
            return false;
        }
        true
    }

    pub fn age_plant(&mut self, id: PlantId) -> bool {
        let Some(plant) = self.plants.get_mut(id) else {
            return false;
        };
        if !plant.increment_age() {
            self.kill_plant(id, DeathCause::OldAge);
            return false;
        }
        true
    }

    /// Drops dead organisms from the live lists and frees their slots.
    pub fn compact(&mut self, animals: &mut Vec<AnimalId>, plants: &mut Vec<PlantId>) {
        let arena = &mut self.animals;
        animals.retain(|id| {
            let alive = arena.get(*id).is_some_and(Animal::is_alive);
            if !alive {
                arena.remove(*id);
            }
            alive
        });

        let arena = &mut self.plants;
        plants.retain(|id| {
            let alive = arena.get(*id).is_some_and(Plant::is_alive);
            if !alive {
                arena.remove(*id);
            }
            alive
        });
    }

    pub fn clear(&mut self) {
        self.field.clear_all();
        self.animals.clear();
        self.plants.clear();
    }

    pub fn animal_count(&self) -> usize {
        self.animals.len()
    }

    pub fn plant_count(&self) -> usize {
        self.plants.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_core::Species;

    #[test]
    fn test_spawn_registers_both_sides() {
        let mut world = World::new(5, 5);
        let loc = Location::new(2, 2);
        let id = world.spawn_animal(Animal::newborn(Species::Fox, None), loc);

        assert_eq!(world.animal_location(id), Some(loc));
        assert_eq!(
            world.field().occupant_at(loc),
            Some(Occupant::Animal {
                id,
                species: Species::Fox
            })
        );
    }

    #[test]
    fn test_move_animal() {
        let mut world = World::new(5, 5);
        let id = world.spawn_animal(Animal::newborn(Species::Cow, None), Location::new(0, 0));
        world.move_animal(id, Location::new(0, 1));

        assert_eq!(world.field().occupant_at(Location::new(0, 0)), None);
        assert_eq!(world.animal_location(id), Some(Location::new(0, 1)));
        assert_eq!(world.field().occupied(), 1);
    }

    #[test]
    fn test_kill_clears_cell_and_location() {
        let mut world = World::new(5, 5);
        let loc = Location::new(4, 4);
        let id = world.spawn_animal(Animal::newborn(Species::Rabbit, None), loc);
        world.kill_animal(id, DeathCause::Eaten);

        assert!(!world.is_animal_alive(id));
        assert_eq!(world.animal_location(id), None);
        assert_eq!(world.field().occupant_at(loc), None);

        // Dead animals cannot be moved back onto the field.
        world.move_animal(id, loc);
        assert_eq!(world.field().occupant_at(loc), None);
    }

    #[test]
    fn test_fatal_bite_clears_plant() {
        let mut world = World::new(5, 5);
        let loc = Location::new(1, 3);
        let id = world.spawn_plant(Plant::new().with_size(5), loc);

        assert!(!world.bite_plant(id, 2));
        assert_eq!(world.plant(id).map(Plant::size), Some(3));

        assert!(world.bite_plant(id, 3));
        assert!(!world.is_plant_alive(id));
        assert_eq!(world.plant(id).map(Plant::size), Some(0));
        assert_eq!(world.field().occupant_at(loc), None);
    }

    #[test]
    fn test_compact_releases_dead_slots() {
        let mut world = World::new(5, 5);
        let a = world.spawn_animal(Animal::newborn(Species::Rabbit, None), Location::new(0, 0));
        let b = world.spawn_animal(Animal::newborn(Species::Rabbit, None), Location::new(0, 1));
        let p = world.spawn_plant(Plant::new(), Location::new(3, 3));
        world.kill_animal(a, DeathCause::Disease);
        world.kill_plant(p, DeathCause::Weather(Weather::Windy));

        let mut animals = vec![a, b];
        let mut plants = vec![p];
        world.compact(&mut animals, &mut plants);

        assert_eq!(animals, vec![b]);
        assert!(plants.is_empty());
        assert!(world.animal(a).is_none());
        assert_eq!(world.animal_count(), 1);
        assert_eq!(world.plant_count(), 0);
    }

    #[test]
    fn test_reused_slot_does_not_revive_old_id() {
        let mut world = World::new(4, 4);
        let old = world.spawn_animal(Animal::newborn(Species::Fox, None), Location::new(0, 0));
        world.kill_animal(old, DeathCause::OldAge);
        let mut animals = vec![old];
        world.compact(&mut animals, &mut Vec::new());

        let fresh = world.spawn_animal(Animal::newborn(Species::Cow, None), Location::new(0, 0));
        assert_ne!(fresh, old);
        assert!(world.animal(old).is_none());
        assert_eq!(world.animal(fresh).map(Animal::species), Some(Species::Cow));
        assert_eq!(
            world.field().occupant_at(Location::new(0, 0)),
            Some(Occupant::Animal {
                id: fresh,
                species: Species::Cow
            })
        );
    }

    #[test]
    fn test_starvation() {
        let mut world = World::new(3, 3);
        let id = world.spawn_animal(
            Animal::newborn(Species::Eagle, None).with_food_level(1),
            Location::new(1, 1),
        );
        assert!(!world.starve_animal(id));
        assert_eq!(world.field().occupied(), 0);
    }
}
