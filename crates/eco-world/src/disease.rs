//! Disease outbreaks and their spread between neighbors.

use crate::world::{DeathCause, World};
use eco_core::{AnimalId, SimRng};
use tracing::{debug, trace};

/// Rolls the per-step outbreak: with `probability`, one live animal chosen
/// uniformly from `animals` is infected. Returns the new patient.
pub fn trigger_outbreak(
    world: &mut World,
    animals: &[AnimalId],
    probability: f64,
    rng: &mut SimRng,
) -> Option<AnimalId> {
    if !rng.chance(probability) {
        return None;
    }

    let candidates: Vec<AnimalId> = animals
        .iter()
        .copied()
        .filter(|id| world.is_animal_alive(*id))
        .collect();
    if candidates.is_empty() {
        return None;
    }

    let patient = candidates[rng.next_index(candidates.len())];
    let animal = world.animal_mut(patient)?;
    animal.infect();
    debug!(
        event = "outbreak",
        animal_id = %patient,
        species = %animal.species(),
        "Animal caught the disease"
    );
    Some(patient)
}

impl World {
    /// Lets an infected animal either succumb or pass the disease to every
    /// live neighbor of its own species. Returns whether the animal lives.
    pub fn spread_disease(&mut self, id: AnimalId, rng: &mut SimRng) -> bool {
        let Some(animal) = self.animal(id) else {
            return false;
        };
        if !animal.is_alive() {
            return false;
        }
        if !animal.is_infected() {
            return true;
        }
        let species = animal.species();
        let descriptor = animal.descriptor();

        if rng.chance(descriptor.disease_death_probability) {
            self.kill_animal(id, DeathCause::Disease);
            return false;
        }

        let Some(here) = self.animal_location(id) else {
            return false;
        };
        let mut spread = 0;
        for loc in self.field.adjacent_locations(here, rng) {
            let Some((neighbor, neighbor_species)) =
                self.field.occupant_at(loc).and_then(|o| o.animal())
            else {
                continue;
            };
            if neighbor_species != species {
                continue;
            }
            if let Some(animal) = self.animal_mut(neighbor) {
                if animal.is_alive() {
                    animal.infect();
                    spread += 1;
                }
            }
        }
        if spread > 0 {
            trace!(animal_id = %id, species = %species, spread = spread, "Disease spread");
        }
        true
    }
}
