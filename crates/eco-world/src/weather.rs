//! Weather draws and their effect on the world.

use crate::world::{DeathCause, World};
use eco_core::{AnimalId, PlantId, SimRng, Weather, WeatherSampling};
use tracing::trace;

pub const SNOW_PROBABILITY: f64 = 0.05;
pub const WIND_PROBABILITY: f64 = 0.18;
pub const RAIN_PROBABILITY: f64 = 0.34;

/// Target shares for categorical sampling; sunny takes the remainder.
const CATEGORICAL_SHARES: [(Weather, f64); 3] = [
    (Weather::Snowing, 0.05),
    (Weather::Windy, 0.13),
    (Weather::Raining, 0.16),
];

/// Draws the weather for the next step.
pub fn draw(sampling: WeatherSampling, rng: &mut SimRng) -> Weather {
    match sampling {
        WeatherSampling::Sequential => {
            if rng.chance(SNOW_PROBABILITY) {
                Weather::Snowing
            } else if rng.chance(WIND_PROBABILITY) {
                Weather::Windy
            } else if rng.chance(RAIN_PROBABILITY) {
                Weather::Raining
            } else {
                Weather::Sunny
            }
        }
        WeatherSampling::Categorical => {
            let roll = rng.next_f64();
            let mut cumulative = 0.0;
            for (weather, share) in CATEGORICAL_SHARES {
                cumulative += share;
                if roll < cumulative {
                    return weather;
                }
            }
            Weather::Sunny
        }
    }
}

/// Applies one step of `weather` to every listed organism.
pub fn apply(
    world: &mut World,
    weather: Weather,
    animals: &[AnimalId],
    plants: &[PlantId],
    rng: &mut SimRng,
) {
    match weather {
        Weather::Sunny => grow_plants(world, plants),
        Weather::Raining => {
            grow_plants(world, plants);
            for &id in animals {
                let thirsty = world
                    .animal(id)
                    .is_some_and(|a| a.is_alive() && a.descriptor().rain_hunger);
                if thirsty {
                    world.starve_animal(id);
                }
            }
        }
        Weather::Windy => {
            for &id in plants {
                let Some(survival) = live_plant(world, id).map(|p| p.wind_survival_probability())
                else {
                    continue;
                };
                if !rng.chance(survival) {
                    world.kill_plant(id, DeathCause::Weather(weather));
                }
            }
        }
        Weather::Snowing => {
            for &id in plants {
                let Some(survival) = live_plant(world, id).map(|p| p.snow_survival_probability())
                else {
                    continue;
                };
                if !rng.chance(survival) {
                    world.kill_plant(id, DeathCause::Weather(weather));
                }
            }
            for &id in animals {
                let Some(survival) = world
                    .animal(id)
                    .filter(|a| a.is_alive())
                    .map(|a| a.snow_survival_probability())
                else {
                    continue;
                };
                if !rng.chance(survival) {
                    world.kill_animal(id, DeathCause::Weather(weather));
                }
            }
        }
    }
    trace!(weather = %weather, "Weather applied");
}

fn live_plant(world: &World, id: PlantId) -> Option<&crate::organism::Plant> {
    world.plant(id).filter(|p| p.is_alive())
}

fn grow_plants(world: &mut World, plants: &[PlantId]) {
    for &id in plants {
        if let Some(plant) = world.plant_mut(id) {
            plant.grow();
        }
    }
}
