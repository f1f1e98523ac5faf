//! Simulation engine stepping a populated field.

use crate::behavior::{random_sex, TimeOfDay};
use crate::disease;
use crate::field::{Census, Field};
use crate::organism::{Animal, Plant};
use crate::view::{NullView, View};
use crate::weather;
use crate::world::World;
use eco_core::{
    AnimalId, Location, OrganismKind, PlantId, Result, SimRng, SimulationConfig, Weather,
};
use tracing::{debug, info, instrument};

/// Steps run by [`Simulator::run_long_simulation`].
pub const LONG_RUN_STEPS: u64 = 4000;

pub struct Simulator<V: View = NullView> {
    config: SimulationConfig,
    world: World,
    animals: Vec<AnimalId>,
    plants: Vec<PlantId>,
    step: u64,
    weather: Weather,
    rng: SimRng,
    view: V,
}

impl<V: View> Simulator<V> {
    /// Builds a simulator seeded from `config.seed` and populates the field.
    pub fn new(config: SimulationConfig, view: V) -> Result<Self> {
        let rng = SimRng::from_seed_u64(config.seed);
        Self::with_rng(config, rng, view)
    }

    /// Like [`Simulator::new`] but draws from an explicit random source.
    pub fn with_rng(config: SimulationConfig, mut rng: SimRng, view: V) -> Result<Self> {
        config.validate()?;
        let mut config = config;
        config.world = config.world.sanitized();

        let weather = weather::draw(config.weather.sampling, &mut rng);
        let world = World::new(config.world.depth, config.world.width);

        let mut sim = Self {
            config,
            world,
            animals: Vec::new(),
            plants: Vec::new(),
            step: 0,
            weather,
            rng,
            view,
        };
        sim.reset();

        info!(
            event = "simulation_created",
            seed = sim.config.seed,
            depth = sim.config.world.depth,
            width = sim.config.world.width,
            animals = sim.animals.len(),
            plants = sim.plants.len(),
            weather = %sim.weather,
            "Simulation created"
        );
        Ok(sim)
    }

    /// Clears the field and seeds it afresh at step zero.
    pub fn reset(&mut self) {
        self.step = 0;
        self.animals.clear();
        self.plants.clear();
        self.world.clear();
        self.populate();

        debug!(
            event = "reset",
            animals = self.animals.len(),
            plants = self.plants.len(),
            "Field populated"
        );
        self.report();
    }

    // Row-major; the first creation coefficient whose roll succeeds claims the cell.
    fn populate(&mut self) {
        let depth = self.world.field().depth();
        let width = self.world.field().width();

        for row in 0..depth {
            for col in 0..width {
                let loc = Location::new(row, col);
                for coefficient in &self.config.world.creation {
                    if !self.rng.chance(coefficient.probability) {
                        continue;
                    }
                    match coefficient.kind {
                        OrganismKind::Animal(species) => {
                            let sex = species
                                .descriptor()
                                .sex_gated
                                .then(|| random_sex(&mut self.rng));
                            let animal = Animal::random(species, sex, &mut self.rng);
                            self.animals.push(self.world.spawn_animal(animal, loc));
                        }
                        OrganismKind::Plant => {
                            self.plants.push(self.world.spawn_plant(Plant::new(), loc));
                        }
                    }
                    break;
                }
            }
        }
    }

    /// Runs up to `num_steps` steps, stopping early once the view judges the
    /// field no longer viable. Returns the number of steps run.
    #[instrument(skip(self), fields(start_step = self.step))]
    pub fn simulate(&mut self, num_steps: u64) -> u64 {
        info!(
            event = "simulation_started",
            num_steps = num_steps,
            "Starting simulation for {} steps",
            num_steps
        );

        let mut completed = 0;
        while completed < num_steps && self.view.is_viable(self.world.field()) {
            self.simulate_one_step();
            completed += 1;
        }

        let census = self.census();
        info!(
            event = "simulation_finished",
            steps_run = completed,
            final_step = self.step,
            population = census.total(),
            census = %census,
            "Simulation finished"
        );
        completed
    }

    pub fn run_long_simulation(&mut self) -> u64 {
        self.simulate(LONG_RUN_STEPS)
    }

    /// Advances the world by one step.
    pub fn simulate_one_step(&mut self) {
        weather::apply(
            &mut self.world,
            self.weather,
            &self.animals,
            &self.plants,
            &mut self.rng,
        );
        disease::trigger_outbreak(
            &mut self.world,
            &self.animals,
            self.config.disease.infection_probability,
            &mut self.rng,
        );

        let time = self.time_of_day();
        let mut new_animals = Vec::new();
        for &id in &self.animals {
            self.world.animal_act(id, time, &mut self.rng, &mut new_animals);
        }
        let mut new_plants = Vec::new();
        for &id in &self.plants {
            self.world.plant_act(id, &mut self.rng, &mut new_plants);
        }

        self.animals.extend(new_animals);
        self.plants.extend(new_plants);
        self.world.compact(&mut self.animals, &mut self.plants);

        self.step += 1;
        self.weather = weather::draw(self.config.weather.sampling, &mut self.rng);
        self.report();

        let interval = self.config.metrics_interval;
        if interval > 0 && self.step % interval == 0 {
            self.emit_population_metrics();
        }
    }

    fn report(&mut self) {
        let text = self.info_text();
        self.view.set_info_text(&text);
        self.view.show_status(self.step, self.world.field());
    }

    /// Status line for the upcoming step.
    pub fn info_text(&self) -> String {
        format!("Time: {}   Weather: {}", self.time_of_day(), self.weather)
    }

    fn emit_population_metrics(&self) {
        let census = self.census();
        let infected = self
            .animals()
            .filter(|(_, animal)| animal.is_infected())
            .count();

        info!(
            event = "population_metrics",
            step = self.step,
            animals = self.animals.len(),
            plants = self.plants.len(),
            infected = infected,
            kinds_present = census.kinds_present(),
            census = %census,
            weather = %self.weather,
            "Population metrics snapshot"
        );
    }

    /// Places a new animal on a free cell. Returns None if the cell is
    /// outside the field or taken.
    pub fn insert_animal(&mut self, animal: Animal, loc: Location) -> Option<AnimalId> {
        if !self.world.field().is_free(loc) {
            return None;
        }
        let id = self.world.spawn_animal(animal, loc);
        self.animals.push(id);
        Some(id)
    }

    /// Places a new plant on a free cell. Returns None if the cell is
    /// outside the field or taken.
    pub fn insert_plant(&mut self, plant: Plant, loc: Location) -> Option<PlantId> {
        if !self.world.field().is_free(loc) {
            return None;
        }
        let id = self.world.spawn_plant(plant, loc);
        self.plants.push(id);
        Some(id)
    }

    /// Overrides the weather applied at the start of the next step.
    pub fn set_weather(&mut self, weather: Weather) {
        self.weather = weather;
    }

    pub fn field(&self) -> &Field {
        self.world.field()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn animals(&self) -> impl Iterator<Item = (AnimalId, &Animal)> + '_ {
        self.animals.iter().filter_map(move |&id| {
            self.world
                .animal(id)
                .filter(|animal| animal.is_alive())
                .map(|animal| (id, animal))
        })
    }

    pub fn plants(&self) -> impl Iterator<Item = (PlantId, &Plant)> + '_ {
        self.plants.iter().filter_map(move |&id| {
            self.world
                .plant(id)
                .filter(|plant| plant.is_alive())
                .map(|plant| (id, plant))
        })
    }

    pub fn animal(&self, id: AnimalId) -> Option<&Animal> {
        self.world.animal(id)
    }

    pub fn plant(&self, id: PlantId) -> Option<&Plant> {
        self.world.plant(id)
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn weather(&self) -> Weather {
        self.weather
    }

    /// The last step of every day/night cycle is night.
    pub fn is_night(&self) -> bool {
        let cycle = self.config.night_cycle;
        self.step % cycle == cycle - 1
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        if self.is_night() {
            TimeOfDay::Night
        } else {
            TimeOfDay::Day
        }
    }

    pub fn census(&self) -> Census {
        self.world.field().census()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}
