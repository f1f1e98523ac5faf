//! Configuration types for the simulation.

use crate::error::{Error, Result};
use crate::types::{OrganismKind, Species};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_DEPTH: i32 = 200;
pub const DEFAULT_WIDTH: i32 = 250;
/// Largest field, in cells, that row-major indexing can address.
pub const MAX_CELLS: i64 = i32::MAX as i64;

/// Chance that an empty cell is seeded with a given kind during reset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreationCoefficient {
    pub kind: OrganismKind,
    pub probability: f64,
}

impl CreationCoefficient {
    pub fn new(kind: OrganismKind, probability: f64) -> Self {
        Self { kind, probability }
    }
}

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Number of rows
    pub depth: i32,
    /// Number of columns
    pub width: i32,
    /// Tried in order for every cell; the first success claims it
    pub creation: Vec<CreationCoefficient>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            width: DEFAULT_WIDTH,
            creation: vec![
                CreationCoefficient::new(OrganismKind::Animal(Species::Fox), 0.06),
                CreationCoefficient::new(OrganismKind::Animal(Species::Rabbit), 0.11),
                CreationCoefficient::new(OrganismKind::Animal(Species::Eagle), 0.05),
                CreationCoefficient::new(OrganismKind::Animal(Species::Cow), 0.07),
                CreationCoefficient::new(OrganismKind::Plant, 0.15),
                // Split evenly between males and females.
                CreationCoefficient::new(OrganismKind::Animal(Species::Elephant), 0.1),
            ],
        }
    }
}

impl WorldConfig {
    /// Empty world of the given size, nothing seeded on reset
    pub fn empty(depth: i32, width: i32) -> Self {
        Self {
            depth,
            width,
            creation: Vec::new(),
        }
    }

    /// Replace non-positive dimensions with the defaults.
    pub fn sanitized(mut self) -> Self {
        if self.width <= 0 || self.depth <= 0 {
            warn!(
                depth = self.depth,
                width = self.width,
                default_depth = DEFAULT_DEPTH,
                default_width = DEFAULT_WIDTH,
                "The dimensions must be greater than zero, using default values"
            );
            self.depth = DEFAULT_DEPTH;
            self.width = DEFAULT_WIDTH;
        }
        self
    }
}

/// Disease trigger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseConfig {
    /// Chance per step that one random animal catches the disease
    pub infection_probability: f64,
}

impl Default for DiseaseConfig {
    fn default() -> Self {
        Self {
            infection_probability: 0.07,
        }
    }
}

/// How the next weather is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherSampling {
    /// Independent threshold rolls tried in turn (snow, wind, rain).
    Sequential,
    /// One draw against the cumulative target shares.
    Categorical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub sampling: WeatherSampling,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            sampling: WeatherSampling::Sequential,
        }
    }
}

/// Simulation run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// World configuration
    pub world: WorldConfig,
    /// Disease configuration
    pub disease: DiseaseConfig,
    /// Weather configuration
    pub weather: WeatherConfig,
    /// Length of a day/night cycle in steps; the last step of each is night
    pub night_cycle: u64,
    /// Steps between population snapshots in the log
    pub metrics_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            world: WorldConfig::default(),
            disease: DiseaseConfig::default(),
            weather: WeatherConfig::default(),
            night_cycle: 4,
            metrics_interval: 100,
        }
    }
}

impl SimulationConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_probability("disease.infection_probability", self.disease.infection_probability)?;
        for coefficient in &self.world.creation {
            check_probability(
                &format!("world.creation[{}]", coefficient.kind),
                coefficient.probability,
            )?;
        }
        let cells = i64::from(self.world.depth) * i64::from(self.world.width);
        if cells > MAX_CELLS {
            return Err(Error::Validation(format!(
                "world of {}x{} cells exceeds {} cells",
                self.world.depth, self.world.width, MAX_CELLS
            )));
        }
        if self.night_cycle == 0 {
            return Err(Error::Validation("night_cycle must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn check_probability(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let world_config = WorldConfig::default();
        assert_eq!(world_config.depth, 200);
        assert_eq!(world_config.width, 250);
        assert_eq!(world_config.creation.len(), 6);
        assert_eq!(
            world_config.creation[0].kind,
            OrganismKind::Animal(Species::Fox)
        );

        let config = SimulationConfig::default();
        assert_eq!(config.night_cycle, 4);
        assert_eq!(config.disease.infection_probability, 0.07);
        assert_eq!(config.weather.sampling, WeatherSampling::Sequential);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sanitized_falls_back_to_defaults() {
        let config = WorldConfig::empty(0, 10).sanitized();
        assert_eq!(config.depth, DEFAULT_DEPTH);
        assert_eq!(config.width, DEFAULT_WIDTH);

        let config = WorldConfig::empty(10, 12).sanitized();
        assert_eq!((config.depth, config.width), (10, 12));
    }

    #[test]
    fn test_validation_rejects_bad_probability() {
        let mut config = SimulationConfig::default();
        config.disease.infection_probability = 1.5;
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        let mut config = SimulationConfig::default();
        config.world.creation[2].probability = -0.1;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.night_cycle = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_oversized_world() {
        let mut config = SimulationConfig::default();
        config.world.depth = 50_000;
        config.world.width = 50_000;
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        config.world.width = 40_000;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = SimulationConfig {
            seed: 99,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed = SimulationConfig::from_json(&json).unwrap();
        assert_eq!(parsed.seed, 99);
        assert_eq!(parsed.world.creation, config.world.creation);
    }

    #[test]
    fn test_from_json_reports_parse_errors() {
        let err = SimulationConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
