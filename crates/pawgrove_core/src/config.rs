//! Configuration management for simulation parameters.
//!
//! Strongly-typed structures that map one-to-one to the `config.toml`
//! file. Defaults reproduce the stock ecosystem and are written out in
//! full on the first run; an edited file must keep every table and key.
//!
//! ## Excerpt of `config.toml`
//!
//! ```toml
//! [world]
//! width = 20
//! height = 20
//! initial_dogs = 8
//! initial_cats = 8
//! initial_feeders = 3
//!
//! [control]
//! dog_threshold = 30
//! cat_threshold = 30
//! max_harvesters = 2
//! ```

use serde::{Deserialize, Serialize};

use crate::species::{Species, SpeciesParams, NEED_CAP};

/// World-level simulation configuration: grid dimensions, starting
/// population, and the optional RNG seed.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WorldConfig {
    pub width: u16,
    pub height: u16,
    pub initial_dogs: usize,
    pub initial_cats: usize,
    pub initial_feeders: usize,
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            initial_dogs: 8,
            initial_cats: 8,
            initial_feeders: 3,
            seed: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FoodConfig {
    /// Activations a dropped marker survives before it spoils.
    pub shelf_life: u32,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self { shelf_life: 75 }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FeederConfig {
    pub drop_chance: f32,
    /// Idle ticks after a full drop cycle.
    pub rest_cooldown: u32,
    pub drops_per_cycle: u32,
}

impl Default for FeederConfig {
    fn default() -> Self {
        Self {
            drop_chance: 0.4,
            rest_cooldown: 8,
            drops_per_cycle: 10,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HarvesterConfig {
    pub hunt_radius: u32,
    pub collection_target: u32,
    pub max_steps: u32,
    pub captures_per_tick: u32,
    pub capture_chance: f32,
    pub dog_price_min: u32,
    pub dog_price_max: u32,
    pub cat_price_min: u32,
    pub cat_price_max: u32,
}

impl Default for HarvesterConfig {
    fn default() -> Self {
        Self {
            hunt_radius: 20,
            collection_target: 10,
            max_steps: 5,
            captures_per_tick: 3,
            capture_chance: 0.9,
            dog_price_min: 3,
            dog_price_max: 6,
            cat_price_min: 2,
            cat_price_max: 4,
        }
    }
}

impl HarvesterConfig {
    /// Inclusive sale-price range for one captured animal.
    pub fn price_range(&self, species: Species) -> (u32, u32) {
        match species {
            Species::Dog => (self.dog_price_min, self.dog_price_max),
            Species::Cat => (self.cat_price_min, self.cat_price_max),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ControlConfig {
    pub dog_threshold: usize,
    pub cat_threshold: usize,
    pub max_harvesters: usize,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            dog_threshold: 30,
            cat_threshold: 30,
            max_harvesters: 2,
        }
    }
}

impl ControlConfig {
    pub fn threshold(&self, species: Species) -> usize {
        match species {
            Species::Dog => self.dog_threshold,
            Species::Cat => self.cat_threshold,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub dog: SpeciesParams,
    pub cat: SpeciesParams,
    pub food: FoodConfig,
    pub feeder: FeederConfig,
    pub harvester: HarvesterConfig,
    pub control: ControlConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            dog: SpeciesParams::dog(),
            cat: SpeciesParams::cat(),
            food: FoodConfig::default(),
            feeder: FeederConfig::default(),
            harvester: HarvesterConfig::default(),
            control: ControlConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn species(&self, species: Species) -> &SpeciesParams {
        match species {
            Species::Dog => &self.dog,
            Species::Cat => &self.cat,
        }
    }

    /// Validates configuration values, returning an error for the first
    /// invalid value found.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.world.width > 0, "World width must be positive");
        anyhow::ensure!(self.world.height > 0, "World height must be positive");

        for (name, params) in [("dog", &self.dog), ("cat", &self.cat)] {
            anyhow::ensure!(
                (0.0..=1.0).contains(&params.repro_chance),
                "{name} reproduction chance must be in [0.0, 1.0]"
            );
            anyhow::ensure!(
                (0.0..=1.0).contains(&params.need_drift_chance),
                "{name} need drift chance must be in [0.0, 1.0]"
            );
            anyhow::ensure!(
                params.max_age_min <= params.max_age_max,
                "{name} max age range is inverted"
            );
            anyhow::ensure!(params.max_hunger > 0, "{name} max hunger must be positive");
            anyhow::ensure!(
                params.initial_hunger < params.max_hunger,
                "{name} initial hunger must be below max hunger"
            );
            anyhow::ensure!(
                params.initial_need <= NEED_CAP,
                "{name} initial need exceeds the need cap"
            );
        }

        anyhow::ensure!(
            (0.0..=1.0).contains(&self.feeder.drop_chance),
            "Feeder drop chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.feeder.drops_per_cycle > 0,
            "Feeder drops per cycle must be positive"
        );
        anyhow::ensure!(self.food.shelf_life > 0, "Food shelf life must be positive");

        anyhow::ensure!(
            (0.0..=1.0).contains(&self.harvester.capture_chance),
            "Capture chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.harvester.collection_target > 0,
            "Collection target must be positive"
        );
        anyhow::ensure!(
            self.harvester.captures_per_tick > 0,
            "Captures per tick must be positive"
        );
        anyhow::ensure!(self.harvester.max_steps > 0, "Max steps must be positive");
        anyhow::ensure!(
            self.harvester.dog_price_min <= self.harvester.dog_price_max,
            "Dog price range is inverted"
        );
        anyhow::ensure!(
            self.harvester.cat_price_min <= self.harvester.cat_price_max,
            "Cat price range is inverted"
        );

        anyhow::ensure!(
            self.control.dog_threshold > 0,
            "Dog harvest threshold must be positive"
        );
        anyhow::ensure!(
            self.control.cat_threshold > 0,
            "Cat harvest threshold must be positive"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Stable digest of the behavioral parameters. Two runs with the same
    /// fingerprint differ only in seed and starting counts.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.dog).as_bytes());
        hasher.update(format!("{:?}", self.cat).as_bytes());
        hasher.update(format!("{:?}", self.food).as_bytes());
        hasher.update(format!("{:?}", self.feeder).as_bytes());
        hasher.update(format!("{:?}", self.harvester).as_bytes());
        hasher.update(format!("{:?}", self.control).as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_world_width() {
        let config = SimConfig {
            world: WorldConfig {
                width: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_repro_chance() {
        let mut config = SimConfig::default();
        config.dog.repro_chance = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_age_range() {
        let mut config = SimConfig::default();
        config.cat.max_age_min = 300;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_price_range() {
        let config = SimConfig {
            harvester: HarvesterConfig {
                dog_price_min: 9,
                dog_price_max: 3,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SimConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed = SimConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.world.width, config.world.width);
        assert_eq!(parsed.cat.moderate_need_at, Some(7));
    }

    #[test]
    fn test_fingerprint_consistency() {
        let config1 = SimConfig::default();
        let config2 = SimConfig::default();
        assert_eq!(config1.fingerprint(), config2.fingerprint());
    }

    #[test]
    fn test_fingerprint_tracks_parameters() {
        let mut config = SimConfig::default();
        let before = config.fingerprint();
        config.harvester.capture_chance = 0.5;
        assert_ne!(before, config.fingerprint());
    }

    #[test]
    fn test_seed_does_not_affect_fingerprint() {
        let mut config = SimConfig::default();
        let before = config.fingerprint();
        config.world.seed = Some(7);
        assert_eq!(before, config.fingerprint());
    }
}
