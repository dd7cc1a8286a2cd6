//! World and terrain parameters.
//!
//! Usage:
//!   // Use default configuration
//!   let world = World::new(WorldConfig::default())?;
//!
//!   // Or customize:
//!   let mut config = WorldConfig::default();
//!   config.render_distance = 2;          // fewer chunks around the observer
//!   config.terrain.tree_chance = 0.1;    // more trees
//!   let world = World::new(config)?;
//!
//! Every field has a default, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! seed = 42
//! render_distance = 6
//!
//! [terrain]
//! base_height = 20.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const MAX_RENDER_DISTANCE: u32 = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// One layer of the terrain height field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseOctave {
    pub frequency: f64,
    pub amplitude: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    // Height field: base plus large, medium and small octaves
    pub base_height: f64,
    pub octaves: [NoiseOctave; 3],

    // Surface block selection
    pub sand_below: i32,
    pub stone_above: i32,
    pub sea_level: i32,

    // Trees
    pub tree_chance: f64,
    pub min_trunk_height: i32,
    pub max_trunk_height: i32,
    pub leaf_radius: i32,
    pub tree_edge_margin: i32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            base_height: 16.0,
            octaves: [
                NoiseOctave { frequency: 0.01, amplitude: 20.0 },
                NoiseOctave { frequency: 0.05, amplitude: 10.0 },
                NoiseOctave { frequency: 0.2, amplitude: 3.0 },
            ],

            sand_below: 12,
            stone_above: 24,
            sea_level: 10,

            tree_chance: 0.02,
            min_trunk_height: 4,
            max_trunk_height: 6,
            leaf_radius: 2,
            tree_edge_margin: 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for the default noise source and tree placement
    pub seed: u32,
    /// Chunks kept loaded in each direction around the observer's chunk
    pub render_distance: u32,
    /// Maximum distance for block picking
    pub reach: f32,
    pub terrain: TerrainConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            render_distance: 4,
            reach: 8.0,
            terrain: TerrainConfig::default(),
        }
    }
}

impl WorldConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render_distance > MAX_RENDER_DISTANCE {
            return Err(ConfigError::Invalid(format!(
                "render_distance {} exceeds {}",
                self.render_distance, MAX_RENDER_DISTANCE
            )));
        }
        if !self.reach.is_finite() || self.reach <= 0.0 {
            return Err(ConfigError::Invalid(format!("reach must be positive, got {}", self.reach)));
        }

        let terrain = &self.terrain;
        if !(0.0..=1.0).contains(&terrain.tree_chance) {
            return Err(ConfigError::Invalid(format!(
                "tree_chance must be within [0, 1], got {}",
                terrain.tree_chance
            )));
        }
        if !terrain.base_height.is_finite()
            || terrain.octaves.iter().any(|o| !o.frequency.is_finite() || !o.amplitude.is_finite())
        {
            return Err(ConfigError::Invalid("terrain height parameters must be finite".into()));
        }
        if terrain.min_trunk_height < 1 || terrain.min_trunk_height > terrain.max_trunk_height {
            return Err(ConfigError::Invalid(format!(
                "trunk height range {}..={} is empty",
                terrain.min_trunk_height, terrain.max_trunk_height
            )));
        }
        if terrain.leaf_radius < 0 || terrain.tree_edge_margin < 0 {
            return Err(ConfigError::Invalid("leaf_radius and tree_edge_margin must not be negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = WorldConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, WorldConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_given_keys() {
        let config = WorldConfig::from_toml_str(
            r#"
            seed = 42
            render_distance = 6

            [terrain]
            base_height = 20.0
            "#,
        )
        .expect("partial config parses");

        assert_eq!(config.seed, 42);
        assert_eq!(config.render_distance, 6);
        assert_eq!(config.terrain.base_height, 20.0);
        assert_eq!(config.terrain.tree_chance, 0.02);
        assert_eq!(config.reach, 8.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            WorldConfig::from_toml_str("render_distance = 1000"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            WorldConfig::from_toml_str("reach = -1.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            WorldConfig::from_toml_str("[terrain]\ntree_chance = 1.5"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            WorldConfig::from_toml_str("[terrain]\nmin_trunk_height = 7"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(WorldConfig::from_toml_str("seed = ["), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            WorldConfig::load("/definitely/not/here/world.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
