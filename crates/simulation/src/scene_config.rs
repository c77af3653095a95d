//! Scene configuration: object positions, light directions and season
//! length, loaded from a JSON file at startup and again on reset.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SCENE_OBJECT_SLOTS;

#[derive(Debug, Error)]
pub enum SceneConfigError {
    #[error("failed to read scene config at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scene config at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("scene config lists {found} object positions but the scene needs {required}")]
    MissingPositions { found: usize, required: usize },
    #[error("season length must be at least one day")]
    ZeroSeasonLength,
}

/// Fired to tear the scene back to its configured starting state.
#[derive(Event, Debug, Default, Clone, Copy)]
pub struct SceneReset;

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Ordered: desert floor, globe base, then the cacti.
    pub object_positions: Vec<[f32; 3]>,
    pub sun_direction: [f32; 3],
    pub moon_direction: [f32; 3],
    pub season_length_days: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        // A ring of eight cacti around the globe centre.
        let mut object_positions = vec![[0.0, 0.0, 0.0], [0.0, -12.0, 0.0]];
        for i in 0..8 {
            let angle = i as f32 / 8.0 * std::f32::consts::TAU;
            object_positions.push([angle.cos() * 30.0, 0.0, angle.sin() * 30.0]);
        }
        Self {
            object_positions,
            sun_direction: [-0.5, -1.0, 0.25],
            moon_direction: [0.5, -1.0, -0.25],
            season_length_days: 3,
        }
    }
}

impl SceneConfig {
    pub fn load(path: &str) -> Result<Self, SceneConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| SceneConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        let config: SceneConfig =
            serde_json::from_str(&text).map_err(|source| SceneConfigError::Parse {
                path: path.to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SceneConfigError> {
        if self.object_positions.len() < SCENE_OBJECT_SLOTS {
            return Err(SceneConfigError::MissingPositions {
                found: self.object_positions.len(),
                required: SCENE_OBJECT_SLOTS,
            });
        }
        if self.season_length_days == 0 {
            return Err(SceneConfigError::ZeroSeasonLength);
        }
        Ok(())
    }

    /// Position of the object in the given config slot. Slots below
    /// `SCENE_OBJECT_SLOTS` are guaranteed present by `validate`.
    pub fn position(&self, slot: usize) -> Vec3 {
        let [x, y, z] = self.object_positions[slot];
        Vec3::new(x, y, z)
    }

    pub fn sun_direction(&self) -> Vec3 {
        Vec3::from_array(self.sun_direction)
    }

    pub fn moon_direction(&self) -> Vec3 {
        Vec3::from_array(self.moon_direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.object_positions.len(), SCENE_OBJECT_SLOTS);
    }

    #[test]
    fn test_parse_round_trip() {
        let config = SceneConfig::default();
        let text = serde_json::to_string_pretty(&config).unwrap();
        let parsed: SceneConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.object_positions, config.object_positions);
        assert_eq!(parsed.season_length_days, config.season_length_days);
    }

    #[test]
    fn test_parse_literal_json() {
        let text = r#"{
            "object_positions": [
                [0.0, 0.0, 0.0], [0.0, -12.0, 0.0],
                [30.0, 0.0, 0.0], [-30.0, 0.0, 0.0],
                [0.0, 0.0, 30.0], [0.0, 0.0, -30.0],
                [21.0, 0.0, 21.0], [-21.0, 0.0, 21.0],
                [21.0, 0.0, -21.0], [-21.0, 0.0, -21.0]
            ],
            "sun_direction": [-0.5, -1.0, 0.25],
            "moon_direction": [0.5, -1.0, -0.25],
            "season_length_days": 3
        }"#;
        let config: SceneConfig = serde_json::from_str(text).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.position(1), Vec3::new(0.0, -12.0, 0.0));
        assert_eq!(config.sun_direction(), Vec3::new(-0.5, -1.0, 0.25));
    }

    #[test]
    fn test_too_few_positions_is_an_error() {
        let config = SceneConfig {
            object_positions: vec![[0.0; 3]; 4],
            ..Default::default()
        };
        match config.validate() {
            Err(SceneConfigError::MissingPositions { found, required }) => {
                assert_eq!(found, 4);
                assert_eq!(required, SCENE_OBJECT_SLOTS);
            }
            other => panic!("expected MissingPositions, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_season_length_is_an_error() {
        let config = SceneConfig {
            season_length_days: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SceneConfigError::ZeroSeasonLength)
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = SceneConfig::load("/definitely/not/here.json");
        assert!(matches!(result, Err(SceneConfigError::Io { .. })));
    }
}
