//! Content domain: the movement profile stored in `assets/data/movement.ron`.

use serde::{Deserialize, Serialize};

use crate::camera::{CameraRig, CameraTuning};
use crate::movement::{ConfigError, GameLayer, GroundLayers, MovementConfig, MovementTuning};

pub const DEFAULT_TICK_RATE_HZ: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionTuning {
    pub ground_layers: Vec<GameLayer>,
}

impl Default for CollisionTuning {
    fn default() -> Self {
        Self {
            ground_layers: vec![GameLayer::Ground],
        }
    }
}

/// Everything tunable about the movement feel. Missing fields fall back to
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementProfile {
    pub tick_rate_hz: f64,
    pub tuning: MovementTuning,
    pub collision: CollisionTuning,
    pub camera: CameraTuning,
}

impl Default for MovementProfile {
    fn default() -> Self {
        Self {
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            tuning: MovementTuning::default(),
            collision: CollisionTuning::default(),
            camera: CameraTuning::default(),
        }
    }
}

/// Validated runtime pieces built from a profile.
#[derive(Debug, Clone)]
pub struct ProfileResources {
    pub config: MovementConfig,
    pub ground_layers: GroundLayers,
    pub camera_rig: CameraRig,
}

impl MovementProfile {
    pub fn tick_length(&self) -> f32 {
        (1.0 / self.tick_rate_hz) as f32
    }

    pub fn build(&self) -> Result<ProfileResources, ConfigError> {
        if !(self.tick_rate_hz > 0.0 && self.tick_rate_hz.is_finite()) {
            return Err(ConfigError::NonPositive {
                field: "tick_rate_hz",
                value: self.tick_rate_hz as f32,
            });
        }

        let config = MovementConfig::new(self.tuning.clone(), self.tick_length())?;
        let ground_layers = GroundLayers::new(self.collision.ground_layers.clone())?;

        let camera = &self.camera;
        if camera.fall_speed_damping_threshold >= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "fall_speed_damping_threshold",
                value: camera.fall_speed_damping_threshold,
                min: f32::NEG_INFINITY,
                max: 0.0,
            });
        }
        if camera.projection_scale <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "projection_scale",
                value: camera.projection_scale,
            });
        }

        Ok(ProfileResources {
            config,
            ground_layers,
            camera_rig: CameraRig::new(camera.clone()),
        })
    }
}
