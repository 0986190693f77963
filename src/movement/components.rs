//! Movement domain: components, physics layers and the ground layer resource.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::config::ConfigError;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameLayer {
    #[default]
    Default,
    /// Level solids the movement core collides with
    Ground,
    /// Player character
    Player,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for level geometry spawned on a ground layer
#[derive(Component, Debug)]
pub struct Ground;

/// Axis-aligned body the collision resolver probes from.
#[derive(Component, Debug, Clone, Copy)]
pub struct ActorBody {
    pub size: Vec2,
}

/// Layers the collision resolver treats as solid ground.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GroundLayers(Vec<GameLayer>);

impl GroundLayers {
    pub fn new(layers: Vec<GameLayer>) -> Result<Self, ConfigError> {
        if layers.is_empty() {
            return Err(ConfigError::NoGroundLayer);
        }
        Ok(Self(layers))
    }

    pub fn layers(&self) -> &[GameLayer] {
        &self.0
    }

    pub fn mask(&self) -> LayerMask {
        LayerMask(self.0.iter().fold(0, |bits, layer| bits | layer.to_bits()))
    }
}

impl Default for GroundLayers {
    fn default() -> Self {
        Self(vec![GameLayer::Ground])
    }
}
