//! Movement domain: headless actor that owns its body, state and collaborators.
//!
//! The Bevy systems drive [`MovementState::tick`] directly against avian's
//! spatial query. `Actor` wraps the same tick for simulation without an app.

use bevy::prelude::*;

use crate::movement::collision::GroundCaster;
use crate::movement::config::{ConfigError, MovementConfig, MovementTuning};
use crate::movement::input::InputSnapshot;
use crate::movement::motor::{TickContext, TickReport};
use crate::movement::reactor::CameraReactor;
use crate::movement::state::MovementState;

/// Default body: one unit wide, two tall.
pub const DEFAULT_BODY_SIZE: Vec2 = Vec2::new(1.0, 2.0);

#[derive(Debug)]
pub struct Actor<G, C> {
    position: Vec2,
    size: Vec2,
    state: MovementState,
    config: MovementConfig,
    ground: G,
    camera: C,
}

impl<G: GroundCaster, C: CameraReactor> Actor<G, C> {
    pub fn builder() -> ActorBuilder<G, C> {
        ActorBuilder::default()
    }

    /// Run one fixed tick and move the body by the resolved displacement.
    pub fn step(&mut self, input: &InputSnapshot) -> TickReport {
        let bounds = self.bounds();
        let mut ctx = TickContext {
            config: &self.config,
            ground: &self.ground,
            camera: &mut self.camera,
        };
        let report = self.state.tick(input, bounds, &mut ctx);
        self.position += report.displacement;
        report
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, self.size)
    }

    pub fn state(&self) -> &MovementState {
        &self.state
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn ground(&self) -> &G {
        &self.ground
    }

    pub fn ground_mut(&mut self) -> &mut G {
        &mut self.ground
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    /// Hot-edit the tunables. Rejected edits leave the config untouched.
    pub fn edit_tuning(
        &mut self,
        edit: impl FnOnce(&mut MovementTuning),
    ) -> Result<(), ConfigError> {
        self.config.edit(edit)
    }
}

pub struct ActorBuilder<G, C> {
    position: Vec2,
    size: Vec2,
    config: Option<MovementConfig>,
    ground: Option<G>,
    camera: Option<C>,
}

impl<G, C> Default for ActorBuilder<G, C> {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            size: DEFAULT_BODY_SIZE,
            config: None,
            ground: None,
            camera: None,
        }
    }
}

impl<G: GroundCaster, C: CameraReactor> ActorBuilder<G, C> {
    pub fn position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn config(mut self, config: MovementConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn ground(mut self, ground: G) -> Self {
        self.ground = Some(ground);
        self
    }

    pub fn camera(mut self, camera: C) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn build(self) -> Result<Actor<G, C>, ConfigError> {
        let config = self
            .config
            .ok_or(ConfigError::MissingCollaborator("movement config"))?;
        let ground = self
            .ground
            .ok_or(ConfigError::MissingCollaborator("ground caster"))?;
        let camera = self
            .camera
            .ok_or(ConfigError::MissingCollaborator("camera reactor"))?;

        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "body size",
                value: self.size.x.min(self.size.y),
            });
        }

        Ok(Actor {
            position: self.position,
            size: self.size,
            state: MovementState::default(),
            config,
            ground,
            camera,
        })
    }
}
