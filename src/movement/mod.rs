//! Movement domain: deterministic platformer movement core and its Bevy wiring.

mod actor;
mod bootstrap;
mod collision;
mod components;
mod config;
mod dash;
#[cfg(feature = "dev-tools")]
mod dev;
mod ground;
mod input;
mod motor;
mod reactor;
mod state;
mod systems;


use bevy::prelude::*;

pub use actor::{Actor, ActorBuilder, DEFAULT_BODY_SIZE};
pub use collision::{
    COLLISION_PADDING, CollisionFlags, CollisionResolver, GroundCaster, HeadBumpProbe,
    RayHit, RaycastCorners,
};
pub use components::{ActorBody, GameLayer, Ground, GroundLayers, Player};
pub use config::{ConfigError, DEFAULT_TICK_LENGTH, DerivedValues, MovementConfig, MovementTuning};
pub use dash::{DASH_DIRECTIONS, select_dash_direction};
pub use ground::{AvianGround, StaticGround};
pub use input::{InputSnapshot, MovementInput};
pub use motor::{DASH_VERTICAL_LIMIT, MAX_RISE_SPEED, TickContext, TickReport};
pub use reactor::{CameraReactor, NullReactor};
pub use state::{ActiveDash, Cut, HeadBumpSlide, JumpArc, MovementState, MovementTimers, VerticalMode};

/// Ordering handle for the fixed-tick motor step.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct MovementStep;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementInput>()
            .add_systems(
                Startup,
                (bootstrap::spawn_test_room, bootstrap::spawn_player),
            )
            .add_systems(Update, systems::read_input)
            .add_systems(FixedUpdate, systems::step_movement.in_set(MovementStep))
            .add_systems(Update, systems::sync_sprite_facing);

        #[cfg(feature = "dev-tools")]
        app.add_systems(Update, dev::draw_collision_overlay);
    }
}
