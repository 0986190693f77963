//! Movement domain: fixed-tick driver for the player's motor.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::camera::CameraRig;
use crate::movement::{
    ActorBody, AvianGround, GroundLayers, MovementConfig, MovementInput, MovementState, Player,
    TickContext,
};

/// Runs one motor tick per fixed step and integrates the resolved displacement.
pub(crate) fn step_movement(
    spatial_query: SpatialQuery,
    config: Res<MovementConfig>,
    layers: Res<GroundLayers>,
    mut input: ResMut<MovementInput>,
    mut rig: ResMut<CameraRig>,
    mut query: Query<(&mut Transform, &ActorBody, &mut MovementState), With<Player>>,
) {
    let snapshot = input.take_snapshot();
    let ground = AvianGround::new(&spatial_query, layers.mask());

    for (mut transform, body, mut state) in &mut query {
        let bounds = Rect::from_center_size(transform.translation.truncate(), body.size);
        let mut ctx = TickContext {
            config: &config,
            ground: &ground,
            camera: &mut *rig,
        };

        let report = state.tick(&snapshot, bounds, &mut ctx);
        transform.translation += report.displacement.extend(0.0);
    }
}

pub(crate) fn sync_sprite_facing(
    mut query: Query<(&MovementState, &mut Sprite), (With<Player>, Changed<MovementState>)>,
) {
    for (state, mut sprite) in &mut query {
        if sprite.flip_x == state.facing_right {
            sprite.flip_x = !state.facing_right;
        }
    }
}
