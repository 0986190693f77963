//! Camera domain: follow camera driven by the motor's turn and falling signals.

mod rig;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

pub use rig::{CameraRig, CameraTuning, Tween};

use crate::math::lerp_clamped;
use crate::movement::{MovementStep, Player};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(FixedUpdate, advance_rig.after(MovementStep))
            .add_systems(Update, follow_player);
    }
}

#[derive(Component, Debug)]
pub struct FollowCamera;

fn spawn_camera(mut commands: Commands, rig: Option<Res<CameraRig>>) {
    let scale = rig
        .map(|rig| rig.tuning().projection_scale)
        .unwrap_or_else(|| CameraTuning::default().projection_scale);

    commands.spawn((
        FollowCamera,
        Camera2d,
        Projection::from(OrthographicProjection {
            scale,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(0.0, 4.0, 100.0),
    ));
}

fn advance_rig(time: Res<Time>, mut rig: ResMut<CameraRig>) {
    rig.advance(time.delta_secs());
}

fn follow_player(
    time: Res<Time>,
    rig: Res<CameraRig>,
    player: Query<&Transform, (With<Player>, Without<FollowCamera>)>,
    mut camera: Query<&mut Transform, With<FollowCamera>>,
) {
    let (Ok(player), Ok(mut camera)) = (player.single(), camera.single_mut()) else {
        return;
    };

    let target = player.translation.truncate() + Vec2::X * rig.look_ahead_offset();
    camera.translation.x = target.x;

    // Damping is a time constant: smaller follows tighter.
    let damping = rig.y_damping();
    let blend = if damping <= 0.0 {
        1.0
    } else {
        1.0 - (-time.delta_secs() / damping).exp()
    };
    camera.translation.y = lerp_clamped(camera.translation.y, target.y, blend);
}
