//! Content domain: data-driven movement profile loading and hot reload.

mod data;
mod loader;

use std::path::PathBuf;

use bevy::prelude::*;

pub use data::{CollisionTuning, DEFAULT_TICK_RATE_HZ, MovementProfile, ProfileResources};
pub use loader::{ContentLoadError, load_movement_profile, parse_movement_profile};

use crate::camera::CameraRig;
use crate::movement::{ConfigError, GroundLayers, MovementConfig};

pub const DEFAULT_PROFILE_PATH: &str = "assets/data/movement.ron";

/// Where the movement profile is read from.
#[derive(Resource, Debug, Clone)]
pub struct ProfilePath(pub PathBuf);

impl Default for ProfilePath {
    fn default() -> Self {
        Self(PathBuf::from(DEFAULT_PROFILE_PATH))
    }
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProfilePath>()
            .add_systems(PreStartup, load_profile)
            .add_systems(PostStartup, verify_collaborators);

        #[cfg(feature = "dev-tools")]
        app.add_systems(Update, reload_profile_on_key);
    }
}

fn insert_profile(commands: &mut Commands, fixed: &mut Time<Fixed>, resources: ProfileResources) {
    fixed.set_timestep_seconds(f64::from(resources.config.tick_length()));
    commands.insert_resource(resources.config);
    commands.insert_resource(resources.ground_layers);
    commands.insert_resource(resources.camera_rig);
}

/// Load the profile before anything spawns. A bad file stops the app.
fn load_profile(
    mut commands: Commands,
    path: Res<ProfilePath>,
    mut fixed: ResMut<Time<Fixed>>,
) -> Result {
    let (profile, resources) = load_movement_profile(&path.0)?;

    info!(
        "Loaded movement profile {}: {} Hz, jump_height={}, air_jumps={}, dashes={}",
        path.0.display(),
        profile.tick_rate_hz,
        profile.tuning.jump_height,
        profile.tuning.air_jumps_allowed,
        profile.tuning.dashes_allowed
    );

    insert_profile(&mut commands, &mut fixed, resources);
    Ok(())
}

/// The motor needs all three collaborators; fail fast if any is missing.
fn verify_collaborators(
    config: Option<Res<MovementConfig>>,
    layers: Option<Res<GroundLayers>>,
    rig: Option<Res<CameraRig>>,
) -> Result {
    if config.is_none() {
        return Err(ConfigError::MissingCollaborator("movement config").into());
    }
    if layers.is_none() {
        return Err(ConfigError::NoGroundLayer.into());
    }
    if rig.is_none() {
        return Err(ConfigError::MissingCollaborator("camera reactor").into());
    }
    Ok(())
}

/// F5 re-reads the profile and swaps it in. Invalid files keep the current values.
#[cfg(feature = "dev-tools")]
fn reload_profile_on_key(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    path: Res<ProfilePath>,
    mut fixed: ResMut<Time<Fixed>>,
    rig: Option<Res<CameraRig>>,
) {
    if !keyboard.just_pressed(KeyCode::F5) {
        return;
    }

    match load_movement_profile(&path.0) {
        Ok((profile, mut resources)) => {
            // Keep in-flight camera blends; only the tunables change.
            if let Some(rig) = rig {
                let mut current = (*rig).clone();
                current.set_tuning(profile.camera.clone());
                resources.camera_rig = current;
            }
            insert_profile(&mut commands, &mut fixed, resources);
            info!(
                "Reloaded movement profile {}: {} Hz",
                path.0.display(),
                profile.tick_rate_hz
            );
        }
        Err(err) => {
            error!("Movement profile reload rejected: {}", err);
        }
    }
}
