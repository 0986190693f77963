//! Movement domain: tunables, derived kinematic constants, and validation.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::collision::{CollisionResolver, HeadBumpProbe};

/// Default fixed tick (50 Hz).
pub const DEFAULT_TICK_LENGTH: f32 = 0.02;

/// Hand-tuned movement constants. Everything the state machine reads
/// besides the derived values in [`DerivedValues`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    // Walk / sprint
    pub max_walk_speed: f32,
    pub max_sprint_speed: f32,
    pub ground_acceleration: f32,
    pub ground_deceleration: f32,
    pub air_acceleration: f32,
    pub air_deceleration: f32,
    pub wall_jump_move_acceleration: f32,
    pub wall_jump_move_deceleration: f32,

    // Collision probes
    pub horizontal_rays: usize,
    pub vertical_rays: usize,

    // Head bump slide
    pub use_head_bump_slide: bool,
    pub head_bump_slide_speed: f32,
    /// Fraction of the actor width covered by the ceiling probe box.
    pub head_bump_box_width: f32,
    pub head_bump_box_height: f32,

    // Jump
    pub jump_height: f32,
    pub jump_height_compensation_factor: f32,
    pub time_till_jump_apex: f32,
    pub gravity_on_release_multiplier: f32,
    pub max_fall_speed: f32,
    pub air_jumps_allowed: u32,
    pub reset_jumps_on_wall_slide: bool,
    /// Jump-cut window.
    pub time_for_upwards_cancel: f32,
    pub apex_threshold: f32,
    pub apex_hang_time: f32,
    pub jump_buffer_time: f32,
    pub jump_coyote_time: f32,

    // Wall slide / wall jump
    pub wall_slide_speed: f32,
    pub wall_slide_deceleration: f32,
    /// `[horizontal push, height]`; the push sign is ignored.
    pub wall_jump_direction: [f32; 2],
    pub wall_jump_post_buffer_time: f32,
    pub wall_jump_gravity_on_release_multiplier: f32,

    // Dash
    pub dash_time: f32,
    pub dash_speed: f32,
    pub time_between_dashes_on_ground: f32,
    pub reset_dash_on_wall_slide: bool,
    pub dashes_allowed: u32,
    pub dash_diagonal_bias: f32,
    pub dash_buffer_time: f32,
    pub dash_gravity_on_release_multiplier: f32,
    pub dash_time_for_upwards_cancel: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            max_walk_speed: 12.5,
            max_sprint_speed: 20.0,
            ground_acceleration: 5.0,
            ground_deceleration: 20.0,
            air_acceleration: 5.0,
            air_deceleration: 5.0,
            wall_jump_move_acceleration: 5.0,
            wall_jump_move_deceleration: 5.0,

            horizontal_rays: 4,
            vertical_rays: 4,

            use_head_bump_slide: true,
            head_bump_slide_speed: 13.0,
            head_bump_box_width: 0.3,
            head_bump_box_height: 0.1,

            jump_height: 6.5,
            jump_height_compensation_factor: 1.05,
            time_till_jump_apex: 0.35,
            gravity_on_release_multiplier: 2.0,
            max_fall_speed: 26.0,
            air_jumps_allowed: 1,
            reset_jumps_on_wall_slide: true,
            time_for_upwards_cancel: 0.027,
            apex_threshold: 0.97,
            apex_hang_time: 0.075,
            jump_buffer_time: 0.125,
            jump_coyote_time: 0.1,

            wall_slide_speed: 5.0,
            wall_slide_deceleration: 50.0,
            wall_jump_direction: [-20.0, 6.5],
            wall_jump_post_buffer_time: 0.125,
            wall_jump_gravity_on_release_multiplier: 1.0,

            dash_time: 0.11,
            dash_speed: 40.0,
            time_between_dashes_on_ground: 0.225,
            reset_dash_on_wall_slide: true,
            dashes_allowed: 2,
            dash_diagonal_bias: 0.4,
            dash_buffer_time: 0.125,
            dash_gravity_on_release_multiplier: 1.0,
            dash_time_for_upwards_cancel: 0.027,
        }
    }
}

impl MovementTuning {
    pub fn wall_jump_direction(&self) -> Vec2 {
        Vec2::from_array(self.wall_jump_direction)
    }

    /// Reject values that would make the derived constants degenerate or
    /// fall outside the ranges the movement feel was tuned for.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("max_walk_speed", self.max_walk_speed, 1.0, 100.0)?;
        check_range("max_sprint_speed", self.max_sprint_speed, 1.0, 100.0)?;
        check_range("ground_acceleration", self.ground_acceleration, 0.25, 50.0)?;
        check_range("ground_deceleration", self.ground_deceleration, 0.25, 50.0)?;
        check_range("air_acceleration", self.air_acceleration, 0.25, 50.0)?;
        check_range("air_deceleration", self.air_deceleration, 0.25, 50.0)?;
        check_range(
            "wall_jump_move_acceleration",
            self.wall_jump_move_acceleration,
            0.25,
            50.0,
        )?;
        check_range(
            "wall_jump_move_deceleration",
            self.wall_jump_move_deceleration,
            0.25,
            50.0,
        )?;

        check_rays("horizontal", self.horizontal_rays)?;
        check_rays("vertical", self.vertical_rays)?;

        check_range("head_bump_slide_speed", self.head_bump_slide_speed, 1.0, 50.0)?;
        check_range("head_bump_box_width", self.head_bump_box_width, 0.01, 1.0)?;
        check_range("head_bump_box_height", self.head_bump_box_height, 0.01, 0.5)?;

        check_positive("jump_height", self.jump_height)?;
        check_range(
            "jump_height_compensation_factor",
            self.jump_height_compensation_factor,
            1.0,
            1.1,
        )?;
        check_positive("time_till_jump_apex", self.time_till_jump_apex)?;
        check_range(
            "gravity_on_release_multiplier",
            self.gravity_on_release_multiplier,
            0.01,
            5.0,
        )?;
        check_positive("max_fall_speed", self.max_fall_speed)?;
        check_range("air_jumps_allowed", self.air_jumps_allowed as f32, 0.0, 5.0)?;
        check_range("time_for_upwards_cancel", self.time_for_upwards_cancel, 0.02, 0.3)?;
        check_range("apex_threshold", self.apex_threshold, 0.5, 1.0)?;
        check_range("apex_hang_time", self.apex_hang_time, 0.01, 1.0)?;
        check_range("jump_buffer_time", self.jump_buffer_time, 0.0, 1.0)?;
        check_range("jump_coyote_time", self.jump_coyote_time, 0.0, 1.0)?;

        check_positive("wall_slide_speed", self.wall_slide_speed)?;
        check_range("wall_slide_deceleration", self.wall_slide_deceleration, 0.25, 50.0)?;
        check_positive("wall_jump_direction.y", self.wall_jump_direction[1])?;
        check_range(
            "wall_jump_post_buffer_time",
            self.wall_jump_post_buffer_time,
            0.0,
            1.0,
        )?;
        check_range(
            "wall_jump_gravity_on_release_multiplier",
            self.wall_jump_gravity_on_release_multiplier,
            0.01,
            5.0,
        )?;

        check_range("dash_time", self.dash_time, 0.0, 1.0)?;
        check_range("dash_speed", self.dash_speed, 1.0, 200.0)?;
        check_range(
            "time_between_dashes_on_ground",
            self.time_between_dashes_on_ground,
            0.0,
            1.0,
        )?;
        check_range("dashes_allowed", self.dashes_allowed as f32, 0.0, 5.0)?;
        check_range("dash_diagonal_bias", self.dash_diagonal_bias, 0.0, 0.5)?;
        check_range("dash_buffer_time", self.dash_buffer_time, 0.0, 1.0)?;
        check_range(
            "dash_gravity_on_release_multiplier",
            self.dash_gravity_on_release_multiplier,
            0.01,
            5.0,
        )?;
        check_range(
            "dash_time_for_upwards_cancel",
            self.dash_time_for_upwards_cancel,
            0.02,
            0.3,
        )?;

        Ok(())
    }
}

/// Constants computed from [`MovementTuning`] by closed-form kinematics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedValues {
    pub adjusted_jump_height: f32,
    pub gravity: f32,
    pub initial_jump_velocity: f32,
    pub adjusted_wall_jump_height: f32,
    pub wall_jump_gravity: f32,
    pub initial_wall_jump_velocity: f32,
    /// Height a full dash plus its cut ramp would climb, snapped to ticks.
    pub dash_target_apex_height: f32,
    /// Height above the launch point that a head-bump slide recovers toward.
    pub head_bump_recovery_height: f32,
}

impl DerivedValues {
    pub fn compute(tuning: &MovementTuning, tick_length: f32) -> Self {
        let apex_time_sq = tuning.time_till_jump_apex.powi(2);
        let compensation = tuning.jump_height_compensation_factor;

        let adjusted_jump_height = tuning.jump_height * compensation;
        let gravity = -(2.0 * adjusted_jump_height) / apex_time_sq;
        let initial_jump_velocity = gravity.abs() * tuning.time_till_jump_apex;

        let adjusted_wall_jump_height = tuning.wall_jump_direction[1] * compensation;
        let wall_jump_gravity = -(2.0 * adjusted_wall_jump_height) / apex_time_sq;
        let initial_wall_jump_velocity = wall_jump_gravity.abs() * tuning.time_till_jump_apex;

        let dash_time_rounded = (tuning.dash_time / tick_length).ceil() * tick_length;
        let dash_cancel_rounded =
            (tuning.dash_time_for_upwards_cancel / tick_length).ceil() * tick_length;
        let dash_target_apex_height = tuning.dash_speed * dash_time_rounded
            + 0.5 * tuning.dash_speed * dash_cancel_rounded;

        Self {
            adjusted_jump_height,
            gravity,
            initial_jump_velocity,
            adjusted_wall_jump_height,
            wall_jump_gravity,
            initial_wall_jump_velocity,
            dash_target_apex_height,
            head_bump_recovery_height: tuning.jump_height * (2.0 - compensation),
        }
    }
}

/// Validated tunables together with their derived constants and the fixed
/// tick they were computed for. The only way to change a value is through
/// [`MovementConfig::edit`], which keeps the derived values in sync.
#[derive(Resource, Debug, Clone)]
pub struct MovementConfig {
    tuning: MovementTuning,
    derived: DerivedValues,
    tick_length: f32,
}

impl MovementConfig {
    pub fn new(tuning: MovementTuning, tick_length: f32) -> Result<Self, ConfigError> {
        check_positive("tick_length", tick_length)?;
        tuning.validate()?;
        let derived = DerivedValues::compute(&tuning, tick_length);
        Ok(Self {
            tuning,
            derived,
            tick_length,
        })
    }

    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    pub fn derived(&self) -> &DerivedValues {
        &self.derived
    }

    pub fn tick_length(&self) -> f32 {
        self.tick_length
    }

    /// Apply a hot edit. Invalid edits are rejected and leave the current
    /// values untouched.
    pub fn edit(&mut self, edit: impl FnOnce(&mut MovementTuning)) -> Result<(), ConfigError> {
        let mut next = self.tuning.clone();
        edit(&mut next);
        next.validate()?;
        self.derived = DerivedValues::compute(&next, self.tick_length);
        self.tuning = next;
        Ok(())
    }

    pub fn replace(&mut self, tuning: MovementTuning) -> Result<(), ConfigError> {
        self.edit(|current| *current = tuning)
    }

    pub fn resolver(&self) -> CollisionResolver {
        let head_bump = self.tuning.use_head_bump_slide.then(|| HeadBumpProbe {
            width_fraction: self.tuning.head_bump_box_width,
            height: self.tuning.head_bump_box_height,
        });
        CollisionResolver::new(self.tuning.horizontal_rays, self.tuning.vertical_rays, head_bump)
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        let tuning = MovementTuning::default();
        let derived = DerivedValues::compute(&tuning, DEFAULT_TICK_LENGTH);
        Self {
            tuning,
            derived,
            tick_length: DEFAULT_TICK_LENGTH,
        }
    }
}

/// Configuration failures. All of them surface at load or edit time.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositive {
        field: &'static str,
        value: f32,
    },
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    TooFewRays {
        axis: &'static str,
        count: usize,
    },
    NoGroundLayer,
    MissingCollaborator(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "'{}' must be greater than zero (got {})", field, value)
            }
            ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(
                f,
                "'{}' must be within [{}, {}] (got {})",
                field, min, max, value
            ),
            ConfigError::TooFewRays { axis, count } => write!(
                f,
                "at least 2 {} collision rays are required (got {})",
                axis, count
            ),
            ConfigError::NoGroundLayer => write!(f, "no ground collision layer configured"),
            ConfigError::MissingCollaborator(name) => {
                write!(f, "required collaborator missing: {}", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn check_rays(axis: &'static str, count: usize) -> Result<(), ConfigError> {
    if count < 2 {
        return Err(ConfigError::TooFewRays { axis, count });
    }
    check_range(axis, count as f32, 2.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-4 * b.abs().max(1.0)
    }

    #[test]
    fn test_default_jump_constants() {
        let config = MovementConfig::default();
        let derived = config.derived();

        let expected_gravity = -(2.0 * 6.825) / 0.1225;
        assert!(approx(derived.gravity, expected_gravity));
        assert!(approx(derived.initial_jump_velocity, expected_gravity.abs() * 0.35));
        assert!(approx(derived.adjusted_jump_height, 6.825));
    }

    #[test]
    fn test_wall_jump_constants_use_direction_height() {
        let derived = MovementConfig::default().derived;
        let expected_gravity = -(2.0 * 6.5 * 1.05) / 0.1225;
        assert!(approx(derived.wall_jump_gravity, expected_gravity));
        assert!(approx(
            derived.initial_wall_jump_velocity,
            expected_gravity.abs() * 0.35
        ));
    }

    #[test]
    fn test_dash_apex_height_snaps_to_ticks() {
        // 0.11s -> 6 ticks, 0.027s -> 2 ticks at 50 Hz
        let derived = MovementConfig::default().derived;
        assert!(approx(derived.dash_target_apex_height, 40.0 * 0.12 + 0.5 * 40.0 * 0.04));

        let fine = MovementConfig::new(MovementTuning::default(), 0.01).unwrap();
        // 0.11s -> 11 ticks, 0.027s -> 3 ticks at 100 Hz
        assert!(approx(
            fine.derived().dash_target_apex_height,
            40.0 * 0.11 + 0.5 * 40.0 * 0.03
        ));
    }

    #[test]
    fn test_edit_recomputes_derived_values() {
        let mut config = MovementConfig::default();
        let before = *config.derived();

        config.edit(|t| t.jump_height = 8.0).unwrap();

        assert_eq!(config.tuning().jump_height, 8.0);
        assert!(config.derived().gravity < before.gravity);
        assert!(approx(
            config.derived().gravity,
            -(2.0 * 8.0 * 1.05) / 0.1225
        ));
    }

    #[test]
    fn test_rejects_degenerate_apex_time() {
        let tuning = MovementTuning {
            time_till_jump_apex: 0.0,
            ..default()
        };
        assert_eq!(
            MovementConfig::new(tuning, DEFAULT_TICK_LENGTH).unwrap_err(),
            ConfigError::NonPositive {
                field: "time_till_jump_apex",
                value: 0.0
            }
        );

        let negative = MovementTuning {
            time_till_jump_apex: -0.2,
            ..default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_rejects_single_ray() {
        let tuning = MovementTuning {
            vertical_rays: 1,
            ..default()
        };
        assert_eq!(
            tuning.validate().unwrap_err(),
            ConfigError::TooFewRays {
                axis: "vertical",
                count: 1
            }
        );
    }

    #[test]
    fn test_rejected_edit_keeps_previous_values() {
        let mut config = MovementConfig::default();
        let before = config.clone();

        let result = config.edit(|t| {
            t.jump_height = 10.0;
            t.horizontal_rays = 0;
        });

        assert!(result.is_err());
        assert_eq!(config.tuning(), before.tuning());
        assert_eq!(config.derived(), before.derived());
    }

    #[test]
    fn test_rejects_nan_tunable() {
        let tuning = MovementTuning {
            apex_threshold: f32::NAN,
            ..default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::OutOfRange {
                field: "apex_threshold",
                ..
            })
        ));
    }

    #[test]
    fn test_resolver_respects_head_bump_toggle() {
        let mut config = MovementConfig::default();
        assert!(config.resolver().head_bump_probe().is_some());

        config.edit(|t| t.use_head_bump_slide = false).unwrap();
        assert!(config.resolver().head_bump_probe().is_none());
    }
}
