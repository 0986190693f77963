//! Movement domain: jump initiation and the shared jump arc integration.

use bevy::prelude::*;

use super::Frame;
use crate::math::{inverse_lerp, lerp_clamped};
use crate::movement::collision::CollisionFlags;
use crate::movement::config::{DerivedValues, MovementTuning};
use crate::movement::state::{Cut, JumpArc, MovementState, VerticalMode};

/// Apex hang ends by nudging the arc just below zero so descent gravity takes over.
const APEX_EXIT_SPEED: f32 = -0.01;

/// Gravity profile of one arc kind.
pub(super) struct ArcParams {
    pub gravity: f32,
    pub launch_speed: f32,
    pub descent_multiplier: f32,
    pub cut_window: f32,
    pub cut_multiplier: f32,
    pub apex_threshold: f32,
    pub apex_hang_time: f32,
}

impl ArcParams {
    pub fn jump(tuning: &MovementTuning, derived: &DerivedValues) -> Self {
        Self {
            gravity: derived.gravity,
            launch_speed: derived.initial_jump_velocity,
            descent_multiplier: tuning.gravity_on_release_multiplier,
            cut_window: tuning.time_for_upwards_cancel,
            cut_multiplier: tuning.gravity_on_release_multiplier,
            apex_threshold: tuning.apex_threshold,
            apex_hang_time: tuning.apex_hang_time,
        }
    }

    pub fn wall_jump(tuning: &MovementTuning, derived: &DerivedValues) -> Self {
        Self {
            gravity: derived.wall_jump_gravity,
            launch_speed: derived.initial_wall_jump_velocity,
            descent_multiplier: 1.0,
            cut_window: tuning.time_for_upwards_cancel,
            cut_multiplier: tuning.wall_jump_gravity_on_release_multiplier,
            apex_threshold: tuning.apex_threshold,
            apex_hang_time: tuning.apex_hang_time,
        }
    }
}

/// Ramp `release_speed` down to zero across `window`, reaching zero on the
/// tick the window ends, then fall with the scaled gravity.
pub(super) fn advance_cut(cut: &mut Cut, vertical: &mut f32, window: f32, gravity: f32, dt: f32) {
    if cut.elapsed < window {
        *vertical = lerp_clamped(cut.release_speed, 0.0, (cut.elapsed + dt) / window);
    } else {
        *vertical += gravity * dt;
    }
    cut.elapsed += dt;
}

/// Vertical integration for a jump or wall-jump arc.
pub(super) fn integrate_arc(
    arc: &mut JumpArc,
    vertical: &mut f32,
    params: &ArcParams,
    collisions: &CollisionFlags,
    sliding: bool,
    slide_finished: bool,
    dt: f32,
) {
    if sliding {
        *vertical = 0.0;
        return;
    }
    if arc.fresh {
        arc.fresh = false;
        return;
    }
    if slide_finished {
        return;
    }

    // Ceiling with nowhere to slide: stop dead and fall.
    if collisions.bumped_head() && !collisions.can_head_bump_slide() {
        *vertical = 0.0;
        arc.apex_hang = None;
        arc.cut.get_or_insert(Cut::from_release(0.0)).release_speed = 0.0;
    }

    if let Some(cut) = arc.cut.as_mut() {
        advance_cut(
            cut,
            vertical,
            params.cut_window,
            params.gravity * params.cut_multiplier,
            dt,
        );
        return;
    }

    if *vertical >= 0.0 {
        let apex = inverse_lerp(params.launch_speed, 0.0, *vertical);
        if apex > params.apex_threshold {
            let hang = arc.apex_hang.get_or_insert(0.0);
            *hang += dt;
            *vertical = if *hang < params.apex_hang_time {
                0.0
            } else {
                APEX_EXIT_SPEED
            };
        } else {
            arc.apex_hang = None;
            *vertical += params.gravity * dt;
        }
    } else {
        *vertical += params.gravity * params.descent_multiplier * dt;
    }
}

impl MovementState {
    pub(super) fn jump_checks(&mut self, frame: &Frame) {
        let tuning = frame.tuning;
        let grounded = self.is_grounded();
        let touching_wall = self.collisions.is_touching_wall(self.facing_right);

        if frame.input.jump_pressed {
            let wall_claims = match self.mode {
                VerticalMode::WallSliding { .. } => true,
                VerticalMode::WallSlideFalling { .. } if self.timers.wall_jump_post_buffer >= 0.0 => {
                    true
                }
                _ => touching_wall && !grounded,
            };
            if wall_claims {
                return;
            }

            self.timers.jump_buffer = tuning.jump_buffer_time;
            self.timers.jump_released_during_buffer = false;
        }

        if frame.input.jump_released {
            if self.timers.jump_buffer > 0.0 {
                self.timers.jump_released_during_buffer = true;
            }

            if let VerticalMode::Jumping(arc) = &mut self.mode
                && self.velocity.y > 0.0
            {
                arc.release(&mut self.velocity.y, tuning.time_for_upwards_cancel);
            }
        }

        if self.timers.jump_buffer <= 0.0 {
            return;
        }

        let air_jump_left = self.air_jumps_used < tuning.air_jumps_allowed;

        if !self.mode.is_jumping() && (grounded || self.timers.coyote > 0.0) {
            self.initiate_jump(0, frame);
            if self.timers.jump_released_during_buffer
                && let VerticalMode::Jumping(arc) = &mut self.mode
            {
                arc.cut = Some(Cut::from_release(self.velocity.y));
            }
            debug!("Ground jump: vy={:.3}", self.velocity.y);
            return;
        }

        if grounded || !air_jump_left {
            return;
        }

        let chains_from_air = match self.mode {
            VerticalMode::Jumping(_)
            | VerticalMode::WallJumping { .. }
            | VerticalMode::WallSlideFalling { .. }
            | VerticalMode::DashFastFalling(_) => !touching_wall,
            _ => self.is_air_dashing() && !touching_wall,
        };

        if chains_from_air || self.mode == VerticalMode::Falling {
            self.initiate_jump(1, frame);
            debug!("Air jump: air_jumps_used={}", self.air_jumps_used);
        }
    }

    fn initiate_jump(&mut self, air_jumps: u32, frame: &Frame) {
        self.mode = VerticalMode::Jumping(JumpArc::launch(frame.position_y));
        self.timers.jump_buffer = 0.0;
        self.air_jumps_used += air_jumps;
        self.velocity.y = frame.derived.initial_jump_velocity;
    }

    pub(super) fn jump_physics(&mut self, frame: &Frame, slide_finished: bool) {
        let sliding = self.head_bump.is_some();
        let VerticalMode::Jumping(arc) = &mut self.mode else {
            return;
        };

        integrate_arc(
            arc,
            &mut self.velocity.y,
            &ArcParams::jump(frame.tuning, frame.derived),
            &self.collisions,
            sliding,
            slide_finished,
            frame.dt,
        );
    }
}
