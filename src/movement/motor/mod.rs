//! Movement domain: the fixed-tick motor.
//!
//! One call to [`MovementState::tick`] runs the checks in a fixed order
//! (timers, jump, land, wall jump, wall slide, dash), then the velocity
//! contributions (horizontal, head-bump slide, jump, wall slide, wall jump,
//! dash, fall), clamps, resolves against the ground exactly once and signals
//! the camera. Checks read the collision flags from the previous tick.

mod dash;
mod head_bump;
mod jump;
mod wall;

use bevy::prelude::*;

use crate::math::{lerp_clamped, sign_or_zero};
use crate::movement::collision::{CollisionFlags, GroundCaster};
use crate::movement::config::{DerivedValues, MovementConfig, MovementTuning};
use crate::movement::input::InputSnapshot;
use crate::movement::reactor::CameraReactor;
use crate::movement::state::{MovementState, VerticalMode};

/// Upper bound on vertical speed outside a dash.
pub const MAX_RISE_SPEED: f32 = 50.0;
/// Symmetric vertical speed bound while dashing.
pub const DASH_VERTICAL_LIMIT: f32 = 7.0;
/// Vertical speed applied every grounded tick so the floor probe keeps contact.
pub const GROUNDED_STICK_SPEED: f32 = -2.0;

/// Collaborators for one tick.
pub struct TickContext<'a> {
    pub config: &'a MovementConfig,
    pub ground: &'a dyn GroundCaster,
    pub camera: &'a mut dyn CameraReactor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Resolved displacement for this tick; the caller integrates it.
    pub displacement: Vec2,
    pub collisions: CollisionFlags,
}

/// Read-only view of everything the phases need besides the state itself.
struct Frame<'a> {
    input: &'a InputSnapshot,
    tuning: &'a MovementTuning,
    derived: &'a DerivedValues,
    dt: f32,
    position_y: f32,
}

impl MovementState {
    /// Advance one fixed tick. `bounds` is the actor's box before moving.
    pub fn tick(
        &mut self,
        input: &InputSnapshot,
        bounds: Rect,
        ctx: &mut TickContext<'_>,
    ) -> TickReport {
        let config = ctx.config;
        let frame = Frame {
            input,
            tuning: config.tuning(),
            derived: config.derived(),
            dt: config.tick_length(),
            position_y: bounds.center().y,
        };

        self.count_timers(&frame);

        self.jump_checks(&frame);
        self.land_check();
        self.wall_jump_check(&frame);
        self.wall_slide_check(&frame);
        self.dash_check(&frame, &mut *ctx.camera);

        self.horizontal_movement(&frame, &mut *ctx.camera);
        let slide_finished = self.head_bump_slide(&frame);
        self.jump_physics(&frame, slide_finished);
        self.wall_slide_physics(&frame);
        self.wall_jump_physics(&frame, slide_finished);
        self.dash_physics(&frame, slide_finished);
        self.fall(&frame);

        self.clamp_velocity(frame.tuning);

        let resolver = config.resolver();
        let (displacement, collisions) =
            resolver.resolve(ctx.ground, bounds, self.velocity * frame.dt);
        self.collisions = collisions;

        self.signal_falling_damping(&mut *ctx.camera);

        TickReport {
            displacement,
            collisions,
        }
    }

    fn count_timers(&mut self, frame: &Frame) {
        let grounded = self.is_grounded();
        let timers = &mut self.timers;

        timers.jump_buffer -= frame.dt;

        if grounded {
            timers.coyote = frame.tuning.jump_coyote_time;
            timers.dash_on_ground -= frame.dt;
        } else {
            timers.coyote -= frame.dt;
        }

        timers.wall_jump_post_buffer -= frame.dt;
        timers.dash_buffer -= frame.dt;
    }

    fn land_check(&mut self) {
        if !self.is_grounded() {
            return;
        }

        let airborne_mode = self.mode != VerticalMode::Idle || self.head_bump.is_some();
        if airborne_mode && self.velocity.y <= 0.0 {
            debug!(
                "Landed: air_jumps_used={}, dashes_used={}",
                self.air_jumps_used, self.dashes_used
            );
            self.mode = VerticalMode::Idle;
            self.head_bump = None;
            self.air_jumps_used = 0;
            self.dashes_used = 0;
            self.timers.dash_on_ground = -0.01;
        }

        if self.velocity.y <= 0.0 {
            self.velocity.y = GROUNDED_STICK_SPEED;
        }
    }

    /// Flip facing when the axis points the other way.
    fn turn_check(&mut self, axis_x: f32, camera: &mut dyn CameraReactor) {
        let turn_right = if self.facing_right && axis_x < 0.0 {
            false
        } else if !self.facing_right && axis_x > 0.0 {
            true
        } else {
            return;
        };

        self.facing_right = turn_right;
        camera.trigger_turn(turn_right);
    }

    fn horizontal_movement(&mut self, frame: &Frame, camera: &mut dyn CameraReactor) {
        if self.head_bump.is_some() || self.dash.is_some() {
            return;
        }

        let axis = frame.input.move_axis;
        self.turn_check(axis.x, camera);

        let grounded = self.is_grounded();
        let tuning = frame.tuning;
        let (acceleration, deceleration) = match self.mode {
            VerticalMode::WallJumping { elapsed, .. } if elapsed < tuning.time_till_jump_apex => (
                tuning.wall_jump_move_acceleration,
                tuning.wall_jump_move_deceleration,
            ),
            _ if grounded => (tuning.ground_acceleration, tuning.ground_deceleration),
            _ => (tuning.air_acceleration, tuning.air_deceleration),
        };

        let has_horizontal = sign_or_zero(axis.x) != 0.0;
        let has_vertical = sign_or_zero(axis.y) != 0.0;

        if has_horizontal || (!grounded && has_vertical) {
            let cap = if frame.input.sprint_held {
                tuning.max_sprint_speed
            } else {
                tuning.max_walk_speed
            };
            let target = sign_or_zero(axis.x) * cap;
            self.velocity.x = lerp_clamped(self.velocity.x, target, acceleration * frame.dt);
        } else {
            self.velocity.x = lerp_clamped(self.velocity.x, 0.0, deceleration * frame.dt);
        }
    }

    fn fall(&mut self, frame: &Frame) {
        if self.is_grounded() || self.dash.is_some() {
            return;
        }

        match self.mode {
            VerticalMode::Idle | VerticalMode::Falling => {
                self.mode = VerticalMode::Falling;
            }
            VerticalMode::WallSlideFalling { .. } => {}
            _ => return,
        }

        self.velocity.y += frame.derived.gravity * frame.dt;
    }

    fn clamp_velocity(&mut self, tuning: &MovementTuning) {
        self.velocity.y = if self.dash.is_some() {
            self.velocity.y.clamp(-DASH_VERTICAL_LIMIT, DASH_VERTICAL_LIMIT)
        } else {
            self.velocity.y.clamp(-tuning.max_fall_speed, MAX_RISE_SPEED)
        };
    }

    fn signal_falling_damping(&self, camera: &mut dyn CameraReactor) {
        let vertical = self.velocity.y;

        if vertical < camera.fall_speed_threshold()
            && !camera.is_damping_in_flight()
            && !camera.is_falling_latched()
        {
            camera.set_falling_damping(true);
        }

        if vertical >= 0.0 && !camera.is_damping_in_flight() && camera.is_falling_latched() {
            camera.clear_falling_latch();
            camera.set_falling_damping(false);
        }
    }
}
