//! Movement domain: wall slide and wall jump.

use bevy::prelude::*;

use super::Frame;
use super::jump::{ArcParams, integrate_arc};
use crate::math::lerp_clamped;
use crate::movement::state::{JumpArc, MovementState, VerticalMode};

impl MovementState {
    pub(super) fn wall_jump_check(&mut self, frame: &Frame) {
        let grounded = self.is_grounded();
        let touching_wall = self.collisions.is_touching_wall(self.facing_right);

        if !grounded && (touching_wall || self.mode.is_wall_sliding()) {
            self.timers.wall_jump_post_buffer = frame.tuning.wall_jump_post_buffer_time;
        }

        if frame.input.jump_released
            && !touching_wall
            && self.velocity.y > 0.0
            && let VerticalMode::WallJumping { arc, .. } = &mut self.mode
        {
            arc.release(&mut self.velocity.y, frame.tuning.time_for_upwards_cancel);
        }

        if frame.input.jump_pressed && self.timers.wall_jump_post_buffer > 0.0 && !grounded {
            self.initiate_wall_jump(frame);
        }
    }

    /// Side of the wall being jumped off: current contact, then the side a
    /// slide remembered, then the facing direction.
    fn wall_jump_side(&self) -> i8 {
        match self.collisions.wall_direction() {
            0 => self
                .mode
                .remembered_wall_side()
                .filter(|side| *side != 0)
                .unwrap_or(if self.facing_right { 1 } else { -1 }),
            side => side,
        }
    }

    fn initiate_wall_jump(&mut self, frame: &Frame) {
        let wall_side = self.wall_jump_side();
        let push = frame.tuning.wall_jump_direction().x.abs();

        self.mode = VerticalMode::WallJumping {
            arc: JumpArc::launch(frame.position_y),
            elapsed: 0.0,
        };
        self.velocity.y = frame.derived.initial_wall_jump_velocity;
        self.velocity.x = push * -f32::from(wall_side);
        self.timers.wall_jump_post_buffer = 0.0;

        debug!("Wall jump off side {}: v={:?}", wall_side, self.velocity);
    }

    pub(super) fn wall_slide_check(&mut self, frame: &Frame) {
        let tuning = frame.tuning;
        let grounded = self.is_grounded();
        let touching_wall = self.collisions.is_touching_wall(self.facing_right);

        if touching_wall && !grounded && self.dash.is_none() {
            if self.velocity.y < 0.0 && !self.mode.is_wall_sliding() {
                let wall_side = if self.facing_right { 1 } else { -1 };
                self.mode = VerticalMode::WallSliding { wall_side };

                if tuning.reset_dash_on_wall_slide {
                    self.dashes_used = 0;
                }
                if tuning.reset_jumps_on_wall_slide {
                    self.air_jumps_used = 0;
                }
                debug!("Wall slide started on side {}", wall_side);
            }
        } else if let VerticalMode::WallSliding { wall_side } = self.mode {
            self.mode = if !touching_wall && !grounded {
                VerticalMode::WallSlideFalling { wall_side }
            } else {
                VerticalMode::Idle
            };
            debug!("Wall slide ended: mode={:?}", self.mode);
        }
    }

    pub(super) fn wall_slide_physics(&mut self, frame: &Frame) {
        if self.mode.is_wall_sliding() {
            self.velocity.y = lerp_clamped(
                self.velocity.y,
                -frame.tuning.wall_slide_speed,
                frame.tuning.wall_slide_deceleration * frame.dt,
            );
        }
    }

    pub(super) fn wall_jump_physics(&mut self, frame: &Frame, slide_finished: bool) {
        let sliding = self.head_bump.is_some();
        let VerticalMode::WallJumping { arc, elapsed } = &mut self.mode else {
            return;
        };

        *elapsed += frame.dt;
        integrate_arc(
            arc,
            &mut self.velocity.y,
            &ArcParams::wall_jump(frame.tuning, frame.derived),
            &self.collisions,
            sliding,
            slide_finished,
            frame.dt,
        );
    }
}
