//! Movement domain: dash start, the dash itself, and the dash cut.

use bevy::prelude::*;

use super::Frame;
use super::jump::advance_cut;
use crate::movement::dash::select_dash_direction;
use crate::movement::reactor::CameraReactor;
use crate::movement::state::{ActiveDash, Cut, MovementState, VerticalMode};

/// Keeps the floor probe in contact during a flat ground dash.
const GROUND_DASH_GLUE_SPEED: f32 = -0.001;

impl MovementState {
    pub(super) fn dash_check(&mut self, frame: &Frame, camera: &mut dyn CameraReactor) {
        if frame.input.dash_pressed {
            self.timers.dash_buffer = frame.tuning.dash_buffer_time;
        }

        if self.timers.dash_buffer <= 0.0 || self.dash.is_some() {
            return;
        }

        if self.is_grounded() {
            if self.timers.dash_on_ground < 0.0 {
                self.start_dash(false, frame, camera);
            }
        } else if self.dashes_used < frame.tuning.dashes_allowed {
            self.start_dash(true, frame, camera);
        }
    }

    fn start_dash(&mut self, airborne: bool, frame: &Frame, camera: &mut dyn CameraReactor) {
        let axis = frame.input.move_axis;
        self.turn_check(axis.x, camera);

        let direction = select_dash_direction(
            axis,
            self.facing_right,
            self.is_grounded(),
            frame.tuning.dash_diagonal_bias,
        );

        self.dash = Some(ActiveDash {
            direction,
            elapsed: 0.0,
            airborne,
            launch_y: frame.position_y,
        });
        self.dashes_used += 1;
        self.timers.dash_on_ground = frame.tuning.time_between_dashes_on_ground;
        self.timers.dash_buffer = 0.0;
        self.mode = VerticalMode::Idle;
        // Drop any pending head-bump slide.
        self.head_bump = None;

        debug!(
            "Dash started: direction={:?}, airborne={}, dashes_used={}",
            direction, airborne, self.dashes_used
        );
    }

    pub(super) fn dash_physics(&mut self, frame: &Frame, slide_finished: bool) {
        if slide_finished {
            return;
        }

        let Some(mut dash) = self.dash else {
            self.dash_fast_fall(frame);
            return;
        };

        if self.head_bump.is_some() {
            // Frozen while sliding along the ceiling.
            self.velocity.y = 0.0;
            return;
        }

        if self.collisions.bumped_head() && !self.collisions.can_head_bump_slide() {
            self.velocity.y = 0.0;
            self.dash = None;
            debug!("Dash cancelled by ceiling");
            return;
        }

        let tuning = frame.tuning;
        dash.elapsed += frame.dt;

        if dash.elapsed >= tuning.dash_time {
            self.dash = None;
            let grounded = self.is_grounded();
            if grounded {
                self.dashes_used = 0;
            } else if !self.mode.has_arc() {
                self.mode = VerticalMode::DashFastFalling(Cut::from_release(self.velocity.y));
            }
            debug!("Dash ended: grounded={}, mode={:?}", grounded, self.mode);
            return;
        }

        self.velocity.x = tuning.dash_speed * dash.direction.x;
        if dash.direction.y != 0.0 || dash.airborne {
            self.velocity.y = tuning.dash_speed * dash.direction.y;
        } else if !self.mode.has_arc() {
            self.velocity.y = GROUND_DASH_GLUE_SPEED;
        }

        self.dash = Some(dash);
    }

    /// Post-dash cut: ramps any leftover upward speed to zero, then falls.
    fn dash_fast_fall(&mut self, frame: &Frame) {
        let VerticalMode::DashFastFalling(cut) = &mut self.mode else {
            return;
        };

        let tuning = frame.tuning;
        let gravity = frame.derived.gravity * tuning.dash_gravity_on_release_multiplier;

        if self.velocity.y > 0.0 {
            advance_cut(
                cut,
                &mut self.velocity.y,
                tuning.dash_time_for_upwards_cancel,
                gravity,
                frame.dt,
            );
        } else {
            self.velocity.y += gravity * frame.dt;
        }
    }
}
