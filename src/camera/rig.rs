//! Camera domain: tick-driven tweens for turn yaw and vertical damping.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::math::lerp_clamped;
use crate::movement::CameraReactor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Vertical damping while falling fast (seconds of lag).
    pub fall_pan_amount: f32,
    pub fall_y_pan_time: f32,
    pub fall_speed_damping_threshold: f32,
    pub normal_y_damping: f32,
    pub flip_rotation_time: f32,
    /// Horizontal lead in world units at full yaw.
    pub look_ahead: f32,
    /// World units per screen pixel.
    pub projection_scale: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            fall_pan_amount: 0.25,
            fall_y_pan_time: 0.35,
            fall_speed_damping_threshold: -15.0,
            normal_y_damping: 1.0,
            flip_rotation_time: 0.5,
            look_ahead: 3.0,
            projection_scale: 1.0 / 32.0,
        }
    }
}

/// A bounded interpolation advanced by explicit ticks. Restarting replaces
/// whatever was in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

impl Tween {
    /// A finished tween resting at `value`.
    pub fn settled(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            elapsed: 0.0,
            duration: 0.0,
        }
    }

    pub fn restart(&mut self, to: f32, duration: f32) {
        *self = Self {
            from: self.value(),
            to,
            elapsed: 0.0,
            duration: duration.max(0.0),
        };
    }

    pub fn advance(&mut self, dt: f32) {
        if self.in_flight() {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
    }

    pub fn value(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        lerp_clamped(self.from, self.to, self.elapsed / self.duration)
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn in_flight(&self) -> bool {
        self.elapsed < self.duration
    }
}

/// Follow-camera state the player motor signals into.
#[derive(Resource, Debug, Clone)]
pub struct CameraRig {
    tuning: CameraTuning,
    /// Degrees; 0 facing right, 180 facing left.
    yaw: Tween,
    y_damping: Tween,
    falling_latched: bool,
}

impl CameraRig {
    pub fn new(tuning: CameraTuning) -> Self {
        Self {
            yaw: Tween::settled(0.0),
            y_damping: Tween::settled(tuning.normal_y_damping),
            falling_latched: false,
            tuning,
        }
    }

    pub fn tuning(&self) -> &CameraTuning {
        &self.tuning
    }

    /// Swap tunables without interrupting the current blends.
    pub fn set_tuning(&mut self, tuning: CameraTuning) {
        self.tuning = tuning;
    }

    pub fn advance(&mut self, dt: f32) {
        self.yaw.advance(dt);
        self.y_damping.advance(dt);
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.yaw.value()
    }

    /// Horizontal lead: +look_ahead facing right, -look_ahead facing left.
    pub fn look_ahead_offset(&self) -> f32 {
        self.yaw_degrees().to_radians().cos() * self.tuning.look_ahead
    }

    pub fn y_damping(&self) -> f32 {
        self.y_damping.value()
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(CameraTuning::default())
    }
}

impl CameraReactor for CameraRig {
    fn trigger_turn(&mut self, facing_right: bool) {
        let target = if facing_right { 0.0 } else { 180.0 };
        self.yaw.restart(target, self.tuning.flip_rotation_time);
    }

    fn set_falling_damping(&mut self, falling: bool) {
        let target = if falling {
            self.falling_latched = true;
            self.tuning.fall_pan_amount
        } else {
            self.tuning.normal_y_damping
        };
        self.y_damping.restart(target, self.tuning.fall_y_pan_time);
        debug!("Camera y damping -> {} (falling={})", target, falling);
    }

    fn is_damping_in_flight(&self) -> bool {
        self.y_damping.in_flight()
    }

    fn is_falling_latched(&self) -> bool {
        self.falling_latched
    }

    fn clear_falling_latch(&mut self) {
        self.falling_latched = false;
    }

    fn fall_speed_threshold(&self) -> f32 {
        self.tuning.fall_speed_damping_threshold
    }
}
