//! Movement domain: the camera hooks the motor drives.

/// Camera behaviour the motor signals into. Implemented by the camera rig in
/// the app and by recording fakes in tests.
pub trait CameraReactor {
    /// Facing changed; `facing_right` is the new facing.
    fn trigger_turn(&mut self, facing_right: bool);

    /// Start blending vertical damping toward the falling (`true`) or the
    /// normal (`false`) value. Restarts any blend in flight.
    fn set_falling_damping(&mut self, falling: bool);

    fn is_damping_in_flight(&self) -> bool;

    /// Set once a falling blend starts, cleared by [`Self::clear_falling_latch`].
    fn is_falling_latched(&self) -> bool;

    fn clear_falling_latch(&mut self);

    /// Vertical speed below which the falling blend kicks in. Negative.
    fn fall_speed_threshold(&self) -> f32;
}

/// Reactor that ignores every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReactor;

impl CameraReactor for NullReactor {
    fn trigger_turn(&mut self, _facing_right: bool) {}

    fn set_falling_damping(&mut self, _falling: bool) {}

    fn is_damping_in_flight(&self) -> bool {
        false
    }

    fn is_falling_latched(&self) -> bool {
        false
    }

    fn clear_falling_latch(&mut self) {}

    fn fall_speed_threshold(&self) -> f32 {
        f32::NEG_INFINITY
    }
}
