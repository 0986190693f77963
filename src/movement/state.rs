//! Movement domain: per-actor state owned by the motor.

use bevy::prelude::*;

use crate::movement::collision::CollisionFlags;

/// Upward-speed cut in progress. `elapsed` starts at zero on release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cut {
    pub elapsed: f32,
    pub release_speed: f32,
}

impl Cut {
    pub fn from_release(release_speed: f32) -> Self {
        Self {
            elapsed: 0.0,
            release_speed,
        }
    }

    /// A cut whose ramp is already over; only the release gravity remains.
    pub fn expired(window: f32) -> Self {
        Self {
            elapsed: window,
            release_speed: 0.0,
        }
    }
}

/// Ballistic arc shared by ground jumps, air jumps and wall jumps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpArc {
    pub launch_y: f32,
    /// Time spent past the apex threshold, while hanging.
    pub apex_hang: Option<f32>,
    pub cut: Option<Cut>,
    /// Set on the launch tick, which holds the launch velocity.
    pub fresh: bool,
}

impl JumpArc {
    pub fn launch(launch_y: f32) -> Self {
        Self {
            launch_y,
            apex_hang: None,
            cut: None,
            fresh: true,
        }
    }

    /// Start the cut on jump release. Past the apex threshold the arc drops
    /// straight to release gravity.
    pub fn release(&mut self, vertical_velocity: &mut f32, window: f32) {
        if self.apex_hang.take().is_some() {
            self.cut = Some(Cut::expired(window));
            *vertical_velocity = 0.0;
        } else {
            self.cut = Some(Cut::from_release(*vertical_velocity));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum VerticalMode {
    #[default]
    Idle,
    Falling,
    Jumping(JumpArc),
    WallSliding {
        wall_side: i8,
    },
    WallSlideFalling {
        wall_side: i8,
    },
    WallJumping {
        arc: JumpArc,
        elapsed: f32,
    },
    DashFastFalling(Cut),
}

impl VerticalMode {
    pub fn is_jumping(&self) -> bool {
        matches!(self, VerticalMode::Jumping(_))
    }

    pub fn is_wall_jumping(&self) -> bool {
        matches!(self, VerticalMode::WallJumping { .. })
    }

    pub fn is_wall_sliding(&self) -> bool {
        matches!(self, VerticalMode::WallSliding { .. })
    }

    pub fn has_arc(&self) -> bool {
        self.is_jumping() || self.is_wall_jumping()
    }

    pub fn arc(&self) -> Option<&JumpArc> {
        match self {
            VerticalMode::Jumping(arc) | VerticalMode::WallJumping { arc, .. } => Some(arc),
            _ => None,
        }
    }

    /// Wall side remembered by a slide, if any.
    pub fn remembered_wall_side(&self) -> Option<i8> {
        match self {
            VerticalMode::WallSliding { wall_side }
            | VerticalMode::WallSlideFalling { wall_side } => Some(*wall_side),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDash {
    pub direction: Vec2,
    pub elapsed: f32,
    pub airborne: bool,
    pub launch_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadBumpSlide {
    pub direction: i8,
    /// Height the actor is relaunched toward when the slide ends.
    pub target_apex_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementTimers {
    pub jump_buffer: f32,
    pub jump_released_during_buffer: bool,
    pub coyote: f32,
    pub wall_jump_post_buffer: f32,
    pub dash_on_ground: f32,
    pub dash_buffer: f32,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct MovementState {
    pub facing_right: bool,
    pub velocity: Vec2,
    /// Flags from the most recent resolve; checks read these one tick late.
    pub collisions: CollisionFlags,
    pub mode: VerticalMode,
    pub dash: Option<ActiveDash>,
    pub head_bump: Option<HeadBumpSlide>,
    pub air_jumps_used: u32,
    pub dashes_used: u32,
    pub timers: MovementTimers,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            facing_right: true,
            velocity: Vec2::ZERO,
            collisions: CollisionFlags::default(),
            mode: VerticalMode::Idle,
            dash: None,
            head_bump: None,
            air_jumps_used: 0,
            dashes_used: 0,
            timers: MovementTimers::default(),
        }
    }
}

impl MovementState {
    pub fn is_grounded(&self) -> bool {
        self.collisions.is_grounded()
    }

    pub fn is_dashing(&self) -> bool {
        self.dash.is_some()
    }

    pub fn is_air_dashing(&self) -> bool {
        self.dash.is_some_and(|dash| dash.airborne)
    }
}
