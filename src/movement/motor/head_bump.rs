//! Movement domain: sliding off a ceiling corner.

use bevy::prelude::*;

use super::Frame;
use crate::movement::state::{HeadBumpSlide, MovementState};

impl MovementState {
    /// Enter, hold or leave the head-bump slide. Returns true on the tick the
    /// slide ends, which skips arc gravity and dash physics.
    pub(super) fn head_bump_slide(&mut self, frame: &Frame) -> bool {
        let flags = self.collisions;

        if self.head_bump.is_none() && flags.can_head_bump_slide() {
            let target_apex_y = if let Some(dash) = self.dash {
                Some(dash.launch_y + frame.derived.dash_target_apex_height)
            } else {
                self.mode
                    .arc()
                    .map(|arc| arc.launch_y + frame.derived.head_bump_recovery_height)
            };

            if let Some(target_apex_y) = target_apex_y {
                self.head_bump = Some(HeadBumpSlide {
                    direction: flags.slide_direction,
                    target_apex_y,
                });
                debug!("Head bump slide toward {}", flags.slide_direction);
            }
        }

        let Some(slide) = self.head_bump else {
            return false;
        };

        self.velocity.y = 0.0;

        if flags.can_head_bump_slide() {
            self.velocity.x = f32::from(slide.direction) * frame.tuning.head_bump_slide_speed;
            return false;
        }

        let remaining = (slide.target_apex_y - frame.position_y).max(0.0);
        self.head_bump = None;
        self.velocity.x = 0.0;
        self.velocity.y = (2.0 * frame.derived.gravity.abs() * remaining).sqrt();
        debug!("Head bump slide cleared: relaunch vy={:.3}", self.velocity.y);
        true
    }
}
