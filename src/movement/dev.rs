//! Movement domain: debug overlay of the probe box and contact flags.

use bevy::prelude::*;

use crate::movement::{ActorBody, COLLISION_PADDING, MovementState, Player};

const CONTACT: Color = Color::srgb(1.0, 0.3, 0.2);
const SLIDE: Color = Color::srgb(0.2, 0.8, 1.0);

pub(crate) fn draw_collision_overlay(
    mut gizmos: Gizmos,
    query: Query<(&Transform, &ActorBody, &MovementState), With<Player>>,
) {
    for (transform, body, state) in &query {
        let center = transform.translation.truncate();
        let bounds = Rect::from_center_size(center, body.size);
        let inner = bounds.inflate(-COLLISION_PADDING);
        let flags = state.collisions;

        gizmos.rect_2d(center, inner.size(), Color::srgb(0.9, 0.9, 0.2));

        if flags.below {
            gizmos.line_2d(bounds.min, Vec2::new(bounds.max.x, bounds.min.y), CONTACT);
        }
        if flags.above {
            gizmos.line_2d(Vec2::new(bounds.min.x, bounds.max.y), bounds.max, CONTACT);
        }
        if flags.left {
            gizmos.line_2d(bounds.min, Vec2::new(bounds.min.x, bounds.max.y), CONTACT);
        }
        if flags.right {
            gizmos.line_2d(Vec2::new(bounds.max.x, bounds.min.y), bounds.max, CONTACT);
        }

        if flags.slide_direction != 0 {
            let top = Vec2::new(center.x, bounds.max.y);
            let arrow = Vec2::X * f32::from(flags.slide_direction) * body.size.x;
            gizmos.arrow_2d(top, top + arrow, SLIDE);
        }
    }
}
