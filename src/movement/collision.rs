//! Movement domain: multi-ray collision resolution against the ground layer.

use bevy::prelude::*;

use crate::math::sign_or_positive;

/// Skin kept between the probe origins and the actor's bounding box.
pub const COLLISION_PADDING: f32 = 0.015;

/// Result of a single ray query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub point: Vec2,
}

/// Ray and box casts against static level geometry.
///
/// Hits at exactly `max_distance` count as hits. A cast that starts inside a
/// solid reports distance zero.
pub trait GroundCaster {
    fn cast_ray(&self, origin: Vec2, direction: Dir2, max_distance: f32) -> Option<RayHit>;

    fn cast_box(&self, center: Vec2, size: Vec2, direction: Dir2, max_distance: f32)
    -> Option<f32>;
}

/// Directional contact state produced by one resolve call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionFlags {
    pub above: bool,
    pub below: bool,
    pub left: bool,
    pub right: bool,
    pub ceiling_center: bool,
    pub both_corners: bool,
    /// `+1` slide right, `-1` slide left, `0` no slide.
    pub slide_direction: i8,
}

impl CollisionFlags {
    pub fn is_grounded(&self) -> bool {
        self.below
    }

    pub fn bumped_head(&self) -> bool {
        self.above
    }

    pub fn is_touching_wall(&self, facing_right: bool) -> bool {
        (facing_right && self.right) || (!facing_right && self.left)
    }

    /// Side of the wall in contact, left taking priority.
    pub fn wall_direction(&self) -> i8 {
        if self.left {
            -1
        } else if self.right {
            1
        } else {
            0
        }
    }

    pub fn can_head_bump_slide(&self) -> bool {
        self.above && !self.ceiling_center && !self.both_corners && self.slide_direction != 0
    }
}

/// Corners of the padding-shrunk bounding box, rebuilt on every resolve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastCorners {
    pub top_left: Vec2,
    pub top_right: Vec2,
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
}

impl RaycastCorners {
    pub fn from_bounds(bounds: Rect) -> Self {
        let inner = bounds.inflate(-COLLISION_PADDING);
        Self {
            top_left: Vec2::new(inner.min.x, inner.max.y),
            top_right: inner.max,
            bottom_left: inner.min,
            bottom_right: Vec2::new(inner.max.x, inner.min.y),
        }
    }

    fn width(&self) -> f32 {
        self.bottom_right.x - self.bottom_left.x
    }

    fn height(&self) -> f32 {
        self.top_left.y - self.bottom_left.y
    }
}

/// Ceiling probe used to tell a corner clip apart from a centred hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadBumpProbe {
    /// Box width as a fraction of the actor's width.
    pub width_fraction: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollisionResolver {
    horizontal_rays: usize,
    vertical_rays: usize,
    head_bump: Option<HeadBumpProbe>,
}

impl CollisionResolver {
    /// Ray counts below 2 are raised to 2; validated configs never hit that.
    pub fn new(horizontal_rays: usize, vertical_rays: usize, head_bump: Option<HeadBumpProbe>) -> Self {
        Self {
            horizontal_rays: horizontal_rays.max(2),
            vertical_rays: vertical_rays.max(2),
            head_bump,
        }
    }

    pub fn head_bump_probe(&self) -> Option<HeadBumpProbe> {
        self.head_bump
    }

    /// Trim `displacement` so the box stops at the ground layer and report
    /// which sides made contact. `bounds` is the box before moving.
    pub fn resolve(
        &self,
        ground: &dyn GroundCaster,
        bounds: Rect,
        displacement: Vec2,
    ) -> (Vec2, CollisionFlags) {
        let corners = RaycastCorners::from_bounds(bounds);
        let mut flags = CollisionFlags::default();
        let mut displacement = displacement;

        flags.ceiling_center = self.ceiling_box_hit(ground, bounds, displacement);
        self.resolve_horizontal(ground, &corners, &mut displacement, &mut flags);
        self.resolve_vertical(ground, &corners, &mut displacement, &mut flags);

        if flags.both_corners || flags.ceiling_center {
            flags.slide_direction = 0;
        }

        (displacement, flags)
    }

    fn ceiling_box_hit(&self, ground: &dyn GroundCaster, bounds: Rect, displacement: Vec2) -> bool {
        let Some(probe) = self.head_bump else {
            return false;
        };
        if displacement.y < 0.0 {
            return false;
        }

        let size = Vec2::new(bounds.width() * probe.width_fraction, probe.height);
        let center = Vec2::new(bounds.center().x + displacement.x, bounds.max.y);
        let distance = displacement.y.abs() + COLLISION_PADDING;

        ground.cast_box(center, size, Dir2::Y, distance).is_some()
    }

    fn resolve_horizontal(
        &self,
        ground: &dyn GroundCaster,
        corners: &RaycastCorners,
        displacement: &mut Vec2,
        flags: &mut CollisionFlags,
    ) {
        let direction = sign_or_positive(displacement.x);
        let ray_dir = if direction < 0.0 { Dir2::NEG_X } else { Dir2::X };
        let spacing = corners.height() / (self.horizontal_rays - 1) as f32;
        let mut ray_length = displacement.x.abs() + COLLISION_PADDING;

        let base = if direction < 0.0 {
            corners.bottom_left
        } else {
            corners.bottom_right
        };

        for i in 0..self.horizontal_rays {
            let origin = base + Vec2::Y * (spacing * i as f32);
            let Some(hit) = ground.cast_ray(origin, ray_dir, ray_length) else {
                continue;
            };

            displacement.x = (hit.distance - COLLISION_PADDING) * direction;
            ray_length = hit.distance;

            if direction < 0.0 {
                flags.left = true;
            } else {
                flags.right = true;
            }
        }
    }

    fn resolve_vertical(
        &self,
        ground: &dyn GroundCaster,
        corners: &RaycastCorners,
        displacement: &mut Vec2,
        flags: &mut CollisionFlags,
    ) {
        let direction = sign_or_positive(displacement.y);
        let ray_dir = if direction < 0.0 { Dir2::NEG_Y } else { Dir2::Y };
        let spacing = corners.width() / (self.vertical_rays - 1) as f32;
        let last = self.vertical_rays - 1;
        let mut ray_length = displacement.y.abs() + COLLISION_PADDING;

        // Vertical probes follow the already-resolved horizontal step.
        let base = if direction < 0.0 {
            corners.bottom_left
        } else {
            corners.top_left
        };
        let shift_x = displacement.x;

        let mut hit_left_corner = false;
        let mut hit_right_corner = false;

        for i in 0..self.vertical_rays {
            let origin = base + Vec2::X * (spacing * i as f32 + shift_x);
            let Some(hit) = ground.cast_ray(origin, ray_dir, ray_length) else {
                continue;
            };

            displacement.y = (hit.distance - COLLISION_PADDING) * direction;
            ray_length = hit.distance;

            if direction < 0.0 {
                flags.below = true;
                continue;
            }

            flags.above = true;
            let slide = if i == 0 {
                hit_left_corner = true;
                1
            } else if i == last {
                hit_right_corner = true;
                -1
            } else {
                0
            };

            if slide != 0 && self.head_bump.is_some() && self.slide_lane_clear(ground, hit, slide) {
                flags.slide_direction = slide;
            }
        }

        flags.both_corners = hit_left_corner && hit_right_corner;
    }

    /// Short sideways probe just under the ceiling contact, toward the open side.
    fn slide_lane_clear(&self, ground: &dyn GroundCaster, hit: RayHit, slide: i8) -> bool {
        let origin = hit.point - Vec2::Y * (COLLISION_PADDING * 2.0);
        let direction = if slide > 0 { Dir2::X } else { Dir2::NEG_X };
        ground
            .cast_ray(origin, direction, COLLISION_PADDING * 2.0)
            .is_none()
    }
}
