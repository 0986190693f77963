//! Movement domain: ground casters backed by avian spatial queries or plain rectangles.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::collision::{GroundCaster, RayHit};

/// Slack added to the cast length so contacts sitting exactly at the padding
/// distance survive float rounding.
const CAST_TOLERANCE: f32 = 1e-4;

/// Axis-aligned solids held in memory. Used by headless simulation and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticGround {
    solids: Vec<Rect>,
}

impl StaticGround {
    pub fn new(solids: impl IntoIterator<Item = Rect>) -> Self {
        Self {
            solids: solids.into_iter().collect(),
        }
    }

    pub fn push(&mut self, solid: Rect) {
        self.solids.push(solid);
    }

    pub fn clear(&mut self) {
        self.solids.clear();
    }

    pub fn solids(&self) -> &[Rect] {
        &self.solids
    }

    fn nearest(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        grow: Vec2,
    ) -> Option<f32> {
        self.solids
            .iter()
            .filter_map(|solid| {
                let expanded = Rect::from_center_half_size(solid.center(), solid.half_size() + grow);
                ray_rect_entry(origin, *direction, &expanded)
            })
            .filter(|distance| *distance <= max_distance + CAST_TOLERANCE)
            .min_by(f32::total_cmp)
    }
}

impl GroundCaster for StaticGround {
    fn cast_ray(&self, origin: Vec2, direction: Dir2, max_distance: f32) -> Option<RayHit> {
        self.nearest(origin, direction, max_distance, Vec2::ZERO)
            .map(|distance| RayHit {
                distance,
                point: origin + *direction * distance,
            })
    }

    fn cast_box(
        &self,
        center: Vec2,
        size: Vec2,
        direction: Dir2,
        max_distance: f32,
    ) -> Option<f32> {
        // Sweeping a box equals casting its centre against solids grown by its half size.
        self.nearest(center, direction, max_distance, size * 0.5)
    }
}

/// Slab test. Returns the entry distance, or zero when `origin` is already
/// inside (or on the boundary of) `rect`.
fn ray_rect_entry(origin: Vec2, direction: Vec2, rect: &Rect) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;

    for axis in 0..2 {
        let o = origin[axis];
        let d = direction[axis];
        let (lo, hi) = (rect.min[axis], rect.max[axis]);

        if d.abs() <= f32::EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let (t0, t1) = {
            let a = (lo - o) * inv;
            let b = (hi - o) * inv;
            if a <= b { (a, b) } else { (b, a) }
        };
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }

    Some(t_min)
}

/// Ground casts routed through avian's spatial query pipeline, filtered to
/// the configured ground layers.
pub struct AvianGround<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    filter: SpatialQueryFilter,
}

impl<'a, 'w, 's> AvianGround<'a, 'w, 's> {
    pub fn new(spatial_query: &'a SpatialQuery<'w, 's>, mask: LayerMask) -> Self {
        Self {
            spatial_query,
            filter: SpatialQueryFilter::from_mask(mask),
        }
    }
}

impl GroundCaster for AvianGround<'_, '_, '_> {
    fn cast_ray(&self, origin: Vec2, direction: Dir2, max_distance: f32) -> Option<RayHit> {
        self.spatial_query
            .cast_ray(
                origin,
                direction,
                max_distance + CAST_TOLERANCE,
                true,
                &self.filter,
            )
            .map(|hit| RayHit {
                distance: hit.distance,
                point: origin + *direction * hit.distance,
            })
    }

    fn cast_box(
        &self,
        center: Vec2,
        size: Vec2,
        direction: Dir2,
        max_distance: f32,
    ) -> Option<f32> {
        let shape = Collider::rectangle(size.x, size.y);
        self.spatial_query
            .cast_shape(
                &shape,
                center,
                0.0,
                direction,
                &ShapeCastConfig::from_max_distance(max_distance + CAST_TOLERANCE),
                &self.filter,
            )
            .map(|hit| hit.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> StaticGround {
        StaticGround::new([Rect::new(-10.0, -1.0, 10.0, 0.0)])
    }

    #[test]
    fn test_ray_hits_floor_from_above() {
        let ground = floor();
        let hit = ground
            .cast_ray(Vec2::new(2.0, 0.5), Dir2::NEG_Y, 1.0)
            .expect("floor should be hit");
        assert!((hit.distance - 0.5).abs() < 1e-5);
        assert!((hit.point - Vec2::new(2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_ray_respects_max_distance() {
        let ground = floor();
        assert!(ground.cast_ray(Vec2::new(0.0, 0.5), Dir2::NEG_Y, 0.4).is_none());
        // contact exactly at the end of the ray counts
        assert!(ground.cast_ray(Vec2::new(0.0, 0.5), Dir2::NEG_Y, 0.5).is_some());
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let ground = floor();
        assert!(ground.cast_ray(Vec2::new(0.0, 0.5), Dir2::Y, 100.0).is_none());
        assert!(ground.cast_ray(Vec2::new(20.0, 0.5), Dir2::NEG_Y, 100.0).is_none());
    }

    #[test]
    fn test_ray_starting_inside_reports_zero() {
        let ground = floor();
        let hit = ground.cast_ray(Vec2::new(0.0, -0.5), Dir2::X, 1.0).unwrap();
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn test_nearest_solid_wins() {
        let mut ground = floor();
        ground.push(Rect::new(-1.0, 0.2, 1.0, 0.3));
        let hit = ground.cast_ray(Vec2::new(0.0, 1.0), Dir2::NEG_Y, 5.0).unwrap();
        assert!((hit.distance - 0.7).abs() < 1e-5);

        ground.clear();
        assert!(ground.cast_ray(Vec2::new(0.0, 1.0), Dir2::NEG_Y, 5.0).is_none());
    }

    #[test]
    fn test_box_cast_uses_box_extent() {
        let ground = StaticGround::new([Rect::new(0.2, 1.0, 3.0, 2.0)]);
        // a thin ray at x=0 misses, a 0.6 wide box reaches x=0.3 and hits
        assert!(ground.cast_ray(Vec2::ZERO, Dir2::Y, 2.0).is_none());
        let distance = ground
            .cast_box(Vec2::ZERO, Vec2::new(0.6, 0.1), Dir2::Y, 2.0)
            .unwrap();
        assert!((distance - 0.95).abs() < 1e-5);
    }
}
