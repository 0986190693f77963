//! Movement domain: dash direction snapping.

use std::f32::consts::FRAC_1_SQRT_2;

use bevy::prelude::*;

/// The eight octant directions plus "no input". Diagonals are unit length.
pub const DASH_DIRECTIONS: [Vec2; 9] = [
    Vec2::ZERO,
    Vec2::new(1.0, 0.0),
    Vec2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    Vec2::new(0.0, 1.0),
    Vec2::new(-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    Vec2::new(-1.0, 0.0),
    Vec2::new(-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    Vec2::new(0.0, -1.0),
    Vec2::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
];

fn is_diagonal(direction: Vec2) -> bool {
    direction.x != 0.0 && direction.y != 0.0
}

/// Snap a raw movement axis to the nearest dash direction.
///
/// Diagonal candidates get `diagonal_bias` knocked off their distance so
/// slightly-off diagonals still register; an exact tie goes to the diagonal.
/// No input dashes the way the actor faces, and a grounded actor cannot dash
/// down into the floor diagonally.
pub fn select_dash_direction(
    axis: Vec2,
    facing_right: bool,
    grounded: bool,
    diagonal_bias: f32,
) -> Vec2 {
    let closest = DASH_DIRECTIONS
        .iter()
        .copied()
        .find(|candidate| *candidate == axis)
        .unwrap_or_else(|| {
            let mut best = DASH_DIRECTIONS[0];
            let mut best_distance = axis.distance(best);
            for candidate in DASH_DIRECTIONS.iter().copied().skip(1) {
                let mut distance = axis.distance(candidate);
                if is_diagonal(candidate) {
                    distance -= diagonal_bias;
                }
                let diagonal_tie = distance == best_distance
                    && is_diagonal(candidate)
                    && !is_diagonal(best);
                if distance < best_distance || diagonal_tie {
                    best_distance = distance;
                    best = candidate;
                }
            }
            best
        });

    let direction = if closest == Vec2::ZERO {
        if facing_right { Vec2::X } else { Vec2::NEG_X }
    } else {
        closest
    };

    if grounded && direction.y < 0.0 && direction.x != 0.0 {
        Vec2::new(direction.x.signum(), 0.0)
    } else {
        direction
    }
}
