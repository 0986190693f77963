//! Scalar helpers shared by the movement core and the camera rig.

/// Linear interpolation with `t` clamped to `[0, 1]`. Both endpoints are
/// returned exactly.
#[inline]
pub fn lerp_clamped(from: f32, to: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    from * (1.0 - t) + to * t
}

/// Position of `value` between `from` and `to`, clamped to `[0, 1]`.
///
/// Returns 0 when the range is degenerate.
#[inline]
pub fn inverse_lerp(from: f32, to: f32, value: f32) -> f32 {
    if from == to {
        return 0.0;
    }
    ((value - from) / (to - from)).clamp(0.0, 1.0)
}

/// Sign where zero counts as positive. Probe directions use this so a zero
/// component still casts a padding-length ray.
#[inline]
pub fn sign_or_positive(value: f32) -> f32 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

/// Sign that maps zero (and anything within `f32::EPSILON`) to zero.
#[inline]
pub fn sign_or_zero(value: f32) -> f32 {
    if value > f32::EPSILON {
        1.0
    } else if value < -f32::EPSILON {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_clamped_saturates() {
        assert_eq!(lerp_clamped(10.0, 0.0, 0.0), 10.0);
        assert_eq!(lerp_clamped(10.0, 0.0, 1.0), 0.0);
        assert_eq!(lerp_clamped(10.0, 0.0, 2.5), 0.0);
        assert_eq!(lerp_clamped(10.0, 0.0, -1.0), 10.0);
        assert!((lerp_clamped(10.0, 0.0, 0.25) - 7.5).abs() < 1e-6);
    }

    #[test]
    fn test_inverse_lerp_towards_zero() {
        assert_eq!(inverse_lerp(40.0, 0.0, 40.0), 0.0);
        assert_eq!(inverse_lerp(40.0, 0.0, 0.0), 1.0);
        assert!((inverse_lerp(40.0, 0.0, 10.0) - 0.75).abs() < 1e-6);
        assert_eq!(inverse_lerp(40.0, 0.0, -5.0), 1.0);
        assert_eq!(inverse_lerp(3.0, 3.0, 1.0), 0.0);
    }

    #[test]
    fn test_sign_helpers() {
        assert_eq!(sign_or_positive(0.0), 1.0);
        assert_eq!(sign_or_positive(-0.0), 1.0);
        assert_eq!(sign_or_positive(-3.0), -1.0);
        assert_eq!(sign_or_zero(0.0), 0.0);
        assert_eq!(sign_or_zero(0.4), 1.0);
        assert_eq!(sign_or_zero(-0.4), -1.0);
    }
}
