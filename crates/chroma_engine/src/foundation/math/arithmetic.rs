//! Scalar helpers shared by the angle, vector and matrix types.

/// Tolerance used by every approximate comparison in the math library.
pub const EPSILON: f32 = 1e-6;

/// π in single precision.
pub const PI: f32 = std::f32::consts::PI;

/// 2π in single precision.
pub const TWO_PI: f32 = 2.0 * std::f32::consts::PI;

/// Returns `true` when `a` and `b` differ by less than [`EPSILON`].
#[inline]
#[must_use]
pub fn almost_equal(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Clamps `value` into `[min, max]`.
///
/// Unlike [`f32::clamp`] this never panics when `min > max`; `min` wins.
#[inline]
#[must_use]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Square root that reports negative input as `-1.0` instead of NaN.
#[inline]
#[must_use]
pub fn square_root(value: f32) -> f32 {
    if value < 0.0 {
        return -1.0;
    }
    value.sqrt()
}

/// Maps `value` into the half-open range `[min, max)`.
///
/// A degenerate range (`max <= min`) collapses to `min`.
#[must_use]
pub fn wrap(value: f32, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range <= 0.0 {
        return min;
    }

    // `%` on floats keeps the sign of the dividend, like C's fmod
    let mut wrapped = (value - min) % range;
    if wrapped < 0.0 {
        wrapped += range;
    }

    // rounding can land exactly on the excluded upper bound
    if wrapped >= range {
        wrapped -= range;
    }

    wrapped + min
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_almost_equal_uses_strict_epsilon() {
        assert!(almost_equal(1.0, 1.0 + 1e-7));
        assert!(!almost_equal(1.0, 1.001));
    }

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp(-2.0, -1.0, 1.0), -1.0);
        assert_eq!(clamp(2.0, -1.0, 1.0), 1.0);
        assert_eq!(clamp(0.25, -1.0, 1.0), 0.25);
    }

    #[test]
    fn test_square_root_negative_is_sentinel() {
        assert_eq!(square_root(-4.0), -1.0);
        assert_relative_eq!(square_root(9.0), 3.0);
    }

    #[test]
    fn test_wrap_positive_and_negative() {
        assert_relative_eq!(wrap(370.0, 0.0, 360.0), 10.0, epsilon = 1e-4);
        assert_relative_eq!(wrap(-10.0, 0.0, 360.0), 350.0, epsilon = 1e-4);
        assert_relative_eq!(wrap(190.0, -180.0, 180.0), -170.0, epsilon = 1e-4);
        assert_relative_eq!(wrap(360.0, 0.0, 360.0), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_wrap_degenerate_range_returns_min() {
        assert_eq!(wrap(42.0, 5.0, 5.0), 5.0);
        assert_eq!(wrap(42.0, 5.0, 1.0), 5.0);
    }
}
