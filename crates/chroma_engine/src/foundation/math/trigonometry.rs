//! Trigonometric functions over [`Radian`].
//!
//! The forward functions accept anything convertible into a [`Radian`], so
//! `sin(Degree::new(30.0))` works without an explicit conversion.

use super::angle::Radian;

/// Sine of an angle.
#[must_use]
pub fn sin(angle: impl Into<Radian>) -> f32 {
    angle.into().radian(false).sin()
}

/// Cosine of an angle.
#[must_use]
pub fn cos(angle: impl Into<Radian>) -> f32 {
    angle.into().radian(false).cos()
}

/// Tangent of an angle.
#[must_use]
pub fn tan(angle: impl Into<Radian>) -> f32 {
    angle.into().radian(false).tan()
}

/// Arc sine, in `[-π/2, π/2]`.
#[must_use]
pub fn asin(value: f32) -> Radian {
    Radian::new(value.asin())
}

/// Arc cosine, in `[0, π]`.
#[must_use]
pub fn acos(value: f32) -> Radian {
    Radian::new(value.acos())
}

/// Arc tangent, in `[-π/2, π/2]`.
#[must_use]
pub fn atan(value: f32) -> Radian {
    Radian::new(value.atan())
}

/// Four-quadrant arc tangent of `y / x`.
#[must_use]
pub fn atan2(y: f32, x: f32) -> Radian {
    Radian::new(y.atan2(x))
}
