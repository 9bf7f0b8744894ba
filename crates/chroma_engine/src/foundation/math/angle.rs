//! Strongly typed angles.
//!
//! [`Degree`] and [`Radian`] wrap a single `f32`. They convert into each other
//! with `From`, so any API taking `impl Into<Radian>` also accepts degrees.
//!
//! Equality compares the two angles after wrapping them into one turn, so
//! `Degree::new(360.0) == Degree::new(0.0)`. Ordering looks at the raw values.

use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::arithmetic::{almost_equal, wrap, PI, TWO_PI};

/// An angle expressed in degrees.
#[derive(Debug, Clone, Copy, Default)]
pub struct Degree(f32);

/// An angle expressed in radians.
#[derive(Debug, Clone, Copy, Default)]
pub struct Radian(f32);

impl Degree {
    /// Creates an angle from a raw degree value.
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// The stored value, unwrapped.
    #[must_use]
    pub const fn raw(self) -> f32 {
        self.0
    }

    /// Wraps the stored value into `[-180, 180)` or `[0, 360)`.
    pub fn wrap(&mut self, range_180: bool) {
        self.0 = if range_180 {
            wrap(self.0, -180.0, 180.0)
        } else {
            wrap(self.0, 0.0, 360.0)
        };
    }

    /// The angle in degrees, wrapped into `[-180, 180)` or `[0, 360)`.
    #[must_use]
    pub fn degree(self, range_180: bool) -> f32 {
        let deg = wrap(self.0, 0.0, 360.0);
        if range_180 && deg >= 180.0 {
            deg - 360.0
        } else {
            deg
        }
    }

    /// The angle in radians, wrapped into `[-π, π)` or `[0, 2π)`.
    #[must_use]
    pub fn radian(self, range_pi: bool) -> f32 {
        Radian::from(self).radian(range_pi)
    }
}

impl Radian {
    /// Creates an angle from a raw radian value.
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// The stored value, unwrapped.
    #[must_use]
    pub const fn raw(self) -> f32 {
        self.0
    }

    /// Wraps the stored value into `[-π, π)` or `[0, 2π)`.
    pub fn wrap(&mut self, range_pi: bool) {
        self.0 = if range_pi {
            wrap(self.0, -PI, PI)
        } else {
            wrap(self.0, 0.0, TWO_PI)
        };
    }

    /// The angle in degrees, wrapped into `[-180, 180)` or `[0, 360)`.
    #[must_use]
    pub fn degree(self, range_180: bool) -> f32 {
        Degree::from(self).degree(range_180)
    }

    /// The angle in radians, wrapped into `[-π, π)` or `[0, 2π)`.
    #[must_use]
    pub fn radian(self, range_pi: bool) -> f32 {
        let rad = wrap(self.0, 0.0, TWO_PI);
        if range_pi && rad >= PI {
            rad - TWO_PI
        } else {
            rad
        }
    }
}

impl From<Degree> for Radian {
    fn from(degree: Degree) -> Self {
        Self(degree.0 * PI / 180.0)
    }
}

impl From<Radian> for Degree {
    fn from(radian: Radian) -> Self {
        Self(radian.0 * 180.0 / PI)
    }
}

macro_rules! impl_angle_ops {
    ($angle:ident, $turn:expr) => {
        impl PartialEq for $angle {
            fn eq(&self, other: &Self) -> bool {
                almost_equal(wrap(self.0, 0.0, $turn), wrap(other.0, 0.0, $turn))
            }
        }

        impl PartialOrd for $angle {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                if self == other {
                    Some(Ordering::Equal)
                } else {
                    self.0.partial_cmp(&other.0)
                }
            }
        }

        impl Neg for $angle {
            type Output = Self;

            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl Add for $angle {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $angle {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f32> for $angle {
            type Output = Self;

            fn mul(self, rhs: f32) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl Div<f32> for $angle {
            type Output = Self;

            fn div(self, rhs: f32) -> Self {
                Self(self.0 / rhs)
            }
        }

        impl AddAssign for $angle {
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl SubAssign for $angle {
            fn sub_assign(&mut self, rhs: Self) {
                self.0 -= rhs.0;
            }
        }

        impl MulAssign<f32> for $angle {
            fn mul_assign(&mut self, rhs: f32) {
                self.0 *= rhs;
            }
        }

        impl DivAssign<f32> for $angle {
            fn div_assign(&mut self, rhs: f32) {
                self.0 /= rhs;
            }
        }
    };
}

impl_angle_ops!(Degree, 360.0);
impl_angle_ops!(Radian, TWO_PI);

impl PartialEq<Radian> for Degree {
    fn eq(&self, other: &Radian) -> bool {
        *self == Self::from(*other)
    }
}

impl PartialEq<Degree> for Radian {
    fn eq(&self, other: &Degree) -> bool {
        *self == Self::from(*other)
    }
}
