//! Math types and operations
//!
//! A small single-precision linear algebra library written for the game:
//! strongly typed angles, 2/3/4 component vectors and column-major square
//! matrices. Matrices follow the column-vector convention, so `m * v`
//! transforms `v` and `a * b` applies `b` first.

pub mod angle;
pub mod arithmetic;
pub mod matrix2;
pub mod matrix3;
pub mod matrix4;
pub mod trigonometry;
pub mod vector2;
pub mod vector3;
pub mod vector4;

pub use angle::{Degree, Radian};
pub use arithmetic::{almost_equal, clamp, square_root, wrap, EPSILON, PI, TWO_PI};
pub use matrix2::Matrix2;
pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
pub use trigonometry::{acos, asin, atan, atan2, cos, sin, tan};
pub use vector2::Vector2;
pub use vector3::Vector3;
pub use vector4::Vector4;

/// Contract violations reported by the math types.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Inversion of a matrix whose determinant is within epsilon of zero
    #[error("Matrix is singular (determinant {determinant}), cannot invert")]
    SingularMatrix {
        /// The offending determinant
        determinant: f32,
    },

    /// Perspective projection with unusable parameters
    #[error("Invalid perspective parameters: {0}")]
    InvalidPerspective(String),

    /// Component access past the end of a vector or matrix
    #[error("Index {index} out of range for {kind} (size {size})")]
    IndexOutOfRange {
        /// Name of the indexed type
        kind: &'static str,
        /// Requested index
        index: usize,
        /// Number of components
        size: usize,
    },

    /// Perspective divide by a `w` that is zero
    #[error("Cannot homogenize a vector with w = 0")]
    HomogenizeZeroW,
}
