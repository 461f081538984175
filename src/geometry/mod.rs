pub mod shapes;
pub mod transform;

use crate::util::linalg::{MatrixError, Vector2};
use thiserror::Error;

pub use transform::AffineTransform;

/// Errors from geometric operations with no defined result.
///
/// Like [`MatrixError`], these are numeric domain errors and are surfaced
/// directly rather than papered over with defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("transform is not invertible: {0}")]
    SingularTransform(#[from] MatrixError),
    #[error("zero scale factor cannot be inverted")]
    ZeroScaleFactor,
    #[error("expected {expected} points to rebuild shape, got {actual}")]
    VertexCountMismatch { expected: usize, actual: usize },
}

/// A value that can be decomposed into an ordered sequence of 2D points and
/// rebuilt from a transformed sequence of the same length and order.
///
/// This is the sole seam between transforms and geometry: a transform maps
/// every point of the decomposition and reassembles, so shapes never carry
/// transform logic of their own. The same machinery applies uniformly to a
/// bare [`Vector2`], a two-point line, or an n-point polygon.
pub trait Transformable: Sized {
    /// Decomposes into an ordered point sequence.
    fn to_points(&self) -> Vec<Vector2>;

    /// Rebuilds the same concrete type from a transformed point sequence.
    ///
    /// Fails with [`GeometryError::VertexCountMismatch`] when `points` does
    /// not match the length of [`to_points()`](Transformable::to_points) for
    /// this instance.
    fn from_points(&self, points: Vec<Vector2>) -> Result<Self, GeometryError>;
}

impl Transformable for Vector2 {
    fn to_points(&self) -> Vec<Vector2> {
        vec![*self]
    }

    fn from_points(&self, points: Vec<Vector2>) -> Result<Self, GeometryError> {
        match points.as_slice() {
            [point] => Ok(*point),
            other => Err(GeometryError::VertexCountMismatch {
                expected: 1,
                actual: other.len(),
            }),
        }
    }
}

/// Builds a pure translation, equivalent to
/// `AffineTransform::identity().translated(dx, dy)`.
pub fn translate(dx: f64, dy: f64) -> AffineTransform {
    AffineTransform::identity().translated(dx, dy)
}

/// Builds a pure counterclockwise rotation (radians).
pub fn rotate(radians: f64) -> AffineTransform {
    AffineTransform::identity().rotated(radians)
}

/// Builds a uniform scaling.
pub fn scale(factor: f64) -> AffineTransform {
    AffineTransform::identity().scaled(factor, factor)
}

/// Builds a scaling with independent x/y factors.
pub fn scale_xy(sx: f64, sy: f64) -> AffineTransform {
    AffineTransform::identity().scaled(sx, sy)
}
