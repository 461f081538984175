use crate::geometry::{GeometryError, Transformable};
use crate::util::linalg::{Mat3x3, Vector2};
use crate::util::ApproxEq;

/// Directional modifier for [`AffineTransform::translated_in`].
///
/// The canonical form is [`RightThenUp`](TranslationDirection::RightThenUp)
/// (both offsets applied with their given signs); the other variants flip
/// signs before the matrix is built, and are pure sugar: the resulting
/// matrix is bit-identical to the equivalent explicit signed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslationDirection {
    #[default]
    RightThenUp,
    LeftThenUp,
    LeftThenDown,
    RightThenDown,
}

/// Directional modifier for [`AffineTransform::rotated_in`]. Clockwise
/// negates the angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationDirection {
    #[default]
    Counterclockwise,
    Clockwise,
}

/// Directional modifier for [`AffineTransform::scaled_in`]. Shrink replaces
/// each factor with its reciprocal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleDirection {
    #[default]
    Enlarge,
    Shrink,
}

/// A composable 2D affine map in homogeneous coordinates.
///
/// Immutable value type: every builder returns a new transform, composing
/// the new operation *after* everything already in `self`. In matrix terms
/// the newest operation multiplies on the left, so the transform nearest the
/// point in a chain is applied first.
///
/// # Examples
///
/// ```
/// use roversim::geometry::{translate, AffineTransform, Transformable};
/// use roversim::util::linalg::Vector2;
///
/// // Translate by (1, 0), then rotate a quarter turn.
/// let t = translate(1.0, 0.0).rotated(std::f64::consts::FRAC_PI_2);
/// let p = t.apply(&Vector2::zero());
/// assert!((p.x - 0.0).abs() < 1e-10);
/// assert!((p.y - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
#[must_use]
pub struct AffineTransform {
    pub matrix: Mat3x3,
}

impl AffineTransform {
    /// The identity transform.
    pub fn identity() -> AffineTransform {
        AffineTransform {
            matrix: Mat3x3::one(),
        }
    }

    pub fn from_matrix(matrix: Mat3x3) -> AffineTransform {
        AffineTransform { matrix }
    }

    /// Returns this transform followed by a translation of `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> AffineTransform {
        Self::from_matrix(Mat3x3::translation(dx, dy) * self.matrix)
    }

    /// [`translated`](AffineTransform::translated) taking a vector offset.
    pub fn translated_vec(&self, by: Vector2) -> AffineTransform {
        self.translated(by.x, by.y)
    }

    /// Directional variant of [`translated`](AffineTransform::translated).
    pub fn translated_in(
        &self,
        dx: f64,
        dy: f64,
        direction: TranslationDirection,
    ) -> AffineTransform {
        match direction {
            TranslationDirection::RightThenUp => self.translated(dx, dy),
            TranslationDirection::LeftThenUp => self.translated(-dx, dy),
            TranslationDirection::LeftThenDown => self.translated(-dx, -dy),
            TranslationDirection::RightThenDown => self.translated(dx, -dy),
        }
    }

    /// Returns this transform followed by a counterclockwise rotation
    /// (radians).
    pub fn rotated(&self, radians: f64) -> AffineTransform {
        Self::from_matrix(Mat3x3::rotation(radians) * self.matrix)
    }

    /// Directional variant of [`rotated`](AffineTransform::rotated).
    pub fn rotated_in(&self, radians: f64, direction: RotationDirection) -> AffineTransform {
        match direction {
            RotationDirection::Counterclockwise => self.rotated(radians),
            RotationDirection::Clockwise => self.rotated(-radians),
        }
    }

    /// Returns this transform followed by a scaling with independent x/y
    /// factors.
    pub fn scaled(&self, sx: f64, sy: f64) -> AffineTransform {
        Self::from_matrix(Mat3x3::scaling(sx, sy) * self.matrix)
    }

    /// [`scaled`](AffineTransform::scaled) with a single uniform factor.
    pub fn scaled_uniform(&self, factor: f64) -> AffineTransform {
        self.scaled(factor, factor)
    }

    /// Directional variant of [`scaled`](AffineTransform::scaled).
    ///
    /// `Shrink` divides instead of multiplies; a zero factor fails with
    /// [`GeometryError::ZeroScaleFactor`] before any division happens, so
    /// no infinity ever reaches the matrix.
    pub fn scaled_in(
        &self,
        sx: f64,
        sy: f64,
        direction: ScaleDirection,
    ) -> Result<AffineTransform, GeometryError> {
        match direction {
            ScaleDirection::Enlarge => Ok(self.scaled(sx, sy)),
            ScaleDirection::Shrink => {
                if sx == 0.0 || sy == 0.0 {
                    return Err(GeometryError::ZeroScaleFactor);
                }
                Ok(self.scaled(1.0 / sx, 1.0 / sy))
            }
        }
    }

    /// Returns a transform equivalent to applying `self` first, then
    /// `other`.
    pub fn compose_with(&self, other: &AffineTransform) -> AffineTransform {
        Self::from_matrix(other.matrix * self.matrix)
    }

    /// Returns the inverse transform; fails if the transform is singular
    /// (e.g. built with a zero scale factor).
    pub fn invert(&self) -> Result<AffineTransform, GeometryError> {
        Ok(Self::from_matrix(self.matrix.inverse()?))
    }

    /// Applies this transform to any [`Transformable`]: decompose to
    /// points, map each through the matrix in homogeneous coordinates,
    /// reassemble.
    #[must_use]
    pub fn apply<T: Transformable>(&self, transformable: &T) -> T {
        let points = transformable
            .to_points()
            .into_iter()
            .map(|p| (self.matrix * p.homogeneous()).truncated())
            .collect();
        transformable
            .from_points(points)
            .expect("point-sequence length is preserved by apply")
    }

    /// Applies the inverse of this transform; fails if the transform is
    /// singular. For any non-singular transform,
    /// `apply_inverse(apply(x))` is approximately `x`.
    pub fn apply_inverse<T: Transformable>(&self, transformable: &T) -> Result<T, GeometryError> {
        Ok(self.invert()?.apply(transformable))
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ApproxEq for AffineTransform {
    fn approx_eq(&self, other: &Self, threshold: f64) -> bool {
        self.matrix.approx_eq(&other.matrix, threshold)
    }
}
