use crate::util::ApproxEq;
use num_traits::{One, Zero};
use std::iter::Sum;
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use thiserror::Error;

/// Errors from matrix operations that have no defined result.
///
/// These are numeric domain errors: callers get an explicit failure rather
/// than a silent default or a NaN-filled matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("matrix is singular (determinant is zero)")]
    Singular,
    #[error("unsupported matrix exponent {0}; only 1 and -1 are allowed")]
    UnsupportedExponent(i32),
}

/// A 2D vector with 64-bit floating point components.
///
/// Value semantics throughout: arithmetic returns new vectors. Exact
/// equality is componentwise `==`; use [`ApproxEq`] for post-arithmetic
/// comparisons.
///
/// # Examples
///
/// ```
/// use roversim::util::linalg::Vector2;
///
/// let v1 = Vector2 { x: 3.0, y: 4.0 };
/// let v2 = Vector2 { x: 1.0, y: 2.0 };
/// assert_eq!(v1 + v2, Vector2 { x: 4.0, y: 6.0 });
/// ```
#[derive(Default, Debug, Copy, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Vector2 {
        Vector2 { x, y }
    }

    /// Returns a vector with both components set to 0.0.
    #[must_use]
    pub fn zero() -> Vector2 {
        Vector2 { x: 0.0, y: 0.0 }
    }

    /// Returns a vector with both components set to 1.0.
    #[must_use]
    pub fn one() -> Vector2 {
        Vector2 { x: 1.0, y: 1.0 }
    }

    /// Computes the dot product of two vectors.
    #[must_use]
    pub fn dot(&self, other: Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Returns the length of the vector.
    #[must_use]
    pub fn len(&self) -> f64 {
        self.dot(*self).sqrt()
    }

    /// Promotes to homogeneous coordinates with w = 1, for transforming
    /// through a 3x3 matrix.
    #[must_use]
    pub fn homogeneous(&self) -> Vector3 {
        Vector3 {
            x: self.x,
            y: self.y,
            z: 1.0,
        }
    }
}

impl ApproxEq for Vector2 {
    fn approx_eq(&self, other: &Self, threshold: f64) -> bool {
        self.x.approx_eq(&other.x, threshold) && self.y.approx_eq(&other.y, threshold)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(p) = f.precision() {
            write!(f, "vec({0:.2$}, {1:.2$})", self.x, self.y, p)
        } else {
            write!(f, "vec({}, {})", self.x, self.y)
        }
    }
}

impl Add<Vector2> for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Self::Output {
        Vector2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
impl AddAssign<Vector2> for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}
impl Sub<Vector2> for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Self::Output {
        Vector2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
impl SubAssign<Vector2> for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}
impl Sum<Vector2> for Vector2 {
    fn sum<I: Iterator<Item = Vector2>>(iter: I) -> Self {
        iter.fold(Vector2::zero(), Vector2::add)
    }
}
impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Self::Output {
        rhs * self
    }
}
impl Mul<Vector2> for f64 {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Self::Output {
        Vector2 {
            x: self * rhs.x,
            y: self * rhs.y,
        }
    }
}
impl MulAssign<f64> for Vector2 {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}
impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Self::Output {
        Vector2 {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Zero for Vector2 {
    fn zero() -> Self {
        Vector2::zero()
    }

    fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl From<[f64; 2]> for Vector2 {
    fn from(value: [f64; 2]) -> Self {
        Vector2 {
            x: value[0],
            y: value[1],
        }
    }
}
impl From<Vector2> for [f64; 2] {
    fn from(value: Vector2) -> Self {
        [value.x, value.y]
    }
}

/// A 3D vector, used here as the homogeneous form of a [`Vector2`].
#[derive(Default, Debug, Copy, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3 { x, y, z }
    }

    #[must_use]
    pub fn zero() -> Vector3 {
        Vector3 {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Drops the homogeneous coordinate.
    #[must_use]
    pub fn truncated(&self) -> Vector2 {
        Vector2 {
            x: self.x,
            y: self.y,
        }
    }
}

impl ApproxEq for Vector3 {
    fn approx_eq(&self, other: &Self, threshold: f64) -> bool {
        self.x.approx_eq(&other.x, threshold)
            && self.y.approx_eq(&other.y, threshold)
            && self.z.approx_eq(&other.z, threshold)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "vec({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add<Vector3> for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Self::Output {
        Vector3 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}
impl Sub<Vector3> for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Self::Output {
        Vector3 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}
impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f64) -> Self::Output {
        rhs * self
    }
}
impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Self::Output {
        Vector3 {
            x: self * rhs.x,
            y: self * rhs.y,
            z: self * rhs.z,
        }
    }
}
impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Self::Output {
        Vector3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Zero for Vector3 {
    fn zero() -> Self {
        Vector3::zero()
    }

    fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}

/// A 2x2 matrix in row-major layout:
/// ```text
/// | xx xy |
/// | yx yy |
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
#[must_use]
pub struct Mat2x2 {
    pub xx: f64,
    pub xy: f64,
    pub yx: f64,
    pub yy: f64,
}

impl Mat2x2 {
    pub fn new(row1: [f64; 2], row2: [f64; 2]) -> Mat2x2 {
        Mat2x2 {
            xx: row1[0],
            xy: row1[1],
            yx: row2[0],
            yy: row2[1],
        }
    }

    /// The multiplicative identity matrix.
    pub fn one() -> Mat2x2 {
        Mat2x2 {
            xx: 1.0,
            xy: 0.0,
            yx: 0.0,
            yy: 1.0,
        }
    }

    pub fn zero() -> Mat2x2 {
        Mat2x2 {
            xx: 0.0,
            xy: 0.0,
            yx: 0.0,
            yy: 0.0,
        }
    }

    /// Calculates the determinant `ad - bc`.
    #[must_use]
    pub fn det(&self) -> f64 {
        self.xx * self.yy - self.xy * self.yx
    }

    /// Returns the transpose of this matrix.
    pub fn transposed(&self) -> Mat2x2 {
        Mat2x2 {
            xx: self.xx,
            xy: self.yx,
            yx: self.xy,
            yy: self.yy,
        }
    }

    /// Returns the inverse via the adjugate over the determinant.
    ///
    /// Fails with [`MatrixError::Singular`] when the determinant is zero.
    pub fn inverse(&self) -> Result<Mat2x2, MatrixError> {
        let det = self.det();
        if det == 0.0 {
            return Err(MatrixError::Singular);
        }
        Ok((1.0 / det)
            * Mat2x2 {
                xx: self.yy,
                xy: -self.xy,
                yx: -self.yx,
                yy: self.xx,
            })
    }

    /// Matrix power, restricted to exponent 1 (copy) and -1 (inverse).
    ///
    /// Transposition is spelled [`transposed()`](Mat2x2::transposed) rather
    /// than an exponent. Any other exponent fails with
    /// [`MatrixError::UnsupportedExponent`].
    pub fn pow(&self, exponent: i32) -> Result<Mat2x2, MatrixError> {
        match exponent {
            1 => Ok(*self),
            -1 => self.inverse(),
            other => Err(MatrixError::UnsupportedExponent(other)),
        }
    }
}

impl ApproxEq for Mat2x2 {
    fn approx_eq(&self, other: &Self, threshold: f64) -> bool {
        self.xx.approx_eq(&other.xx, threshold)
            && self.xy.approx_eq(&other.xy, threshold)
            && self.yx.approx_eq(&other.yx, threshold)
            && self.yy.approx_eq(&other.yy, threshold)
    }
}

impl Add<Mat2x2> for Mat2x2 {
    type Output = Mat2x2;

    fn add(self, rhs: Mat2x2) -> Self::Output {
        Mat2x2 {
            xx: self.xx + rhs.xx,
            xy: self.xy + rhs.xy,
            yx: self.yx + rhs.yx,
            yy: self.yy + rhs.yy,
        }
    }
}

impl Mul<f64> for Mat2x2 {
    type Output = Mat2x2;

    fn mul(self, rhs: f64) -> Self::Output {
        rhs * self
    }
}
impl Mul<Mat2x2> for f64 {
    type Output = Mat2x2;

    fn mul(self, rhs: Mat2x2) -> Self::Output {
        Mat2x2 {
            xx: self * rhs.xx,
            xy: self * rhs.xy,
            yx: self * rhs.yx,
            yy: self * rhs.yy,
        }
    }
}

impl Mul<Vector2> for Mat2x2 {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Self::Output {
        Vector2 {
            x: self.xx * rhs.x + self.xy * rhs.y,
            y: self.yx * rhs.x + self.yy * rhs.y,
        }
    }
}

impl Mul<Mat2x2> for Mat2x2 {
    type Output = Mat2x2;

    fn mul(self, rhs: Mat2x2) -> Self::Output {
        Mat2x2 {
            xx: self.xx * rhs.xx + self.xy * rhs.yx,
            xy: self.xx * rhs.xy + self.xy * rhs.yy,
            yx: self.yx * rhs.xx + self.yy * rhs.yx,
            yy: self.yx * rhs.xy + self.yy * rhs.yy,
        }
    }
}

impl One for Mat2x2 {
    fn one() -> Self {
        Self::one()
    }
}
impl Zero for Mat2x2 {
    fn zero() -> Self {
        Self::zero()
    }

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

/// A 3x3 matrix in row-major layout:
/// ```text
/// | xx xy xw |
/// | yx yy yw |
/// | wx wy ww |
/// ```
/// For 2D affine use, the first two columns hold the linear part and the
/// third column the translation.
#[derive(Debug, Copy, Clone, PartialEq)]
#[must_use]
pub struct Mat3x3 {
    pub xx: f64,
    pub xy: f64,
    pub xw: f64,
    pub yx: f64,
    pub yy: f64,
    pub yw: f64,
    pub wx: f64,
    pub wy: f64,
    pub ww: f64,
}

impl Mat3x3 {
    pub fn new(row1: [f64; 3], row2: [f64; 3], row3: [f64; 3]) -> Mat3x3 {
        Mat3x3 {
            xx: row1[0],
            xy: row1[1],
            xw: row1[2],
            yx: row2[0],
            yy: row2[1],
            yw: row2[2],
            wx: row3[0],
            wy: row3[1],
            ww: row3[2],
        }
    }

    /// The multiplicative identity matrix.
    pub fn one() -> Mat3x3 {
        Mat3x3 {
            xx: 1.0,
            xy: 0.0,
            xw: 0.0,
            yx: 0.0,
            yy: 1.0,
            yw: 0.0,
            wx: 0.0,
            wy: 0.0,
            ww: 1.0,
        }
    }

    pub fn zero() -> Mat3x3 {
        Mat3x3 {
            xx: 0.0,
            xy: 0.0,
            xw: 0.0,
            yx: 0.0,
            yy: 0.0,
            yw: 0.0,
            wx: 0.0,
            wy: 0.0,
            ww: 0.0,
        }
    }

    /// Creates a translation matrix:
    /// ```text
    /// | 1 0 dx |
    /// | 0 1 dy |
    /// | 0 0 1  |
    /// ```
    pub fn translation(dx: f64, dy: f64) -> Mat3x3 {
        Mat3x3 {
            xx: 1.0,
            xy: 0.0,
            xw: dx,
            yx: 0.0,
            yy: 1.0,
            yw: dy,
            wx: 0.0,
            wy: 0.0,
            ww: 1.0,
        }
    }

    /// Creates a counterclockwise rotation matrix:
    /// ```text
    /// | cos(θ)  -sin(θ)  0 |
    /// | sin(θ)   cos(θ)  0 |
    /// | 0        0       1 |
    /// ```
    pub fn rotation(radians: f64) -> Mat3x3 {
        Mat3x3 {
            xx: f64::cos(radians),
            xy: -f64::sin(radians),
            xw: 0.0,
            yx: f64::sin(radians),
            yy: f64::cos(radians),
            yw: 0.0,
            wx: 0.0,
            wy: 0.0,
            ww: 1.0,
        }
    }

    /// Creates a scaling matrix with independent x/y factors.
    pub fn scaling(sx: f64, sy: f64) -> Mat3x3 {
        Mat3x3 {
            xx: sx,
            xy: 0.0,
            xw: 0.0,
            yx: 0.0,
            yy: sy,
            yw: 0.0,
            wx: 0.0,
            wy: 0.0,
            ww: 1.0,
        }
    }

    /// Calculates the determinant by the rule of Sarrus.
    #[must_use]
    pub fn det(&self) -> f64 {
        self.xx * self.yy * self.ww
            + self.xy * self.yw * self.wx
            + self.xw * self.yx * self.wy
            - self.xw * self.yy * self.wx
            - self.xx * self.yw * self.wy
            - self.xy * self.yx * self.ww
    }

    /// Returns the transpose of this matrix.
    pub fn transposed(&self) -> Mat3x3 {
        Mat3x3 {
            xx: self.xx,
            xy: self.yx,
            xw: self.wx,
            yx: self.xy,
            yy: self.yy,
            yw: self.wy,
            wx: self.xw,
            wy: self.yw,
            ww: self.ww,
        }
    }

    /// Returns the inverse via the adjugate over the determinant.
    ///
    /// Fails with [`MatrixError::Singular`] when the determinant is zero.
    pub fn inverse(&self) -> Result<Mat3x3, MatrixError> {
        let det = self.det();
        if det == 0.0 {
            return Err(MatrixError::Singular);
        }
        let cofactors = Mat3x3 {
            xx: self.yy * self.ww - self.yw * self.wy,
            xy: -(self.yx * self.ww - self.yw * self.wx),
            xw: self.yx * self.wy - self.yy * self.wx,
            yx: -(self.xy * self.ww - self.xw * self.wy),
            yy: self.xx * self.ww - self.xw * self.wx,
            yw: -(self.xx * self.wy - self.xy * self.wx),
            wx: self.xy * self.yw - self.xw * self.yy,
            wy: -(self.xx * self.yw - self.xw * self.yx),
            ww: self.xx * self.yy - self.xy * self.yx,
        };
        Ok((1.0 / det) * cofactors.transposed())
    }

    /// Matrix power, restricted to exponent 1 (copy) and -1 (inverse).
    ///
    /// Transposition is spelled [`transposed()`](Mat3x3::transposed) rather
    /// than an exponent. Any other exponent fails with
    /// [`MatrixError::UnsupportedExponent`].
    pub fn pow(&self, exponent: i32) -> Result<Mat3x3, MatrixError> {
        match exponent {
            1 => Ok(*self),
            -1 => self.inverse(),
            other => Err(MatrixError::UnsupportedExponent(other)),
        }
    }
}

impl ApproxEq for Mat3x3 {
    fn approx_eq(&self, other: &Self, threshold: f64) -> bool {
        self.xx.approx_eq(&other.xx, threshold)
            && self.xy.approx_eq(&other.xy, threshold)
            && self.xw.approx_eq(&other.xw, threshold)
            && self.yx.approx_eq(&other.yx, threshold)
            && self.yy.approx_eq(&other.yy, threshold)
            && self.yw.approx_eq(&other.yw, threshold)
            && self.wx.approx_eq(&other.wx, threshold)
            && self.wy.approx_eq(&other.wy, threshold)
            && self.ww.approx_eq(&other.ww, threshold)
    }
}

impl Add<Mat3x3> for Mat3x3 {
    type Output = Mat3x3;

    fn add(self, rhs: Mat3x3) -> Self::Output {
        Mat3x3 {
            xx: self.xx + rhs.xx,
            xy: self.xy + rhs.xy,
            xw: self.xw + rhs.xw,
            yx: self.yx + rhs.yx,
            yy: self.yy + rhs.yy,
            yw: self.yw + rhs.yw,
            wx: self.wx + rhs.wx,
            wy: self.wy + rhs.wy,
            ww: self.ww + rhs.ww,
        }
    }
}

impl Mul<f64> for Mat3x3 {
    type Output = Mat3x3;

    fn mul(self, rhs: f64) -> Self::Output {
        rhs * self
    }
}
impl Mul<Mat3x3> for f64 {
    type Output = Mat3x3;

    fn mul(self, rhs: Mat3x3) -> Self::Output {
        Mat3x3 {
            xx: self * rhs.xx,
            xy: self * rhs.xy,
            xw: self * rhs.xw,
            yx: self * rhs.yx,
            yy: self * rhs.yy,
            yw: self * rhs.yw,
            wx: self * rhs.wx,
            wy: self * rhs.wy,
            ww: self * rhs.ww,
        }
    }
}

impl Mul<Vector3> for Mat3x3 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Self::Output {
        Vector3 {
            x: self.xx * rhs.x + self.xy * rhs.y + self.xw * rhs.z,
            y: self.yx * rhs.x + self.yy * rhs.y + self.yw * rhs.z,
            z: self.wx * rhs.x + self.wy * rhs.y + self.ww * rhs.z,
        }
    }
}

impl Mul<Mat3x3> for Mat3x3 {
    type Output = Mat3x3;

    fn mul(self, rhs: Mat3x3) -> Self::Output {
        Mat3x3 {
            xx: self.xx * rhs.xx + self.xy * rhs.yx + self.xw * rhs.wx,
            xy: self.xx * rhs.xy + self.xy * rhs.yy + self.xw * rhs.wy,
            xw: self.xx * rhs.xw + self.xy * rhs.yw + self.xw * rhs.ww,
            yx: self.yx * rhs.xx + self.yy * rhs.yx + self.yw * rhs.wx,
            yy: self.yx * rhs.xy + self.yy * rhs.yy + self.yw * rhs.wy,
            yw: self.yx * rhs.xw + self.yy * rhs.yw + self.yw * rhs.ww,
            wx: self.wx * rhs.xx + self.wy * rhs.yx + self.ww * rhs.wx,
            wy: self.wx * rhs.xy + self.wy * rhs.yy + self.ww * rhs.wy,
            ww: self.wx * rhs.xw + self.wy * rhs.yw + self.ww * rhs.ww,
        }
    }
}

impl One for Mat3x3 {
    fn one() -> Self {
        Self::one()
    }
}
impl Zero for Mat3x3 {
    fn zero() -> Self {
        Self::zero()
    }

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}
