pub mod colour;
pub mod linalg;

/// Approximate equality with a caller-supplied threshold.
///
/// Exact equality (`PartialEq`) on the geometry types compares components
/// bit-for-bit; this trait is the companion relation for values that have
/// been through floating-point arithmetic. Composite types are approximately
/// equal iff every component is within `threshold`.
///
/// # Examples
///
/// ```
/// use roversim::util::ApproxEq;
/// assert!(1.0_f64.approx_eq(&(1.0 + 1e-12), 1e-10));
/// assert!(!1.0_f64.approx_eq(&1.1, 1e-10));
/// ```
pub trait ApproxEq {
    fn approx_eq(&self, other: &Self, threshold: f64) -> bool;
}

impl ApproxEq for f64 {
    fn approx_eq(&self, other: &Self, threshold: f64) -> bool {
        (self - other).abs() <= threshold
    }
}

impl<T: ApproxEq> ApproxEq for [T] {
    fn approx_eq(&self, other: &Self, threshold: f64) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.approx_eq(b, threshold))
    }
}

impl<T: ApproxEq> ApproxEq for Vec<T> {
    fn approx_eq(&self, other: &Self, threshold: f64) -> bool {
        self.as_slice().approx_eq(other.as_slice(), threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f64_approx_eq_within_threshold() {
        assert!(0.1_f64.approx_eq(&0.100000001, 1e-6));
        assert!(!0.1_f64.approx_eq(&0.11, 1e-6));
        // Threshold is inclusive.
        assert!(1.0_f64.approx_eq(&1.5, 0.5));
    }

    #[test]
    fn slice_approx_eq_requires_same_length() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0, 2.0, 3.0];
        assert!(!a.approx_eq(&b, 1e-6));
        assert!(a.approx_eq(&vec![1.0 + 1e-9, 2.0 - 1e-9], 1e-6));
    }
}
