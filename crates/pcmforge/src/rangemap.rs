//! Linear range mapping.

/// Maps `x` from the range `[in_lo, in_hi]` onto `[out_lo, out_hi]`.
///
/// The mapping is affine and unclamped: values outside the input range
/// extrapolate along the same line.
///
/// `in_hi` must differ from `in_lo`. An empty input range divides by zero and
/// yields a non-finite result.
#[inline]
pub fn rangemap(x: f64, in_lo: f64, in_hi: f64, out_lo: f64, out_hi: f64) -> f64 {
    out_lo + (x - in_lo) * (out_hi - out_lo) / (in_hi - in_lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descending_output_range() {
        assert_eq!(rangemap(10.0, 0.0, 10.0, 500.0, 100.0), 100.0);
        assert!(rangemap(10.0, 0.0, 10.0, 500.0, 100.0) >= 100.0);
    }

    #[test]
    fn test_ascending_output_range() {
        assert_eq!(rangemap(10.0, 0.0, 10.0, 100.0, 500.0), 500.0);
        assert_eq!(rangemap(5.0, 0.0, 10.0, 0.0, 500.0), 250.0);
    }

    #[test]
    fn test_extrapolates_outside_input_range() {
        assert_eq!(rangemap(20.0, 0.0, 10.0, 0.0, 100.0), 200.0);
        assert_eq!(rangemap(-10.0, 0.0, 10.0, 0.0, 100.0), -100.0);
    }

    #[test]
    fn test_empty_input_range_is_not_finite() {
        assert!(!rangemap(1.0, 3.0, 3.0, 0.0, 1.0).is_finite());
    }
}
