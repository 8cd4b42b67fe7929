//! Numerical constants and integration helpers shared across the crate.

/// Small epsilon for numerical comparisons (e.g., avoiding division by zero).
pub const NUMERICAL_EPS: f64 = 1e-10;

/// Default relative tolerance for spectral-moment checks.
pub const DEFAULT_MOMENT_TOL: f64 = 1e-6;

/// Gravitational acceleration [m/s^2].
pub const GRAVITY: f64 = 9.81;

/// Newtons per meganewton, the unit used for depth-integrated loads.
pub const NEWTONS_PER_MEGANEWTON: f64 = 1e6;

/// Compute composite trapezoidal integration weights for a grid.
///
/// Handles non-uniform spacing. A single-point grid has zero measure, so its
/// weight is zero and integrals over it collapse to zero.
///
/// # Arguments
/// * `argvals` - Grid points (must be monotonically increasing)
///
/// # Returns
/// Vector of integration weights, one per grid point
pub fn trapezoid_weights(argvals: &[f64]) -> Vec<f64> {
    let n = argvals.len();
    if n < 2 {
        return vec![0.0; n];
    }

    let mut weights = vec![0.0; n];
    for i in 0..n {
        if i == 0 {
            weights[i] = (argvals[1] - argvals[0]) / 2.0;
        } else if i == n - 1 {
            weights[i] = (argvals[n - 1] - argvals[n - 2]) / 2.0;
        } else {
            weights[i] = (argvals[i + 1] - argvals[i - 1]) / 2.0;
        }
    }
    weights
}

/// Maximum of a slice, treating any non-finite entry as poisoning the result.
///
/// Returns `f64::NAN` for an empty slice or when any entry is not finite, so
/// a pathological realization can be detected and skipped by callers.
pub fn finite_max(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if !v.is_finite() {
            return f64::NAN;
        }
        if v > max {
            max = v;
        }
    }
    max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trapezoid_weights_uniform_sum() {
        let argvals = vec![0.0, 0.25, 0.5, 0.75, 1.0];
        let weights = trapezoid_weights(&argvals);
        let sum: f64 = weights.iter().sum();
        assert!((sum - 1.0).abs() < NUMERICAL_EPS);
    }

    #[test]
    fn test_trapezoid_weights_nonuniform_sum() {
        let argvals = vec![0.0, 0.1, 0.5, 1.0];
        let weights = trapezoid_weights(&argvals);
        let sum: f64 = weights.iter().sum();
        assert!((sum - 1.0).abs() < NUMERICAL_EPS);
    }

    #[test]
    fn test_trapezoid_weights_single_point_is_zero_measure() {
        let weights = trapezoid_weights(&[5.0]);
        assert_eq!(weights, vec![0.0]);
    }

    #[test]
    fn test_trapezoid_weights_two_points() {
        let weights = trapezoid_weights(&[0.0, 2.0]);
        assert_eq!(weights, vec![1.0, 1.0]);
    }

    #[test]
    fn test_finite_max_plain() {
        assert_eq!(finite_max(&[1.0, 3.0, 2.0]), 3.0);
        assert_eq!(finite_max(&[-2.0, -5.0]), -2.0);
    }

    #[test]
    fn test_finite_max_poisoned() {
        assert!(finite_max(&[1.0, f64::NAN, 2.0]).is_nan());
        assert!(finite_max(&[1.0, f64::INFINITY]).is_nan());
        assert!(finite_max(&[]).is_nan());
    }
}
