//! Linear wave theory: the dispersion relation and depth attenuation.
//!
//! Each spectral component of angular frequency `omega` travels with a
//! wavenumber `k` satisfying `omega^2 = g k tanh(k d)` in water of depth `d`.
//! Horizontal velocity under a component of unit surface amplitude decays
//! with depth as `omega cosh(k (z + d)) / sinh(k d)`; acceleration carries
//! one more factor of `omega` and a quadrature phase, which the synthesizer
//! applies in the frequency domain.

use crate::helpers::GRAVITY;

/// Above this value of `k d` the hyperbolic ratio is numerically `e^{k z}`;
/// evaluating cosh/sinh directly would overflow long before accuracy suffers.
const DEEP_WATER_KD: f64 = 25.0;

/// Solve the finite-depth dispersion relation `omega^2 = g k tanh(k d)`.
///
/// Newton iteration from the deep-water guess `k = omega^2 / g`, which is an
/// upper bound on the root, so the iteration descends monotonically onto it.
///
/// # Arguments
/// * `omega` - Angular frequency [rad/s], strictly positive
/// * `depth` - Water depth [m], strictly positive
///
/// # Returns
/// Wavenumber [1/m]
pub fn wavenumber(omega: f64, depth: f64) -> f64 {
    let target = omega * omega;
    let mut k = target / GRAVITY;
    for _ in 0..50 {
        let kd = k * depth;
        let t = kd.tanh();
        let residual = GRAVITY * k * t - target;
        let slope = GRAVITY * (t + kd * (1.0 - t * t));
        let step = residual / slope;
        k -= step;
        if step.abs() <= 1e-14 + 1e-12 * k.abs() {
            break;
        }
    }
    k
}

/// Depth-attenuation factor for horizontal velocity.
///
/// `cosh(k (z + d)) / sinh(k d)`, evaluated with the deep-water asymptote
/// `e^{k z}` once `k d` is large. The profile is clamped at the still-water
/// line: levels above `z = 0` reuse the surface value, and whether they
/// contribute at all is decided by the synthesizer's surface masking.
///
/// # Arguments
/// * `k` - Wavenumber [1/m]
/// * `z` - Evaluation level [m], negative below the still-water line
/// * `depth` - Water depth [m]
pub fn velocity_attenuation(k: f64, z: f64, depth: f64) -> f64 {
    let zc = z.min(0.0);
    let kd = k * depth;
    if kd > DEEP_WATER_KD {
        (k * zc).exp()
    } else {
        (k * (zc + depth)).cosh() / kd.sinh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispersion_residual(k: f64, omega: f64, depth: f64) -> f64 {
        GRAVITY * k * (k * depth).tanh() - omega * omega
    }

    #[test]
    fn test_wavenumber_satisfies_dispersion_relation() {
        for &omega in &[0.2, 0.5, 1.0, 2.0, 6.0] {
            for &depth in &[10.0, 100.0, 1000.0] {
                let k = wavenumber(omega, depth);
                let residual = dispersion_residual(k, omega, depth);
                assert!(
                    residual.abs() < 1e-8 * omega * omega,
                    "omega={} depth={}: k={} residual={}",
                    omega,
                    depth,
                    k,
                    residual
                );
            }
        }
    }

    #[test]
    fn test_wavenumber_deep_water_limit() {
        // k d >> 1: k -> omega^2 / g
        let omega = 2.0;
        let k = wavenumber(omega, 1000.0);
        let deep = omega * omega / GRAVITY;
        assert!(((k - deep) / deep).abs() < 1e-6, "k={} deep={}", k, deep);
    }

    #[test]
    fn test_wavenumber_shallow_water_limit() {
        // k d << 1: omega = k sqrt(g d)
        let depth = 5.0;
        let omega = 0.05;
        let k = wavenumber(omega, depth);
        let shallow = omega / (GRAVITY * depth).sqrt();
        assert!(
            ((k - shallow) / shallow).abs() < 1e-2,
            "k={} shallow={}",
            k,
            shallow
        );
    }

    #[test]
    fn test_wavenumber_tiny_frequency_is_finite() {
        let k = wavenumber(1e-6, 100.0);
        assert!(k.is_finite() && k > 0.0);
    }

    #[test]
    fn test_velocity_attenuation_decays_with_depth() {
        let omega = 0.6;
        let depth = 100.0;
        let k = wavenumber(omega, depth);
        let surface = velocity_attenuation(k, 0.0, depth);
        let mid = velocity_attenuation(k, -50.0, depth);
        let bottom = velocity_attenuation(k, -100.0, depth);
        assert!(surface > mid && mid > bottom, "{} {} {}", surface, mid, bottom);
        assert!(bottom > 0.0);
    }

    #[test]
    fn test_velocity_attenuation_clamped_above_surface() {
        let k = wavenumber(0.6, 100.0);
        let at_surface = velocity_attenuation(k, 0.0, 100.0);
        let above = velocity_attenuation(k, 25.0, 100.0);
        assert_eq!(at_surface, above);
    }

    #[test]
    fn test_velocity_attenuation_deep_asymptote_is_continuous() {
        // straddle the kd threshold at fixed k: the exact ratio and the
        // asymptote must agree where the switch happens
        let k = 0.25;
        let z = -10.0;
        let exact = velocity_attenuation(k, z, DEEP_WATER_KD / k - 0.1);
        let asymptote = velocity_attenuation(k, z, DEEP_WATER_KD / k + 0.1);
        assert!(
            ((exact - asymptote) / exact).abs() < 1e-9,
            "discontinuity across deep-water switch: {} vs {}",
            exact,
            asymptote
        );
    }

    #[test]
    fn test_velocity_attenuation_no_overflow_at_high_frequency() {
        // 4 Hz sampling band reaches omega ~ 25 rad/s, kd ~ 6400
        let depth = 100.0;
        let omega = 25.0;
        let k = wavenumber(omega, depth);
        let v = velocity_attenuation(k, -100.0, depth);
        assert!(v.is_finite());
        assert!(v >= 0.0);
        let v0 = velocity_attenuation(k, 0.0, depth);
        assert!((v0 - 1.0).abs() < 1e-9, "deep-water surface factor ~1, got {}", v0);
    }
}
