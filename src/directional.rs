//! Directional spreading extension of the JONSWAP spectrum.
//!
//! The frequency-direction density factors as `S(omega) * D(omega, phi)`,
//! where `S` is the angular-frequency JONSWAP form and `D` is a bimodal
//! wrapped-Gaussian spreading function: two symmetric peak directions either
//! side of the mean direction, with frequency-dependent separation and
//! angular width. The wrapped sum is truncated to a symmetric range of wrap
//! indices (201 terms), far beyond where the Gaussian tails underflow, and
//! the analytic normalization makes `D` integrate to one over direction at
//! every frequency.
//!
//! Only the frequency-domain synthesis path consumes spectra; this module is
//! an analysis surface (directional densities for callers to tabulate), not
//! a spatial-surface synthesizer.

use crate::error::WaveSimError;
use crate::matrix::TraceMatrix;
use crate::spectrum::{alt_density_omega, SpectrumModel};
use std::f64::consts::PI;

/// Number of wrap terms either side of zero in the wrapped-Gaussian sum.
///
/// Covers angular widths up to a few hundred radians. The width grows
/// rapidly below half the peak frequency, where the spreading tends to
/// uniform and the frequency density has already decayed to nothing.
const WRAP_TERMS: i64 = 100;

/// Bimodal wrapped-Gaussian spreading function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadingFn {
    /// Mean wave direction [rad].
    pub phi_m: f64,
    /// Limiting separation of the two directional peaks [rad].
    pub beta: f64,
    /// Peak separation shape exponent.
    pub nu: f64,
    /// Limiting angular width [rad].
    pub sig_l: f64,
    /// Angular width shape parameter [rad].
    pub sig_r: f64,
}

impl SpreadingFn {
    /// Validated constructor.
    ///
    /// Requires `sig_l > sig_r > 0`: the width `sigma(omega)` is bounded
    /// below by `sig_l - sig_r` over the whole frequency range, so this keeps
    /// it strictly positive everywhere.
    pub fn new(
        phi_m: f64,
        beta: f64,
        nu: f64,
        sig_l: f64,
        sig_r: f64,
    ) -> Result<Self, WaveSimError> {
        if !phi_m.is_finite() || !beta.is_finite() || !nu.is_finite() {
            return Err(WaveSimError::InvalidSeaState(format!(
                "spreading parameters must be finite, got phi_m={} beta={} nu={}",
                phi_m, beta, nu
            )));
        }
        if !(sig_r > 0.0) || !(sig_l > sig_r) {
            return Err(WaveSimError::InvalidSeaState(format!(
                "need sig_l > sig_r > 0 for a positive angular width, got sig_l={} sig_r={}",
                sig_l, sig_r
            )));
        }
        Ok(Self {
            phi_m,
            beta,
            nu,
            sig_l,
            sig_r,
        })
    }

    /// The classic-example parameter set (mean direction pi).
    pub fn classic() -> Self {
        Self {
            phi_m: PI,
            beta: 4.0,
            nu: 2.7,
            sig_l: 0.55,
            sig_r: 0.26,
        }
    }

    /// Evaluate `D(omega, phi)` for a peak angular frequency `omega_p`.
    ///
    /// Integrates to one over any full direction circle at every frequency.
    pub fn evaluate(&self, omega: f64, phi: f64, omega_p: f64) -> f64 {
        let ratio = omega_p / omega.abs();
        let separation = self.beta * (-self.nu * ratio.min(1.0)).exp() / 2.0;
        let peaks = [self.phi_m + separation, self.phi_m - separation];

        let sigma = self.sig_l - self.sig_r / 3.0 * (4.0 * ratio.powi(2) - ratio.powi(8));

        let norm = 1.0 / (2.0 * sigma * (2.0 * PI).sqrt());
        let mut sum = 0.0;
        for k in -WRAP_TERMS..=WRAP_TERMS {
            for &peak in &peaks {
                let arg = (phi - peak - 2.0 * PI * k as f64) / sigma;
                sum += (-0.5 * arg * arg).exp();
            }
        }
        norm * sum
    }
}

/// Frequency-direction spectral density.
///
/// Built from the angular-frequency JONSWAP parameterization, which is
/// point-evaluable; the standard (Hs, Tp) form renormalizes over a whole
/// grid and has no single-point density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalSpectrum {
    alpha: f64,
    omega_p: f64,
    gamma: f64,
    r: f64,
    spreading: SpreadingFn,
}

impl DirectionalSpectrum {
    /// Combine an [`SpectrumModel::AltJonswap`] with a spreading function.
    pub fn new(model: SpectrumModel, spreading: SpreadingFn) -> Result<Self, WaveSimError> {
        match model {
            SpectrumModel::AltJonswap {
                alpha,
                omega_p,
                gamma,
                r,
            } => Ok(Self {
                alpha,
                omega_p,
                gamma,
                r,
                spreading,
            }),
            SpectrumModel::Jonswap { .. } => Err(WaveSimError::InvalidSeaState(
                "directional spectra require the angular-frequency parameterization".into(),
            )),
        }
    }

    /// The spreading function.
    #[inline]
    pub fn spreading(&self) -> &SpreadingFn {
        &self.spreading
    }

    /// Peak angular frequency [rad/s].
    #[inline]
    pub fn omega_p(&self) -> f64 {
        self.omega_p
    }

    /// Point density `S(omega) * D(omega, phi)` [m^2 s/(rad^2)].
    pub fn evaluate(&self, omega: f64, phi: f64) -> f64 {
        alt_density_omega(omega, self.alpha, self.omega_p, self.gamma, self.r)
            * self.spreading.evaluate(omega, phi, self.omega_p)
    }

    /// Tabulate the density on a direction-by-frequency grid.
    ///
    /// Rows are directions, columns are angular frequencies, matching the
    /// orientation callers contour-plot.
    pub fn density(&self, omega_grid: &[f64], phi_grid: &[f64]) -> TraceMatrix {
        let mut out = TraceMatrix::zeros(phi_grid.len(), omega_grid.len());
        for (i, &phi) in phi_grid.iter().enumerate() {
            let row = out.row_mut(i);
            for (j, &om) in omega_grid.iter().enumerate() {
                row[j] = self.evaluate(om, phi);
            }
        }
        out
    }
}
