//! Random wave-field synthesis.
//!
//! A sea state's Gaussian surface is represented as a finite sum of
//! sinusoidal components, one per frequency bin, with two independent
//! zero-mean Gaussian quadrature amplitudes per bin of variance
//! `density(f) * df`. Evaluating that sum over the centered time grid is an
//! unnormalized inverse DFT, so each output series costs one FFT instead of
//! an O(frequencies x time) double loop.
//!
//! Kinematics apply the linear-theory depth attenuation per component before
//! the transform: horizontal velocity scales each bin by
//! `omega cosh(k(z+d))/sinh(kd)` in phase with the surface, and acceleration
//! by a further `omega` in quadrature. Samples above the instantaneous
//! surface are masked to zero.
//!
//! # Conditioning
//!
//! For importance sampling the synthesizer can focus a crest of expected
//! height `a` at `t = 0`: the cosine-quadrature amplitude of every bin is
//! mean-shifted by `a * density(f) * df / m0`, which superposes the
//! spectrum-shaped mean crest on the unchanged random fluctuation. With
//! `a = 0` the draw is bit-identical to the unconditional path under the
//! same seed.
//!
//! # Determinism
//!
//! Every realization owns a `StdRng` seeded only by its own seed; identical
//! arguments reproduce bit-identical output regardless of call order or
//! parallel execution.

use crate::dispersion::{velocity_attenuation, wavenumber};
use crate::error::WaveSimError;
use crate::grid::{DepthGrid, TimeGrid};
use crate::helpers::finite_max;
use crate::matrix::TraceMatrix;
use crate::spectrum::SeaState;
use num_complex::Complex;
use rand::prelude::*;
use rand_distr::Normal;
use rustfft::FftPlanner;

/// How a realization's randomness is constrained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conditioning {
    /// Plain stationary draw from the sea state.
    Unconditional,
    /// Focus a crest of expected height `a` [m] at `t = 0`, superposed on
    /// the unconditional fluctuation.
    Crest(f64),
}

impl Conditioning {
    /// The crest amplitude; zero when unconditional.
    #[inline]
    pub fn amplitude(&self) -> f64 {
        match *self {
            Conditioning::Unconditional => 0.0,
            Conditioning::Crest(a) => a,
        }
    }

    fn validate(&self) -> Result<(), WaveSimError> {
        let a = self.amplitude();
        if !a.is_finite() || a < 0.0 {
            return Err(WaveSimError::InvalidSeaState(format!(
                "conditioning amplitude must be finite and non-negative, got {}",
                a
            )));
        }
        Ok(())
    }
}

/// One finite-duration sample path of a sea state: surface elevation plus
/// horizontal velocity and acceleration at every depth level.
///
/// Kinematics matrices have one row per depth level and one column per time
/// sample. Realizations are created per Monte Carlo trial and usually
/// reduced to their maximum right away.
#[derive(Debug, Clone)]
pub struct WaveRealization {
    time: TimeGrid,
    depths: DepthGrid,
    eta: Vec<f64>,
    u: TraceMatrix,
    du: TraceMatrix,
}

impl WaveRealization {
    /// The time grid the realization is sampled on.
    #[inline]
    pub fn time(&self) -> &TimeGrid {
        &self.time
    }

    /// The depth levels kinematics are evaluated at.
    #[inline]
    pub fn depths(&self) -> &DepthGrid {
        &self.depths
    }

    /// Surface elevation [m] per time sample.
    #[inline]
    pub fn eta(&self) -> &[f64] {
        &self.eta
    }

    /// Horizontal velocity [m/s], one row per depth level.
    #[inline]
    pub fn u(&self) -> &TraceMatrix {
        &self.u
    }

    /// Horizontal acceleration [m/s^2], one row per depth level.
    #[inline]
    pub fn du(&self) -> &TraceMatrix {
        &self.du
    }

    /// Maximum surface elevation, or NaN if the record is poisoned.
    pub fn max_elevation(&self) -> f64 {
        finite_max(&self.eta)
    }
}

/// Per-bin quadrature amplitudes of one realization.
struct QuadratureDraw {
    /// Cosine-quadrature amplitudes (mean-shifted when conditioned).
    a: Vec<f64>,
    /// Sine-quadrature amplitudes.
    b: Vec<f64>,
}

fn draw_amplitudes(sea_state: &SeaState, conditioning: Conditioning, seed: u64) -> QuadratureDraw {
    let density = sea_state.density();
    let df = sea_state.grid().df();
    let m0 = sea_state.m0();
    let crest = conditioning.amplitude();

    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();

    let n = density.len();
    let mut a = vec![0.0; n];
    let mut b = vec![0.0; n];
    for k in 0..n {
        let bin_var = density[k] * df;
        let sd = bin_var.sqrt();
        let mean = crest * bin_var / m0;
        a[k] = mean + sd * rng.sample::<f64, _>(normal);
        b[k] = sd * rng.sample::<f64, _>(normal);
    }
    QuadratureDraw { a, b }
}

/// Evaluate `sum_k a_k cos(w_k t_j) + b_k sin(w_k t_j)` on the centered time
/// grid via one unnormalized inverse FFT.
///
/// With `t_j = (j - n/2) dt` and `w_k = 2 pi k / (n dt)`, the phase factor
/// `e^{i w_k t_j}` splits into `(-1)^k e^{2 pi i k j / n}` exactly, for any
/// record length.
fn centered_inverse_transform(coeffs: &[Complex<f64>]) -> Vec<f64> {
    let n = coeffs.len();
    let mut buf: Vec<Complex<f64>> = coeffs
        .iter()
        .enumerate()
        .map(|(k, &c)| if k % 2 == 0 { c } else { -c })
        .collect();
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_inverse(n);
    fft.process(&mut buf);
    buf.into_iter().map(|c| c.re).collect()
}

fn check_grids(sea_state: &SeaState, time: &TimeGrid) -> Result<(), WaveSimError> {
    if !sea_state.grid().matches_record(time) {
        return Err(WaveSimError::GridMismatch(format!(
            "sea state holds {} frequency bins at df={}, but the time grid needs {} bins at df={}",
            sea_state.grid().len(),
            sea_state.grid().df(),
            time.len(),
            1.0 / (time.len() as f64 * time.dt()),
        )));
    }
    Ok(())
}

/// Synthesize one surface-elevation record [m].
///
/// The sea state must have been evaluated on `FrequencyGrid::for_record` of
/// this time grid. This is the cheap path for crest statistics; use
/// [`synthesize_realization`] when kinematics are needed.
pub fn synthesize_elevation(
    sea_state: &SeaState,
    time: &TimeGrid,
    conditioning: Conditioning,
    seed: u64,
) -> Result<Vec<f64>, WaveSimError> {
    conditioning.validate()?;
    check_grids(sea_state, time)?;

    let draw = draw_amplitudes(sea_state, conditioning, seed);
    let coeffs: Vec<Complex<f64>> = draw
        .a
        .iter()
        .zip(draw.b.iter())
        .map(|(&a, &b)| Complex::new(a, -b))
        .collect();
    Ok(centered_inverse_transform(&coeffs))
}

/// Synthesize one full realization: elevation plus kinematics at every
/// depth level.
///
/// The depth grid must start below the still-water line; the water depth is
/// its lowest level. Levels above the instantaneous surface are masked to
/// zero velocity and acceleration.
pub fn synthesize_realization(
    sea_state: &SeaState,
    time: &TimeGrid,
    depths: &DepthGrid,
    conditioning: Conditioning,
    seed: u64,
) -> Result<WaveRealization, WaveSimError> {
    conditioning.validate()?;
    check_grids(sea_state, time)?;

    let z_values = depths.values();
    if z_values[0] >= 0.0 {
        return Err(WaveSimError::InvalidGrid(format!(
            "depth grid must start below the still-water line, got z_min = {}",
            z_values[0]
        )));
    }
    let water_depth = -z_values[0];

    let draw = draw_amplitudes(sea_state, conditioning, seed);
    let n_t = time.len();
    let n_z = z_values.len();

    let surface_coeffs: Vec<Complex<f64>> = draw
        .a
        .iter()
        .zip(draw.b.iter())
        .map(|(&a, &b)| Complex::new(a, -b))
        .collect();
    let eta = centered_inverse_transform(&surface_coeffs);

    // one dispersion solve per bin, shared by all depth levels
    let omega = sea_state.grid().angular();
    let wavenumbers: Vec<f64> = omega.iter().map(|&om| wavenumber(om, water_depth)).collect();

    let mut u = TraceMatrix::zeros(n_z, n_t);
    let mut du = TraceMatrix::zeros(n_z, n_t);
    let mut u_coeffs = vec![Complex::new(0.0, 0.0); n_t];
    let mut du_coeffs = vec![Complex::new(0.0, 0.0); n_t];

    for (i, &z) in z_values.iter().enumerate() {
        for k in 0..n_t {
            let transfer = omega[k] * velocity_attenuation(wavenumbers[k], z, water_depth);
            // velocity in phase with the surface, acceleration in quadrature
            u_coeffs[k] = Complex::new(transfer * draw.a[k], -transfer * draw.b[k]);
            du_coeffs[k] = Complex::new(
                omega[k] * transfer * draw.b[k],
                omega[k] * transfer * draw.a[k],
            );
        }
        let u_row = centered_inverse_transform(&u_coeffs);
        let du_row = centered_inverse_transform(&du_coeffs);

        let u_out = u.row_mut(i);
        for (j, &value) in u_row.iter().enumerate() {
            u_out[j] = if z > eta[j] { 0.0 } else { value };
        }
        let du_out = du.row_mut(i);
        for (j, &value) in du_row.iter().enumerate() {
            du_out[j] = if z > eta[j] { 0.0 } else { value };
        }
    }

    Ok(WaveRealization {
        time: time.clone(),
        depths: depths.clone(),
        eta,
        u,
        du,
    })
}
