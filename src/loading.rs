//! Morison hydrodynamic loading.
//!
//! Per (time, depth) sample the load density on a vertical member is
//! `drag * |u| * u + inertia * du` [N/m]: quadratic drag plus linear
//! inertia. The transform is purely elementwise; no sample depends on its
//! neighbors in time or depth. Depth integration of the density by
//! trapezoid weights gives the base shear series, reported in meganewtons.

use crate::error::WaveSimError;
use crate::grid::DepthGrid;
use crate::helpers::{finite_max, trapezoid_weights, NEWTONS_PER_MEGANEWTON};
use crate::matrix::TraceMatrix;
use crate::synthesis::WaveRealization;
use std::f64::consts::PI;

/// Morison force coefficients per unit length of member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorisonCoeffs {
    /// Drag term coefficient [kg/m^2]: multiplies `|u| u`.
    pub drag: f64,
    /// Inertia term coefficient [kg/m]: multiplies `du`.
    pub inertia: f64,
}

impl MorisonCoeffs {
    /// Explicit coefficients.
    pub fn new(drag: f64, inertia: f64) -> Result<Self, WaveSimError> {
        if !drag.is_finite() || !inertia.is_finite() || drag < 0.0 || inertia < 0.0 {
            return Err(WaveSimError::InvalidSeaState(format!(
                "Morison coefficients must be finite and non-negative, got drag={} inertia={}",
                drag, inertia
            )));
        }
        Ok(Self { drag, inertia })
    }

    /// Coefficients for a circular cylinder of the given diameter:
    /// `drag = rho cd D / 2`, `inertia = rho cm pi D^2 / 4`.
    pub fn cylinder(rho: f64, cd: f64, cm: f64, diameter: f64) -> Result<Self, WaveSimError> {
        if !(rho > 0.0) || !(diameter > 0.0) {
            return Err(WaveSimError::InvalidSeaState(format!(
                "need positive density and diameter, got rho={} diameter={}",
                rho, diameter
            )));
        }
        Self::new(
            0.5 * rho * cd * diameter,
            rho * cm * PI * diameter * diameter / 4.0,
        )
    }
}

/// Depth-resolved load density with its depth-integrated base shear.
#[derive(Debug, Clone)]
pub struct LoadProfile {
    density: TraceMatrix,
    base_shear: Vec<f64>,
}

impl LoadProfile {
    /// Load density [N/m], one row per depth level.
    #[inline]
    pub fn density(&self) -> &TraceMatrix {
        &self.density
    }

    /// Depth-integrated base shear [MN] per time sample.
    #[inline]
    pub fn base_shear(&self) -> &[f64] {
        &self.base_shear
    }

    /// Maximum base shear, or NaN if the series is poisoned.
    pub fn max_base_shear(&self) -> f64 {
        finite_max(&self.base_shear)
    }
}

/// Elementwise Morison load density from velocity and acceleration fields.
///
/// Fails if the two fields disagree in shape.
pub fn load_density(
    u: &TraceMatrix,
    du: &TraceMatrix,
    coeffs: &MorisonCoeffs,
) -> Result<TraceMatrix, WaveSimError> {
    du.expect_shape(u.nrows(), u.ncols())?;
    let mut out = TraceMatrix::zeros(u.nrows(), u.ncols());
    let (u_flat, du_flat, out_flat) = (u.as_slice(), du.as_slice(), out.as_mut_slice());
    for idx in 0..u_flat.len() {
        let v = u_flat[idx];
        out_flat[idx] = coeffs.drag * v.abs() * v + coeffs.inertia * du_flat[idx];
    }
    Ok(out)
}

/// Depth-integrate a load density to base shear [MN].
///
/// A single-level depth grid has zero vertical measure; its integral is
/// identically zero, which is flagged as a warning rather than an error.
pub fn base_shear(density: &TraceMatrix, depths: &DepthGrid) -> Result<Vec<f64>, WaveSimError> {
    if density.nrows() != depths.len() {
        return Err(WaveSimError::InvalidGrid(format!(
            "load density has {} rows but the depth grid has {} levels",
            density.nrows(),
            depths.len()
        )));
    }
    if depths.len() < 2 {
        log::warn!(
            "single-level depth grid: base shear collapses to zero; refine the depth resolution"
        );
    }
    let weights = trapezoid_weights(depths.values());
    let n_t = density.ncols();
    let mut shear = vec![0.0; n_t];
    for (i, &w) in weights.iter().enumerate() {
        let row = density.row(i);
        for j in 0..n_t {
            shear[j] += w * row[j];
        }
    }
    for s in shear.iter_mut() {
        *s /= NEWTONS_PER_MEGANEWTON;
    }
    Ok(shear)
}

/// Morison load of a synthesized realization.
pub fn morison_load(
    realization: &WaveRealization,
    coeffs: &MorisonCoeffs,
) -> Result<LoadProfile, WaveSimError> {
    let density = load_density(realization.u(), realization.du(), coeffs)?;
    let shear = base_shear(&density, realization.depths())?;
    Ok(LoadProfile {
        density,
        base_shear: shear,
    })
}
