//! # wavesim-core
//!
//! Stochastic simulation of ocean wave crests and hydrodynamic structural
//! loads, for extreme-value analysis in offshore design.
//!
//! The pipeline: a JONSWAP-family spectral density ([`spectrum`]) describes
//! a stationary sea state; the synthesizer ([`synthesis`]) turns it into
//! independent finite-duration realizations of surface elevation and linear
//! wave kinematics via an inverse-FFT component sum; the Morison transform
//! ([`loading`]) reduces kinematics to a depth-integrated base shear series;
//! and the tail estimator ([`extremes`], driven in batch by [`estimation`])
//! turns per-realization maxima into an empirical tail CDF, extrapolated to
//! long reference periods by the block-maxima power rule and validated
//! against the closed-form Rayleigh crest law.
//!
//! Rare-tail probabilities are expensive for crude Monte Carlo, so the
//! synthesizer supports crest-conditioned realizations: a conditioning
//! crest height is drawn from a biased proposal, focused at the center of
//! the record, and the estimator reweights the resulting maxima by the
//! likelihood ratio of the target and proposal densities to recover an
//! unbiased tail estimate from far fewer realizations.
//!
//! ## Data layout
//!
//! Trace tables are row-major [`matrix::TraceMatrix`] values: one row per
//! realization (or per depth level), one column per time sample.
//!
//! ## Reproducibility
//!
//! There is no global random state. Every realization derives its stream
//! from its own seed, so batches reproduce bit-identically at any degree of
//! parallelism.

#![allow(clippy::needless_range_loop)]
#![allow(clippy::too_many_arguments)]

pub mod parallel;

pub mod directional;
pub mod dispersion;
pub mod error;
pub mod estimation;
pub mod extremes;
pub mod grid;
pub mod helpers;
pub mod loading;
pub mod matrix;
pub mod spectrum;
pub mod store;
pub mod synthesis;

// Re-export the types most callers touch
pub use error::WaveSimError;
pub use estimation::{CrestDistEst, LoadDistEst};
pub use extremes::{
    extrapolate_cdf, rayleigh_cdf, rayleigh_pdf, rayleigh_reference, ExtremeSample, TailEstimator,
    UniformCrestProposal,
};
pub use grid::{DepthGrid, FrequencyGrid, TimeGrid};
pub use loading::{morison_load, LoadProfile, MorisonCoeffs};
pub use matrix::TraceMatrix;
pub use spectrum::{autocorrelation, spectral_moment, SeaState, SpectrumModel};
pub use store::{MemoryStore, TraceStore};
pub use synthesis::{
    synthesize_elevation, synthesize_realization, Conditioning, WaveRealization,
};
