//! Extreme-value estimation of per-realization maxima.
//!
//! Each Monte Carlo trial is reduced to one [`ExtremeSample`]: the maximum
//! of a realization's elevation or base shear, paired with the conditioning
//! crest height used to generate it (absent for unconditional draws). The
//! [`TailEstimator`] owns the accumulated population and produces empirical
//! tail CDFs:
//!
//! - the crude estimator `CDF(x) = #(samples < x) / N`, unbiased but
//!   data-starved beyond the sample range: thresholds with fewer
//!   exceedances than a configurable minimum report NaN instead of a false
//!   0 or 1;
//! - the importance-sampled estimator
//!   `CDF(x) = sum([sample < x] w) / sum(w)` with likelihood-ratio weights
//!   `w = f(c)/g(c)` for target density `f` and proposal density `g`, which
//!   recovers the crude estimate with far fewer samples in the tail when
//!   the proposal over-samples large conditioning values.
//!
//! A short-duration maximum extends to a longer reference period through
//! the block-maxima power rule `CDF_long = CDF_short^m`, `m` real-valued;
//! the closed-form Rayleigh crest law (valid for a narrow-band Gaussian
//! surface) raised to the same power is the validation target.

use crate::error::WaveSimError;
use rand::prelude::*;

/// Default minimum number of exceedances before a tail estimate at a
/// threshold is considered supported by data.
pub const DEFAULT_MIN_TAIL_COUNT: usize = 5;

/// Rayleigh crest-height probability density for significant wave height
/// `hs`: `16 c / hs^2 exp(-8 c^2 / hs^2)`, zero for negative crests.
pub fn rayleigh_pdf(c: f64, hs: f64) -> f64 {
    if c < 0.0 {
        return 0.0;
    }
    16.0 * c / (hs * hs) * (-8.0 * c * c / (hs * hs)).exp()
}

/// Rayleigh crest-height CDF: `1 - exp(-8 x^2 / hs^2)`, zero for negative
/// thresholds. The scale is tied to `hs` through the zeroth spectral moment
/// (`hs^2/16 = m0`).
pub fn rayleigh_cdf(x: f64, hs: f64) -> f64 {
    if x < 0.0 {
        return 0.0;
    }
    1.0 - (-8.0 * x * x / (hs * hs)).exp()
}

/// The closed-form reference: Rayleigh single-crest CDF raised to the
/// number of waves in the reference period.
pub fn rayleigh_reference(thresholds: &[f64], hs: f64, waves: f64) -> Vec<f64> {
    thresholds
        .iter()
        .map(|&x| rayleigh_cdf(x, hs).powf(waves))
        .collect()
}

/// One realization reduced to its maximum and the conditioning crest height
/// it was generated with (None for unconditional sampling).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtremeSample {
    /// The realization's maximum (elevation [m] or base shear [MN]).
    pub maximum: f64,
    /// Conditioning crest height [m], if the draw was conditioned.
    pub conditioning: Option<f64>,
}

/// Uniform proposal over conditioning crest heights, `c = CoH * hs` with
/// `CoH` uniform on `[min_coh, max_coh]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformCrestProposal {
    min_coh: f64,
    max_coh: f64,
    hs: f64,
}

impl UniformCrestProposal {
    /// Proposal over `[min_coh, max_coh] * hs` crest heights.
    pub fn new(min_coh: f64, max_coh: f64, hs: f64) -> Result<Self, WaveSimError> {
        if !(hs > 0.0) || !hs.is_finite() {
            return Err(WaveSimError::InvalidSeaState(format!(
                "hs must be positive, got {}",
                hs
            )));
        }
        if !min_coh.is_finite() || !(max_coh > min_coh) || min_coh < 0.0 {
            return Err(WaveSimError::InvalidSeaState(format!(
                "need 0 <= min_coh < max_coh, got [{}, {}]",
                min_coh, max_coh
            )));
        }
        Ok(Self {
            min_coh,
            max_coh,
            hs,
        })
    }

    /// Proposal density g(c) of a crest height [1/m].
    pub fn density(&self, c: f64) -> f64 {
        let (lo, hi) = (self.min_coh * self.hs, self.max_coh * self.hs);
        if c < lo || c > hi {
            0.0
        } else {
            1.0 / ((self.max_coh - self.min_coh) * self.hs)
        }
    }

    /// Draw one crest height from the proposal.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min_coh..self.max_coh) * self.hs
    }

    /// Crest bounds [m].
    pub fn bounds(&self) -> (f64, f64) {
        (self.min_coh * self.hs, self.max_coh * self.hs)
    }
}

/// Accumulates per-realization maxima and produces tail CDF estimates.
///
/// Owns its sample population exclusively; workers reduce their realizations
/// to samples first and the population is filled only after they finish.
#[derive(Debug, Clone)]
pub struct TailEstimator {
    samples: Vec<ExtremeSample>,
    skipped: usize,
    min_tail_count: usize,
}

impl Default for TailEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl TailEstimator {
    /// Empty estimator with the default data-starvation guard.
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
            skipped: 0,
            min_tail_count: DEFAULT_MIN_TAIL_COUNT,
        }
    }

    /// Override the minimum exceedance count required for a valid tail
    /// estimate at a threshold.
    pub fn with_min_tail_count(mut self, min_tail_count: usize) -> Self {
        self.min_tail_count = min_tail_count;
        self
    }

    /// Add one realization's sample.
    pub fn push(&mut self, sample: ExtremeSample) {
        self.samples.push(sample);
    }

    /// Count one realization that failed numerically and was skipped.
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Number of usable samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of realizations skipped for numerical failures.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// The accumulated maxima, in insertion order.
    pub fn maxima(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.maximum).collect()
    }

    fn ensure_nonempty(&self) -> Result<(), WaveSimError> {
        if self.samples.is_empty() {
            return Err(WaveSimError::EmptyPopulation {
                skipped: self.skipped,
            });
        }
        Ok(())
    }

    /// Crude empirical CDF at the given thresholds.
    ///
    /// Thresholds with fewer than the configured minimum number of
    /// exceedances report NaN: the data cannot support a tail estimate
    /// there.
    pub fn crude_cdf(&self, thresholds: &[f64]) -> Result<Vec<f64>, WaveSimError> {
        self.ensure_nonempty()?;
        let n = self.samples.len();
        Ok(thresholds
            .iter()
            .map(|&x| {
                let below = self.samples.iter().filter(|s| s.maximum < x).count();
                if n - below < self.min_tail_count {
                    f64::NAN
                } else {
                    below as f64 / n as f64
                }
            })
            .collect())
    }

    /// Likelihood-ratio weights `w = f(c)/g(c)` for the accumulated
    /// conditioning values.
    ///
    /// Fails if any sample lacks a conditioning value, or if the proposal
    /// has zero density at a conditioning value where the target does not.
    pub fn importance_weights<F, G>(
        &self,
        target: F,
        proposal: G,
    ) -> Result<Vec<f64>, WaveSimError>
    where
        F: Fn(f64) -> f64,
        G: Fn(f64) -> f64,
    {
        self.samples
            .iter()
            .map(|s| {
                let c = s.conditioning.ok_or(WaveSimError::UnconditionedSamples)?;
                let f = target(c);
                let g = proposal(c);
                if g <= 0.0 {
                    if f > 0.0 {
                        return Err(WaveSimError::ProposalSupport {
                            value: c,
                            target_density: f,
                        });
                    }
                    return Ok(0.0);
                }
                Ok(f / g)
            })
            .collect()
    }

    /// Importance-sampled empirical CDF at the given thresholds.
    ///
    /// Converges to the crude estimator for any proposal whose support
    /// covers the target's; with `g = f` the weights collapse to one and the
    /// two estimators coincide exactly. The data-starvation guard counts raw
    /// exceedances, as for the crude estimator.
    pub fn importance_cdf<F, G>(
        &self,
        thresholds: &[f64],
        target: F,
        proposal: G,
    ) -> Result<Vec<f64>, WaveSimError>
    where
        F: Fn(f64) -> f64,
        G: Fn(f64) -> f64,
    {
        self.ensure_nonempty()?;
        let weights = self.importance_weights(target, proposal)?;
        let total: f64 = weights.iter().sum();
        if !(total > 0.0) || !total.is_finite() {
            return Err(WaveSimError::EmptyPopulation {
                skipped: self.skipped,
            });
        }
        Ok(thresholds
            .iter()
            .map(|&x| {
                let mut below_weight = 0.0;
                let mut exceedances = 0usize;
                for (s, &w) in self.samples.iter().zip(weights.iter()) {
                    if s.maximum < x {
                        below_weight += w;
                    } else {
                        exceedances += 1;
                    }
                }
                if exceedances < self.min_tail_count {
                    f64::NAN
                } else {
                    below_weight / total
                }
            })
            .collect())
    }
}

/// Extend a short-duration maximum's CDF to a longer reference period of
/// `blocks = T_long / T_short` independent blocks: `CDF^blocks`, with a
/// real-valued block count. NaN entries (data-starved thresholds) stay NaN.
pub fn extrapolate_cdf(short_cdf: &[f64], blocks: f64) -> Result<Vec<f64>, WaveSimError> {
    if !(blocks > 0.0) || !blocks.is_finite() {
        return Err(WaveSimError::InvalidSeaState(format!(
            "block count must be positive and finite, got {}",
            blocks
        )));
    }
    Ok(short_cdf.iter().map(|&p| p.powf(blocks)).collect())
}
