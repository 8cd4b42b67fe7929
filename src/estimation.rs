//! Batch Monte Carlo drivers for crest and load tail estimation.
//!
//! A driver binds one configuration (sea state, grids, realization count,
//! base seed) and fans out the independent realizations (in parallel when
//! the `parallel` feature is on), reduces each to its maximum, and
//! accumulates the results into a [`TailEstimator`] after all workers have
//! finished. Nothing mutable is shared mid-flight, and each realization's
//! random stream is keyed only by its own derived seed, so results are
//! identical at any degree of parallelism.
//!
//! A realization whose maximum comes back non-finite is skipped and counted,
//! never allowed to poison the aggregate.

use crate::error::WaveSimError;
use crate::extremes::{ExtremeSample, TailEstimator, UniformCrestProposal, DEFAULT_MIN_TAIL_COUNT};
use crate::grid::{DepthGrid, TimeGrid};
use crate::iter_maybe_parallel;
use crate::loading::{morison_load, MorisonCoeffs};
use crate::spectrum::SeaState;
use crate::synthesis::{synthesize_elevation, synthesize_realization, Conditioning};
use rand::prelude::*;
#[cfg(feature = "parallel")]
use rayon::iter::ParallelIterator;

fn realization_seed(base: u64, index: usize) -> u64 {
    base.wrapping_add(index as u64)
}

/// Draw the conditioning crest heights for a conditioned batch up front,
/// from a stream separate from every realization's own.
fn draw_crests(proposal: &UniformCrestProposal, count: usize, base_seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(count as u64));
    (0..count).map(|_| proposal.sample(&mut rng)).collect()
}

/// Reduce per-realization results into an estimator, skipping non-finite
/// maxima.
fn reduce_samples(
    results: Vec<(f64, Option<f64>)>,
    min_tail_count: usize,
) -> TailEstimator {
    let mut estimator = TailEstimator::new().with_min_tail_count(min_tail_count);
    for (index, (maximum, conditioning)) in results.into_iter().enumerate() {
        if maximum.is_finite() {
            estimator.push(ExtremeSample {
                maximum,
                conditioning,
            });
        } else {
            log::debug!("realization {} produced a non-finite maximum; skipped", index);
            estimator.record_skipped();
        }
    }
    if estimator.skipped() > 0 {
        log::warn!(
            "{} of {} realizations skipped for numerical failures",
            estimator.skipped(),
            estimator.skipped() + estimator.len()
        );
    }
    estimator
}

/// Tail estimation of the per-realization maximum surface elevation.
#[derive(Debug, Clone)]
pub struct CrestDistEst {
    sea_state: SeaState,
    time: TimeGrid,
    n_realizations: usize,
    base_seed: u64,
    min_tail_count: usize,
}

impl CrestDistEst {
    /// Bind a configuration. The sea state must be evaluated on the
    /// synthesis grid of `time`.
    pub fn new(
        sea_state: SeaState,
        time: TimeGrid,
        n_realizations: usize,
        base_seed: u64,
    ) -> Result<Self, WaveSimError> {
        if n_realizations == 0 {
            return Err(WaveSimError::InvalidSeaState(
                "realization count must be positive".into(),
            ));
        }
        if !sea_state.grid().matches_record(&time) {
            return Err(WaveSimError::GridMismatch(
                "sea state is not evaluated on the synthesis grid of the time grid".into(),
            ));
        }
        Ok(Self {
            sea_state,
            time,
            n_realizations,
            base_seed,
            min_tail_count: DEFAULT_MIN_TAIL_COUNT,
        })
    }

    /// Override the tail data-starvation guard passed to the estimator.
    pub fn with_min_tail_count(mut self, min_tail_count: usize) -> Self {
        self.min_tail_count = min_tail_count;
        self
    }

    /// Run unconditional realizations and collect their maximum crests.
    pub fn run(&self) -> Result<TailEstimator, WaveSimError> {
        let results: Vec<(f64, Option<f64>)> = iter_maybe_parallel!((0..self.n_realizations))
            .map(|i| {
                let seed = realization_seed(self.base_seed, i);
                let maximum =
                    match synthesize_elevation(&self.sea_state, &self.time, Conditioning::Unconditional, seed)
                    {
                        Ok(eta) => crate::helpers::finite_max(&eta),
                        Err(_) => f64::NAN,
                    };
                (maximum, None)
            })
            .collect();
        Ok(reduce_samples(results, self.min_tail_count))
    }

    /// Run conditioned realizations, one per crest height drawn from the
    /// proposal, and collect (maximum, conditioning) pairs for importance
    /// reweighting.
    pub fn run_conditioned(
        &self,
        proposal: &UniformCrestProposal,
    ) -> Result<TailEstimator, WaveSimError> {
        let crests = draw_crests(proposal, self.n_realizations, self.base_seed);
        let results: Vec<(f64, Option<f64>)> = iter_maybe_parallel!((0..self.n_realizations))
            .map(|i| {
                let seed = realization_seed(self.base_seed, i);
                let crest = crests[i];
                let maximum = match synthesize_elevation(
                    &self.sea_state,
                    &self.time,
                    Conditioning::Crest(crest),
                    seed,
                ) {
                    Ok(eta) => crate::helpers::finite_max(&eta),
                    Err(_) => f64::NAN,
                };
                (maximum, Some(crest))
            })
            .collect();
        Ok(reduce_samples(results, self.min_tail_count))
    }
}

/// Tail estimation of the per-realization maximum base shear.
#[derive(Debug, Clone)]
pub struct LoadDistEst {
    sea_state: SeaState,
    time: TimeGrid,
    depths: DepthGrid,
    coeffs: MorisonCoeffs,
    n_realizations: usize,
    base_seed: u64,
    min_tail_count: usize,
}

impl LoadDistEst {
    /// Bind a configuration. The depth grid sets both the kinematics levels
    /// and the load integration resolution.
    pub fn new(
        sea_state: SeaState,
        time: TimeGrid,
        depths: DepthGrid,
        coeffs: MorisonCoeffs,
        n_realizations: usize,
        base_seed: u64,
    ) -> Result<Self, WaveSimError> {
        if n_realizations == 0 {
            return Err(WaveSimError::InvalidSeaState(
                "realization count must be positive".into(),
            ));
        }
        if !sea_state.grid().matches_record(&time) {
            return Err(WaveSimError::GridMismatch(
                "sea state is not evaluated on the synthesis grid of the time grid".into(),
            ));
        }
        Ok(Self {
            sea_state,
            time,
            depths,
            coeffs,
            n_realizations,
            base_seed,
            min_tail_count: DEFAULT_MIN_TAIL_COUNT,
        })
    }

    /// Override the tail data-starvation guard passed to the estimator.
    pub fn with_min_tail_count(mut self, min_tail_count: usize) -> Self {
        self.min_tail_count = min_tail_count;
        self
    }

    fn one_load_maximum(&self, conditioning: Conditioning, seed: u64) -> f64 {
        let realization =
            match synthesize_realization(&self.sea_state, &self.time, &self.depths, conditioning, seed)
            {
                Ok(r) => r,
                Err(_) => return f64::NAN,
            };
        match morison_load(&realization, &self.coeffs) {
            Ok(profile) => profile.max_base_shear(),
            Err(_) => f64::NAN,
        }
    }

    /// Run unconditional realizations and collect their maximum base shear.
    pub fn run(&self) -> Result<TailEstimator, WaveSimError> {
        let results: Vec<(f64, Option<f64>)> = iter_maybe_parallel!((0..self.n_realizations))
            .map(|i| {
                let seed = realization_seed(self.base_seed, i);
                (self.one_load_maximum(Conditioning::Unconditional, seed), None)
            })
            .collect();
        Ok(reduce_samples(results, self.min_tail_count))
    }

    /// Run crest-conditioned realizations for importance-sampled load tails.
    pub fn run_conditioned(
        &self,
        proposal: &UniformCrestProposal,
    ) -> Result<TailEstimator, WaveSimError> {
        let crests = draw_crests(proposal, self.n_realizations, self.base_seed);
        let results: Vec<(f64, Option<f64>)> = iter_maybe_parallel!((0..self.n_realizations))
            .map(|i| {
                let seed = realization_seed(self.base_seed, i);
                let crest = crests[i];
                (
                    self.one_load_maximum(Conditioning::Crest(crest), seed),
                    Some(crest),
                )
            })
            .collect();
        Ok(reduce_samples(results, self.min_tail_count))
    }
}
