//! Error types for configuration and estimation failures.
//!
//! Configuration problems (bad sea-state parameters, degenerate grids, a
//! proposal density that misses part of the target's support) fail fast and
//! are reported to the caller. Per-realization numerical failures are never
//! errors: the batch drivers skip and count them instead.

use thiserror::Error;

/// Errors produced by wave synthesis and tail estimation.
#[derive(Error, Debug)]
pub enum WaveSimError {
    /// Sea-state parameters outside their physical domain.
    #[error("invalid sea state: {0}")]
    InvalidSeaState(String),

    /// Empty, non-monotonic, or otherwise unusable grid definition.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// Frequency grid does not match the time grid it must be synthesized on.
    #[error("grid mismatch: {0}")]
    GridMismatch(String),

    /// Importance-sampling proposal assigns zero density where the target
    /// density is positive.
    #[error("proposal density has zero mass at conditioning value {value} where target density is {target_density}")]
    ProposalSupport { value: f64, target_density: f64 },

    /// Importance-sampled estimate requested from samples generated without
    /// conditioning values.
    #[error("sample population has no conditioning values; importance weights are undefined")]
    UnconditionedSamples,

    /// No usable samples in the population.
    #[error("sample population is empty ({skipped} realizations skipped)")]
    EmptyPopulation { skipped: usize },

    /// A persisted trace table does not have the shape the current
    /// configuration requires.
    #[error("trace shape mismatch: stored {stored_rows}x{stored_cols}, expected {expected_rows}x{expected_cols}")]
    TraceShapeMismatch {
        stored_rows: usize,
        stored_cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },
}
