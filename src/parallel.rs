//! Conditional parallel iteration.
//!
//! Monte Carlo realizations are independent, so the batch drivers fan them
//! out with rayon when the `parallel` feature is enabled and fall back to
//! plain sequential iteration otherwise. Reproducibility does not depend on
//! the execution mode: every realization derives its randomness from its own
//! seed, and results are reduced only after each worker has finished.

/// Conditionally parallel iteration over an owned iterable (typically a range
/// of realization indices).
///
/// With the `parallel` feature this expands to `into_par_iter()`; without it,
/// to `into_iter()`.
///
/// # Examples
///
/// ```ignore
/// use crate::iter_maybe_parallel;
///
/// let maxima: Vec<f64> = iter_maybe_parallel!((0..n_realizations))
///     .map(|i| simulate_one(i))
///     .collect();
/// ```
#[macro_export]
macro_rules! iter_maybe_parallel {
    ($expr:expr) => {{
        #[cfg(feature = "parallel")]
        {
            use rayon::iter::IntoParallelIterator;

            IntoParallelIterator::into_par_iter($expr)
        }
        #[cfg(not(feature = "parallel"))]
        {
            IntoIterator::into_iter($expr)
        }
    }};
}

/// Conditionally parallel reference iteration over a slice.
#[macro_export]
macro_rules! slice_maybe_parallel {
    ($expr:expr) => {{
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            $expr.par_iter()
        }
        #[cfg(not(feature = "parallel"))]
        {
            $expr.iter()
        }
    }};
}

/// Conditionally parallel enumerated iteration over mutable row chunks.
///
/// Used to fill one realization's row (or one depth level's row) per worker
/// without sharing mutable state between them.
///
/// # Example
/// ```ignore
/// use crate::maybe_par_chunks_mut_enumerate;
///
/// maybe_par_chunks_mut_enumerate!(data, row_len, |(i, row)| {
///     fill_row(i, row);
/// });
/// ```
#[macro_export]
macro_rules! maybe_par_chunks_mut_enumerate {
    ($slice:expr, $chunk_size:expr, $closure:expr) => {{
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            $slice
                .par_chunks_mut($chunk_size)
                .enumerate()
                .for_each($closure);
        }
        #[cfg(not(feature = "parallel"))]
        {
            $slice
                .chunks_mut($chunk_size)
                .enumerate()
                .for_each($closure);
        }
    }};
}

// Re-export macros at module level
pub use iter_maybe_parallel;
pub use maybe_par_chunks_mut_enumerate;
pub use slice_maybe_parallel;
