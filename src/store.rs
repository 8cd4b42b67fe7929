//! Repository contract for generated trace batches.
//!
//! Synthesizing thousands of realizations is expensive; callers often want
//! to reuse a previously generated elevation or load table instead of
//! regenerating it. That choice is modeled as an explicit store collaborator
//! rather than a flag: given a configuration key, a store either returns the
//! previously computed batch or signals absence, and the caller decides
//! whether to generate.
//!
//! The shape contract is strict. A fetched table must have exactly the
//! `(n_realizations, n_time)` shape the current configuration implies; any
//! mismatch is a hard error, never a silent truncation or padding. Durable
//! implementations (files, databases) additionally promise value round-trips
//! within floating tolerance; the in-memory reference implementation is
//! exact.

use crate::error::WaveSimError;
use crate::matrix::TraceMatrix;
use std::collections::HashMap;

/// Store of realization-by-time trace tables keyed by configuration.
pub trait TraceStore {
    /// Fetch the batch stored under `key`, or `None` if absent.
    ///
    /// Fails with [`WaveSimError::TraceShapeMismatch`] if a stored batch
    /// exists but its shape differs from `expected_shape`.
    fn fetch(
        &self,
        key: &str,
        expected_shape: (usize, usize),
    ) -> Result<Option<TraceMatrix>, WaveSimError>;

    /// Store a batch under `key`, replacing any previous one.
    fn persist(&mut self, key: &str, traces: TraceMatrix);
}

/// Exact in-memory reference implementation.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: HashMap<String, TraceMatrix>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored batches.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the store holds nothing.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl TraceStore for MemoryStore {
    fn fetch(
        &self,
        key: &str,
        expected_shape: (usize, usize),
    ) -> Result<Option<TraceMatrix>, WaveSimError> {
        match self.tables.get(key) {
            None => Ok(None),
            Some(table) => {
                table.expect_shape(expected_shape.0, expected_shape.1)?;
                Ok(Some(table.clone()))
            }
        }
    }

    fn persist(&mut self, key: &str, traces: TraceMatrix) {
        self.tables.insert(key.to_string(), traces);
    }
}
