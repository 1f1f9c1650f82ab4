//! Mining algorithms and their shared parameter/result contract.
//!
//! Every miner consumes an in-memory, validated [`SpmParameters`] and
//! produces plain pattern values (or streams them through a callback); no
//! miner touches serialization. Invalid configuration is rejected here,
//! synchronously, before any mining state is created.

mod contiguous;
mod distinct;
mod grasp;
mod simplify;

pub use contiguous::ContiguousMiner;
pub use distinct::DistinctMiner;
pub use grasp::GraspMiner;
pub use simplify::GraphSimplifier;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Configuration errors, raised before any mining begins.
#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    #[error("cannot mine patterns from an empty sequence database")]
    EmptyDatabase,
    #[error("minimum support must be at least 1")]
    InvalidMinSup,
    #[error("maximum gap must be at least 1 (1 = contiguous), got {0}")]
    InvalidMaxGap(usize),
    #[error("maximum redundancy must be within [0, 1], got {0}")]
    InvalidMaxRedundancy(f64),
}

/// Validated parameters shared by every mining algorithm.
///
/// `max_gap` defaults to 1 (contiguous) and `max_redundancy` to 0 (no
/// redundant pairs allowed); both only matter to the algorithms that read
/// them.
#[derive(Debug, Clone)]
pub struct SpmParameters {
    sequences: Vec<Vec<u32>>,
    min_sup: u32,
    max_gap: usize,
    max_redundancy: f64,
}

impl SpmParameters {
    pub fn new(sequences: Vec<Vec<u32>>, min_sup: u32) -> Result<Self, ParameterError> {
        if sequences.is_empty() {
            return Err(ParameterError::EmptyDatabase);
        }
        if min_sup == 0 {
            return Err(ParameterError::InvalidMinSup);
        }
        Ok(Self {
            sequences,
            min_sup,
            max_gap: 1,
            max_redundancy: 0.0,
        })
    }

    pub fn with_max_gap(mut self, max_gap: usize) -> Result<Self, ParameterError> {
        if max_gap < 1 {
            return Err(ParameterError::InvalidMaxGap(max_gap));
        }
        self.max_gap = max_gap;
        Ok(self)
    }

    pub fn with_max_redundancy(mut self, max_redundancy: f64) -> Result<Self, ParameterError> {
        if !(0.0..=1.0).contains(&max_redundancy) {
            return Err(ParameterError::InvalidMaxRedundancy(max_redundancy));
        }
        self.max_redundancy = max_redundancy;
        Ok(self)
    }

    pub fn sequences(&self) -> &[Vec<u32>] {
        &self.sequences
    }

    pub fn min_sup(&self) -> u32 {
        self.min_sup
    }

    pub fn max_gap(&self) -> usize {
        self.max_gap
    }

    pub fn max_redundancy(&self) -> f64 {
        self.max_redundancy
    }

    /// Minimum support as a fraction of the database size.
    pub fn min_sup_relative(&self) -> f64 {
        f64::from(self.min_sup) / self.sequences.len() as f64
    }
}

/// Cooperative cancellation handle.
///
/// Miners check the flag between outer-loop levels and between streamed
/// patterns; stopping keeps whatever was already produced and rolls nothing
/// back. This is a courtesy signal, not a concurrency primitive — each
/// mining invocation still owns its trie/graph exclusively.
#[derive(Debug, Clone, Default)]
pub struct StopFlag {
    stopped: Arc<AtomicBool>,
}

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the owning miner to stop at its next check point.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        !self.stopped.load(Ordering::Relaxed)
    }
}
