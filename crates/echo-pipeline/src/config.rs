//! Configuration for one pipeline run.

use crate::DEFAULT_CHANNEL_CAPACITY;
use serde::{Deserialize, Serialize};

/// Pipeline configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// How many distinct messages the producer emits
    pub message_count: u64,
    /// Slots per bounded transport queue before backpressure
    pub channel_capacity: usize,
    /// Relay duplication behavior
    pub duplication: DuplicationConfig,
}

/// Relay duplication behavior
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DuplicationConfig {
    /// Per-trial probability of emitting an extra copy, in `[0, 1]`
    pub probability: f64,
    /// Hard cap on extra copies per message (bounded amplification)
    pub max_extra_copies: u32,
    /// Seed for the duplication RNG; same seed, same duplication pattern
    pub seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            message_count: 100_000,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            duplication: DuplicationConfig::default(),
        }
    }
}

impl Default for DuplicationConfig {
    fn default() -> Self {
        Self {
            probability: 0.0,
            max_extra_copies: 10,
            seed: 0,
        }
    }
}
