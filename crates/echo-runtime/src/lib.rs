//! # EchoRelay Experiment Runtime
//!
//! The thin driver around the pipeline: builds a fresh envelope codec
//! per run, executes the pipeline, and reports the outcome with elapsed
//! wall-clock time. The pipeline itself is a black box behind
//! [`echo_pipeline::run_pipeline`]; nothing in this crate touches its
//! internals.

use echo_pipeline::{
    run_pipeline, DuplicationConfig, EnvelopeCodec, PipelineConfig, PipelineError,
    DEFAULT_CHANNEL_CAPACITY,
};
use echo_types::RunSummary;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Driver configuration, loaded from defaults plus environment
/// overrides.
#[derive(Clone, Copy, Debug)]
pub struct RuntimeConfig {
    /// Distinct messages per experiment run.
    pub message_count: u64,
    /// Hard cap on extra copies per message at the relay.
    pub max_extra_copies: u32,
    /// Base RNG seed; `None` draws a fresh one per sweep.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            message_count: 100_000,
            max_extra_copies: 10,
            seed: None,
        }
    }
}

/// Outcome of one experiment run.
#[derive(Debug, Clone, Copy)]
pub struct ExperimentReport {
    /// Duplication probability used for this run.
    pub probability: f64,
    /// The aggregator's final state.
    pub summary: RunSummary,
    /// Wall-clock time from first message to drained queue.
    pub elapsed: Duration,
}

/// Execute one pipeline run with fresh key material.
///
/// The seed fully determines the duplication pattern, so a logged seed
/// makes any run reproducible.
///
/// # Errors
///
/// Propagates any `PipelineError` the run aborted with.
pub async fn run_experiment(
    message_count: u64,
    probability: f64,
    max_extra_copies: u32,
    seed: u64,
) -> Result<ExperimentReport, PipelineError> {
    let run_id = Uuid::new_v4();
    let span = info_span!("experiment", %run_id, probability, seed);

    async move {
        let codec = Arc::new(EnvelopeCodec::new());
        let config = PipelineConfig {
            message_count,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            duplication: DuplicationConfig {
                probability,
                max_extra_copies,
                seed,
            },
        };

        let start = Instant::now();
        let summary = run_pipeline(&config, codec).await?;
        let elapsed = start.elapsed();

        info!(
            final_sum = summary.final_sum,
            total_observed = summary.total_observed,
            elapsed_ns = elapsed.as_nanos() as u64,
            "experiment complete"
        );

        Ok(ExperimentReport {
            probability,
            summary,
            elapsed,
        })
    }
    .instrument(span)
    .await
}
