//! # Pipeline Orchestration
//!
//! Wires producer → relay → aggregator for one run and reconciles the
//! three outcomes into a single result.
//!
//! The aggregator runs inline in the caller's task; the other two stages
//! are joined afterwards. If the aggregator aborts, dropping its inbound
//! receiver unwinds the upstream stages (their next send fails), so the
//! joins below cannot hang.

use crate::aggregator::run_aggregator;
use crate::codec::MessageCodec;
use crate::config::PipelineConfig;
use crate::errors::PipelineError;
use crate::policy::BernoulliPolicy;
use crate::producer::spawn_producer;
use crate::relay::spawn_relay;
use echo_types::RunSummary;
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::debug;

/// Run one complete pipeline over `config` and return the final summary.
///
/// # Errors
///
/// Returns the aggregator's error if it aborted, otherwise any error a
/// stage task reported. A run that failed anywhere reports no summary:
/// partial aggregates are discarded rather than returned.
pub async fn run_pipeline<C>(
    config: &PipelineConfig,
    codec: Arc<C>,
) -> Result<RunSummary, PipelineError>
where
    C: MessageCodec + 'static,
{
    let policy = BernoulliPolicy::new(config.duplication.probability, config.duplication.seed);

    debug!(
        message_count = config.message_count,
        probability = config.duplication.probability,
        max_extra_copies = config.duplication.max_extra_copies,
        "starting pipeline run"
    );

    let (produced, producer) = spawn_producer(
        config.message_count,
        Arc::clone(&codec),
        config.channel_capacity,
    );
    let (relayed, relay) = spawn_relay(
        produced,
        policy,
        config.duplication.max_extra_copies,
        config.channel_capacity,
    );

    let aggregated = run_aggregator(relayed, codec.as_ref()).await;

    // Join the stage tasks before deciding the outcome; both have
    // terminated (or will promptly) once the aggregator returned.
    let producer_outcome = stage_outcome(producer.await, "producer");
    let relay_outcome = stage_outcome(relay.await, "relay");

    let summary = aggregated?;
    producer_outcome?;
    relay_outcome?;
    Ok(summary)
}

fn stage_outcome(
    joined: Result<Result<(), PipelineError>, JoinError>,
    stage: &'static str,
) -> Result<(), PipelineError> {
    match joined {
        Ok(outcome) => outcome,
        Err(_) => Err(PipelineError::Internal(stage)),
    }
}
