//! # Deduplicating Aggregator
//!
//! The receiving end of the pipeline: opens each envelope and folds it
//! into a running sum behind a monotonic-timestamp filter.
//!
//! The filter is sufficient for exactly-once aggregation here because
//! every genuine message carries a strictly increasing timestamp, every
//! duplicate repeats one, and the transport never reorders across
//! distinct-timestamp boundaries. Accepting only a strictly later
//! timestamp therefore admits each distinct message exactly once, no
//! matter how many copies arrive.

use crate::codec::MessageCodec;
use crate::errors::PipelineError;
use echo_types::{Envelope, RunSummary, Timestamp};
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Consume `inbound` until end-of-stream and return the final summary.
///
/// Runs as the caller's consumer loop, not a spawned task. Every
/// observed envelope counts toward `total_observed`; only envelopes
/// whose timestamp is strictly later than the last accepted one are
/// folded into `final_sum`.
///
/// # Errors
///
/// Returns `PipelineError::Integrity` on the first envelope that fails
/// to decode. A corrupted envelope is never silently dropped: the run
/// aborts and the partial aggregate is discarded.
pub async fn run_aggregator<C>(
    mut inbound: mpsc::Receiver<Envelope>,
    codec: &C,
) -> Result<RunSummary, PipelineError>
where
    C: MessageCodec,
{
    let mut final_sum = 0u64;
    let mut total_observed = 0u64;
    let mut last_accepted = Timestamp::ZERO;

    while let Some(envelope) = inbound.recv().await {
        let message = codec.decode(&envelope)?;
        total_observed += 1;

        if message.timestamp > last_accepted {
            final_sum += message.value;
            last_accepted = message.timestamp;
        } else {
            trace!(timestamp = %message.timestamp, "duplicate discarded");
        }
    }

    debug!(final_sum, total_observed, "inbound queue drained");
    Ok(RunSummary {
        final_sum,
        total_observed,
    })
}
