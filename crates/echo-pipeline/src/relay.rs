//! # Duplicating Relay
//!
//! Re-publishes every inbound envelope, then runs a bounded number of
//! independent duplication trials, emitting one extra byte-identical
//! copy per successful trial. Models a network hop whose only failure
//! mode is delivering the same packet more than once; it never loses,
//! reorders, or corrupts anything.
//!
//! A message and its duplicates are emitted in one contiguous burst
//! before the next inbound message is read, so relative order across
//! distinct messages is preserved.

use crate::errors::PipelineError;
use crate::policy::DuplicationPolicy;
use echo_types::Envelope;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Start the relay as a concurrent task.
///
/// Every envelope read from `inbound` is forwarded once, then up to
/// `max_extra_copies` additional times, with one independent policy
/// trial per extra-copy slot. The cap holds regardless of the policy,
/// so a single message can never be amplified unboundedly.
///
/// The relay closes its outbound queue exactly once, after `inbound`
/// reports end-of-stream and all in-flight duplicates are flushed.
pub fn spawn_relay<P>(
    mut inbound: mpsc::Receiver<Envelope>,
    mut policy: P,
    max_extra_copies: u32,
    capacity: usize,
) -> (mpsc::Receiver<Envelope>, JoinHandle<Result<(), PipelineError>>)
where
    P: DuplicationPolicy + 'static,
{
    let (tx, rx) = mpsc::channel(capacity.max(1));

    let handle = tokio::spawn(async move {
        while let Some(envelope) = inbound.recv().await {
            tx.send(envelope.clone())
                .await
                .map_err(|_| PipelineError::ChannelClosed("relay outbound"))?;

            let mut copies = 0u32;
            for _ in 0..max_extra_copies {
                if policy.should_duplicate() {
                    tx.send(envelope.clone())
                        .await
                        .map_err(|_| PipelineError::ChannelClosed("relay outbound"))?;
                    copies += 1;
                }
            }
            if copies > 0 {
                trace!(copies, "emitted duplicate copies");
            }
        }
        debug!("inbound queue drained, closing outbound queue");
        Ok(())
    });

    (rx, handle)
}
