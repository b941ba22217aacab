//! # Message Producer
//!
//! Emits a finite stream of unit-increment messages with strictly
//! increasing timestamps, sealed into envelopes, over a bounded queue.
//!
//! The producer owns its outbound queue: closing it (by dropping the
//! sole sender when the task returns) is the only end-of-stream signal
//! downstream stages get.

use crate::codec::MessageCodec;
use crate::errors::PipelineError;
use crate::SIM_TICK_MS;
use echo_types::{Envelope, Message, Timestamp};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Start the producer as a concurrent task.
///
/// Emits exactly `count` messages, each timestamped one simulated tick
/// after the previous, then closes the returned queue. A full queue
/// blocks the task until the consumer frees a slot.
///
/// Encoding failures are fatal: the task aborts, closing the queue early,
/// and the error is carried in the join handle.
pub fn spawn_producer<C>(
    count: u64,
    codec: Arc<C>,
    capacity: usize,
) -> (mpsc::Receiver<Envelope>, JoinHandle<Result<(), PipelineError>>)
where
    C: MessageCodec + 'static,
{
    let (tx, rx) = mpsc::channel(capacity.max(1));

    let handle = tokio::spawn(async move {
        let mut timestamp = Timestamp::now();
        for seq in 0..count {
            let message = Message::unit(timestamp);
            let envelope = codec.encode(&message)?;
            tx.send(envelope)
                .await
                .map_err(|_| PipelineError::ChannelClosed("producer outbound"))?;
            trace!(seq, %timestamp, "message published");
            timestamp = timestamp.advanced_by(SIM_TICK_MS);
        }
        debug!(count, "producer done, closing outbound queue");
        Ok(())
    });

    (rx, handle)
}
