//! # Bounded-Queue Backpressure
//!
//! The queues are the pipeline's only synchronization: a full queue
//! must block its writer until the reader frees a slot, without dropping
//! or reordering anything. These flows squeeze a 100-message stream
//! through 4-slot queues to prove it.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use echo_pipeline::{
        run_aggregator, spawn_producer, spawn_relay, BernoulliPolicy, MessageCodec, PlainCodec,
    };
    use echo_types::Timestamp;
    use tokio::time::sleep;

    const TINY_CAPACITY: usize = 4;
    const STREAM_LEN: u64 = 100;

    #[tokio::test]
    async fn test_producer_blocks_without_reader() {
        let (mut rx, handle) = spawn_producer(STREAM_LEN, Arc::new(PlainCodec), TINY_CAPACITY);

        // Nobody reads: the producer fills the queue and parks on the
        // next send instead of completing.
        sleep(Duration::from_millis(100)).await;
        assert!(!handle.is_finished());

        // Draining releases it; every message arrives, in order.
        let mut previous: Option<Timestamp> = None;
        let mut received = 0u64;
        while let Some(envelope) = rx.recv().await {
            let message = PlainCodec.decode(&envelope).unwrap();
            if let Some(prev) = previous {
                assert!(message.timestamp > prev);
            }
            previous = Some(message.timestamp);
            received += 1;
        }

        assert_eq!(received, STREAM_LEN);
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_slow_consumer_loses_nothing() {
        let codec = Arc::new(PlainCodec);
        let (produced, producer) = spawn_producer(STREAM_LEN, Arc::clone(&codec), TINY_CAPACITY);
        let (mut relayed, relay) =
            spawn_relay(produced, BernoulliPolicy::new(0.0, 5), 0, TINY_CAPACITY);

        // A deliberately slow-starting, slowly draining consumer.
        sleep(Duration::from_millis(50)).await;
        let mut received = 0u64;
        let mut previous: Option<Timestamp> = None;
        while let Some(envelope) = relayed.recv().await {
            let message = codec.decode(&envelope).unwrap();
            if let Some(prev) = previous {
                assert!(message.timestamp > prev);
            }
            previous = Some(message.timestamp);
            received += 1;
            if received % 10 == 0 {
                sleep(Duration::from_millis(1)).await;
            }
        }

        assert_eq!(received, STREAM_LEN);
        producer.await.unwrap().unwrap();
        relay.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_slow_consumer_full_pipeline_aggregate() {
        // Same squeeze, but let the aggregator do the draining after a
        // late start; the summary must still be exact.
        let codec = Arc::new(PlainCodec);
        let (produced, producer) = spawn_producer(STREAM_LEN, Arc::clone(&codec), TINY_CAPACITY);
        let (relayed, relay) =
            spawn_relay(produced, BernoulliPolicy::new(1.0, 5), 2, TINY_CAPACITY);

        sleep(Duration::from_millis(50)).await;
        let summary = run_aggregator(relayed, codec.as_ref()).await.unwrap();

        assert_eq!(summary.final_sum, STREAM_LEN);
        assert_eq!(summary.total_observed, STREAM_LEN * 3);
        producer.await.unwrap().unwrap();
        relay.await.unwrap().unwrap();
    }
}
