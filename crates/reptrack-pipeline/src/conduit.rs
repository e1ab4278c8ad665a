//! Sampler → consumer hand-off conduit
//!
//! Capacity is exactly 1 and the policy is drop-newest-on-full from the
//! producer side: the producer never blocks and never holds more than
//! one pending analysis job, trading completeness of analysis for
//! bounded latency and memory.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Create a connected producer/consumer pair
pub fn conduit<T>() -> (ConduitProducer<T>, ConduitConsumer<T>) {
    let (tx, rx) = mpsc::channel(1);
    (ConduitProducer { tx, dropped: 0 }, ConduitConsumer { rx })
}

/// Non-blocking producer half
pub struct ConduitProducer<T> {
    tx: mpsc::Sender<T>,
    dropped: u64,
}

impl<T> ConduitProducer<T> {
    /// Offer an item; returns whether it was accepted
    ///
    /// A full or closed conduit drops the item silently apart from the
    /// counter. Dropping is not an error here.
    pub fn offer(&mut self, item: T) -> bool {
        match self.tx.try_send(item) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) | Err(TrySendError::Closed(_)) => {
                self.dropped += 1;
                false
            }
        }
    }

    /// Items dropped because the consumer had not caught up
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

/// Suspending consumer half
pub struct ConduitConsumer<T> {
    rx: mpsc::Receiver<T>,
}

impl<T> ConduitConsumer<T> {
    /// Take the next item, suspending until one arrives
    ///
    /// `None` means the producer was dropped.
    pub async fn take(&mut self) -> Option<T> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_second_offer_dropped_until_taken() {
        let (mut producer, mut consumer) = conduit();

        assert!(producer.offer(1u32));
        assert!(!producer.offer(2));
        assert_eq!(producer.dropped(), 1);

        assert_eq!(consumer.take().await, Some(1));
        assert!(producer.offer(3));
        assert_eq!(consumer.take().await, Some(3));
    }

    #[tokio::test]
    async fn test_rapid_offers_keep_at_most_one_pending() {
        let (mut producer, mut consumer) = conduit();

        for i in 0..100u32 {
            producer.offer(i);
        }
        assert_eq!(producer.dropped(), 99);

        // Only the first survives; nothing else is queued behind it
        assert_eq!(consumer.take().await, Some(0));
        assert!(producer.offer(100));
    }

    #[tokio::test]
    async fn test_take_after_producer_drop() {
        let (producer, mut consumer) = conduit::<u32>();
        drop(producer);
        assert_eq!(consumer.take().await, None);
    }

    #[tokio::test]
    async fn test_offer_after_consumer_drop() {
        let (mut producer, consumer) = conduit();
        drop(consumer);
        assert!(!producer.offer(7u32));
        assert_eq!(producer.dropped(), 1);
    }
}
