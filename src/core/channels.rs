//! Per-level message queues, producer side

use super::{
    log_level::LogLevel,
    metrics::LoggerMetrics,
    overflow_policy::{OverflowPolicy, QueueMode},
};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::sync::Arc;

/// One queue per severity. Producers on any thread enqueue here; the
/// matching receivers belong to the dispatch thread.
pub(crate) struct ChannelSet {
    senders: Vec<Sender<String>>,
    /// Receiver clones used to evict the oldest message under `DropOldest`
    evictors: Option<Vec<Receiver<String>>>,
    overflow: OverflowPolicy,
    metrics: Arc<LoggerMetrics>,
}

impl ChannelSet {
    /// Create the queues; the returned receivers are indexed by
    /// [`LogLevel::index`].
    pub(crate) fn new(
        mode: QueueMode,
        metrics: Arc<LoggerMetrics>,
    ) -> (Self, Vec<Receiver<String>>) {
        let (senders, receivers): (Vec<_>, Vec<_>) =
            LogLevel::ALL.iter().map(|_| bounded::<String>(mode.capacity())).unzip();

        let overflow = mode.overflow();
        let evictors = (overflow == OverflowPolicy::DropOldest).then(|| receivers.clone());

        let set = Self {
            senders,
            evictors,
            overflow,
            metrics,
        };
        (set, receivers)
    }

    /// Enqueue `message` on the queue for `level`.
    ///
    /// Returns `false` if the message was dropped or the dispatch thread
    /// is gone.
    pub(crate) fn send(&self, level: LogLevel, message: String) -> bool {
        let sender = &self.senders[level.index()];

        let sent = match self.overflow {
            // Waits for the dispatch thread when the queue has no free slot
            OverflowPolicy::Block => sender.send(message).is_ok(),

            OverflowPolicy::DropNewest => match sender.try_send(message) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    self.alert_dropped(level);
                    false
                }
                Err(TrySendError::Disconnected(_)) => false,
            },

            OverflowPolicy::DropOldest => self.send_evicting(level, message),
        };

        if sent {
            self.metrics.record_enqueued();
        }
        sent
    }

    fn send_evicting(&self, level: LogLevel, mut message: String) -> bool {
        let sender = &self.senders[level.index()];
        let evictor = self.evictors.as_ref().map(|evictors| &evictors[level.index()]);

        loop {
            match sender.try_send(message) {
                Ok(()) => return true,
                Err(TrySendError::Full(rejected)) => {
                    message = rejected;
                    if let Some(evictor) = evictor {
                        if evictor.try_recv().is_ok() {
                            self.alert_dropped(level);
                        }
                    }
                }
                Err(TrySendError::Disconnected(_)) => return false,
            }
        }
    }

    fn alert_dropped(&self, level: LogLevel) {
        let dropped_count = self.metrics.record_dropped();

        // Alert on first drop and periodically thereafter
        if dropped_count == 0 || (dropped_count + 1) % 1000 == 0 {
            eprintln!(
                "[LOGGER WARNING] {} queue full ({}), {} logs dropped. \
                 Consider a larger buffer or the Block policy.",
                level,
                self.overflow,
                dropped_count + 1
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffered(capacity: usize, overflow: OverflowPolicy) -> QueueMode {
        QueueMode::Buffered { capacity, overflow }
    }

    #[test]
    fn test_one_receiver_per_level() {
        let (_set, receivers) = ChannelSet::new(QueueMode::default(), Arc::default());
        assert_eq!(receivers.len(), LogLevel::COUNT);
        assert!(receivers.iter().all(|r| r.capacity() == Some(0)));
    }

    #[test]
    fn test_routes_to_level_queue() {
        let metrics = Arc::new(LoggerMetrics::new());
        let (set, receivers) =
            ChannelSet::new(buffered(4, OverflowPolicy::Block), Arc::clone(&metrics));

        assert!(set.send(LogLevel::Error, "e".to_string()));
        assert_eq!(receivers[LogLevel::Error.index()].try_recv().unwrap(), "e");
        assert!(receivers[LogLevel::Debug.index()].try_recv().is_err());
        assert_eq!(metrics.enqueued(), 1);
    }

    #[test]
    fn test_drop_newest_keeps_queued() {
        let metrics = Arc::new(LoggerMetrics::new());
        let (set, receivers) =
            ChannelSet::new(buffered(2, OverflowPolicy::DropNewest), Arc::clone(&metrics));

        for i in 0..5 {
            set.send(LogLevel::Info, format!("m{}", i));
        }

        let queued: Vec<String> = receivers[LogLevel::Info.index()].try_iter().collect();
        assert_eq!(queued, vec!["m0", "m1"]);
        assert_eq!(metrics.dropped(), 3);
    }

    #[test]
    fn test_drop_oldest_keeps_latest() {
        let metrics = Arc::new(LoggerMetrics::new());
        let (set, receivers) =
            ChannelSet::new(buffered(2, OverflowPolicy::DropOldest), Arc::clone(&metrics));

        for i in 0..5 {
            assert!(set.send(LogLevel::Warn, format!("m{}", i)));
        }

        let queued: Vec<String> = receivers[LogLevel::Warn.index()].try_iter().collect();
        assert_eq!(queued, vec!["m3", "m4"]);
        assert_eq!(metrics.dropped(), 3);
        assert_eq!(metrics.enqueued(), 5);
    }

    #[test]
    fn test_disconnected_is_not_counted() {
        let metrics = Arc::new(LoggerMetrics::new());
        let (set, receivers) = ChannelSet::new(QueueMode::default(), Arc::clone(&metrics));
        drop(receivers);

        assert!(!set.send(LogLevel::Crit, "gone".to_string()));
        assert_eq!(metrics.enqueued(), 0);
    }
}
