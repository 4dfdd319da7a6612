//! Stress tests for concurrent producers and queue modes
//!
//! These tests verify:
//! - No message is lost with the blocking hand-off under many producers
//! - Per-producer, per-level ordering survives concurrency
//! - Drop policies never block and account for every message

use leveled_logger::prelude::*;
use leveled_logger::{error, info};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

type Writes = Arc<Mutex<Vec<(LogLevel, String)>>>;

struct RecordingSink {
    writes: Writes,
    delay: Option<Duration>,
}

impl Sink for RecordingSink {
    fn write(&mut self, level: LogLevel, message: &str) -> Result<()> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.writes.lock().push((level, message.to_string()));
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

fn logger_with(mode: QueueMode, delay: Option<Duration>) -> (Logger, Writes) {
    let writes = Writes::default();
    let logger = Logger::builder()
        .queue_mode(mode)
        .sink(RecordingSink {
            writes: writes.clone(),
            delay,
        })
        .build()
        .expect("Failed to build logger");
    (logger, writes)
}

/// Every message from every thread arrives with the rendezvous hand-off
#[test]
fn test_concurrent_producers_lose_nothing() {
    let (logger, writes) = logger_with(QueueMode::Rendezvous, None);
    let logger = Arc::new(logger);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for i in 0..200 {
                    info!(logger, "t{} i{}", t, i);
                    error!(logger, "t{} e{}", t, i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut logger = Arc::try_unwrap(logger).ok().expect("sole owner");
    assert!(logger.shutdown(Duration::from_secs(10)));

    assert_eq!(writes.lock().len(), 8 * 200 * 2);
    assert_eq!(logger.metrics().dropped(), 0);
}

/// Messages from one thread at one level keep their order
#[test]
fn test_per_thread_order_preserved() {
    let (logger, writes) = logger_with(QueueMode::Rendezvous, None);
    let logger = Arc::new(logger);

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for i in 0..100 {
                    info!(logger, "{} {}", t, i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut logger = Arc::try_unwrap(logger).ok().expect("sole owner");
    assert!(logger.shutdown(Duration::from_secs(10)));

    let mut last_seen: HashMap<u32, i64> = HashMap::new();
    for (_, message) in writes.lock().iter() {
        // "<caller>: <thread> <seq>"
        let body = message.rsplit(": ").next().unwrap();
        let mut parts = body.split(' ');
        let thread: u32 = parts.next().unwrap().parse().unwrap();
        let seq: i64 = parts.next().unwrap().parse().unwrap();

        let previous = last_seen.insert(thread, seq).unwrap_or(-1);
        assert!(seq > previous, "thread {} went from {} to {}", thread, previous, seq);
    }
    assert_eq!(last_seen.len(), 4);
}

/// DropNewest with a slow sink drops instead of blocking
#[test]
fn test_drop_newest_accounts_for_every_message() {
    let mode = QueueMode::Buffered {
        capacity: 4,
        overflow: OverflowPolicy::DropNewest,
    };
    let (mut logger, writes) = logger_with(mode, Some(Duration::from_millis(5)));

    for i in 0..200 {
        info!(logger, "flood {}", i);
    }
    assert!(logger.shutdown(Duration::from_secs(10)));

    let delivered = writes.lock().len() as u64;
    let metrics = logger.metrics();
    assert!(metrics.dropped() > 0);
    assert_eq!(delivered + metrics.dropped(), 200);
    assert_eq!(metrics.enqueued(), delivered);
}

/// DropOldest keeps the most recent message of the flood
#[test]
fn test_drop_oldest_keeps_newest() {
    let mode = QueueMode::Buffered {
        capacity: 4,
        overflow: OverflowPolicy::DropOldest,
    };
    let (mut logger, writes) = logger_with(mode, Some(Duration::from_millis(5)));

    for i in 0..200 {
        info!(logger, "flood {}", i);
    }
    assert!(logger.shutdown(Duration::from_secs(10)));

    let writes = writes.lock();
    let last = &writes.last().expect("something delivered").1;
    assert!(last.ends_with("flood 199"), "{}", last);
    assert!(logger.metrics().dropped() > 0);
    assert_eq!(writes.len() as u64 + logger.metrics().dropped(), 200);
}
