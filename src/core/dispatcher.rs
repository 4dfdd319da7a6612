//! Dispatch loop: the single consumer of the per-level queues

use super::{log_level::LogLevel, metrics::LoggerMetrics, sink::Sink};
use crossbeam_channel::{Receiver, Select};
use std::io;
use std::sync::Arc;
use std::thread;

pub(crate) const DISPATCH_THREAD_NAME: &str = "logger-dispatch";

/// Owns the enabled sinks and writes every received message to each of them.
pub(crate) struct Dispatcher {
    sinks: Vec<Box<dyn Sink>>,
    metrics: Arc<LoggerMetrics>,
}

impl Dispatcher {
    pub(crate) fn new(sinks: Vec<Box<dyn Sink>>, metrics: Arc<LoggerMetrics>) -> Self {
        Self { sinks, metrics }
    }

    /// Start the dispatch thread over `receivers` (indexed by level).
    pub(crate) fn spawn(
        self,
        receivers: Vec<Receiver<String>>,
    ) -> io::Result<thread::JoinHandle<()>> {
        thread::Builder::new()
            .name(DISPATCH_THREAD_NAME.to_string())
            .spawn(move || self.run(receivers))
    }

    /// Wait on all level queues at once and service whichever is ready.
    ///
    /// `Select` picks uniformly among ready queues, so no level can starve
    /// another. The loop ends once every queue is disconnected, which only
    /// happens when the logger is shut down or dropped.
    pub(crate) fn run(mut self, receivers: Vec<Receiver<String>>) {
        let mut select = Select::new();
        for receiver in &receivers {
            select.recv(receiver);
        }

        let mut open = receivers.len();
        while open > 0 {
            let oper = select.select();
            let index = oper.index();
            match oper.recv(&receivers[index]) {
                Ok(message) => self.dispatch(LogLevel::ALL[index], &message),
                Err(_) => {
                    select.remove(index);
                    open -= 1;
                }
            }
        }

        self.flush();
    }

    /// Write one message to every sink in order.
    ///
    /// **Per-Sink Panic Isolation**: a sink that errors or panics is reported
    /// on stderr; the remaining sinks still receive the message.
    pub(crate) fn dispatch(&mut self, level: LogLevel, message: &str) {
        let mut has_error = false;

        for sink in self.sinks.iter_mut() {
            let write_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                sink.write(level, message)
            }));

            match write_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] {}", e);
                    self.metrics.record_write_failure();
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Sink '{}' panicked: {}. \
                         Other sinks continue to function.",
                        sink.name(),
                        panic_message(panic_info.as_ref())
                    );
                    self.metrics.record_write_failure();
                    has_error = true;
                }
            }
        }

        if !has_error {
            self.metrics.record_dispatched();
        }
    }

    fn flush(&mut self) {
        for sink in self.sinks.iter_mut() {
            if let Err(e) = sink.flush() {
                eprintln!("[LOGGER ERROR] Sink '{}' flush failed: {}", sink.name(), e);
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
