//! Rolling Logger
//!
//! A `tracing-subscriber` layer that keeps the most recent log lines in a
//! circular buffer and hands every formatted line to a sink (stderr, the
//! browser console, ...). The buffer backs in-app activity panels.

use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
}

/// Receives every formatted line as it is written
pub type Sink = Arc<dyn Fn(Level, &str) + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub timestamp: String,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {:>5} {}: {}",
            self.timestamp, self.level, self.target, self.message
        )
    }
}

/// Fixed-capacity line buffer; the oldest line goes first
#[derive(Debug)]
pub struct LogBuffer {
    lines: VecDeque<LogLine>,
    capacity: usize,
    written: u64,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
            written: 0,
        }
    }

    pub fn push(&mut self, line: LogLine) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
        self.written += 1;
    }

    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.iter().cloned().collect()
    }

    /// Lines written since creation, including evicted ones
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn lock(buffer: &Mutex<LogBuffer>) -> MutexGuard<'_, LogBuffer> {
    buffer.lock().unwrap_or_else(PoisonError::into_inner)
}

fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S%.3f").to_string()
}

#[derive(Clone)]
pub struct RollingLayer {
    buffer: Arc<Mutex<LogBuffer>>,
    max_level: Level,
    sink: Option<Sink>,
}

impl RollingLayer {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(LogBuffer::new(capacity))),
            max_level: Level::DEBUG,
            sink: None,
        }
    }

    pub fn with_max_level(mut self, level: Level) -> Self {
        self.max_level = level;
        self
    }

    pub fn with_sink(mut self, sink: Sink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn buffer(&self) -> Arc<Mutex<LogBuffer>> {
        Arc::clone(&self.buffer)
    }

    fn write(&self, line: LogLine) {
        if let Some(sink) = &self.sink {
            sink(line.level, &line.to_string());
        }
        lock(&self.buffer).push(line);
    }
}

/// Collects the `message` field plus `key=value` pairs for the rest
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn finish(self) -> String {
        if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            self.message + &self.fields
        }
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if *meta.level() > self.max_level {
            return;
        }
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        self.write(LogLine {
            timestamp: timestamp(),
            level: *meta.level(),
            target: meta.target().to_string(),
            message: visitor.finish(),
        });
    }
}

struct GlobalLogger {
    app_name: String,
    layer: RollingLayer,
}

static GLOBAL: OnceLock<GlobalLogger> = OnceLock::new();

/// Install the rolling layer as the global `tracing` subscriber.
pub fn init_logger(app_name: &str, capacity: usize, sink: Option<Sink>) -> Result<(), LoggerError> {
    let mut layer = RollingLayer::new(capacity);
    if let Some(sink) = sink {
        layer = layer.with_sink(sink);
    }

    let subscriber = tracing_subscriber::registry().with(layer.clone());
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    GLOBAL
        .set(GlobalLogger {
            app_name: app_name.to_string(),
            layer,
        })
        .map_err(|_| LoggerError::AlreadyInitialized)
}

/// Buffered lines, oldest first. Empty before `init_logger`.
pub fn recent() -> Vec<LogLine> {
    GLOBAL
        .get()
        .map(|g| lock(&g.layer.buffer).lines())
        .unwrap_or_default()
}

/// Change counter for pollers
pub fn written() -> u64 {
    GLOBAL
        .get()
        .map(|g| lock(&g.layer.buffer).written())
        .unwrap_or(0)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    write_direct(Level::INFO, message)
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    write_direct(Level::ERROR, message)
}

fn write_direct(level: Level, message: &str) -> Result<(), LoggerError> {
    let global = GLOBAL.get().ok_or(LoggerError::NotInitialized)?;
    global.layer.write(LogLine {
        timestamp: timestamp(),
        level,
        target: global.app_name.clone(),
        message: message.to_string(),
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(layer: &RollingLayer, f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn test_buffer_evicts_oldest() {
        let layer = RollingLayer::new(3);
        capture(&layer, || {
            for i in 0..5 {
                tracing::info!("line {}", i);
            }
        });

        let buffer = layer.buffer();
        let buffer = lock(&buffer);
        let messages: Vec<_> = buffer.lines().into_iter().map(|l| l.message).collect();
        assert_eq!(messages, vec!["line 2", "line 3", "line 4"]);
        assert_eq!(buffer.written(), 5);
    }

    #[test]
    fn test_fields_follow_message() {
        let layer = RollingLayer::new(10);
        capture(&layer, || {
            tracing::warn!(collection = "faqs", rows = 3, "reorder failed");
        });

        let lines = lock(&layer.buffer()).lines();
        assert_eq!(lines[0].level, Level::WARN);
        assert_eq!(lines[0].message, "reorder failed collection=faqs rows=3");
        assert!(lines[0].to_string().contains("WARN"));
    }

    #[test]
    fn test_max_level_filters() {
        let layer = RollingLayer::new(10).with_max_level(Level::INFO);
        capture(&layer, || {
            tracing::debug!("noise");
            tracing::info!("kept");
        });
        assert_eq!(lock(&layer.buffer()).len(), 1);
    }

    #[test]
    fn test_sink_sees_every_line() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        let layer = RollingLayer::new(1).with_sink(Arc::new(move |level: Level, line: &str| {
            sink_seen
                .lock()
                .unwrap()
                .push(format!("{} {}", level, line.contains("hello")));
        }));
        capture(&layer, || {
            tracing::error!("hello");
            tracing::info!("hello again");
        });

        assert_eq!(*seen.lock().unwrap(), vec!["ERROR true", "INFO true"]);
        assert_eq!(lock(&layer.buffer()).len(), 1);
    }

    #[test]
    fn test_direct_write_requires_init() {
        if GLOBAL.get().is_none() {
            assert!(matches!(info("x"), Err(LoggerError::NotInitialized)));
            assert!(matches!(error("x"), Err(LoggerError::NotInitialized)));
        }
    }
}
