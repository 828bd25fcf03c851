// src/testing.rs

// Mock sensor shared by the unit tests.

use std::string::String;
use std::sync::{Arc, Mutex};
use std::vec::Vec;

use tracing::field::{Field, Visit};
use tracing::span;
use tracing::{Event, Level, Metadata, Subscriber};

use crate::common::hal_traits::{AirflowSensor, CallerBuffer};

/// A mutation seen by the mock sensor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum SensorCall {
    Gain(i64),
    Offset(i64),
    Reference(i64),
}

#[derive(Debug, Clone)]
pub(crate) struct MockSensor {
    /// Value returned by the next `read_sensor`.
    pub reading: i64,
    /// Added to `reading` after every read, to tell fresh reads apart.
    pub drift: i64,
    pub reads: usize,
    pub calls: heapless::Vec<SensorCall, 32>,
}

impl MockSensor {
    pub fn new(reading: i64) -> Self {
        MockSensor { reading, drift: 0, reads: 0, calls: heapless::Vec::new() }
    }

    pub fn with_drift(mut self, drift: i64) -> Self {
        self.drift = drift;
        self
    }

    fn record(&mut self, call: SensorCall) {
        // The log is bounded; tests never issue more than its capacity.
        let _ = self.calls.push(call);
    }
}

impl AirflowSensor for MockSensor {
    fn read_sensor(&mut self) -> i64 {
        self.reads += 1;
        let value = self.reading;
        self.reading += self.drift;
        value
    }

    fn set_gain(&mut self, gain: i64) {
        self.record(SensorCall::Gain(gain));
    }

    fn set_offset(&mut self, offset: i64) {
        self.record(SensorCall::Offset(offset));
    }

    fn set_reference_value(&mut self, reference: i64) {
        self.record(SensorCall::Reference(reference));
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct MockTransferError;

/// Caller memory whose every copy faults.
pub(crate) struct FaultyBuffer {
    pub capacity: usize,
    pub attempts: usize,
}

impl FaultyBuffer {
    pub fn new(capacity: usize) -> Self {
        FaultyBuffer { capacity, attempts: 0 }
    }
}

impl CallerBuffer for FaultyBuffer {
    type Error = MockTransferError;

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn copy_from_device(&mut self, _bytes: &[u8]) -> Result<(), Self::Error> {
        self.attempts += 1;
        Err(MockTransferError)
    }
}

/// A diagnostic event captured by [`EventLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LoggedEvent {
    pub level: Level,
    pub message: String,
}

/// Subscriber that keeps every event's level and message.
#[derive(Debug, Clone, Default)]
pub(crate) struct EventLog {
    events: Arc<Mutex<Vec<LoggedEvent>>>,
}

impl EventLog {
    pub fn events(&self) -> Vec<LoggedEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    pub fn contains(&self, level: Level, message: &str) -> bool {
        self.events().iter().any(|e| e.level == level && e.message == message)
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn core::fmt::Debug) {
        if field.name() == "message" {
            self.message = std::format!("{value:?}");
        }
    }
}

impl Subscriber for EventLog {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _span: &span::Attributes<'_>) -> span::Id {
        span::Id::from_u64(1)
    }

    fn record(&self, _span: &span::Id, _values: &span::Record<'_>) {}

    fn record_follows_from(&self, _span: &span::Id, _follows: &span::Id) {}

    fn event(&self, event: &Event<'_>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Ok(mut events) = self.events.lock() {
            events.push(LoggedEvent { level: *event.metadata().level(), message: visitor.message });
        }
    }

    fn enter(&self, _span: &span::Id) {}

    fn exit(&self, _span: &span::Id) {}
}

/// Runs `f` with an [`EventLog`] as the thread's default subscriber.
pub(crate) fn capture_events<T>(f: impl FnOnce() -> T) -> (T, EventLog) {
    let log = EventLog::default();
    let out = tracing::subscriber::with_default(log.clone(), f);
    (out, log)
}
