// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! The gallery records into the collector directly. Collaborators that do not
//! own the gallery (the presentation layer, for instance) report through a
//! [`DiagnosticsHandle`] instead.

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::Serialize;

use super::{BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind};

/// Handle for sending diagnostic events to the collector.
///
/// This handle is cheap to clone. Events are sent via a bounded channel and
/// dropped when it is full, so reporting never blocks the event loop.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Sends an event, dropping it if the channel is full.
    pub fn log(&self, kind: DiagnosticEventKind) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }

    /// Sends a free-form message as an [`DiagnosticEventKind::External`] event.
    pub fn log_message(&self, message: impl Into<String>) {
        self.log(DiagnosticEventKind::External {
            message: message.into(),
        });
    }

    /// Attempts to send an event, returning an error if the channel is full.
    ///
    /// # Errors
    ///
    /// Returns `TrySendError::Full` if the internal channel buffer is full,
    /// or `TrySendError::Disconnected` if the collector has been dropped.
    pub fn try_log(&self, kind: DiagnosticEventKind) -> Result<(), TrySendError<DiagnosticEvent>> {
        self.event_tx.try_send(DiagnosticEvent::new(kind))
    }
}

/// Central collector for diagnostic events.
///
/// Events land in a memory-bounded circular buffer; old events are evicted
/// when the buffer reaches capacity.
#[derive(Debug)]
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    /// Sender stored to create handles.
    event_tx: Sender<DiagnosticEvent>,
    started_at: DateTime<Utc>,
}

/// Channel capacity for events sent through handles.
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

#[derive(Serialize)]
struct DiagnosticReport<'a> {
    started_at: DateTime<Utc>,
    exported_at: DateTime<Utc>,
    event_count: usize,
    failure_count: usize,
    evicted_count: usize,
    events: Vec<&'a DiagnosticEvent>,
}

impl DiagnosticsCollector {
    /// Creates a new diagnostics collector with the specified buffer capacity.
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            started_at: Utc::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Moves every event waiting in the channel into the buffer.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    /// Records an event directly, bypassing the channel.
    pub fn record(&mut self, kind: DiagnosticEventKind) {
        self.buffer.push(DiagnosticEvent::new(kind));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns an iterator over all stored events (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    /// Returns the most recent event.
    #[must_use]
    pub fn last(&self) -> Option<&DiagnosticEvent> {
        self.buffer.last()
    }

    /// Returns the number of stored failure events.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.buffer.iter().filter(|event| event.is_failure()).count()
    }

    /// Number of events lost to the buffer's capacity limit.
    #[must_use]
    pub fn evicted_count(&self) -> usize {
        self.buffer.evicted()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Exports all stored events as a pretty-printed JSON report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        let report = DiagnosticReport {
            started_at: self.started_at,
            exported_at: Utc::now(),
            event_count: self.buffer.len(),
            failure_count: self.failure_count(),
            evicted_count: self.buffer.evicted(),
            events: self.buffer.iter().collect(),
        };
        serde_json::to_string_pretty(&report)
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gallery::EntryId;

    #[test]
    fn collector_new_creates_empty_buffer() {
        let collector = DiagnosticsCollector::new(BufferCapacity::default());

        assert!(collector.is_empty());
        assert_eq!(collector.len(), 0);
    }

    #[test]
    fn record_stores_event() {
        let mut collector = DiagnosticsCollector::default();

        collector.record(DiagnosticEventKind::EntryRemoved { id: EntryId::new(4) });

        assert_eq!(collector.len(), 1);
        assert!(matches!(
            collector.last().map(|event| &event.kind),
            Some(DiagnosticEventKind::EntryRemoved { id }) if *id == EntryId::new(4)
        ));
    }

    #[test]
    fn handle_events_arrive_after_processing() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        handle.log_message("thumbnail failed to render");

        // Event is in channel, not yet in buffer
        assert!(collector.is_empty());

        collector.process_pending();

        assert_eq!(collector.len(), 1);
        assert_eq!(collector.failure_count(), 1);
    }

    #[test]
    fn handle_drops_events_when_channel_full() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        for i in 0..DEFAULT_CHANNEL_CAPACITY + 10 {
            handle.log_message(format!("event {i}"));
        }
        assert!(handle
            .try_log(DiagnosticEventKind::External {
                message: "one too many".into()
            })
            .is_err());

        collector.process_pending();
        assert_eq!(collector.len(), DEFAULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn buffer_evicts_oldest_at_capacity() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::new(0));
        let capacity = collector.capacity();

        for i in 0..capacity + 3 {
            collector.record(DiagnosticEventKind::EntryRemoved {
                id: EntryId::new(i as u64),
            });
        }

        assert_eq!(collector.len(), capacity);
        assert_eq!(collector.evicted_count(), 3);
        let first = collector.iter().next().expect("buffer should not be empty");
        assert_eq!(
            first.kind,
            DiagnosticEventKind::EntryRemoved { id: EntryId::new(3) }
        );
    }

    #[test]
    fn export_json_contains_events() {
        let mut collector = DiagnosticsCollector::default();
        collector.record(DiagnosticEventKind::DecodeFailed {
            display_name: "broken.png".into(),
            cause: "unexpected end of file".into(),
        });

        let json = collector.export_json().expect("export should succeed");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["event_count"], 1);
        assert_eq!(value["failure_count"], 1);
        assert_eq!(value["evicted_count"], 0);
        assert_eq!(value["events"][0]["event"], "decode_failed");
        assert_eq!(value["events"][0]["display_name"], "broken.png");
    }
}
