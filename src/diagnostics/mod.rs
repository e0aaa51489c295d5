// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module: the channel through which swallowed failures are reported.
//!
//! Decode failures, rejected entries and missing modal references never reach
//! the user as errors. They are recorded here instead, in a memory-bounded
//! circular buffer that can be exported as JSON.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped event with a [`DiagnosticEventKind`]
//! - [`DiagnosticsCollector`]: Owns the buffer; the gallery records into it directly
//! - [`DiagnosticsHandle`]: Cloneable, non-blocking sender for other collaborators

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind};
