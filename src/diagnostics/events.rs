// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for the gallery pipeline.
//!
//! Every failure the gallery swallows (decode errors, rejected entries,
//! missing modal references) leaves one of these behind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::gallery::{EntryId, IntakeSource};

/// A diagnostic event with timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticEvent {
    /// When the event was recorded.
    pub recorded_at: DateTime<Utc>,
    /// What happened.
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            recorded_at: Utc::now(),
            kind,
        }
    }

    /// Returns true for events describing a failure rather than a state change.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(
            self.kind,
            DiagnosticEventKind::DecodeFailed { .. }
                | DiagnosticEventKind::EntryRejected { .. }
                | DiagnosticEventKind::ReferenceNotFound { .. }
                | DiagnosticEventKind::External { .. }
        )
    }
}

/// The different kinds of diagnostic events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A batch of file handles went through intake.
    Intake {
        source: IntakeSource,
        /// Handles offered by the picker or drop event.
        offered: usize,
        /// Handles that became decode jobs.
        accepted: usize,
    },

    /// Reading a file failed; nothing was appended.
    DecodeFailed { display_name: String, cause: String },

    /// The store refused a decoded file because its type is not an image.
    EntryRejected {
        display_name: String,
        mime_type: String,
    },

    /// A decode finished after the gallery was cleared and was dropped.
    StaleDecodeDiscarded { display_name: String },

    /// The modal was asked to show an entry that is not in the store.
    ReferenceNotFound { id: EntryId },

    /// The gallery was cleared.
    GalleryCleared {
        removed: usize,
        /// Decodes still in flight at the time of the clear.
        pending: usize,
    },

    /// A single entry was removed.
    EntryRemoved { id: EntryId },

    /// Reported by a collaborator through a [`DiagnosticsHandle`](super::DiagnosticsHandle).
    External { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_event_is_timestamped_now() {
        let before = Utc::now();
        let event = DiagnosticEvent::new(DiagnosticEventKind::EntryRemoved {
            id: EntryId::new(1),
        });
        let after = Utc::now();

        assert!(event.recorded_at >= before);
        assert!(event.recorded_at <= after);
    }

    #[test]
    fn failures_are_classified() {
        let failed = DiagnosticEvent::new(DiagnosticEventKind::DecodeFailed {
            display_name: "a.png".into(),
            cause: "boom".into(),
        });
        let cleared = DiagnosticEvent::new(DiagnosticEventKind::GalleryCleared {
            removed: 2,
            pending: 0,
        });

        assert!(failed.is_failure());
        assert!(!cleared.is_failure());
    }

    #[test]
    fn event_serializes_with_tag() {
        let event = DiagnosticEvent::new(DiagnosticEventKind::Intake {
            source: IntakeSource::Drop,
            offered: 4,
            accepted: 3,
        });

        let json = serde_json::to_value(&event).expect("event should serialize");

        assert_eq!(json["event"], "intake");
        assert_eq!(json["source"], "drop");
        assert_eq!(json["offered"], 4);
        assert_eq!(json["accepted"], 3);
        assert!(json["recorded_at"].is_string());
    }
}
