// SPDX-License-Identifier: MPL-2.0
//! Gallery newtypes.
//!
//! Identifiers are plain counters wrapped in distinct types so an entry id
//! can never be mistaken for a store generation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix every accepted MIME type must start with.
pub const IMAGE_MIME_PREFIX: &str = "image/";

// =============================================================================
// EntryId
// =============================================================================

/// Identifier of an entry in the image store.
///
/// Ids come from a monotonic counter owned by the store and are never reused,
/// not even after the store is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    /// Wraps a raw id value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw id value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Generation
// =============================================================================

/// Store generation, bumped every time the gallery is cleared.
///
/// Decode jobs remember the generation they were submitted under so a
/// completion arriving after a clear can be recognised as stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Returns the generation that follows this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Returns the raw generation value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

// =============================================================================
// MimeType
// =============================================================================

/// MIME type reported by a file handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MimeType(String);

impl MimeType {
    /// Wraps a reported MIME type without validating it.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns true if the type starts with the literal `image/` prefix.
    ///
    /// The comparison is case-sensitive: `IMAGE/PNG` is not an image type.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.0.starts_with(IMAGE_MIME_PREFIX)
    }

    /// Returns the MIME type as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MimeType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// =============================================================================
// IntakeSource
// =============================================================================

/// Where a batch of file handles came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeSource {
    /// File picker selection. Handles are passed through unfiltered and the
    /// image store re-checks the type on append.
    Picker,
    /// Drag-and-drop. Non-image handles are dropped before decoding.
    Drop,
}

impl IntakeSource {
    /// Returns true if this source filters out non-image handles up front.
    #[must_use]
    pub fn prefilters(self) -> bool {
        matches!(self, IntakeSource::Drop)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_image_prefix_is_literal() {
        assert!(MimeType::new("image/png").is_image());
        assert!(MimeType::new("image/svg+xml").is_image());
        assert!(!MimeType::new("text/plain").is_image());
        assert!(!MimeType::new("IMAGE/PNG").is_image());
        assert!(!MimeType::new("image").is_image());
        assert!(!MimeType::new("").is_image());
    }

    #[test]
    fn generation_advances() {
        let first = Generation::default();
        assert_eq!(first.value(), 0);
        assert_eq!(first.next().value(), 1);
        assert_ne!(first, first.next());
    }

    #[test]
    fn entry_id_display() {
        assert_eq!(EntryId::new(7).to_string(), "#7");
    }

    #[test]
    fn only_drop_prefilters() {
        assert!(IntakeSource::Drop.prefilters());
        assert!(!IntakeSource::Picker.prefilters());
    }
}
