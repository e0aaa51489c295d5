// SPDX-License-Identifier: MPL-2.0
//! Gallery domain types.
//!
//! This module provides the identifiers and value objects used by the
//! intake pipeline, the image store and the modal controller.

mod newtypes;

pub use newtypes::{EntryId, Generation, IntakeSource, MimeType, IMAGE_MIME_PREFIX};
