// SPDX-License-Identifier: MPL-2.0
//! File intake: turns raw file handles into decode jobs.
//!
//! Handles arrive from a file-picker selection or a drag-and-drop event.
//! Dropped handles whose MIME type is not `image/*` are discarded here;
//! picker handles pass through untouched and are re-checked by the image
//! store when their decode completes. Nothing in this module mutates the
//! gallery.

pub mod decode;
pub mod handle;

use chrono::{DateTime, Utc};
use std::future::Future;
use std::io;

use crate::domain::gallery::{Generation, IntakeSource, MimeType};
use crate::error::GalleryError;

pub use decode::{decode, DecodeOptions, DecodeOutcome, DecodedImage, ImagePayload};
pub use handle::{DiskFile, MemoryFile};

/// A user-supplied file that can be read asynchronously.
pub trait FileHandle {
    /// Original file name. May be empty and need not be unique.
    fn display_name(&self) -> &str;

    /// MIME type as reported by the source of the handle.
    fn mime_type(&self) -> &MimeType;

    /// Size reported by the source of the handle, in bytes.
    fn byte_size(&self) -> u64;

    /// Last modification time, if the source knows it.
    fn last_modified(&self) -> Option<DateTime<Utc>>;

    /// Reads the whole file.
    fn read(&self) -> impl Future<Output = io::Result<Vec<u8>>>;
}

/// A file handle that passed intake and is waiting to be decoded.
///
/// Each job resolves exactly once: [`decode`] consumes it.
#[derive(Debug)]
pub struct AcceptedJob<H> {
    handle: H,
    generation: Generation,
    accepted_at: DateTime<Utc>,
}

impl<H: FileHandle> AcceptedJob<H> {
    fn new(handle: H, generation: Generation) -> Self {
        Self {
            handle,
            generation,
            accepted_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Gallery generation the job was submitted under.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Timestamp shown for the entry: the file's modification time when
    /// known, the acceptance time otherwise.
    #[must_use]
    pub fn acquired_at(&self) -> DateTime<Utc> {
        self.handle.last_modified().unwrap_or(self.accepted_at)
    }

    pub(crate) fn into_parts(self) -> (H, Generation, DateTime<Utc>) {
        let acquired_at = self.acquired_at();
        (self.handle, self.generation, acquired_at)
    }
}

/// Checks the handle's reported type against the `image/*` rule.
///
/// # Errors
///
/// Returns [`GalleryError::UnsupportedType`] for any other type.
pub fn check_type<H: FileHandle>(handle: &H) -> Result<(), GalleryError> {
    if handle.mime_type().is_image() {
        Ok(())
    } else {
        Err(GalleryError::UnsupportedType {
            display_name: handle.display_name().to_string(),
            mime_type: handle.mime_type().clone(),
        })
    }
}

/// Filters `files` for `source` and wraps the survivors into decode jobs.
///
/// Rejected handles are dropped silently; an empty input yields no jobs.
pub fn accept<H: FileHandle>(
    files: Vec<H>,
    source: IntakeSource,
    generation: Generation,
) -> Vec<AcceptedJob<H>> {
    files
        .into_iter()
        .filter(|handle| {
            if !source.prefilters() {
                return true;
            }
            match check_type(handle) {
                Ok(()) => true,
                Err(err) => {
                    tracing::debug!(%err, "dropping file");
                    false
                }
            }
        })
        .map(|handle| AcceptedJob::new(handle, generation))
        .collect()
}
