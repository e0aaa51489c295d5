// SPDX-License-Identifier: MPL-2.0
//! Concrete file handles.
//!
//! [`DiskFile`] reads from the filesystem through `tokio::fs`. [`MemoryFile`]
//! holds its bytes in memory and can simulate slow or failing reads, which is
//! how completion-order and failure paths are exercised.

use chrono::{DateTime, Utc};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::FileHandle;
use crate::domain::gallery::MimeType;

/// MIME type reported for files whose extension is not a known image format.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Guesses a MIME type from the file extension.
#[must_use]
pub fn mime_type_for_path(path: &Path) -> MimeType {
    image_rs::ImageFormat::from_path(path)
        .map(|format| MimeType::new(format.to_mime_type()))
        .unwrap_or_else(|_| MimeType::new(FALLBACK_MIME_TYPE))
}

// =============================================================================
// DiskFile
// =============================================================================

/// A file on disk, typed by its extension.
#[derive(Debug, Clone)]
pub struct DiskFile {
    path: PathBuf,
    display_name: String,
    mime_type: MimeType,
    byte_size: u64,
    last_modified: Option<DateTime<Utc>>,
}

impl DiskFile {
    /// Reads the file metadata and builds a handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata cannot be read.
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path).await?;
        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            mime_type: mime_type_for_path(&path),
            display_name,
            byte_size: metadata.len(),
            last_modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            path,
        })
    }
}

impl FileHandle for DiskFile {
    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn mime_type(&self) -> &MimeType {
        &self.mime_type
    }

    fn byte_size(&self) -> u64 {
        self.byte_size
    }

    fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    async fn read(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}

// =============================================================================
// MemoryFile
// =============================================================================

/// A file whose content is already in memory.
#[derive(Debug, Clone)]
pub struct MemoryFile {
    display_name: String,
    mime_type: MimeType,
    bytes: Vec<u8>,
    byte_size: u64,
    last_modified: Option<DateTime<Utc>>,
    delay: Option<Duration>,
    failure: Option<String>,
}

impl MemoryFile {
    #[must_use]
    pub fn new(
        display_name: impl Into<String>,
        mime_type: impl Into<MimeType>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            mime_type: mime_type.into(),
            byte_size: bytes.len() as u64,
            bytes,
            last_modified: None,
            delay: None,
            failure: None,
        }
    }

    /// A file whose read always fails with `cause`.
    #[must_use]
    pub fn failing(
        display_name: impl Into<String>,
        mime_type: impl Into<MimeType>,
        cause: impl Into<String>,
    ) -> Self {
        Self {
            failure: Some(cause.into()),
            ..Self::new(display_name, mime_type, Vec::new())
        }
    }

    #[must_use]
    pub fn with_last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    /// Makes the read wait `delay` before completing.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Overrides the reported size, which otherwise is the byte count.
    #[must_use]
    pub fn with_reported_size(mut self, byte_size: u64) -> Self {
        self.byte_size = byte_size;
        self
    }
}

impl FileHandle for MemoryFile {
    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn mime_type(&self) -> &MimeType {
        &self.mime_type
    }

    fn byte_size(&self) -> u64 {
        self.byte_size
    }

    fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    async fn read(&self) -> io::Result<Vec<u8>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(cause) => Err(io::Error::other(cause.clone())),
            None => Ok(self.bytes.clone()),
        }
    }
}
