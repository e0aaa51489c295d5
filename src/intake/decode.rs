// SPDX-License-Identifier: MPL-2.0
//! Decode pipeline: one asynchronous read per accepted job.
//!
//! Decoding reads the raw bytes and wraps them into a self-contained
//! [`ImagePayload`]. Header probing for pixel dimensions is best effort: a
//! file the `image` crate cannot parse still decodes, just without
//! dimensions. Only a failed read is a decode failure.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use std::io::Cursor;
use std::sync::Arc;

use super::{AcceptedJob, FileHandle};
use crate::config::{Config, DEFAULT_PROBE_DIMENSIONS};
use crate::domain::gallery::{Generation, MimeType};
use crate::error::GalleryError;

/// Knobs for [`decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Read image headers to report width and height.
    pub probe_dimensions: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            probe_dimensions: DEFAULT_PROBE_DIMENSIONS,
        }
    }
}

impl From<&Config> for DecodeOptions {
    fn from(config: &Config) -> Self {
        Self {
            probe_dimensions: config.probe_dimensions(),
        }
    }
}

// =============================================================================
// ImagePayload
// =============================================================================

/// Renderable content of a decoded file.
///
/// The bytes are shared and never mutated after decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    bytes: Arc<[u8]>,
    mime_type: MimeType,
    dimensions: Option<(u32, u32)>,
}

impl ImagePayload {
    #[must_use]
    pub fn new(bytes: Vec<u8>, mime_type: MimeType, dimensions: Option<(u32, u32)>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type,
            dimensions,
        }
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Width and height in pixels, when the header could be read.
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    /// Inline `data:` URI usable as an image source.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(self.bytes()))
    }
}

fn probe_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image_rs::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

// =============================================================================
// Decode results
// =============================================================================

/// A decoded file, ready to be appended to the image store.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub display_name: String,
    pub mime_type: MimeType,
    pub byte_size: u64,
    pub acquired_at: DateTime<Utc>,
    pub payload: ImagePayload,
}

/// Resolution of one decode job.
///
/// Not `Clone`: the gallery consumes each outcome once, which is what keeps
/// the pending-decode count exact.
#[derive(Debug)]
pub struct DecodeOutcome {
    generation: Generation,
    display_name: String,
    result: Result<DecodedImage, GalleryError>,
}

impl DecodeOutcome {
    /// Gallery generation the job was submitted under.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    #[must_use]
    pub fn into_result(self) -> Result<DecodedImage, GalleryError> {
        self.result
    }
}

/// Reads the job's file and produces its outcome.
pub async fn decode<H: FileHandle>(job: AcceptedJob<H>, options: DecodeOptions) -> DecodeOutcome {
    let (handle, generation, acquired_at) = job.into_parts();
    let display_name = handle.display_name().to_string();

    let result = match handle.read().await {
        Ok(bytes) => {
            let dimensions = if options.probe_dimensions {
                probe_dimensions(&bytes)
            } else {
                None
            };
            let mime_type = handle.mime_type().clone();
            Ok(DecodedImage {
                display_name: display_name.clone(),
                byte_size: handle.byte_size(),
                acquired_at,
                payload: ImagePayload::new(bytes, mime_type.clone(), dimensions),
                mime_type,
            })
        }
        Err(err) => Err(GalleryError::DecodeFailure {
            display_name: display_name.clone(),
            cause: err.to_string(),
        }),
    };

    DecodeOutcome {
        generation,
        display_name,
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gallery::IntakeSource;
    use crate::intake::{accept, MemoryFile};
    use crate::test_utils::png_bytes;

    async fn decode_one(file: MemoryFile, options: DecodeOptions) -> DecodeOutcome {
        let job = accept(vec![file], IntakeSource::Picker, Generation::default())
            .pop()
            .expect("picker accepts every file");
        decode(job, options).await
    }

    #[tokio::test]
    async fn decodes_png_with_dimensions() {
        let bytes = png_bytes(4, 3);
        let outcome = decode_one(
            MemoryFile::new("a.png", "image/png", bytes.clone()),
            DecodeOptions::default(),
        )
        .await;

        let image = outcome.into_result().expect("decode should succeed");
        assert_eq!(image.display_name, "a.png");
        assert_eq!(image.byte_size, bytes.len() as u64);
        assert_eq!(image.payload.dimensions(), Some((4, 3)));
        assert_eq!(image.payload.bytes(), bytes.as_slice());
    }

    #[tokio::test]
    async fn unparseable_bytes_still_decode() {
        let outcome = decode_one(
            MemoryFile::new("c.gif", "image/gif", b"not really a gif".to_vec()),
            DecodeOptions::default(),
        )
        .await;

        let image = outcome.into_result().expect("decode should succeed");
        assert_eq!(image.payload.dimensions(), None);
    }

    #[tokio::test]
    async fn probing_can_be_disabled() {
        let outcome = decode_one(
            MemoryFile::new("a.png", "image/png", png_bytes(2, 2)),
            DecodeOptions {
                probe_dimensions: false,
            },
        )
        .await;

        let image = outcome.into_result().expect("decode should succeed");
        assert_eq!(image.payload.dimensions(), None);
    }

    #[tokio::test]
    async fn read_error_becomes_decode_failure() {
        let outcome = decode_one(
            MemoryFile::failing("broken.png", "image/png", "device not ready"),
            DecodeOptions::default(),
        )
        .await;

        assert!(!outcome.is_success());
        assert_eq!(outcome.display_name(), "broken.png");
        assert_eq!(
            outcome.into_result().expect_err("decode should fail"),
            GalleryError::DecodeFailure {
                display_name: "broken.png".into(),
                cause: "device not ready".into(),
            }
        );
    }

    #[test]
    fn data_uri_is_inline_base64() {
        let payload = ImagePayload::new(b"hi".to_vec(), MimeType::new("image/png"), None);
        assert_eq!(payload.data_uri(), "data:image/png;base64,aGk=");
    }
}
