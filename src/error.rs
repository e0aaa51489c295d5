// SPDX-License-Identifier: MPL-2.0
use crate::domain::gallery::{EntryId, MimeType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Gallery Error: {0}")]
    Gallery(#[from] GalleryError),
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Argument Error: {0}")]
    Arguments(String),
}

/// Failures the gallery pipeline handles locally.
///
/// None of these reach a top-level handler: the gallery records them as
/// diagnostics and stays usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryError {
    /// The file did not pass the `image/*` check.
    #[error("unsupported file type {mime_type} for {display_name:?}")]
    UnsupportedType {
        display_name: String,
        mime_type: MimeType,
    },

    /// Reading the file bytes failed.
    #[error("failed to decode {display_name:?}: {cause}")]
    DecodeFailure { display_name: String, cause: String },

    /// The image store refused an entry whose type is not an image.
    #[error("entry {display_name:?} rejected: {mime_type} is not an image type")]
    InvalidEntry {
        display_name: String,
        mime_type: MimeType,
    },

    /// No entry with this id is in the store.
    #[error("no entry with id {0}")]
    ReferenceNotFound(EntryId),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
