// SPDX-License-Identifier: MPL-2.0
//! Image store: the ordered, in-memory collection of accepted images.
//!
//! Insertion order is display order. Entries are never edited: they are
//! appended whole and removed whole. The store is the only place that grows
//! the gallery, and it re-checks the `image/*` type on every append because
//! the picker path does not filter before decoding.

use chrono::{DateTime, Utc};

use crate::domain::gallery::{EntryId, MimeType};
use crate::error::GalleryError;
use crate::intake::{DecodedImage, ImagePayload};

/// One accepted, decoded image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEntry {
    id: EntryId,
    display_name: String,
    byte_size: u64,
    mime_type: MimeType,
    acquired_at: DateTime<Utc>,
    payload: ImagePayload,
}

impl ImageEntry {
    #[must_use]
    pub fn id(&self) -> EntryId {
        self.id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn byte_size(&self) -> u64 {
        self.byte_size
    }

    #[must_use]
    pub fn mime_type(&self) -> &MimeType {
        &self.mime_type
    }

    /// File modification time, or acceptance time when unknown. Display only.
    #[must_use]
    pub fn acquired_at(&self) -> DateTime<Utc> {
        self.acquired_at
    }

    #[must_use]
    pub fn payload(&self) -> &ImagePayload {
        &self.payload
    }
}

/// Ordered collection of [`ImageEntry`], owner of every entry.
#[derive(Debug)]
pub struct ImageStore {
    entries: Vec<ImageEntry>,
    next_id: u64,
}

impl ImageStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Appends a decoded image and returns the stored entry.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::InvalidEntry`] without touching the store if
    /// the MIME type does not start with `image/`.
    pub fn append(&mut self, image: DecodedImage) -> Result<&ImageEntry, GalleryError> {
        if !image.mime_type.is_image() {
            return Err(GalleryError::InvalidEntry {
                display_name: image.display_name,
                mime_type: image.mime_type,
            });
        }

        let id = EntryId::new(self.next_id);
        self.next_id += 1;
        self.entries.push(ImageEntry {
            id,
            display_name: image.display_name,
            byte_size: image.byte_size,
            mime_type: image.mime_type,
            acquired_at: image.acquired_at,
            payload: image.payload,
        });

        let index = self.entries.len() - 1;
        Ok(&self.entries[index])
    }

    /// Looks up an entry by id.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::ReferenceNotFound`] if no entry has this id.
    pub fn get(&self, id: EntryId) -> Result<&ImageEntry, GalleryError> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .ok_or(GalleryError::ReferenceNotFound(id))
    }

    #[must_use]
    pub fn contains(&self, id: EntryId) -> bool {
        self.get(id).is_ok()
    }

    /// Removes one entry, keeping the order of the others.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::ReferenceNotFound`] if no entry has this id.
    pub fn remove(&mut self, id: EntryId) -> Result<ImageEntry, GalleryError> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(GalleryError::ReferenceNotFound(id))?;
        Ok(self.entries.remove(index))
    }

    /// Empties the store and returns how many entries were dropped.
    ///
    /// Ids keep counting up, so an id from before the clear never matches a
    /// later entry.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageEntry> {
        self.entries.iter()
    }
}

impl Default for ImageStore {
    fn default() -> Self {
        Self::new()
    }
}
