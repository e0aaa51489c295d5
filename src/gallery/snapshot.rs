// SPDX-License-Identifier: MPL-2.0
//! Render contract between the gallery and its presentation layer.
//!
//! The presentation layer never touches gallery state directly. After every
//! mutation it receives a read-only [`Snapshot`] and redraws from it.

use super::modal;
use super::store::{ImageEntry, ImageStore};
use super::view_state::ViewState;
use crate::domain::gallery::EntryId;

/// Consumer of gallery snapshots (DOM adapter, terminal printer, test recorder).
pub trait Presenter {
    /// Called after every gallery mutation.
    fn render(&mut self, snapshot: &Snapshot<'_>);
}

/// What the modal shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModalView<'a> {
    Closed,
    Open(&'a ImageEntry),
}

impl ModalView<'_> {
    #[must_use]
    pub fn entry_id(&self) -> Option<EntryId> {
        match self {
            ModalView::Open(entry) => Some(entry.id()),
            ModalView::Closed => None,
        }
    }
}

/// Read-only view of the whole gallery at one point in time.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    entries: &'a [ImageEntry],
    view_state: ViewState,
    pending_decodes: usize,
    modal: ModalView<'a>,
}

impl<'a> Snapshot<'a> {
    pub(crate) fn capture(
        store: &'a ImageStore,
        pending_decodes: usize,
        modal: modal::State,
    ) -> Self {
        let modal = modal
            .displayed_entry()
            .and_then(|id| store.get(id).ok())
            .map_or(ModalView::Closed, ModalView::Open);

        Self {
            entries: store.entries(),
            view_state: ViewState::derive(store.len(), pending_decodes),
            pending_decodes,
            modal,
        }
    }

    /// Entries in display order.
    #[must_use]
    pub fn entries(&self) -> &'a [ImageEntry] {
        self.entries
    }

    #[must_use]
    pub fn view_state(&self) -> ViewState {
        self.view_state
    }

    #[must_use]
    pub fn pending_decodes(&self) -> usize {
        self.pending_decodes
    }

    #[must_use]
    pub fn modal(&self) -> ModalView<'a> {
        self.modal
    }

    /// Page scrolling is locked while the modal is open.
    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        matches!(self.modal, ModalView::Open(_))
    }

    /// Thumbnail captions in display order.
    pub fn thumbnails(&self) -> impl Iterator<Item = ThumbnailView<'a>> + 'a {
        self.entries.iter().map(ThumbnailView::new)
    }
}

/// Labels for one gallery tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailView<'a> {
    pub id: EntryId,
    pub caption: &'a str,
    pub aria_label: String,
    pub size_label: String,
}

impl<'a> ThumbnailView<'a> {
    #[must_use]
    pub fn new(entry: &'a ImageEntry) -> Self {
        Self {
            id: entry.id(),
            caption: entry.display_name(),
            aria_label: format!("View {}", entry.display_name()),
            size_label: format_file_size(entry.byte_size()),
        }
    }
}

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Formats a byte count with base-1024 units and at most two decimals.
///
/// Ties round half-up (`1152` is `1.13 KB`). Anything from 1 TiB up is still
/// expressed in GB.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    // `{:.2}` alone would round exact ties to even.
    let rounded = format!("{:.2}", (value * 100.0).round() / 100.0);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[unit])
}
