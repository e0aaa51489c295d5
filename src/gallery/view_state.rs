// SPDX-License-Identifier: MPL-2.0
//! Gallery view state, derived from store size and in-flight decodes.
//!
//! Nothing here is stored: the state is recomputed from its two inputs
//! whenever someone asks, so it cannot drift from the store.

use serde::Serialize;

/// What the gallery area should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    /// No entries and nothing loading: show the empty-state placeholder.
    Empty,
    /// At least one decode is in flight.
    Loading,
    /// Entries present and nothing loading.
    Populated,
}

impl ViewState {
    /// Derives the state. Pending decodes take priority over store size.
    #[must_use]
    pub fn derive(entry_count: usize, pending_decodes: usize) -> Self {
        if pending_decodes > 0 {
            ViewState::Loading
        } else if entry_count == 0 {
            ViewState::Empty
        } else {
            ViewState::Populated
        }
    }

    /// Whether the empty-state placeholder is visible.
    #[must_use]
    pub fn shows_empty_placeholder(self) -> bool {
        self == ViewState::Empty
    }
}
