// SPDX-License-Identifier: MPL-2.0
//! Detail modal sub-component.
//!
//! The modal shows at most one entry, referenced by id only; it never owns
//! the entry. Opening/closing animations belong to the presentation layer
//! and never delay these transitions.

use serde::Serialize;

use super::store::ImageStore;
use crate::domain::gallery::EntryId;

/// Modal visibility state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "modal", content = "entry", rename_all = "snake_case")]
pub enum State {
    #[default]
    Closed,
    Open(EntryId),
}

/// User intents for the modal sub-component.
///
/// Store changes (removal, clear) are not messages: only the gallery, which
/// owns the store, can report them to the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Show an entry (thumbnail click or Enter/Space on a thumbnail).
    Open(EntryId),
    /// Close button.
    Close,
    /// Escape key.
    EscapePressed,
    /// Click on the backdrop around the image.
    BackdropActivated,
}

/// Effects produced by modal transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing changed.
    None,
    /// Closed -> Open.
    Opened(EntryId),
    /// Open -> Open on a different entry, without closing in between.
    Switched { from: EntryId, to: EntryId },
    /// Open -> Closed.
    Closed(EntryId),
    /// The requested entry is not in the store; the state is unchanged.
    ReferenceNotFound(EntryId),
}

impl Effect {
    /// Returns true if the modal state changed.
    #[must_use]
    pub fn is_transition(self) -> bool {
        matches!(
            self,
            Effect::Opened(_) | Effect::Switched { .. } | Effect::Closed(_)
        )
    }
}

impl State {
    /// Handle a modal message.
    ///
    /// `store` is consulted to validate `Open` requests.
    pub fn handle(&mut self, msg: Message, store: &ImageStore) -> Effect {
        match msg {
            Message::Open(id) => {
                if !store.contains(id) {
                    return Effect::ReferenceNotFound(id);
                }
                match *self {
                    State::Closed => {
                        *self = State::Open(id);
                        Effect::Opened(id)
                    }
                    State::Open(current) if current == id => Effect::None,
                    State::Open(current) => {
                        *self = State::Open(id);
                        Effect::Switched {
                            from: current,
                            to: id,
                        }
                    }
                }
            }
            Message::Close | Message::EscapePressed | Message::BackdropActivated => self.close(),
        }
    }

    /// An entry left the store. Closes the modal only if it showed that entry.
    pub(crate) fn on_entry_removed(&mut self, id: EntryId) -> Effect {
        if self.displayed_entry() == Some(id) {
            self.close()
        } else {
            Effect::None
        }
    }

    /// The store was emptied.
    pub(crate) fn on_store_cleared(&mut self) -> Effect {
        self.close()
    }

    fn close(&mut self) -> Effect {
        match std::mem::take(self) {
            State::Open(id) => Effect::Closed(id),
            State::Closed => Effect::None,
        }
    }

    /// The entry currently shown, if any. Callers must still look it up in
    /// the store before use.
    #[must_use]
    pub fn displayed_entry(&self) -> Option<EntryId> {
        match self {
            State::Open(id) => Some(*id),
            State::Closed => None,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, State::Open(_))
    }
}
