// SPDX-License-Identifier: MPL-2.0
//! Keyboard surface.
//!
//! Maps a key press on a focus target to a gallery intent. Enter and Space
//! activate whatever has focus; Escape only ever closes the modal.

use crate::domain::gallery::EntryId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Other,
}

impl Key {
    /// Parses a DOM-style key name (`"Enter"`, `" "`, `"Escape"`).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Enter" => Key::Enter,
            " " | "Space" | "Spacebar" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }

    fn activates(self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

/// Element that had focus when the key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTarget {
    /// The upload button.
    UploadTrigger,
    /// A gallery thumbnail.
    Thumbnail(EntryId),
    /// Anything else (the document itself).
    Document,
}

/// Gallery intent produced by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    /// The presentation layer should show the file picker.
    OpenPicker,
    /// Open the modal on an entry.
    OpenEntry(EntryId),
    /// Close the modal.
    CloseModal,
    /// Not a gallery shortcut.
    Ignore,
}

/// Resolves a key press. `modal_open` gates Escape.
#[must_use]
pub fn intent(key: Key, target: KeyTarget, modal_open: bool) -> KeyIntent {
    if key == Key::Escape {
        return if modal_open {
            KeyIntent::CloseModal
        } else {
            KeyIntent::Ignore
        };
    }
    if !key.activates() {
        return KeyIntent::Ignore;
    }
    match target {
        KeyTarget::UploadTrigger => KeyIntent::OpenPicker,
        KeyTarget::Thumbnail(id) => KeyIntent::OpenEntry(id),
        KeyTarget::Document => KeyIntent::Ignore,
    }
}
