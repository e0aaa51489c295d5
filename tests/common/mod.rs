// SPDX-License-Identifier: MPL-2.0
//! Shared fixtures for the integration tests and the `ingest` bench.
//!
//! `png_bytes` encodes the same image as the crate's unit-test fixture.
#![allow(dead_code)]

use lens_gallery::domain::gallery::{EntryId, IntakeSource};
use lens_gallery::gallery::{Gallery, Presenter, Snapshot, ViewState};
use lens_gallery::intake::MemoryFile;
use std::cell::RefCell;
use std::io::Cursor;
use std::rc::Rc;

/// Encodes a blank RGBA image of the given size as PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = image_rs::DynamicImage::ImageRgba8(image_rs::RgbaImage::new(width, height));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image_rs::ImageFormat::Png)
        .expect("encoding a PNG in memory should not fail");
    bytes
}

pub fn image_file(name: &str, mime: &str) -> MemoryFile {
    MemoryFile::new(name, mime, png_bytes(3, 2))
}

pub fn png_file(name: &str) -> MemoryFile {
    image_file(name, "image/png")
}

pub fn text_file(name: &str) -> MemoryFile {
    MemoryFile::new(name, "text/plain", b"not an image".to_vec())
}

/// Gallery holding `count` PNG entries with ids 1..=count.
pub async fn populated_gallery(count: usize) -> Gallery {
    let mut gallery = Gallery::default();
    let files = (1..=count).map(|i| png_file(&format!("{i}.png"))).collect();
    gallery.ingest(files, IntakeSource::Picker).await;
    assert_eq!(gallery.store().len(), count);
    gallery
}

/// What one render call showed.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub view_state: ViewState,
    pub names: Vec<String>,
    pub pending: usize,
    pub modal: Option<EntryId>,
    pub scroll_locked: bool,
}

/// Presenter that keeps every frame it is given.
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    frames: Rc<RefCell<Vec<Frame>>>,
}

impl RecordingPresenter {
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.borrow().clone()
    }

    /// View states with consecutive repeats collapsed.
    pub fn view_state_transitions(&self) -> Vec<ViewState> {
        let mut states: Vec<ViewState> = Vec::new();
        for frame in self.frames.borrow().iter() {
            if states.last() != Some(&frame.view_state) {
                states.push(frame.view_state);
            }
        }
        states
    }

    pub fn modal_history(&self) -> Vec<Option<EntryId>> {
        self.frames.borrow().iter().map(|frame| frame.modal).collect()
    }

    pub fn reset(&self) {
        self.frames.borrow_mut().clear();
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, snapshot: &Snapshot<'_>) {
        self.frames.borrow_mut().push(Frame {
            view_state: snapshot.view_state(),
            names: snapshot
                .entries()
                .iter()
                .map(|entry| entry.display_name().to_string())
                .collect(),
            pending: snapshot.pending_decodes(),
            modal: snapshot.modal().entry_id(),
            scroll_locked: snapshot.scroll_locked(),
        });
    }
}
