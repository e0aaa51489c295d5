// SPDX-License-Identifier: MPL-2.0
//! `lens_gallery` is the core of a client-side image gallery.
//!
//! Users add images from a file picker or by drag-and-drop; each file is read
//! asynchronously, appended to an ordered in-memory store, shown as a
//! thumbnail, and can be opened in a detail modal. The crate has no rendering
//! dependency: a presentation layer implements [`gallery::Presenter`] and
//! redraws from the [`gallery::Snapshot`] it receives after every mutation.

#![doc(html_root_url = "https://docs.rs/lens_gallery/0.1.0")]

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod gallery;
pub mod intake;

#[cfg(test)]
mod test_utils;
