// SPDX-License-Identifier: MPL-2.0
//! Gallery context: owns the image store, the modal and the pending-decode
//! count, and is the only thing that mutates them.
//!
//! Every mutation goes through a method on [`Gallery`], and every method that
//! changes observable state ends by handing a fresh [`Snapshot`] to the
//! installed [`Presenter`]. Per-file failures never escape: they are logged,
//! recorded in the diagnostics buffer, and reported back as a [`Resolution`].

pub mod keyboard;
pub mod modal;
pub mod snapshot;
pub mod store;
pub mod view_state;

use futures_util::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use std::fmt;

use crate::config::Config;
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsCollector, DiagnosticsHandle};
use crate::domain::gallery::{EntryId, Generation, IntakeSource};
use crate::error::GalleryError;
use crate::intake::{self, AcceptedJob, DecodeOptions, DecodeOutcome, FileHandle};

pub use keyboard::{Key, KeyIntent, KeyTarget};
pub use snapshot::{format_file_size, ModalView, Presenter, Snapshot, ThumbnailView};
pub use store::{ImageEntry, ImageStore};
pub use view_state::ViewState;

/// How a single decode completion was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The image joined the store under this id.
    Appended(EntryId),
    /// The store refused it (not an `image/*` type).
    Rejected,
    /// Reading the file failed.
    Failed,
    /// It finished after a clear and was dropped.
    Discarded,
}

/// Tally of one [`Gallery::ingest`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub offered: usize,
    pub accepted: usize,
    pub appended: usize,
    pub rejected: usize,
    pub failed: usize,
    pub discarded: usize,
}

impl IngestSummary {
    fn count(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Appended(_) => self.appended += 1,
            Resolution::Rejected => self.rejected += 1,
            Resolution::Failed => self.failed += 1,
            Resolution::Discarded => self.discarded += 1,
        }
    }
}

/// Result of a key press routed through [`Gallery::handle_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The presentation layer should open its file picker.
    OpenPicker,
    /// The key drove the modal.
    Modal(modal::Effect),
    /// Not a gallery shortcut.
    Ignored,
}

pub struct Gallery {
    store: ImageStore,
    modal: modal::State,
    pending_decodes: usize,
    generation: Generation,
    discard_stale_decodes: bool,
    decode_options: DecodeOptions,
    diagnostics: DiagnosticsCollector,
    presenter: Option<Box<dyn Presenter>>,
}

impl fmt::Debug for Gallery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gallery")
            .field("entries", &self.store.len())
            .field("modal", &self.modal)
            .field("pending_decodes", &self.pending_decodes)
            .field("generation", &self.generation)
            .field("discard_stale_decodes", &self.discard_stale_decodes)
            .field("has_presenter", &self.presenter.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Gallery {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            store: ImageStore::new(),
            modal: modal::State::default(),
            pending_decodes: 0,
            generation: Generation::default(),
            discard_stale_decodes: config.discard_stale_decodes(),
            decode_options: DecodeOptions::from(config),
            diagnostics: DiagnosticsCollector::new(config.diagnostics_capacity()),
            presenter: None,
        }
    }

    /// Installs a presenter and renders the initial state to it.
    #[must_use]
    pub fn with_presenter(mut self, presenter: Box<dyn Presenter>) -> Self {
        self.set_presenter(presenter);
        self
    }

    pub fn set_presenter(&mut self, presenter: Box<dyn Presenter>) {
        self.presenter = Some(presenter);
        self.notify();
    }

    // -------------------------------------------------------------------------
    // Intake and decode completion
    // -------------------------------------------------------------------------

    /// Runs intake on `files` and registers the resulting jobs as pending.
    ///
    /// The caller must eventually pass each job through [`intake::decode`]
    /// and hand the outcome to [`Gallery::resolve`]. An empty selection
    /// changes nothing.
    pub fn submit<H: FileHandle>(
        &mut self,
        files: Vec<H>,
        source: IntakeSource,
    ) -> Vec<AcceptedJob<H>> {
        let offered = files.len();
        if offered == 0 {
            return Vec::new();
        }

        let jobs = intake::accept(files, source, self.generation);
        tracing::debug!(?source, offered, accepted = jobs.len(), "intake");
        self.diagnostics.record(DiagnosticEventKind::Intake {
            source,
            offered,
            accepted: jobs.len(),
        });

        if !jobs.is_empty() {
            self.pending_decodes += jobs.len();
            self.notify();
        }
        jobs
    }

    /// Applies one decode completion.
    pub fn resolve(&mut self, outcome: DecodeOutcome) -> Resolution {
        if self.pending_decodes == 0 {
            tracing::warn!(
                name = outcome.display_name(),
                "decode resolved with no pending decodes"
            );
        } else {
            self.pending_decodes -= 1;
        }

        let stale = outcome.generation() != self.generation;
        let display_name = outcome.display_name().to_string();

        let resolution = match outcome.into_result() {
            Ok(_) if stale && self.discard_stale_decodes => {
                tracing::debug!(name = %display_name, "discarding decode from before clear");
                self.diagnostics
                    .record(DiagnosticEventKind::StaleDecodeDiscarded { display_name });
                Resolution::Discarded
            }
            Ok(image) => match self.store.append(image) {
                Ok(entry) => {
                    tracing::debug!(id = %entry.id(), name = entry.display_name(), "appended");
                    Resolution::Appended(entry.id())
                }
                Err(err) => {
                    tracing::warn!(%err, "entry rejected");
                    self.diagnostics.record(rejection_event(err, display_name));
                    Resolution::Rejected
                }
            },
            Err(err) => {
                tracing::warn!(%err, "decode failed");
                let cause = match err {
                    GalleryError::DecodeFailure { cause, .. } => cause,
                    other => other.to_string(),
                };
                self.diagnostics.record(DiagnosticEventKind::DecodeFailed {
                    display_name,
                    cause,
                });
                Resolution::Failed
            }
        };

        self.notify();
        resolution
    }

    /// Submits `files`, decodes every accepted job concurrently and resolves
    /// each outcome as soon as it completes.
    ///
    /// Entries therefore land in completion order, not selection order.
    pub async fn ingest<H: FileHandle>(
        &mut self,
        files: Vec<H>,
        source: IntakeSource,
    ) -> IngestSummary {
        let offered = files.len();
        let jobs = self.submit(files, source);
        let mut summary = IngestSummary {
            offered,
            accepted: jobs.len(),
            ..IngestSummary::default()
        };

        let options = self.decode_options;
        let mut decodes: FuturesUnordered<_> = jobs
            .into_iter()
            .map(|job| intake::decode(job, options))
            .collect();

        while let Some(outcome) = decodes.next().await {
            summary.count(self.resolve(outcome));
        }
        summary
    }

    // -------------------------------------------------------------------------
    // Store mutations
    // -------------------------------------------------------------------------

    /// Empties the gallery and closes the modal. Returns the number of
    /// entries removed.
    ///
    /// Decodes still in flight stay counted as pending; whether they land
    /// depends on `discard_stale_decodes`.
    pub fn clear(&mut self) -> usize {
        let removed = self.store.clear();
        self.generation = self.generation.next();
        self.modal.on_store_cleared();

        tracing::debug!(removed, pending = self.pending_decodes, "gallery cleared");
        self.diagnostics.record(DiagnosticEventKind::GalleryCleared {
            removed,
            pending: self.pending_decodes,
        });

        self.notify();
        removed
    }

    /// Removes one entry, closing the modal if it was showing it.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::ReferenceNotFound`] if no entry has this id.
    pub fn remove(&mut self, id: EntryId) -> Result<ImageEntry, GalleryError> {
        let entry = match self.store.remove(id) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(%id, "remove: no such entry");
                self.diagnostics
                    .record(DiagnosticEventKind::ReferenceNotFound { id });
                return Err(err);
            }
        };

        self.modal.on_entry_removed(id);
        self.diagnostics.record(DiagnosticEventKind::EntryRemoved { id });
        self.notify();
        Ok(entry)
    }

    // -------------------------------------------------------------------------
    // Modal
    // -------------------------------------------------------------------------

    /// Routes a user intent to the modal.
    pub fn dispatch(&mut self, msg: modal::Message) -> modal::Effect {
        let effect = self.modal.handle(msg, &self.store);
        match effect {
            modal::Effect::ReferenceNotFound(id) => {
                tracing::warn!(%id, "modal reference not found");
                self.diagnostics
                    .record(DiagnosticEventKind::ReferenceNotFound { id });
            }
            effect if effect.is_transition() => {
                tracing::debug!(?effect, "modal");
                self.notify();
            }
            _ => {}
        }
        effect
    }

    /// Opens the modal on `id`, or switches to it if already open.
    pub fn open(&mut self, id: EntryId) -> modal::Effect {
        self.dispatch(modal::Message::Open(id))
    }

    /// Close button.
    pub fn close(&mut self) -> modal::Effect {
        self.dispatch(modal::Message::Close)
    }

    /// Click on the modal backdrop.
    pub fn backdrop_activated(&mut self) -> modal::Effect {
        self.dispatch(modal::Message::BackdropActivated)
    }

    /// Routes a key press on `target` through the keyboard surface.
    pub fn handle_key(&mut self, key: Key, target: KeyTarget) -> KeyOutcome {
        match keyboard::intent(key, target, self.modal.is_open()) {
            KeyIntent::OpenPicker => KeyOutcome::OpenPicker,
            KeyIntent::OpenEntry(id) => KeyOutcome::Modal(self.open(id)),
            KeyIntent::CloseModal => {
                KeyOutcome::Modal(self.dispatch(modal::Message::EscapePressed))
            }
            KeyIntent::Ignore => KeyOutcome::Ignored,
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn view_state(&self) -> ViewState {
        ViewState::derive(self.store.len(), self.pending_decodes)
    }

    #[must_use]
    pub fn pending_decodes(&self) -> usize {
        self.pending_decodes
    }

    #[must_use]
    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    #[must_use]
    pub fn modal(&self) -> modal::State {
        self.modal
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn decode_options(&self) -> DecodeOptions {
        self.decode_options
    }

    #[must_use]
    pub fn discards_stale_decodes(&self) -> bool {
        self.discard_stale_decodes
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::capture(&self.store, self.pending_decodes, self.modal)
    }

    #[must_use]
    pub fn diagnostics(&self) -> &DiagnosticsCollector {
        &self.diagnostics
    }

    /// Mutable access, e.g. to drain events sent through handles.
    pub fn diagnostics_mut(&mut self) -> &mut DiagnosticsCollector {
        &mut self.diagnostics
    }

    /// Handle for collaborators that report problems without owning the gallery.
    #[must_use]
    pub fn diagnostics_handle(&self) -> DiagnosticsHandle {
        self.diagnostics.handle()
    }

    fn notify(&mut self) {
        if let Some(presenter) = self.presenter.as_mut() {
            let snapshot = Snapshot::capture(&self.store, self.pending_decodes, self.modal);
            presenter.render(&snapshot);
        }
    }
}

fn rejection_event(err: GalleryError, display_name: String) -> DiagnosticEventKind {
    match err {
        GalleryError::InvalidEntry {
            display_name,
            mime_type,
        } => DiagnosticEventKind::EntryRejected {
            display_name,
            mime_type: mime_type.to_string(),
        },
        other => DiagnosticEventKind::DecodeFailed {
            display_name,
            cause: other.to_string(),
        },
    }
}
