// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects shared by the gallery components.
//!
//! This module contains pure domain types with no I/O and no rendering
//! concerns, so the state machines built on top of them stay testable.
//!
//! # Modules
//!
//! - [`gallery`]: Gallery identifiers and file typing ([`EntryId`](gallery::EntryId),
//!   [`Generation`](gallery::Generation), [`MimeType`](gallery::MimeType),
//!   [`IntakeSource`](gallery::IntakeSource))

pub mod gallery;
