// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Intake**: Decode pipeline behaviour
//! - **Diagnostics**: Event buffer sizing

// ==========================================================================
// Intake Defaults
// ==========================================================================

/// Drop decodes that complete after the gallery was cleared.
pub const DEFAULT_DISCARD_STALE_DECODES: bool = true;

/// Read image headers during decoding to report pixel dimensions.
pub const DEFAULT_PROBE_DIMENSIONS: bool = true;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 256;

/// Minimum number of diagnostic events kept in memory.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 16;

/// Maximum number of diagnostic events kept in memory.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 4096;
