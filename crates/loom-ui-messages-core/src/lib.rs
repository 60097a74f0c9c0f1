// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for Loom UI messages.
//!
//! This crate holds the data model shared by the translation provider SDK
//! and anything else that speaks the `ui-messages` API:
//!
//! - [`TranslationKey`] and [`TranslationBundle`]
//! - The append-only [`Registry`], the [`PendingSync`] queue and the
//!   bounded [`MissingKeys`] set
//! - [`LoadState`] for a locale session
//! - Locale normalization and `{name}` placeholder formatting
//! - Request/response payloads for the REST endpoints
//!
//! Nothing in here performs I/O.

mod bundle;
mod format;
mod key;
mod locale;
mod missing;
mod registry;
mod state;
pub mod wire;

pub use bundle::{CacheEntry, TranslationBundle};
pub use format::format_message;
pub use key::TranslationKey;
pub use locale::{normalize_locale, DEFAULT_LOCALE};
pub use missing::{MissingKeys, DEFAULT_MAX_MISSING_KEYS};
pub use registry::{PendingSync, Registry};
pub use state::LoadState;
