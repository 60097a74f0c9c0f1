// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Translation provider SDK for Loom UI messages.
//!
//! This crate keeps the active locale's UI strings in memory and exposes a
//! total lookup, [`TranslationProvider::t`], that never fails.
//!
//! # Features
//!
//! - **Lazy loading**: bundles are fetched per language on locale change,
//!   with built-in fallback strings installed immediately
//! - **Local persistence**: fetched bundles are cached for an hour in a
//!   pluggable [`KeyValueStore`], keeping at most five locales
//! - **Fallback locale**: one retry against the fallback locale when the
//!   requested bundle cannot be fetched
//! - **Cancellation**: a locale change aborts the fetch for the previous one
//! - **Key discovery**: unseen keys are registered and uploaded in the
//!   background; missing keys are reported periodically
//!
//! # Example
//!
//! ```ignore
//! use loom_ui_messages::{ProviderConfig, TranslationProvider, FileStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ProviderConfig::load(None)?;
//!     let provider = TranslationProvider::builder()
//!         .config(config)
//!         .store(Arc::new(FileStore::open_default()?))
//!         .build()?;
//!
//!     if let Some(load) = provider.init() {
//!         load.await?;
//!     }
//!
//!     println!("{}", provider.t("editor.toolbar.publish", Some("Publish")));
//!
//!     provider.teardown().await;
//!     Ok(())
//! }
//! ```

mod cache;
mod clock;
mod config;
mod error;
mod provider;
mod storage;
mod tasks;
mod transport;

pub use cache::{bundle_key, timestamp_key, BundleCache};
pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use config::{ProviderConfig, ProviderConfigLayer};
pub use error::{ConfigError, MessagesError, Result, StorageError};
pub use provider::{TranslationProvider, TranslationProviderBuilder};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SharedStore};
pub use transport::{HttpTransport, MessagesTransport, SharedTransport};

// Re-export core types for convenience
pub use loom_ui_messages_core::wire::{
	ReportMissingRequest, SyncKeyError, SyncKeysRequest, SyncKeysResponse,
};
pub use loom_ui_messages_core::{
	format_message, normalize_locale, CacheEntry, LoadState, TranslationBundle, TranslationKey,
	DEFAULT_LOCALE,
};
