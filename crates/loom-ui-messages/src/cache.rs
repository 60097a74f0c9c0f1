// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Persisted per-locale bundle cache.
//!
//! Each locale occupies two store keys: `translations_{locale}` holds the
//! bundle as JSON and `translations_{locale}_timestamp` holds the write time
//! in epoch milliseconds. Entries are fresh for the configured TTL and at
//! most `max_locales` locales are retained; the oldest by timestamp go first.

use std::time::Duration;

use loom_ui_messages_core::{CacheEntry, TranslationBundle};
use tracing::{debug, warn};

use crate::clock::SharedClock;
use crate::error::{MessagesError, Result};
use crate::storage::SharedStore;

const KEY_PREFIX: &str = "translations_";
const TIMESTAMP_SUFFIX: &str = "_timestamp";

pub fn bundle_key(locale: &str) -> String {
	format!("{KEY_PREFIX}{locale}")
}

pub fn timestamp_key(locale: &str) -> String {
	format!("{KEY_PREFIX}{locale}{TIMESTAMP_SUFFIX}")
}

/// Bundle cache over a [`KeyValueStore`](crate::storage::KeyValueStore).
#[derive(Clone)]
pub struct BundleCache {
	store: SharedStore,
	clock: SharedClock,
	ttl: Duration,
	max_locales: usize,
}

impl BundleCache {
	pub fn new(store: SharedStore, clock: SharedClock, ttl: Duration, max_locales: usize) -> Self {
		Self {
			store,
			clock,
			ttl,
			max_locales,
		}
	}

	/// Returns the bundle for `locale` if a fresh entry exists.
	///
	/// Store and decode failures are logged and treated as a miss.
	pub fn load_fresh(&self, locale: &str) -> Option<TranslationBundle> {
		let entry = match self.load_entry(locale) {
			Ok(Some(entry)) => entry,
			Ok(None) => return None,
			Err(e) => {
				warn!(locale = %locale, error = %e, "Failed to read cached bundle");
				return None;
			}
		};

		let now = self.clock.now_millis();
		if entry.is_fresh(now, self.ttl.as_millis() as i64) {
			debug!(locale = %locale, age_ms = entry.age_millis(now), "Cached bundle is fresh");
			Some(entry.bundle)
		} else {
			debug!(locale = %locale, age_ms = entry.age_millis(now), "Cached bundle is stale");
			None
		}
	}

	/// Reads the entry for `locale` regardless of age.
	///
	/// A bundle without a readable timestamp is reported with timestamp 0.
	pub fn load_entry(&self, locale: &str) -> Result<Option<CacheEntry>> {
		let Some(raw) = self.store.get(&bundle_key(locale))? else {
			return Ok(None);
		};
		let bundle: TranslationBundle = serde_json::from_str(&raw)?;
		let timestamp = self.read_timestamp(locale)?.unwrap_or(0);
		Ok(Some(CacheEntry { bundle, timestamp }))
	}

	/// Persists `bundle` for `locale` stamped with the current time, then
	/// evicts the oldest locales beyond the retention limit.
	pub fn store(&self, locale: &str, bundle: &TranslationBundle) -> Result<()> {
		let json = serde_json::to_string(bundle)?;
		let now = self.clock.now_millis();
		self.store.set(&bundle_key(locale), &json)?;
		self.store.set(&timestamp_key(locale), &now.to_string())?;
		debug!(locale = %locale, entries = bundle.len(), "Cached bundle");
		self.evict(locale)
	}

	/// Removes the entry for `locale`.
	pub fn remove(&self, locale: &str) -> Result<()> {
		self.store.remove(&bundle_key(locale))?;
		self.store.remove(&timestamp_key(locale))?;
		Ok(())
	}

	/// Cached locales with their timestamps, newest first.
	pub fn cached_locales(&self) -> Result<Vec<(String, i64)>> {
		let mut locales = Vec::new();
		for key in self.store.keys()? {
			let Some(locale) = key.strip_prefix(KEY_PREFIX) else {
				continue;
			};
			if locale.is_empty() || locale.ends_with(TIMESTAMP_SUFFIX) {
				continue;
			}
			let timestamp = self.read_timestamp(locale)?.unwrap_or(0);
			locales.push((locale.to_string(), timestamp));
		}
		locales.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
		Ok(locales)
	}

	fn read_timestamp(&self, locale: &str) -> Result<Option<i64>> {
		let raw = self.store.get(&timestamp_key(locale))?;
		Ok(raw.and_then(|s| s.trim().parse().ok()))
	}

	fn evict(&self, in_use: &str) -> Result<()> {
		let locales = self.cached_locales()?;
		if locales.len() <= self.max_locales {
			return Ok(());
		}

		let mut kept = 0;
		let mut first_error: Option<MessagesError> = None;
		for (locale, timestamp) in locales {
			if locale == in_use || kept < self.max_locales.saturating_sub(1) {
				if locale != in_use {
					kept += 1;
				}
				continue;
			}
			debug!(locale = %locale, timestamp, "Evicting cached bundle");
			if let Err(e) = self.remove(&locale) {
				first_error.get_or_insert(e);
			}
		}

		match first_error {
			Some(e) => Err(e),
			None => Ok(()),
		}
	}
}
