// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session key registry and the queue of keys awaiting upload.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::key::TranslationKey;

/// Every key seen during the session. Append-only by key.
///
/// Keys declared up front are tracked separately from keys discovered by
/// lookups; only a declared key's default stands in for a missing value.
#[derive(Debug, Clone, Default)]
pub struct Registry {
	keys: HashMap<String, TranslationKey>,
	declared: HashSet<String>,
}

impl Registry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts `key` unless one with the same identity exists.
	///
	/// Returns true when the key was new. An existing entry is never replaced.
	pub fn insert(&mut self, key: TranslationKey) -> bool {
		if self.keys.contains_key(&key.key) {
			return false;
		}
		self.keys.insert(key.key.clone(), key);
		true
	}

	/// Records `key` as an explicit declaration.
	///
	/// A key only discovered by a lookup takes on the declared default,
	/// description and namespace. Returns false if the key was already
	/// declared, in which case nothing changes.
	pub fn declare(&mut self, key: TranslationKey) -> bool {
		if !self.declared.insert(key.key.clone()) {
			return false;
		}
		self.keys.insert(key.key.clone(), key);
		true
	}

	pub fn is_declared(&self, key: &str) -> bool {
		self.declared.contains(key)
	}

	/// Default value of a declared key.
	pub fn declared_default(&self, key: &str) -> Option<&str> {
		if !self.declared.contains(key) {
			return None;
		}
		self.keys.get(key).map(|k| k.default_value.as_str())
	}

	pub fn get(&self, key: &str) -> Option<&TranslationKey> {
		self.keys.get(key)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.keys.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.keys.len()
	}

	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &TranslationKey> {
		self.keys.values()
	}
}

/// Keys waiting to be uploaded to the backend registry, ordered by key.
#[derive(Debug, Clone, Default)]
pub struct PendingSync {
	keys: BTreeMap<String, TranslationKey>,
}

impl PendingSync {
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues `key`, replacing a queued entry with the same identity.
	pub fn enqueue(&mut self, key: TranslationKey) {
		self.keys.insert(key.key.clone(), key);
	}

	/// Puts a failed batch back without overwriting entries queued since.
	pub fn requeue(&mut self, batch: Vec<TranslationKey>) {
		for key in batch {
			self.keys.entry(key.key.clone()).or_insert(key);
		}
	}

	pub fn drain(&mut self) -> Vec<TranslationKey> {
		std::mem::take(&mut self.keys).into_values().collect()
	}

	pub fn contains(&self, key: &str) -> bool {
		self.keys.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.keys.len()
	}

	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}
}
