// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bounded, insertion-ordered set of keys that were requested but not found.

use std::collections::{HashSet, VecDeque};

/// Default cap on tracked missing keys.
pub const DEFAULT_MAX_MISSING_KEYS: usize = 1000;

/// Keys requested but absent from the active bundle.
///
/// Order is insertion order. When the cap is reached, inserting a new key
/// first drops the oldest entries so that only the newest `len / 2` remain.
#[derive(Debug, Clone)]
pub struct MissingKeys {
	cap: usize,
	order: VecDeque<String>,
	members: HashSet<String>,
}

impl MissingKeys {
	/// A cap of zero disables tracking.
	pub fn new(cap: usize) -> Self {
		Self {
			cap,
			order: VecDeque::new(),
			members: HashSet::new(),
		}
	}

	/// Records `key`. Returns false if it was already tracked or tracking is off.
	pub fn insert(&mut self, key: &str) -> bool {
		if self.cap == 0 || self.members.contains(key) {
			return false;
		}

		if self.order.len() >= self.cap {
			let keep = self.order.len() / 2;
			let evict = self.order.len() - keep;
			for old in self.order.drain(..evict) {
				self.members.remove(&old);
			}
		}

		self.order.push_back(key.to_string());
		self.members.insert(key.to_string());
		true
	}

	pub fn contains(&self, key: &str) -> bool {
		self.members.contains(key)
	}

	pub fn len(&self) -> usize {
		self.order.len()
	}

	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}

	pub fn cap(&self) -> usize {
		self.cap
	}

	/// Keys in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.order.iter().map(String::as_str)
	}

	/// Empties the set, returning keys oldest first.
	pub fn drain(&mut self) -> Vec<String> {
		self.members.clear();
		self.order.drain(..).collect()
	}
}

impl Default for MissingKeys {
	fn default() -> Self {
		Self::new(DEFAULT_MAX_MISSING_KEYS)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn duplicate_insert_is_ignored() {
		let mut missing = MissingKeys::default();
		assert!(missing.insert("nav.missing"));
		assert!(!missing.insert("nav.missing"));
		assert!(!missing.insert("nav.missing"));
		assert_eq!(missing.len(), 1);
	}

	#[test]
	fn cap_keeps_newest_half_plus_new_key() {
		let mut missing = MissingKeys::new(1000);
		for i in 0..1000 {
			missing.insert(&format!("key.{i}"));
		}
		assert_eq!(missing.len(), 1000);

		missing.insert("key.new");
		assert_eq!(missing.len(), 501);
		assert!(!missing.contains("key.0"));
		assert!(!missing.contains("key.499"));
		assert!(missing.contains("key.500"));
		assert!(missing.contains("key.999"));
		assert_eq!(missing.iter().last(), Some("key.new"));
	}

	#[test]
	fn evicted_key_can_be_tracked_again() {
		let mut missing = MissingKeys::new(2);
		missing.insert("a");
		missing.insert("b");
		missing.insert("c");
		assert_eq!(missing.iter().collect::<Vec<_>>(), vec!["b", "c"]);
		assert!(missing.insert("a"));
	}

	#[test]
	fn zero_cap_disables_tracking() {
		let mut missing = MissingKeys::new(0);
		assert!(!missing.insert("a"));
		assert!(missing.is_empty());
	}

	#[test]
	fn drain_returns_insertion_order_and_clears() {
		let mut missing = MissingKeys::default();
		missing.insert("z");
		missing.insert("a");
		missing.insert("m");
		assert_eq!(missing.drain(), vec!["z", "a", "m"]);
		assert!(missing.is_empty());
		assert!(missing.insert("z"));
	}

	proptest! {
		#[test]
		fn never_exceeds_cap(cap in 1..64usize, keys in prop::collection::vec("[a-z]{1,3}", 0..400)) {
			let mut missing = MissingKeys::new(cap);
			for key in &keys {
				missing.insert(key);
				prop_assert!(missing.len() <= cap);
				prop_assert_eq!(missing.len(), missing.members.len());
			}
		}
	}
}
