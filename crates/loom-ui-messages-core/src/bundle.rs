// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Translation bundles and persisted cache entries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generic strings installed while the real bundle is loading, so the UI is
/// never blank.
const BUILTIN_MESSAGES: &[(&str, &str)] = &[
	("common.loading", "Loading..."),
	("common.save", "Save"),
	("common.cancel", "Cancel"),
	("common.delete", "Delete"),
	("common.edit", "Edit"),
	("common.close", "Close"),
	("common.back", "Back"),
	("common.next", "Next"),
	("common.search", "Search"),
	("common.yes", "Yes"),
	("common.no", "No"),
	("common.retry", "Try again"),
	("common.error", "Something went wrong"),
];

/// Localized strings for a single locale, keyed by translation key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationBundle(BTreeMap<String, String>);

impl TranslationBundle {
	pub fn new() -> Self {
		Self::default()
	}

	/// The built-in fallback strings.
	pub fn builtin() -> Self {
		BUILTIN_MESSAGES
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	/// Builds a bundle from an arbitrary JSON document.
	///
	/// The server sends a flat object, but nested objects are accepted and
	/// flattened into dotted keys. Numbers and booleans are stringified;
	/// nulls and arrays are skipped. A non-object root yields an empty bundle.
	pub fn from_json_value(value: &Value) -> Self {
		let mut bundle = Self::new();
		if let Value::Object(map) = value {
			for (key, value) in map {
				flatten_into(&mut bundle.0, key.clone(), value);
			}
		}
		bundle
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.0.insert(key.into(), value.into());
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Returns `self` with every entry of `newer` written over it.
	pub fn overlay(mut self, newer: TranslationBundle) -> Self {
		self.0.extend(newer.0);
		self
	}
}

fn flatten_into(out: &mut BTreeMap<String, String>, key: String, value: &Value) {
	match value {
		Value::String(s) => {
			out.insert(key, s.clone());
		}
		Value::Number(n) => {
			out.insert(key, n.to_string());
		}
		Value::Bool(b) => {
			out.insert(key, b.to_string());
		}
		Value::Object(map) => {
			for (child, value) in map {
				flatten_into(out, format!("{key}.{child}"), value);
			}
		}
		Value::Null | Value::Array(_) => {}
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslationBundle {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}
}

impl From<BTreeMap<String, String>> for TranslationBundle {
	fn from(map: BTreeMap<String, String>) -> Self {
		Self(map)
	}
}

/// A bundle as persisted for one locale, with its write time in epoch ms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
	pub bundle: TranslationBundle,
	pub timestamp: i64,
}

impl CacheEntry {
	/// Age of the entry at `now_millis`. Negative when written in the future.
	pub fn age_millis(&self, now_millis: i64) -> i64 {
		now_millis - self.timestamp
	}

	/// Whether the entry is younger than `ttl_millis`.
	///
	/// Entries stamped in the future are never considered fresh.
	pub fn is_fresh(&self, now_millis: i64, ttl_millis: i64) -> bool {
		let age = self.age_millis(now_millis);
		(0..ttl_millis).contains(&age)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn builtin_has_loading_string() {
		let bundle = TranslationBundle::builtin();
		assert_eq!(bundle.get("common.loading"), Some("Loading..."));
		assert!(!bundle.is_empty());
	}

	#[test]
	fn overlay_prefers_newer_entries() {
		let base: TranslationBundle = [("a", "1"), ("b", "2")].into_iter().collect();
		let newer: TranslationBundle = [("b", "two"), ("c", "3")].into_iter().collect();

		let merged = base.overlay(newer);
		assert_eq!(merged.get("a"), Some("1"));
		assert_eq!(merged.get("b"), Some("two"));
		assert_eq!(merged.get("c"), Some("3"));
	}

	#[test]
	fn flat_json_round_trips_through_serde() {
		let bundle: TranslationBundle =
			serde_json::from_value(json!({"nav.home": "Inicio", "nav.about": "Acerca"})).unwrap();
		assert_eq!(bundle.get("nav.home"), Some("Inicio"));
		let text = serde_json::to_string(&bundle).unwrap();
		assert_eq!(text, r#"{"nav.about":"Acerca","nav.home":"Inicio"}"#);
	}

	#[test]
	fn from_json_value_flattens_nested_objects() {
		let bundle = TranslationBundle::from_json_value(&json!({
			"nav": {"home": "Home", "menu": {"open": "Open"}},
			"count": 3,
			"enabled": true,
			"skipped": null,
			"list": ["a", "b"],
			"flat.key": "Flat"
		}));
		assert_eq!(bundle.get("nav.home"), Some("Home"));
		assert_eq!(bundle.get("nav.menu.open"), Some("Open"));
		assert_eq!(bundle.get("count"), Some("3"));
		assert_eq!(bundle.get("enabled"), Some("true"));
		assert_eq!(bundle.get("flat.key"), Some("Flat"));
		assert!(!bundle.contains_key("skipped"));
		assert!(!bundle.contains_key("list"));
		assert_eq!(bundle.len(), 5);
	}

	#[test]
	fn from_json_value_rejects_non_object_root() {
		assert!(TranslationBundle::from_json_value(&json!(["a"])).is_empty());
		assert!(TranslationBundle::from_json_value(&json!("text")).is_empty());
	}

	#[test]
	fn cache_entry_freshness_window() {
		let entry = CacheEntry {
			bundle: TranslationBundle::new(),
			timestamp: 1_000,
		};
		let hour = 3_600_000;
		assert!(entry.is_fresh(1_000, hour));
		assert!(entry.is_fresh(1_000 + hour - 1, hour));
		assert!(!entry.is_fresh(1_000 + hour, hour));
		assert!(!entry.is_fresh(999, hour));
	}
}
