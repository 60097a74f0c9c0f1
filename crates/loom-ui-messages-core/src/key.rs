// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

/// A translatable UI string key.
///
/// Keys are namespaced with dots, e.g. `editor.toolbar.publish`. Identity is
/// the key string alone; two `TranslationKey`s with the same `key` describe
/// the same message even if their defaults differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationKey {
	pub key: String,
	pub default_value: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub namespace: Option<String>,
}

impl TranslationKey {
	/// Creates a key, inferring the namespace from the first dot segment.
	pub fn new(key: impl Into<String>, default_value: impl Into<String>) -> Self {
		let key = key.into();
		let namespace = infer_namespace(&key);
		Self {
			key,
			default_value: default_value.into(),
			description: None,
			namespace,
		}
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
		self.namespace = Some(namespace.into());
		self
	}
}

fn infer_namespace(key: &str) -> Option<String> {
	match key.split_once('.') {
		Some((ns, rest)) if !ns.is_empty() && !rest.is_empty() => Some(ns.to_string()),
		_ => None,
	}
}
