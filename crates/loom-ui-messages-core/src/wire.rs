// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Endpoint paths and payloads for the `ui-messages` REST API.

use serde::{Deserialize, Serialize};

use crate::key::TranslationKey;

pub const SYNC_KEYS_PATH: &str = "/api/v1/i18n/ui-messages/sync-keys/";
pub const REPORT_MISSING_PATH: &str = "/api/v1/i18n/ui-messages/report-missing/";

/// Path of the bundle endpoint for an already-normalized locale.
pub fn bundle_path(locale: &str) -> String {
	format!("/api/v1/i18n/ui-messages/bundle/{locale}/")
}

/// Body of `POST sync-keys/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncKeysRequest {
	pub keys: Vec<TranslationKey>,
	pub source: String,
}

/// Response of `POST sync-keys/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncKeysResponse {
	#[serde(default)]
	pub created: Vec<String>,
	#[serde(default)]
	pub updated: Vec<String>,
	#[serde(default)]
	pub total_processed: u64,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub errors: Vec<SyncKeyError>,
}

/// A key the backend refused to store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncKeyError {
	pub key: String,
	pub error: String,
}

/// Body of `POST report-missing/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMissingRequest {
	pub keys: Vec<String>,
	pub locale: String,
	pub url: String,
	pub component: String,
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn bundle_path_embeds_locale() {
		assert_eq!(bundle_path("es"), "/api/v1/i18n/ui-messages/bundle/es/");
	}

	#[test]
	fn sync_request_shape() {
		let request = SyncKeysRequest {
			keys: vec![TranslationKey::new("nav.home", "Home")],
			source: "runtime".to_string(),
		};
		let json = serde_json::to_value(&request).unwrap();
		assert_eq!(
			json,
			json!({
				"keys": [{"key": "nav.home", "defaultValue": "Home", "namespace": "nav"}],
				"source": "runtime"
			})
		);
	}

	#[test]
	fn sync_response_tolerates_missing_fields() {
		let response: SyncKeysResponse = serde_json::from_value(json!({"created": ["a"]})).unwrap();
		assert_eq!(response.created, vec!["a"]);
		assert!(response.updated.is_empty());
		assert_eq!(response.total_processed, 0);
		assert!(response.errors.is_empty());
	}

	#[test]
	fn sync_response_parses_errors() {
		let response: SyncKeysResponse = serde_json::from_value(json!({
			"created": [],
			"updated": ["b"],
			"total_processed": 2,
			"errors": [{"key": "bad key", "error": "invalid characters"}]
		}))
		.unwrap();
		assert_eq!(response.total_processed, 2);
		assert_eq!(response.errors[0].key, "bad key");
	}
}
