// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the UI messages SDK.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Translation provider and transport errors.
#[derive(Debug, Error)]
pub enum MessagesError {
	/// Neither a base URL nor a custom transport was configured.
	#[error("invalid base URL")]
	InvalidBaseUrl,

	/// HTTP request failed.
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	/// Server returned an error response.
	#[error("server error ({status}): {message}")]
	ServerError { status: u16, message: String },

	/// Rate limited by the server.
	#[error("rate limited, retry after {retry_after_secs:?} seconds")]
	RateLimited { retry_after_secs: Option<u64> },

	/// The request did not finish in time.
	#[error("{operation} timed out after {timeout:?}")]
	Timeout {
		operation: &'static str,
		timeout: Duration,
	},

	/// The request was superseded by a locale change or teardown.
	#[error("request aborted")]
	Aborted,

	/// Persistent store failure.
	#[error("storage error: {0}")]
	Storage(#[from] StorageError),

	/// Serialization error.
	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	/// Configuration could not be loaded.
	#[error("configuration error: {0}")]
	Config(#[from] ConfigError),
}

impl MessagesError {
	/// Aborts come from superseded work and are not failures.
	pub fn is_aborted(&self) -> bool {
		matches!(self, MessagesError::Aborted)
	}
}

/// Key/value store errors.
#[derive(Debug, Error)]
pub enum StorageError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// The write would exceed the store's capacity.
	#[error("storage quota exceeded: {requested} bytes requested, limit is {limit}")]
	QuotaExceeded { requested: usize, limit: usize },

	#[error("invalid storage key '{0}'")]
	InvalidKey(String),

	/// No backing location exists on this platform.
	#[error("storage unavailable: {0}")]
	Unavailable(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },

	#[error("failed to read config file {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse config file {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},
}

/// Result type alias for UI messages operations.
pub type Result<T> = std::result::Result<T, MessagesError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_aborted_is_aborted() {
		assert!(MessagesError::Aborted.is_aborted());
		assert!(!MessagesError::InvalidBaseUrl.is_aborted());
		assert!(!MessagesError::Timeout {
			operation: "fetch_bundle",
			timeout: Duration::from_secs(5),
		}
		.is_aborted());
	}

	#[test]
	fn timeout_message_names_operation() {
		let err = MessagesError::Timeout {
			operation: "sync_keys",
			timeout: Duration::from_secs(3),
		};
		assert_eq!(err.to_string(), "sync_keys timed out after 3s");
	}

	#[test]
	fn storage_error_converts() {
		let err: MessagesError = StorageError::QuotaExceeded {
			requested: 10,
			limit: 5,
		}
		.into();
		assert!(matches!(err, MessagesError::Storage(_)));
	}
}
