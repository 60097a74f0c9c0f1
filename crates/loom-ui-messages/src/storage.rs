// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! String key/value persistence used by the bundle cache.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::error::StorageError;

/// Minimal persistent key/value store.
pub trait KeyValueStore: Send + Sync {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
	fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
	fn remove(&self, key: &str) -> Result<(), StorageError>;
	/// All keys currently stored, in no particular order.
	fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// Shared store reference.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// In-process store, optionally capped at a total number of bytes.
#[derive(Debug, Default)]
pub struct MemoryStore {
	entries: Mutex<BTreeMap<String, String>>,
	quota_bytes: Option<usize>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// A store that rejects writes once keys plus values exceed `bytes`.
	pub fn with_quota(bytes: usize) -> Self {
		Self {
			entries: Mutex::new(BTreeMap::new()),
			quota_bytes: Some(bytes),
		}
	}

	pub fn len(&self) -> usize {
		self.entries.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.lock().is_empty()
	}
}

impl KeyValueStore for MemoryStore {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		Ok(self.entries.lock().get(key).cloned())
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		let mut entries = self.entries.lock();
		if let Some(limit) = self.quota_bytes {
			let others: usize = entries
				.iter()
				.filter(|(k, _)| k.as_str() != key)
				.map(|(k, v)| k.len() + v.len())
				.sum();
			let requested = others + key.len() + value.len();
			if requested > limit {
				return Err(StorageError::QuotaExceeded { requested, limit });
			}
		}
		entries.insert(key.to_string(), value.to_string());
		Ok(())
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		self.entries.lock().remove(key);
		Ok(())
	}

	fn keys(&self) -> Result<Vec<String>, StorageError> {
		Ok(self.entries.lock().keys().cloned().collect())
	}
}

/// Stores each key as a file in a directory.
///
/// Keys are restricted to ASCII alphanumerics, `_`, `-` and `.` so they map
/// directly to file names. Writes go through a temporary file and a rename.
#[derive(Debug, Clone)]
pub struct FileStore {
	dir: PathBuf,
}

impl FileStore {
	/// Opens (creating if needed) a store rooted at `dir`.
	pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
		let dir = dir.into();
		fs::create_dir_all(&dir)?;
		debug!(dir = %dir.display(), "Opened UI messages file store");
		Ok(Self { dir })
	}

	/// Opens the store under the user cache directory.
	pub fn open_default() -> Result<Self, StorageError> {
		Self::open(Self::default_dir()?)
	}

	/// `$XDG_CACHE_HOME/loom/ui-messages` or the platform equivalent.
	pub fn default_dir() -> Result<PathBuf, StorageError> {
		dirs::cache_dir()
			.map(|d| d.join("loom").join("ui-messages"))
			.ok_or_else(|| StorageError::Unavailable("no cache directory for this platform".to_string()))
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
		let valid = !key.is_empty()
			&& !key.starts_with('.')
			&& key
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
		if !valid {
			return Err(StorageError::InvalidKey(key.to_string()));
		}
		Ok(self.dir.join(key))
	}
}

impl KeyValueStore for FileStore {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		match fs::read_to_string(self.path_for(key)?) {
			Ok(value) => Ok(Some(value)),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
			Err(e) => Err(e.into()),
		}
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		let path = self.path_for(key)?;
		let tmp = self.dir.join(format!(".{key}.tmp"));
		fs::write(&tmp, value)?;
		fs::rename(&tmp, &path)?;
		Ok(())
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		match fs::remove_file(self.path_for(key)?) {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
			Err(e) => Err(e.into()),
		}
	}

	fn keys(&self) -> Result<Vec<String>, StorageError> {
		let mut keys = Vec::new();
		for entry in fs::read_dir(&self.dir)? {
			let entry = entry?;
			if !entry.file_type()?.is_file() {
				continue;
			}
			if let Some(name) = entry.file_name().to_str() {
				if !name.starts_with('.') {
					keys.push(name.to_string());
				}
			}
		}
		Ok(keys)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	#[test]
	fn memory_store_round_trip() {
		let store = MemoryStore::new();
		store.set("a", "1").unwrap();
		assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
		store.remove("a").unwrap();
		assert!(store.get("a").unwrap().is_none());
		assert!(store.is_empty());
	}

	#[test]
	fn memory_store_enforces_quota() {
		let store = MemoryStore::with_quota(10);
		store.set("ab", "12345678").unwrap();
		let err = store.set("cd", "1").unwrap_err();
		assert!(matches!(err, StorageError::QuotaExceeded { limit: 10, .. }));

		// Overwriting the same key only counts the new value.
		store.set("ab", "87654321").unwrap();
		assert_eq!(store.len(), 1);
	}

	#[test]
	fn file_store_round_trip() {
		let dir = TempDir::new().unwrap();
		let store = FileStore::open(dir.path().join("nested")).unwrap();

		store.set("translations_en", r#"{"a":"b"}"#).unwrap();
		store.set("translations_en_timestamp", "42").unwrap();

		assert_eq!(
			store.get("translations_en_timestamp").unwrap().as_deref(),
			Some("42")
		);

		let mut keys = store.keys().unwrap();
		keys.sort();
		assert_eq!(keys, vec!["translations_en", "translations_en_timestamp"]);

		store.remove("translations_en").unwrap();
		store.remove("translations_en").unwrap();
		assert!(store.get("translations_en").unwrap().is_none());
	}

	#[test]
	fn file_store_rejects_path_like_keys() {
		let dir = TempDir::new().unwrap();
		let store = FileStore::open(dir.path()).unwrap();

		for key in ["../escape", "a/b", "", ".hidden"] {
			assert!(
				matches!(store.set(key, "x"), Err(StorageError::InvalidKey(_))),
				"{key:?} should be rejected"
			);
		}
	}

	#[test]
	fn file_store_survives_reopen() {
		let dir = TempDir::new().unwrap();
		FileStore::open(dir.path())
			.unwrap()
			.set("k", "v")
			.unwrap();

		let reopened = FileStore::open(dir.path()).unwrap();
		assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
	}
}
