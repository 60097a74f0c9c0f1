// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provider configuration.
//!
//! [`ProviderConfig`] is the finalized configuration. It can be built in code
//! or loaded from layered sources with precedence
//! defaults < TOML file < environment (`LOOM_UI_MESSAGES_<FIELD>`).

use std::path::Path;
use std::time::Duration;

use loom_ui_messages_core::{DEFAULT_LOCALE, DEFAULT_MAX_MISSING_KEYS};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Upper bound for loop intervals and request timeouts.
const MAX_INTERVAL: Duration = Duration::from_secs(7 * 24 * 3600);
const MAX_CACHE_TTL: Duration = Duration::from_secs(365 * 24 * 3600);

/// Finalized translation provider configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
	/// Backend base URL, e.g. `https://cms.example.com`. Required unless a
	/// custom transport is supplied.
	pub base_url: Option<String>,
	/// Bearer token sent with every request.
	pub auth_token: Option<String>,
	/// Locale loaded by `init`.
	pub initial_locale: String,
	/// Locale retried once when the requested bundle cannot be fetched.
	pub fallback_locale: String,
	/// Queue unseen keys and upload them in the background.
	pub auto_sync: bool,
	/// Periodically report missing keys.
	pub report_missing: bool,
	pub sync_interval: Duration,
	/// Burst window after new keys are queued, and minimum spacing between syncs.
	pub sync_debounce: Duration,
	pub report_interval: Duration,
	pub fetch_timeout: Duration,
	/// Timeout for sync and report POSTs.
	pub post_timeout: Duration,
	pub cache_ttl: Duration,
	pub max_cached_locales: usize,
	pub max_missing_keys: usize,
	/// `source` field of sync requests.
	pub sync_source: String,
	/// `component` field of missing-key reports.
	pub component: String,
}

impl Default for ProviderConfig {
	fn default() -> Self {
		Self {
			base_url: None,
			auth_token: None,
			initial_locale: DEFAULT_LOCALE.to_string(),
			fallback_locale: DEFAULT_LOCALE.to_string(),
			auto_sync: true,
			report_missing: true,
			sync_interval: Duration::from_secs(30),
			sync_debounce: Duration::from_secs(5),
			report_interval: Duration::from_secs(60),
			fetch_timeout: Duration::from_secs(5),
			post_timeout: Duration::from_secs(3),
			cache_ttl: Duration::from_secs(3600),
			max_cached_locales: 5,
			max_missing_keys: DEFAULT_MAX_MISSING_KEYS,
			sync_source: "runtime".to_string(),
			component: "translation-provider".to_string(),
		}
	}
}

impl ProviderConfig {
	/// Loads defaults, then `path` if it exists, then the environment.
	pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
		let mut layer = ProviderConfigLayer::default();
		if let Some(path) = path {
			layer.merge(ProviderConfigLayer::from_toml_file(path)?);
		}
		layer.merge(ProviderConfigLayer::from_env()?);
		let config = layer.finalize();
		config.validate()?;
		Ok(config)
	}

	/// Checks that intervals and timeouts are non-zero and bounded.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let intervals = [
			("sync_interval", self.sync_interval),
			("sync_debounce", self.sync_debounce),
			("report_interval", self.report_interval),
			("fetch_timeout", self.fetch_timeout),
			("post_timeout", self.post_timeout),
		];
		for (key, value) in intervals {
			if value.is_zero() {
				return Err(ConfigError::InvalidValue {
					key: key.to_string(),
					message: "must be greater than zero".to_string(),
				});
			}
			if value > MAX_INTERVAL {
				return Err(ConfigError::InvalidValue {
					key: key.to_string(),
					message: format!("must be at most {}s", MAX_INTERVAL.as_secs()),
				});
			}
		}

		if self.cache_ttl > MAX_CACHE_TTL {
			return Err(ConfigError::InvalidValue {
				key: "cache_ttl".to_string(),
				message: format!("must be at most {}s", MAX_CACHE_TTL.as_secs()),
			});
		}
		Ok(())
	}
}

/// Partial configuration from a single source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderConfigLayer {
	pub base_url: Option<String>,
	pub auth_token: Option<String>,
	pub initial_locale: Option<String>,
	pub fallback_locale: Option<String>,
	pub auto_sync: Option<bool>,
	pub report_missing: Option<bool>,
	pub sync_interval_secs: Option<u64>,
	pub sync_debounce_secs: Option<u64>,
	pub report_interval_secs: Option<u64>,
	pub fetch_timeout_ms: Option<u64>,
	pub post_timeout_ms: Option<u64>,
	pub cache_ttl_secs: Option<u64>,
	pub max_cached_locales: Option<usize>,
	pub max_missing_keys: Option<usize>,
	pub sync_source: Option<String>,
	pub component: Option<String>,
}

impl ProviderConfigLayer {
	pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
		toml::from_str(content).map_err(|e| ConfigError::TomlParse {
			path: path.to_path_buf(),
			source: e,
		})
	}

	/// Reads a TOML file. A missing file yields an empty layer.
	pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
		if !path.exists() {
			debug!(path = %path.display(), "config file not found, skipping");
			return Ok(Self::default());
		}

		debug!(path = %path.display(), "loading config file");
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
			path: path.to_path_buf(),
			source: e,
		})?;
		Self::from_toml_str(&content, path)
	}

	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Builds a layer from `LOOM_UI_MESSAGES_*` variables resolved by `lookup`.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let var = |field: &str| {
			let name = format!("LOOM_UI_MESSAGES_{field}");
			lookup(&name).filter(|s| !s.is_empty()).map(|v| (name, v))
		};
		let string = |field: &str| var(field).map(|(_, v)| v);
		let boolean =
			|field: &str| var(field).map(|(_, v)| v.eq_ignore_ascii_case("true") || v == "1");

		Ok(Self {
			base_url: string("BASE_URL"),
			auth_token: string("AUTH_TOKEN"),
			initial_locale: string("INITIAL_LOCALE"),
			fallback_locale: string("FALLBACK_LOCALE"),
			auto_sync: boolean("AUTO_SYNC"),
			report_missing: boolean("REPORT_MISSING"),
			sync_interval_secs: parse_number(var("SYNC_INTERVAL_SECS"))?,
			sync_debounce_secs: parse_number(var("SYNC_DEBOUNCE_SECS"))?,
			report_interval_secs: parse_number(var("REPORT_INTERVAL_SECS"))?,
			fetch_timeout_ms: parse_number(var("FETCH_TIMEOUT_MS"))?,
			post_timeout_ms: parse_number(var("POST_TIMEOUT_MS"))?,
			cache_ttl_secs: parse_number(var("CACHE_TTL_SECS"))?,
			max_cached_locales: parse_number(var("MAX_CACHED_LOCALES"))?,
			max_missing_keys: parse_number(var("MAX_MISSING_KEYS"))?,
			sync_source: string("SYNC_SOURCE"),
			component: string("COMPONENT"),
		})
	}

	pub fn merge(&mut self, other: Self) {
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.auth_token.is_some() {
			self.auth_token = other.auth_token;
		}
		if other.initial_locale.is_some() {
			self.initial_locale = other.initial_locale;
		}
		if other.fallback_locale.is_some() {
			self.fallback_locale = other.fallback_locale;
		}
		if other.auto_sync.is_some() {
			self.auto_sync = other.auto_sync;
		}
		if other.report_missing.is_some() {
			self.report_missing = other.report_missing;
		}
		if other.sync_interval_secs.is_some() {
			self.sync_interval_secs = other.sync_interval_secs;
		}
		if other.sync_debounce_secs.is_some() {
			self.sync_debounce_secs = other.sync_debounce_secs;
		}
		if other.report_interval_secs.is_some() {
			self.report_interval_secs = other.report_interval_secs;
		}
		if other.fetch_timeout_ms.is_some() {
			self.fetch_timeout_ms = other.fetch_timeout_ms;
		}
		if other.post_timeout_ms.is_some() {
			self.post_timeout_ms = other.post_timeout_ms;
		}
		if other.cache_ttl_secs.is_some() {
			self.cache_ttl_secs = other.cache_ttl_secs;
		}
		if other.max_cached_locales.is_some() {
			self.max_cached_locales = other.max_cached_locales;
		}
		if other.max_missing_keys.is_some() {
			self.max_missing_keys = other.max_missing_keys;
		}
		if other.sync_source.is_some() {
			self.sync_source = other.sync_source;
		}
		if other.component.is_some() {
			self.component = other.component;
		}
	}

	pub fn finalize(self) -> ProviderConfig {
		let defaults = ProviderConfig::default();
		ProviderConfig {
			base_url: self.base_url.map(|u| u.trim_end_matches('/').to_string()),
			auth_token: self.auth_token,
			initial_locale: self.initial_locale.unwrap_or(defaults.initial_locale),
			fallback_locale: self.fallback_locale.unwrap_or(defaults.fallback_locale),
			auto_sync: self.auto_sync.unwrap_or(defaults.auto_sync),
			report_missing: self.report_missing.unwrap_or(defaults.report_missing),
			sync_interval: self
				.sync_interval_secs
				.map(Duration::from_secs)
				.unwrap_or(defaults.sync_interval),
			sync_debounce: self
				.sync_debounce_secs
				.map(Duration::from_secs)
				.unwrap_or(defaults.sync_debounce),
			report_interval: self
				.report_interval_secs
				.map(Duration::from_secs)
				.unwrap_or(defaults.report_interval),
			fetch_timeout: self
				.fetch_timeout_ms
				.map(Duration::from_millis)
				.unwrap_or(defaults.fetch_timeout),
			post_timeout: self
				.post_timeout_ms
				.map(Duration::from_millis)
				.unwrap_or(defaults.post_timeout),
			cache_ttl: self
				.cache_ttl_secs
				.map(Duration::from_secs)
				.unwrap_or(defaults.cache_ttl),
			max_cached_locales: self.max_cached_locales.unwrap_or(defaults.max_cached_locales),
			max_missing_keys: self.max_missing_keys.unwrap_or(defaults.max_missing_keys),
			sync_source: self.sync_source.unwrap_or(defaults.sync_source),
			component: self.component.unwrap_or(defaults.component),
		}
	}
}

fn parse_number<T: std::str::FromStr>(
	var: Option<(String, String)>,
) -> Result<Option<T>, ConfigError> {
	match var {
		Some((key, value)) => value
			.trim()
			.parse()
			.map(Some)
			.map_err(|_| ConfigError::InvalidValue {
				message: format!("invalid number '{value}'"),
				key,
			}),
		None => Ok(None),
	}
}
