// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The translation provider service.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use loom_ui_messages_core::wire::{ReportMissingRequest, SyncKeysRequest, SyncKeysResponse};
use loom_ui_messages_core::{
	format_message, normalize_locale, LoadState, MissingKeys, PendingSync, Registry,
	TranslationBundle, TranslationKey,
};
use parking_lot::{Mutex, RwLock};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::cache::BundleCache;
use crate::clock::{SharedClock, SystemClock};
use crate::config::ProviderConfig;
use crate::error::{MessagesError, Result};
use crate::storage::{MemoryStore, SharedStore};
use crate::tasks;
use crate::transport::{HttpTransport, SharedTransport};

/// Builder for constructing a [`TranslationProvider`].
pub struct TranslationProviderBuilder {
	config: ProviderConfig,
	transport: Option<SharedTransport>,
	store: Option<SharedStore>,
	clock: Option<SharedClock>,
}

impl TranslationProviderBuilder {
	/// Creates a new builder with default settings.
	pub fn new() -> Self {
		Self {
			config: ProviderConfig::default(),
			transport: None,
			store: None,
			clock: None,
		}
	}

	/// Replaces the whole configuration.
	pub fn config(mut self, config: ProviderConfig) -> Self {
		self.config = config;
		self
	}

	/// Sets the base URL for the backend.
	///
	/// Example: `https://cms.example.com`
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.config.base_url = Some(url.into());
		self
	}

	/// Sets the bearer token sent by the HTTP transport.
	pub fn auth_token(mut self, token: impl Into<String>) -> Self {
		self.config.auth_token = Some(token.into());
		self
	}

	pub fn initial_locale(mut self, locale: impl Into<String>) -> Self {
		self.config.initial_locale = locale.into();
		self
	}

	pub fn fallback_locale(mut self, locale: impl Into<String>) -> Self {
		self.config.fallback_locale = locale.into();
		self
	}

	pub fn auto_sync(mut self, enabled: bool) -> Self {
		self.config.auto_sync = enabled;
		self
	}

	pub fn report_missing(mut self, enabled: bool) -> Self {
		self.config.report_missing = enabled;
		self
	}

	/// Uses a custom transport instead of HTTP.
	pub fn transport(mut self, transport: SharedTransport) -> Self {
		self.transport = Some(transport);
		self
	}

	/// Sets the persistent store for cached bundles. Defaults to memory.
	pub fn store(mut self, store: SharedStore) -> Self {
		self.store = Some(store);
		self
	}

	/// Sets the wall clock used for cache timestamps.
	pub fn clock(mut self, clock: SharedClock) -> Self {
		self.clock = Some(clock);
		self
	}

	/// Builds the provider.
	///
	/// Fails with [`MessagesError::InvalidBaseUrl`] when no transport was
	/// given and no base URL is configured, and with [`MessagesError::Config`]
	/// when the configuration does not validate.
	pub fn build(self) -> Result<TranslationProvider> {
		let config = self.config;
		config.validate()?;

		let transport: SharedTransport = match self.transport {
			Some(transport) => transport,
			None => {
				let base_url = config
					.base_url
					.clone()
					.ok_or(MessagesError::InvalidBaseUrl)?;
				Arc::new(HttpTransport::new(base_url, config.auth_token.clone())?)
			}
		};
		let store = self.store.unwrap_or_else(|| Arc::new(MemoryStore::new()));
		let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
		let cache = BundleCache::new(store, clock, config.cache_ttl, config.max_cached_locales);

		let state = SessionState {
			locale: normalize_locale(&config.initial_locale),
			bundle_locale: None,
			bundle: TranslationBundle::new(),
			load_state: LoadState::Uninitialized,
			generation: 0,
			fetch_token: None,
			registry: Registry::new(),
			pending: PendingSync::new(),
			missing: MissingKeys::new(config.max_missing_keys),
			page_context: "/".to_string(),
		};

		info!(
			initial_locale = %config.initial_locale,
			fallback_locale = %config.fallback_locale,
			auto_sync = config.auto_sync,
			report_missing = config.report_missing,
			"Translation provider initialized"
		);

		Ok(TranslationProvider {
			inner: Arc::new(ProviderInner {
				config,
				transport,
				cache,
				state: RwLock::new(state),
				persist: Mutex::new(()),
				sync_wakeup: Arc::new(Notify::new()),
				shutdown: CancellationToken::new(),
				tasks: Mutex::new(Vec::new()),
				started: AtomicBool::new(false),
				closed: AtomicBool::new(false),
			}),
		})
	}
}

impl Default for TranslationProviderBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Mutable per-session state. Never held across an await.
struct SessionState {
	/// Normalized locale most recently requested.
	locale: String,
	/// Locale whose bundle is installed, if any.
	bundle_locale: Option<String>,
	bundle: TranslationBundle,
	load_state: LoadState,
	/// Bumped on every locale change; fetches apply results only for their own generation.
	generation: u64,
	fetch_token: Option<CancellationToken>,
	registry: Registry,
	pending: PendingSync,
	missing: MissingKeys,
	page_context: String,
}

pub(crate) struct ProviderInner {
	config: ProviderConfig,
	transport: SharedTransport,
	cache: BundleCache,
	state: RwLock<SessionState>,
	/// Serializes cache reads on locale change against persist-and-evict, so
	/// eviction always sees the locale that is actually in use.
	/// Lock order: `persist` before `state`.
	persist: Mutex<()>,
	sync_wakeup: Arc<Notify>,
	shutdown: CancellationToken,
	tasks: Mutex<Vec<JoinHandle<()>>>,
	started: AtomicBool,
	closed: AtomicBool,
}

impl Drop for ProviderInner {
	fn drop(&mut self) {
		self.shutdown.cancel();
	}
}

/// Process-wide cache of localized UI strings.
///
/// Create one per application instance, call [`init`](Self::init) once a
/// tokio runtime is available and [`teardown`](Self::teardown) on shutdown.
/// Clones share state.
///
/// # Example
///
/// ```ignore
/// use loom_ui_messages::{TranslationProvider, TranslationKey};
///
/// let provider = TranslationProvider::builder()
///     .base_url("https://cms.example.com")
///     .initial_locale("es-MX")
///     .fallback_locale("en")
///     .build()?;
///
/// provider.init();
/// provider.register_key(TranslationKey::new("blocks.hero.title", "Welcome"));
///
/// let title = provider.t("blocks.hero.title", None);
/// let saved = provider.t_fmt("editor.saved_at", Some("Saved at {time}"), &[("time", "10:42")]);
///
/// provider.set_locale("fr-CA");
/// provider.teardown().await;
/// ```
#[derive(Clone)]
pub struct TranslationProvider {
	inner: Arc<ProviderInner>,
}

impl TranslationProvider {
	/// Creates a new builder for constructing a TranslationProvider.
	pub fn builder() -> TranslationProviderBuilder {
		TranslationProviderBuilder::new()
	}

	pub(crate) fn from_inner(inner: Arc<ProviderInner>) -> Self {
		Self { inner }
	}

	pub fn config(&self) -> &ProviderConfig {
		&self.inner.config
	}

	/// Starts the background loops and loads the configured initial locale.
	///
	/// Must be called from within a tokio runtime. Calling it again only
	/// reloads the initial locale.
	pub fn init(&self) -> Option<JoinHandle<()>> {
		if self.is_closed() {
			warn!("init called on a torn down translation provider");
			return None;
		}

		if !self.inner.started.swap(true, Ordering::SeqCst) {
			let config = &self.inner.config;
			let mut handles = self.inner.tasks.lock();
			if config.auto_sync {
				handles.push(tokio::spawn(tasks::run_sync_loop(
					Arc::downgrade(&self.inner),
					Arc::clone(&self.inner.sync_wakeup),
					self.inner.shutdown.clone(),
					config.sync_interval,
					config.sync_debounce,
				)));
			}
			if config.report_missing {
				handles.push(tokio::spawn(tasks::run_report_loop(
					Arc::downgrade(&self.inner),
					self.inner.shutdown.clone(),
					config.report_interval,
				)));
			}
		}

		let initial = self.inner.config.initial_locale.clone();
		self.set_locale(&initial)
	}

	/// Stops background work and makes a final attempt to upload queued keys.
	///
	/// Idempotent. Lookups keep working afterwards against the last bundle.
	pub async fn teardown(&self) {
		if self.inner.closed.swap(true, Ordering::SeqCst) {
			return;
		}

		self.inner.shutdown.cancel();
		let handles = std::mem::take(&mut *self.inner.tasks.lock());
		for handle in handles {
			let _ = handle.await;
		}

		if self.inner.config.auto_sync {
			match self.sync_pending().await {
				Ok(Some(response)) => {
					debug!(total = response.total_processed, "Final translation key sync completed")
				}
				Ok(None) => {}
				Err(e) => warn!(error = %e, "Final translation key sync failed"),
			}
		}

		info!("Translation provider torn down");
	}

	/// Returns true once [`teardown`](Self::teardown) has been called.
	pub fn is_closed(&self) -> bool {
		self.inner.closed.load(Ordering::SeqCst)
	}

	/// Looks up `key` in the active bundle.
	///
	/// Never fails. A missing key is recorded, registered and (if new and
	/// auto-sync is on) queued for upload; the result is then `default_value`,
	/// else the default declared via [`register_key`](Self::register_key),
	/// else the key itself. Defaults passed to earlier lookups do not stick.
	pub fn t(&self, key: &str, default_value: Option<&str>) -> String {
		if let Some(value) = self.inner.state.read().bundle.get(key) {
			return value.to_string();
		}

		let mut state = self.inner.state.write();
		if let Some(value) = state.bundle.get(key) {
			return value.to_string();
		}

		if state.missing.insert(key) {
			trace!(key, locale = %state.locale, "Translation key missing");
		}

		let entry = TranslationKey::new(key, default_value.unwrap_or(key));
		if state.registry.insert(entry.clone()) && self.inner.config.auto_sync {
			state.pending.enqueue(entry);
			self.inner.sync_wakeup.notify_one();
		}

		match default_value {
			Some(default) => default.to_string(),
			None => state
				.registry
				.declared_default(key)
				.unwrap_or(key)
				.to_string(),
		}
	}

	/// [`t`](Self::t) followed by `{name}` placeholder substitution.
	pub fn t_fmt(&self, key: &str, default_value: Option<&str>, args: &[(&str, &str)]) -> String {
		format_message(&self.t(key, default_value), args)
	}

	/// Declares a key up front.
	///
	/// Returns true if the declaration was recorded, i.e. the key was unseen
	/// or had only been discovered by a lookup. A recorded key with no entry in
	/// the active bundle is queued for upload when auto-sync is on, replacing
	/// whatever a lookup queued for it.
	pub fn register_key(&self, key: TranslationKey) -> bool {
		let mut state = self.inner.state.write();
		let in_bundle = state.bundle.contains_key(&key.key);
		if !state.registry.declare(key.clone()) {
			return false;
		}

		if !in_bundle && self.inner.config.auto_sync {
			state.pending.enqueue(key);
			self.inner.sync_wakeup.notify_one();
		}
		true
	}

	/// Switches to `locale`.
	///
	/// The cache check and fallback install happen before this returns; the
	/// network fetch runs on a spawned task whose handle is returned. Returns
	/// `None` when a fresh cached bundle was adopted or the provider is torn
	/// down. Any fetch still running for a previous locale is aborted.
	pub fn set_locale(&self, locale: &str) -> Option<JoinHandle<()>> {
		let fetch = self.begin_locale_change(locale)?;
		Some(tokio::spawn(fetch.run()))
	}

	/// Like [`set_locale`](Self::set_locale) but drives the fetch inline.
	pub async fn load_locale(&self, locale: &str) -> LoadState {
		if let Some(fetch) = self.begin_locale_change(locale) {
			fetch.run().await;
		}
		self.load_state()
	}

	/// Uploads queued keys once.
	///
	/// Returns `Ok(None)` when nothing was queued. On failure the batch is
	/// put back for the next cycle.
	pub async fn sync_pending(&self) -> Result<Option<SyncKeysResponse>> {
		let batch = self.inner.state.write().pending.drain();
		if batch.is_empty() {
			return Ok(None);
		}

		let request = SyncKeysRequest {
			keys: batch,
			source: self.inner.config.sync_source.clone(),
		};
		let timeout = self.inner.config.post_timeout;
		let result = match tokio::time::timeout(timeout, self.inner.transport.sync_keys(&request)).await
		{
			Ok(result) => result,
			Err(_) => Err(MessagesError::Timeout {
				operation: "sync_keys",
				timeout,
			}),
		};

		match result {
			Ok(response) => {
				debug!(
					count = request.keys.len(),
					created = response.created.len(),
					updated = response.updated.len(),
					"Synced translation keys"
				);
				for rejected in &response.errors {
					warn!(key = %rejected.key, error = %rejected.error, "Backend rejected translation key");
				}
				Ok(Some(response))
			}
			Err(e) => {
				if !e.is_aborted() {
					let count = request.keys.len();
					self.inner.state.write().pending.requeue(request.keys);
					debug!(count, "Requeued translation keys after failed sync");
				}
				Err(e)
			}
		}
	}

	/// Reports tracked missing keys once. Returns how many were sent.
	///
	/// Keys are dropped whether or not the report succeeds.
	pub async fn report_missing(&self) -> Result<usize> {
		let request = {
			let mut state = self.inner.state.write();
			if state.missing.is_empty() {
				return Ok(0);
			}
			ReportMissingRequest {
				keys: state.missing.drain(),
				locale: state.locale.clone(),
				url: state.page_context.clone(),
				component: self.inner.config.component.clone(),
			}
		};

		let timeout = self.inner.config.post_timeout;
		match tokio::time::timeout(timeout, self.inner.transport.report_missing(&request)).await {
			Ok(result) => result?,
			Err(_) => {
				return Err(MessagesError::Timeout {
					operation: "report_missing",
					timeout,
				})
			}
		}

		debug!(count = request.keys.len(), locale = %request.locale, "Reported missing translation keys");
		Ok(request.keys.len())
	}

	/// Sets the page path sent with missing-key reports.
	pub fn set_page_context(&self, url: impl Into<String>) {
		self.inner.state.write().page_context = url.into();
	}

	/// The normalized locale most recently requested.
	pub fn locale(&self) -> String {
		self.inner.state.read().locale.clone()
	}

	/// The locale whose bundle is installed, `None` while on fallback strings.
	pub fn bundle_locale(&self) -> Option<String> {
		self.inner.state.read().bundle_locale.clone()
	}

	pub fn load_state(&self) -> LoadState {
		self.inner.state.read().load_state
	}

	/// Whether the active bundle has an entry for `key`.
	pub fn contains(&self, key: &str) -> bool {
		self.inner.state.read().bundle.contains_key(key)
	}

	/// Tracked missing keys, oldest first.
	pub fn missing_keys(&self) -> Vec<String> {
		self.inner
			.state
			.read()
			.missing
			.iter()
			.map(str::to_string)
			.collect()
	}

	pub fn pending_sync_len(&self) -> usize {
		self.inner.state.read().pending.len()
	}

	pub fn registered_len(&self) -> usize {
		self.inner.state.read().registry.len()
	}

	fn begin_locale_change(&self, requested: &str) -> Option<LocaleFetch> {
		if self.is_closed() {
			warn!(locale = %requested, "Locale change on a torn down translation provider");
			return None;
		}

		let locale = normalize_locale(requested);
		let _persist = self.inner.persist.lock();
		let cached = self.inner.cache.load_fresh(&locale);
		let token = self.inner.shutdown.child_token();

		let mut state = self.inner.state.write();
		if let Some(previous) = state.fetch_token.take() {
			previous.cancel();
			debug!(previous = %state.locale, next = %locale, "Cancelled superseded bundle fetch");
		}
		state.generation += 1;
		state.locale = locale.clone();

		if let Some(bundle) = cached {
			state.bundle = TranslationBundle::builtin().overlay(bundle);
			state.bundle_locale = Some(locale.clone());
			state.load_state = LoadState::BundleLoaded;
			info!(locale = %locale, "Adopted cached translation bundle");
			return None;
		}

		state.bundle = TranslationBundle::builtin();
		state.bundle_locale = None;
		state.load_state = LoadState::FallbackLoaded;
		state.fetch_token = Some(token.clone());
		debug!(locale = %locale, "Installed fallback strings, fetching bundle");

		Some(LocaleFetch {
			provider: self.clone(),
			locale,
			generation: state.generation,
			token,
		})
	}
}

/// The asynchronous half of a locale change.
struct LocaleFetch {
	provider: TranslationProvider,
	locale: String,
	generation: u64,
	token: CancellationToken,
}

impl LocaleFetch {
	async fn run(self) {
		let error = match self.fetch(&self.locale).await {
			Ok(bundle) => {
				self.adopt(&self.locale, bundle);
				return;
			}
			Err(e) if e.is_aborted() => {
				debug!(locale = %self.locale, "Bundle fetch aborted");
				return;
			}
			Err(e) => e,
		};

		warn!(locale = %self.locale, error = %error, "Failed to fetch translation bundle");
		if !self.transition(LoadState::BundleFailed) {
			return;
		}

		let fallback = normalize_locale(&self.provider.inner.config.fallback_locale);
		if fallback == self.locale {
			self.transition(LoadState::Degraded);
			return;
		}
		if !self.transition(LoadState::FallbackRetried) {
			return;
		}

		match self.fetch(&fallback).await {
			Ok(bundle) => self.adopt(&fallback, bundle),
			Err(e) if e.is_aborted() => {
				debug!(locale = %fallback, "Fallback bundle fetch aborted");
			}
			Err(e) => {
				warn!(locale = %fallback, error = %e, "Fallback bundle fetch failed, staying on built-in strings");
				self.transition(LoadState::Degraded);
			}
		}
	}

	async fn fetch(&self, locale: &str) -> Result<TranslationBundle> {
		let inner = &self.provider.inner;
		let timeout = inner.config.fetch_timeout;

		let result = tokio::select! {
			biased;
			_ = self.token.cancelled() => return Err(MessagesError::Aborted),
			result = tokio::time::timeout(timeout, inner.transport.fetch_bundle(locale)) => result,
		};

		if self.token.is_cancelled() {
			return Err(MessagesError::Aborted);
		}

		match result {
			Ok(result) => result,
			Err(_) => Err(MessagesError::Timeout {
				operation: "fetch_bundle",
				timeout,
			}),
		}
	}

	fn is_current(&self, state: &SessionState) -> bool {
		state.generation == self.generation && !self.token.is_cancelled()
	}

	fn transition(&self, next: LoadState) -> bool {
		let mut state = self.provider.inner.state.write();
		if !self.is_current(&state) {
			return false;
		}
		state.load_state = next;
		if next.is_settled() {
			state.fetch_token = None;
		}
		true
	}

	fn adopt(&self, locale: &str, bundle: TranslationBundle) {
		let inner = &self.provider.inner;
		let entries = bundle.len();
		// Held through eviction: no other locale can be adopted from the cache
		// until `locale` is both installed and persisted.
		let _persist = inner.persist.lock();
		{
			let mut state = inner.state.write();
			if !self.is_current(&state) {
				debug!(locale = %locale, "Discarding bundle for superseded locale");
				return;
			}
			state.bundle = TranslationBundle::builtin().overlay(bundle.clone());
			state.bundle_locale = Some(locale.to_string());
			state.load_state = LoadState::BundleLoaded;
			state.fetch_token = None;
		}
		info!(locale = %locale, requested = %self.locale, entries, "Loaded translation bundle");

		if let Err(e) = inner.cache.store(locale, &bundle) {
			warn!(locale = %locale, error = %e, "Failed to persist translation bundle");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;

	struct StaticTransport;

	#[async_trait]
	impl crate::transport::MessagesTransport for StaticTransport {
		async fn fetch_bundle(&self, _locale: &str) -> Result<TranslationBundle> {
			Ok([("nav.home", "Home")].into_iter().collect())
		}

		async fn sync_keys(&self, _request: &SyncKeysRequest) -> Result<SyncKeysResponse> {
			Ok(SyncKeysResponse::default())
		}

		async fn report_missing(&self, _request: &ReportMissingRequest) -> Result<()> {
			Ok(())
		}
	}

	fn provider() -> TranslationProvider {
		TranslationProvider::builder()
			.transport(Arc::new(StaticTransport))
			.build()
			.unwrap()
	}

	#[test]
	fn test_builder_requires_base_url_or_transport() {
		let result = TranslationProvider::builder().build();
		assert!(matches!(result, Err(MessagesError::InvalidBaseUrl)));
	}

	#[test]
	fn test_builder_with_base_url() {
		let provider = TranslationProvider::builder()
			.base_url("https://cms.example.com/")
			.build()
			.unwrap();
		assert_eq!(provider.load_state(), LoadState::Uninitialized);
		assert_eq!(provider.locale(), "en");
	}

	#[test]
	fn test_lookup_before_any_bundle_returns_default_or_key() {
		let provider = provider();
		assert_eq!(provider.t("nav.home", Some("Home page")), "Home page");
		assert_eq!(provider.t("nav.about", None), "nav.about");
	}

	#[test]
	fn test_registered_default_is_used_without_explicit_default() {
		let provider = provider();
		assert!(provider.register_key(TranslationKey::new("blocks.hero.title", "Welcome")));
		assert!(!provider.register_key(TranslationKey::new("blocks.hero.title", "Other")));

		assert_eq!(provider.t("blocks.hero.title", None), "Welcome");
		assert_eq!(provider.t("blocks.hero.title", Some("Hi")), "Hi");
		assert_eq!(provider.pending_sync_len(), 1);
	}

	#[test]
	fn test_register_after_lookup_adopts_declared_default() {
		let provider = provider();
		assert_eq!(provider.t("blocks.hero.title", None), "blocks.hero.title");
		assert_eq!(provider.pending_sync_len(), 1);

		assert!(provider.register_key(TranslationKey::new("blocks.hero.title", "Welcome")));
		assert_eq!(provider.t("blocks.hero.title", None), "Welcome");
		assert_eq!(provider.registered_len(), 1);
		assert_eq!(provider.pending_sync_len(), 1);

		let queued = provider.inner.state.write().pending.drain();
		assert_eq!(queued.len(), 1);
		assert_eq!(queued[0].default_value, "Welcome");

		assert!(!provider.register_key(TranslationKey::new("blocks.hero.title", "Other")));
		assert_eq!(provider.t("blocks.hero.title", None), "Welcome");
	}

	#[tokio::test]
	async fn test_register_key_already_in_bundle_is_not_queued() {
		let provider = provider();
		provider.load_locale("en").await;
		let before = provider.registered_len();

		assert!(provider.register_key(TranslationKey::new("nav.home", "Home page")));
		assert_eq!(provider.registered_len(), before + 1);
		assert_eq!(provider.pending_sync_len(), 0);
		assert_eq!(provider.t("nav.home", None), "Home");
	}

	#[test]
	fn test_build_rejects_invalid_config() {
		let result = TranslationProvider::builder()
			.transport(Arc::new(StaticTransport))
			.config(ProviderConfig {
				sync_interval: std::time::Duration::ZERO,
				..ProviderConfig::default()
			})
			.build();
		assert!(matches!(result, Err(MessagesError::Config(_))));
	}

	#[test]
	fn test_lookup_default_does_not_stick() {
		let provider = provider();
		assert_eq!(provider.t("nav.about", Some("About")), "About");
		assert_eq!(provider.t("nav.about", None), "nav.about");
	}

	#[test]
	fn test_repeated_miss_is_tracked_and_queued_once() {
		let provider = provider();
		for _ in 0..3 {
			assert_eq!(provider.t("nav.missing", None), "nav.missing");
		}
		assert_eq!(provider.missing_keys(), vec!["nav.missing"]);
		assert_eq!(provider.pending_sync_len(), 1);
		assert_eq!(provider.registered_len(), 1);
	}

	#[test]
	fn test_auto_sync_off_does_not_queue() {
		let provider = TranslationProvider::builder()
			.transport(Arc::new(StaticTransport))
			.auto_sync(false)
			.build()
			.unwrap();
		provider.t("nav.missing", None);
		provider.register_key(TranslationKey::new("blocks.cta", "Go"));
		assert_eq!(provider.pending_sync_len(), 0);
		assert_eq!(provider.registered_len(), 2);
	}

	#[test]
	fn test_missing_keys_respect_configured_cap() {
		let provider = TranslationProvider::builder()
			.transport(Arc::new(StaticTransport))
			.config(ProviderConfig {
				max_missing_keys: 4,
				..ProviderConfig::default()
			})
			.build()
			.unwrap();
		for i in 0..5 {
			provider.t(&format!("k{i}"), None);
		}
		assert_eq!(provider.missing_keys(), vec!["k2", "k3", "k4"]);
	}

	#[test]
	fn test_t_fmt_substitutes_placeholders() {
		let provider = provider();
		let text = provider.t_fmt("editor.saved", Some("Saved {count} blocks"), &[("count", "4")]);
		assert_eq!(text, "Saved 4 blocks");
	}

	#[tokio::test]
	async fn test_load_locale_installs_bundle_over_fallback() {
		let provider = provider();
		let state = provider.load_locale("en-GB").await;

		assert_eq!(state, LoadState::BundleLoaded);
		assert_eq!(provider.bundle_locale().as_deref(), Some("en"));
		assert_eq!(provider.t("nav.home", None), "Home");
		assert_eq!(provider.t("common.save", None), "Save");
		assert!(provider.missing_keys().is_empty());
	}

	#[tokio::test]
	async fn test_teardown_is_idempotent_and_blocks_locale_changes() {
		let provider = provider();
		provider.teardown().await;
		provider.teardown().await;

		assert!(provider.is_closed());
		assert!(provider.set_locale("es").is_none());
		assert!(provider.init().is_none());
		assert_eq!(provider.t("x", Some("y")), "y");
	}
}
