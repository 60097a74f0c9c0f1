// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Background loops for key sync and missing-key reporting.
//!
//! Loops hold only a weak reference to the provider so dropping the last
//! handle ends them; teardown ends them through the shutdown token.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::provider::{ProviderInner, TranslationProvider};

/// Uploads queued keys every `interval`, and `debounce` after new keys are
/// queued. Consecutive cycles are at least `debounce` apart.
pub(crate) async fn run_sync_loop(
	owner: Weak<ProviderInner>,
	wakeup: Arc<Notify>,
	shutdown: CancellationToken,
	interval: Duration,
	debounce: Duration,
) {
	info!(
		interval_secs = interval.as_secs(),
		debounce_secs = debounce.as_secs(),
		"Starting translation key sync loop"
	);

	let mut last_run: Option<Instant> = None;
	loop {
		tokio::select! {
			_ = shutdown.cancelled() => break,
			_ = tokio::time::sleep(interval) => {}
			_ = wakeup.notified() => {
				// Let a burst of registrations land in one batch.
				if !sleep_or_cancel(Instant::now() + debounce, &shutdown).await {
					break;
				}
			}
		}

		if let Some(last) = last_run {
			if !sleep_or_cancel(last + debounce, &shutdown).await {
				break;
			}
		}

		let Some(inner) = owner.upgrade() else {
			break;
		};
		let provider = TranslationProvider::from_inner(inner);
		match provider.sync_pending().await {
			Ok(Some(response)) => debug!(total = response.total_processed, "Sync cycle completed"),
			Ok(None) => {}
			Err(e) => warn!(error = %e, "Failed to sync translation keys"),
		}
		drop(provider);
		last_run = Some(Instant::now());
	}

	info!("Translation key sync loop stopped");
}

/// Reports missing keys every `interval`. Failures are logged and dropped.
pub(crate) async fn run_report_loop(
	owner: Weak<ProviderInner>,
	shutdown: CancellationToken,
	interval: Duration,
) {
	info!(interval_secs = interval.as_secs(), "Starting missing key report loop");

	loop {
		if !sleep_or_cancel(Instant::now() + interval, &shutdown).await {
			break;
		}

		let Some(inner) = owner.upgrade() else {
			break;
		};
		let provider = TranslationProvider::from_inner(inner);
		if let Err(e) = provider.report_missing().await {
			warn!(error = %e, "Failed to report missing translation keys");
		}
	}

	info!("Missing key report loop stopped");
}

/// Sleeps until `deadline`. Returns false if `shutdown` fired first.
async fn sleep_or_cancel(deadline: Instant, shutdown: &CancellationToken) -> bool {
	tokio::select! {
		_ = shutdown.cancelled() => false,
		_ = tokio::time::sleep_until(deadline) => true,
	}
}
