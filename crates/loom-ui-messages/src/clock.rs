// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wall-clock source for cache timestamps.
//!
//! Timers (fetch timeouts, sync and report intervals) run on `tokio::time`
//! and can be driven by a paused runtime. Cache freshness compares epoch
//! milliseconds, so it goes through [`Clock`] instead.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

/// Source of the current time in epoch milliseconds.
pub trait Clock: Send + Sync {
	fn now_millis(&self) -> i64;
}

/// Shared clock reference.
pub type SharedClock = Arc<dyn Clock>;

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now_millis(&self) -> i64 {
		Utc::now().timestamp_millis()
	}
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
	now: AtomicI64,
}

impl ManualClock {
	pub fn new(now_millis: i64) -> Self {
		Self {
			now: AtomicI64::new(now_millis),
		}
	}

	pub fn set(&self, now_millis: i64) {
		self.now.store(now_millis, Ordering::SeqCst);
	}

	pub fn advance(&self, by: Duration) {
		self.now.fetch_add(by.as_millis() as i64, Ordering::SeqCst);
	}
}

impl Clock for ManualClock {
	fn now_millis(&self) -> i64 {
		self.now.load(Ordering::SeqCst)
	}
}
