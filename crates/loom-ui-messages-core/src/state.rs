// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

/// Progress of the bundle load for the current locale.
///
/// ```text
/// Uninitialized -> FallbackLoaded -> BundleLoaded
///                                 -> BundleFailed -> FallbackRetried -> BundleLoaded
///                                                                    -> Degraded
/// ```
///
/// A fresh cache hit moves straight to `BundleLoaded`. `Degraded` means the
/// built-in fallback strings stay installed until the locale changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
	#[default]
	Uninitialized,
	FallbackLoaded,
	BundleLoaded,
	BundleFailed,
	FallbackRetried,
	Degraded,
}

impl LoadState {
	/// True once no further automatic fetch will happen for this locale.
	pub fn is_settled(self) -> bool {
		matches!(self, LoadState::BundleLoaded | LoadState::Degraded)
	}
}

impl std::fmt::Display for LoadState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			LoadState::Uninitialized => "uninitialized",
			LoadState::FallbackLoaded => "fallback_loaded",
			LoadState::BundleLoaded => "bundle_loaded",
			LoadState::BundleFailed => "bundle_failed",
			LoadState::FallbackRetried => "fallback_retried",
			LoadState::Degraded => "degraded",
		};
		f.write_str(s)
	}
}
