// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client builder with consistent User-Agent header.

use reqwest::{Client, ClientBuilder};

/// Platform string in `{os}-{arch}` format, e.g. "linux-x86_64".
///
/// Derived at compile time from target configuration.
pub const PLATFORM: &str = env!("LOOM_PLATFORM");

/// Creates a new HTTP client builder with the standard Loom User-Agent header.
///
/// Callers set their own timeouts and build.
///
/// # Example
/// ```ignore
/// let client = loom_common_http::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Returns the standard Loom User-Agent string.
///
/// Format: `loom/{platform}/{version}`
pub fn user_agent() -> String {
	format!("loom/{}/{}", PLATFORM, env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_agent_has_correct_format() {
		let ua = user_agent();
		assert!(ua.starts_with("loom/"));
		let parts: Vec<&str> = ua.split('/').collect();
		assert_eq!(parts.len(), 3);
		assert_eq!(parts[0], "loom");
		assert_eq!(parts[1], PLATFORM);
	}

	#[test]
	fn platform_format_is_valid() {
		let parts: Vec<&str> = PLATFORM.split('-').collect();
		assert_eq!(parts.len(), 2);
	}

	#[test]
	fn builder_builds_client() {
		assert!(builder().build().is_ok());
	}
}
