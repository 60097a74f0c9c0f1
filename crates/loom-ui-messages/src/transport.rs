// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Transport to the `ui-messages` REST API.

use std::sync::Arc;

use async_trait::async_trait;
use loom_ui_messages_core::wire::{
	bundle_path, ReportMissingRequest, SyncKeysRequest, SyncKeysResponse, REPORT_MISSING_PATH,
	SYNC_KEYS_PATH,
};
use loom_ui_messages_core::TranslationBundle;
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, error};

use crate::error::{MessagesError, Result};

/// Backend operations used by the translation provider.
///
/// Timeouts and cancellation are applied by the caller; implementations
/// only need to perform the request.
#[async_trait]
pub trait MessagesTransport: Send + Sync {
	/// Fetches the bundle for a normalized locale code.
	async fn fetch_bundle(&self, locale: &str) -> Result<TranslationBundle>;

	/// Uploads keys to the backend registry.
	async fn sync_keys(&self, request: &SyncKeysRequest) -> Result<SyncKeysResponse>;

	/// Reports keys that were requested but missing.
	async fn report_missing(&self, request: &ReportMissingRequest) -> Result<()>;
}

/// Shared transport reference.
pub type SharedTransport = Arc<dyn MessagesTransport>;

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
	base_url: String,
	auth_token: Option<String>,
	http_client: Client,
}

impl HttpTransport {
	/// Creates a transport for `base_url`, e.g. `https://cms.example.com`.
	pub fn new(base_url: impl Into<String>, auth_token: Option<String>) -> Result<Self> {
		let base_url = base_url.into().trim_end_matches('/').to_string();
		if base_url.is_empty() {
			return Err(MessagesError::InvalidBaseUrl);
		}

		let http_client = loom_common_http::builder()
			.build()
			.map_err(MessagesError::RequestFailed)?;

		Ok(Self {
			base_url,
			auth_token,
			http_client,
		})
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
		match &self.auth_token {
			Some(token) => request.header("Authorization", format!("Bearer {token}")),
			None => request,
		}
	}

	async fn check_status(response: Response, operation: &str) -> Result<Response> {
		if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
			let retry_after = response
				.headers()
				.get("Retry-After")
				.and_then(|v| v.to_str().ok())
				.and_then(|s| s.parse().ok());
			return Err(MessagesError::RateLimited {
				retry_after_secs: retry_after,
			});
		}

		if !response.status().is_success() {
			let status = response.status().as_u16();
			let message = response.text().await.unwrap_or_default();
			error!(status, message = %message, operation, "UI messages request failed");
			return Err(MessagesError::ServerError { status, message });
		}

		Ok(response)
	}
}

#[async_trait]
impl MessagesTransport for HttpTransport {
	async fn fetch_bundle(&self, locale: &str) -> Result<TranslationBundle> {
		let url = format!("{}{}", self.base_url, bundle_path(locale));
		debug!(url = %url, locale = %locale, "Fetching translation bundle");

		let response = self.authorize(self.http_client.get(&url)).send().await?;
		let response = Self::check_status(response, "fetch_bundle").await?;

		let body: serde_json::Value = response.json().await?;
		Ok(TranslationBundle::from_json_value(&body))
	}

	async fn sync_keys(&self, request: &SyncKeysRequest) -> Result<SyncKeysResponse> {
		let url = format!("{}{}", self.base_url, SYNC_KEYS_PATH);
		debug!(url = %url, count = request.keys.len(), "Syncing translation keys");

		let response = self
			.authorize(self.http_client.post(&url))
			.json(request)
			.send()
			.await?;
		let response = Self::check_status(response, "sync_keys").await?;

		Ok(response.json().await?)
	}

	async fn report_missing(&self, request: &ReportMissingRequest) -> Result<()> {
		let url = format!("{}{}", self.base_url, REPORT_MISSING_PATH);
		debug!(url = %url, count = request.keys.len(), "Reporting missing translation keys");

		let response = self
			.authorize(self.http_client.post(&url))
			.json(request)
			.send()
			.await?;
		Self::check_status(response, "report_missing").await?;
		Ok(())
	}
}
