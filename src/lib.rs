//! OAuth 1.0a signed, read-through cached access to Twitter timelines and friend/follower
//! lists, with pluggable transports, expiring cache stores, and optional observability.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cache;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod fetch;
pub mod http;
pub mod oauth1;
pub mod obs;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::Credentials,
		cache::{CacheStore, MemoryCache},
		endpoint::TwitterFeed,
		http::ReqwestHttpClient,
	};

	/// Feed type alias used by reqwest-backed integration tests.
	pub type ReqwestTestFeed = TwitterFeed<ReqwestHttpClient>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Credentials matching the fixtures used across the signing tests.
	pub fn test_credentials() -> Credentials {
		Credentials::new("CK", "CS", "AT", "ATS").expect("Fixture credentials should be valid.")
	}

	/// Constructs a [`TwitterFeed`] rooted at `api_base`, backed by an in-memory cache and the
	/// reqwest transport used across integration tests.
	pub fn build_reqwest_test_feed(api_base: &str) -> (ReqwestTestFeed, Arc<MemoryCache>) {
		let cache_backend = Arc::new(MemoryCache::default());
		let cache: Arc<dyn CacheStore> = cache_backend.clone();
		let api_base = Url::parse(api_base).expect("Failed to parse test API base URL.");
		let feed = TwitterFeed::with_http_client(
			test_credentials(),
			cache,
			Arc::new(test_reqwest_http_client()),
		)
		.with_api_base(api_base)
		.expect("Test API base URL should be accepted.");

		(feed, cache_backend)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use color_eyre as _;
#[cfg(all(test, not(feature = "reqwest")))] use httpmock as _;
