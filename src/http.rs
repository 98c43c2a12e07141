//! Transport primitives for signed API calls.
//!
//! [`FeedHttpClient`] is the feed's only dependency on an HTTP stack. The default
//! [`ReqwestHttpClient`] is enabled by the `reqwest` feature; tests and embedders can
//! supply their own implementation to stub the network or reuse an existing client.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`FeedHttpClient::get`].
pub type TransportFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, TransportError>> + 'a + Send>>;

/// Status and body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Creates a response from its parts.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns true for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Abstraction over HTTP transports able to issue an authorized GET.
///
/// Implementations report network-level failures as [`TransportError`] and return every
/// completed exchange, whatever its status, as an [`HttpResponse`]; the fetcher decides
/// which statuses count as failures. Implementations must be `Send + Sync + 'static` so
/// a single transport can be shared behind `Arc` by every endpoint.
pub trait FeedHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `GET url` with the given `Authorization` header value.
	fn get<'a>(&'a self, url: &'a Url, authorization: &'a str)
	-> TransportFuture<'a, HttpResponse>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client whose requests give up after `timeout`.
	pub fn with_timeout(timeout: std::time::Duration) -> Result<Self, crate::error::ConfigError> {
		let client = ReqwestClient::builder().timeout(timeout).build()?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl FeedHttpClient for ReqwestHttpClient {
	fn get<'a>(
		&'a self,
		url: &'a Url,
		authorization: &'a str,
	) -> TransportFuture<'a, HttpResponse> {
		Box::pin(async move {
			let response = self
				.0
				.get(url.clone())
				.header(reqwest::header::AUTHORIZATION, authorization)
				.send()
				.await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(HttpResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn success_covers_2xx_only() {
		assert!(HttpResponse::new(200, "{}").is_success());
		assert!(HttpResponse::new(204, Vec::new()).is_success());
		assert!(!HttpResponse::new(304, Vec::new()).is_success());
		assert!(!HttpResponse::new(401, "{}").is_success());
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn timeout_client_builds() {
		ReqwestHttpClient::with_timeout(std::time::Duration::from_secs(5))
			.expect("A timeout-only reqwest client should build.");
	}
}
