//! Read-through cached fetches of signed GET requests.
//!
//! [`CachedFetcher::fetch`] composes the request URL, derives a [`CacheKey`] from it, and
//! only signs and sends a request when the cache has no live entry. Successful JSON
//! responses are cached for the configured TTL (60 seconds unless overridden); transport
//! and decode failures are returned as typed errors and never cached. There are no
//! retries: one failed attempt is surfaced to the caller as-is.

// self
use crate::{
	_prelude::*,
	cache::{CacheKey, CacheStore},
	error::{DecodeError, TransportError},
	http::FeedHttpClient,
	oauth1::{self, RequestParams, RequestSigner},
	obs::{self, FetchOutcome, FetchSpan, fetch_debug, fetch_warn},
};

/// Result of a single logical API call: decoded JSON or a typed error, never both.
pub type FetchResult = Result<Value>;

/// Coordinates cache lookups, request signing, and transport calls.
#[derive(Clone)]
pub struct CachedFetcher<C>
where
	C: ?Sized + FeedHttpClient,
{
	/// Transport used for every cache miss.
	pub http_client: Arc<C>,
	/// Store consulted before signing and populated after decoding.
	pub cache: Arc<dyn CacheStore>,
	/// Signer bound to the feed's credentials.
	pub signer: RequestSigner,
	ttl: Duration,
}
impl<C> CachedFetcher<C>
where
	C: ?Sized + FeedHttpClient,
{
	/// Lifetime of cached responses unless overridden with [`with_ttl`](Self::with_ttl).
	pub const DEFAULT_TTL: Duration = Duration::seconds(60);

	/// Creates a fetcher from explicit collaborators.
	pub fn new(
		http_client: impl Into<Arc<C>>,
		cache: Arc<dyn CacheStore>,
		signer: RequestSigner,
	) -> Self {
		Self { http_client: http_client.into(), cache, signer, ttl: Self::DEFAULT_TTL }
	}

	/// Overrides the cache TTL; negative durations are clamped to zero.
	pub fn with_ttl(mut self, ttl: Duration) -> Self {
		self.ttl = if ttl.is_negative() { Duration::ZERO } else { ttl };

		self
	}

	/// Cache TTL applied to successful responses.
	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// Fetches `base_url` with `params`, serving from cache under `cache_prefix` when possible.
	pub async fn fetch(
		&self,
		base_url: &Url,
		params: &RequestParams,
		cache_prefix: &str,
	) -> FetchResult {
		let span = FetchSpan::new(cache_prefix, "fetch");

		obs::record_fetch_outcome(cache_prefix, FetchOutcome::Attempt);

		let result = span.instrument(self.fetch_inner(base_url, params, cache_prefix)).await;

		match &result {
			Ok(_) => obs::record_fetch_outcome(cache_prefix, FetchOutcome::Success),
			Err(_e) => {
				fetch_warn!(error = %_e, kind = %_e.kind(), "Fetch failed.");

				obs::record_fetch_outcome(cache_prefix, FetchOutcome::Failure);
			},
		}

		result
	}

	async fn fetch_inner(
		&self,
		base_url: &Url,
		params: &RequestParams,
		cache_prefix: &str,
	) -> FetchResult {
		oauth1::ensure_bare(base_url)?;

		let full_url = oauth1::compose_full_url(base_url, params);
		let key = CacheKey::new(cache_prefix, &full_url);

		if let Some(cached) = self.cached(&key).await {
			fetch_debug!(key = %key, "Serving cached response.");

			obs::record_fetch_outcome(cache_prefix, FetchOutcome::CacheHit);

			return Ok(cached);
		}

		obs::record_fetch_outcome(cache_prefix, FetchOutcome::CacheMiss);

		let request = self.signer.sign_get(base_url, params)?;

		fetch_debug!(key = %key, url = %request.full_url, "Cache miss; sending signed request.");

		let response =
			self.http_client.get(&request.full_url, &request.authorization).await?;

		if !response.is_success() {
			return Err(TransportError::status(response.status, &response.body).into());
		}

		let value = serde_json::from_slice::<Value>(&response.body)
			.map_err(|source| DecodeError { status: response.status, source })?;

		if let Err(_e) = self.cache.save(key, value.clone(), self.ttl).await {
			fetch_warn!(error = %_e, "Cache write failed; returning uncached response.");
		}

		Ok(value)
	}

	async fn cached(&self, key: &CacheKey) -> Option<Value> {
		match self.cache.contains(key).await {
			Ok(true) => {},
			Ok(false) => return None,
			Err(_e) => {
				fetch_warn!(error = %_e, key = %key, "Cache lookup failed; treating as a miss.");

				return None;
			},
		}

		match self.cache.fetch(key).await {
			Ok(value) => value,
			Err(_e) => {
				fetch_warn!(error = %_e, key = %key, "Cache read failed; treating as a miss.");

				None
			},
		}
	}
}
impl<C> Debug for CachedFetcher<C>
where
	C: ?Sized + FeedHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CachedFetcher")
			.field("signer", &self.signer)
			.field("ttl", &self.ttl)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::{
		auth::Credentials,
		cache::{CacheError, CacheFuture, MemoryCache},
		config::FeedConfig,
		error::ErrorKind,
		http::{HttpResponse, TransportFuture},
	};

	const BASE_URL: &str = "https://api.example.com/1.1/statuses/user_timeline.json";

	struct ScriptedHttpClient {
		status: u16,
		body: &'static str,
		calls: AtomicUsize,
		last_authorization: RwLock<Option<String>>,
	}
	impl ScriptedHttpClient {
		fn new(status: u16, body: &'static str) -> Self {
			Self { status, body, calls: AtomicUsize::new(0), last_authorization: RwLock::new(None) }
		}

		fn calls(&self) -> usize {
			self.calls.load(Ordering::SeqCst)
		}
	}
	impl FeedHttpClient for ScriptedHttpClient {
		fn get<'a>(
			&'a self,
			_url: &'a Url,
			authorization: &'a str,
		) -> TransportFuture<'a, HttpResponse> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			*self.last_authorization.write() = Some(authorization.to_owned());

			let response = HttpResponse::new(self.status, self.body);

			Box::pin(async move { Ok(response) })
		}
	}

	struct BrokenCache;
	impl CacheStore for BrokenCache {
		fn contains<'a>(&'a self, _key: &'a CacheKey) -> CacheFuture<'a, bool> {
			Box::pin(async { Err(CacheError::Backend { message: "down".into() }) })
		}

		fn fetch<'a>(&'a self, _key: &'a CacheKey) -> CacheFuture<'a, Option<Value>> {
			Box::pin(async { Err(CacheError::Backend { message: "down".into() }) })
		}

		fn save(&self, _key: CacheKey, _value: Value, _ttl: Duration) -> CacheFuture<'_, ()> {
			Box::pin(async { Err(CacheError::Backend { message: "down".into() }) })
		}
	}

	fn fetcher(
		client: Arc<ScriptedHttpClient>,
		cache: Arc<dyn CacheStore>,
	) -> CachedFetcher<ScriptedHttpClient> {
		let credentials = Credentials::new("CK", "CS", "AT", "ATS")
			.expect("Fixture credentials should be valid.");

		CachedFetcher::new(client, cache, RequestSigner::new(credentials))
	}

	fn base_url() -> Url {
		Url::parse(BASE_URL).expect("Fixture URL should parse.")
	}

	#[tokio::test]
	async fn second_identical_call_is_served_from_cache() {
		let client = Arc::new(ScriptedHttpClient::new(200, "[{\"id\":1}]"));
		let cache = Arc::new(MemoryCache::default());
		let fetcher = fetcher(client.clone(), cache.clone());
		let params = RequestParams::from([("screen_name", "bolt")]);
		let first = fetcher.fetch(&base_url(), &params, "usertimeline").await;
		let second = fetcher.fetch(&base_url(), &params, "usertimeline").await;

		assert_eq!(first.expect("First fetch should succeed."), json!([{"id": 1}]));
		assert_eq!(second.expect("Second fetch should succeed."), json!([{"id": 1}]));
		assert_eq!(client.calls(), 1);
		assert_eq!(cache.len(), 1);

		let authorization = client.last_authorization.read().clone();

		assert!(authorization.is_some_and(|value| value.starts_with("OAuth ")));
	}

	#[tokio::test]
	async fn non_success_status_is_not_cached() {
		let client = Arc::new(ScriptedHttpClient::new(401, "{\"errors\":[{\"code\":32}]}"));
		let cache = Arc::new(MemoryCache::default());
		let fetcher = fetcher(client.clone(), cache.clone());
		let err = fetcher
			.fetch(&base_url(), &RequestParams::new(), "usertimeline")
			.await
			.expect_err("A 401 must surface as an error.");

		assert_eq!(err.kind(), ErrorKind::Transport);
		assert!(matches!(err, Error::Transport(TransportError::Status { status: 401, .. })));
		assert!(cache.is_empty());
	}

	#[tokio::test]
	async fn malformed_json_is_a_decode_error() {
		let client = Arc::new(ScriptedHttpClient::new(200, "<html>over capacity</html>"));
		let cache = Arc::new(MemoryCache::default());
		let fetcher = fetcher(client.clone(), cache.clone());
		let err = fetcher
			.fetch(&base_url(), &RequestParams::new(), "usertimeline")
			.await
			.expect_err("HTML must not decode as JSON.");

		assert_eq!(err.kind(), ErrorKind::Decode);
		assert!(cache.is_empty());
	}

	#[tokio::test]
	async fn broken_cache_degrades_to_uncached_fetches() {
		let client = Arc::new(ScriptedHttpClient::new(200, "{\"users\":[]}"));
		let fetcher = fetcher(client.clone(), Arc::new(BrokenCache));
		let params = RequestParams::from([("screen_name", "bolt")]);

		for _ in 0..2 {
			let value = fetcher
				.fetch(&base_url(), &params, "followerslist")
				.await
				.expect("Cache failures must not fail the fetch.");

			assert_eq!(value, json!({"users": []}));
		}

		assert_eq!(client.calls(), 2);
	}

	#[tokio::test]
	async fn zero_ttl_refetches() {
		let client = Arc::new(ScriptedHttpClient::new(200, "[]"));
		let fetcher = fetcher(client.clone(), Arc::new(MemoryCache::default()))
			.with_ttl(Duration::ZERO);

		for _ in 0..2 {
			fetcher
				.fetch(&base_url(), &RequestParams::new(), "usertimeline")
				.await
				.expect("Fetch should succeed.");
		}

		assert_eq!(client.calls(), 2);
		assert_eq!(fetcher.ttl(), Duration::ZERO);
	}

	#[tokio::test]
	async fn query_in_base_url_is_rejected_before_transport() {
		let client = Arc::new(ScriptedHttpClient::new(200, "[]"));
		let fetcher = fetcher(client.clone(), Arc::new(MemoryCache::default()));
		let base = Url::parse("https://api.example.com/1.1/friends/list.json?count=1")
			.expect("Fixture URL should parse.");
		let err = fetcher
			.fetch(&base, &RequestParams::new(), "friendslist")
			.await
			.expect_err("Query-carrying base URLs must be rejected.");

		assert_eq!(err.kind(), ErrorKind::Config);
		assert_eq!(client.calls(), 0);
	}

	#[tokio::test]
	async fn oversized_configured_ttl_still_caches() {
		let config = FeedConfig::from_json_str(
			r#"{
				"consumer_key": "CK",
				"consumer_secret": "CS",
				"oauth_access_token": "AT",
				"oauth_access_token_secret": "ATS",
				"cache_ttl_secs": 1000000000000
			}"#,
		)
		.expect("Large TTLs should parse.");
		let client = Arc::new(ScriptedHttpClient::new(200, "[]"));
		let cache = Arc::new(MemoryCache::default());
		let fetcher = fetcher(client.clone(), cache.clone()).with_ttl(config.cache_ttl());
		let params = RequestParams::from([("screen_name", "bolt")]);

		for _ in 0..2 {
			let value = fetcher
				.fetch(&base_url(), &params, "usertimeline")
				.await
				.expect("Fetch with a huge TTL should succeed.");

			assert_eq!(value, json!([]));
		}

		assert_eq!(client.calls(), 1);
		assert_eq!(cache.len(), 1);
	}

	#[test]
	fn default_ttl_is_sixty_seconds() {
		let client = Arc::new(ScriptedHttpClient::new(200, "[]"));
		let fetcher = fetcher(client, Arc::new(MemoryCache::default()));

		assert_eq!(fetcher.ttl(), Duration::seconds(60));
		assert_eq!(fetcher.with_ttl(Duration::seconds(-1)).ttl(), Duration::ZERO);
	}
}
