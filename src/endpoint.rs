//! Named API operations exposed to embedding environments.
//!
//! Each [`Endpoint`] is a fixed `(path, cache prefix)` pair; [`TwitterFeed`] resolves the path
//! against its API base and hands the caller's parameters, unvalidated, to the shared
//! [`CachedFetcher`]. Invalid parameters surface as upstream error responses.

// self
use crate::{
	_prelude::*,
	auth::Credentials,
	cache::CacheStore,
	error::ConfigError,
	fetch::{CachedFetcher, FetchResult},
	http::FeedHttpClient,
	oauth1::{RequestParams, RequestSigner},
};
#[cfg(feature = "reqwest")] use crate::{config::FeedConfig, http::ReqwestHttpClient};

/// Public Twitter REST API v1.1 root.
pub const DEFAULT_API_BASE: &str = "https://api.twitter.com/1.1/";

/// Read-only operations served by the feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
	/// `statuses/user_timeline.json`.
	UserTimeline,
	/// `friends/list.json`.
	FriendsList,
	/// `followers/list.json`.
	FollowersList,
}
impl Endpoint {
	/// Every endpoint, in declaration order.
	pub const ALL: [Endpoint; 3] =
		[Endpoint::UserTimeline, Endpoint::FriendsList, Endpoint::FollowersList];

	/// Path relative to the API base.
	pub const fn path(self) -> &'static str {
		match self {
			Endpoint::UserTimeline => "statuses/user_timeline.json",
			Endpoint::FriendsList => "friends/list.json",
			Endpoint::FollowersList => "followers/list.json",
		}
	}

	/// Prefix of every cache key produced for this endpoint.
	pub const fn cache_prefix(self) -> &'static str {
		match self {
			Endpoint::UserTimeline => "usertimeline",
			Endpoint::FriendsList => "friendslist",
			Endpoint::FollowersList => "followerslist",
		}
	}

	/// Resolves the endpoint URL against `api_base`.
	pub fn url(self, api_base: &Url) -> Result<Url, ConfigError> {
		api_base.join(self.path()).map_err(|source| ConfigError::InvalidEndpoint { source })
	}
}
impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.cache_prefix())
	}
}

/// Parses [`DEFAULT_API_BASE`].
pub fn default_api_base() -> Url {
	Url::parse(DEFAULT_API_BASE).expect("Default API base is a valid URL.")
}

/// Validates an API root and ensures its path ends with `/` so endpoint paths nest under it.
pub fn normalize_api_base(mut url: Url) -> Result<Url, ConfigError> {
	let reject = |reason| ConfigError::InvalidApiBase { url: url.to_string(), reason };

	if !matches!(url.scheme(), "http" | "https") {
		return Err(reject("scheme must be http or https"));
	}
	if url.cannot_be_a_base() {
		return Err(reject("URL cannot be a base"));
	}
	if url.query().is_some() || url.fragment().is_some() {
		return Err(reject("query and fragment are not allowed"));
	}
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	Ok(url)
}

/// Facade exposing the three cached, signed read operations.
#[derive(Clone)]
pub struct TwitterFeed<C>
where
	C: ?Sized + FeedHttpClient,
{
	fetcher: CachedFetcher<C>,
	api_base: Url,
}
impl<C> TwitterFeed<C>
where
	C: ?Sized + FeedHttpClient,
{
	/// Creates a feed that reuses the caller-provided transport.
	pub fn with_http_client(
		credentials: Credentials,
		cache: Arc<dyn CacheStore>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self::with_fetcher(CachedFetcher::new(http_client, cache, RequestSigner::new(credentials)))
	}

	/// Wraps a fully configured fetcher.
	pub fn with_fetcher(fetcher: CachedFetcher<C>) -> Self {
		Self { fetcher, api_base: default_api_base() }
	}

	/// Overrides the API root (validated and normalized).
	pub fn with_api_base(mut self, api_base: Url) -> Result<Self, ConfigError> {
		self.api_base = normalize_api_base(api_base)?;

		Ok(self)
	}

	/// Overrides the cache TTL (60 seconds by default).
	pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
		self.fetcher = self.fetcher.with_ttl(ttl);

		self
	}

	/// API root endpoint paths are joined onto.
	pub fn api_base(&self) -> &Url {
		&self.api_base
	}

	/// Underlying fetcher.
	pub fn fetcher(&self) -> &CachedFetcher<C> {
		&self.fetcher
	}

	/// Tweets posted by a user (`screen_name`, `user_id`, `count`, ...).
	pub async fn user_timeline(&self, params: impl Into<RequestParams>) -> FetchResult {
		self.fetch(Endpoint::UserTimeline, params).await
	}

	/// Accounts a user follows (`screen_name`, `cursor`, `count`, ...).
	pub async fn friends_list(&self, params: impl Into<RequestParams>) -> FetchResult {
		self.fetch(Endpoint::FriendsList, params).await
	}

	/// Accounts following a user (`screen_name`, `cursor`, `count`, ...).
	pub async fn followers_list(&self, params: impl Into<RequestParams>) -> FetchResult {
		self.fetch(Endpoint::FollowersList, params).await
	}

	/// Shared path behind the named operations.
	pub async fn fetch(&self, endpoint: Endpoint, params: impl Into<RequestParams>) -> FetchResult {
		let params = params.into();
		let url = endpoint.url(&self.api_base)?;

		self.fetcher.fetch(&url, &params, endpoint.cache_prefix()).await
	}
}
#[cfg(feature = "reqwest")]
impl TwitterFeed<ReqwestHttpClient> {
	/// Creates a feed with its own reqwest transport.
	pub fn new(credentials: Credentials, cache: Arc<dyn CacheStore>) -> Self {
		Self::with_http_client(credentials, cache, ReqwestHttpClient::default())
	}

	/// Builds credentials, transport, TTL, and API base from `config`.
	pub fn from_config(config: &FeedConfig, cache: Arc<dyn CacheStore>) -> Result<Self> {
		let credentials = config.credentials()?;
		let http_client = match config.request_timeout() {
			Some(timeout) => ReqwestHttpClient::with_timeout(timeout)?,
			None => ReqwestHttpClient::default(),
		};
		let feed = Self::with_http_client(credentials, cache, http_client)
			.with_cache_ttl(config.cache_ttl())
			.with_api_base(config.api_base()?)?;

		Ok(feed)
	}
}
impl<C> Debug for TwitterFeed<C>
where
	C: ?Sized + FeedHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TwitterFeed")
			.field("api_base", &self.api_base.as_str())
			.field("fetcher", &self.fetcher)
			.finish()
	}
}

/// Renders a [`FetchResult`] as the decoded payload or an `{"error", "kind"}` object.
pub fn render(result: FetchResult) -> Value {
	match result {
		Ok(value) => value,
		Err(e) => serde_json::to_value(e.descriptor())
			.unwrap_or_else(|_| serde_json::json!({ "error": e.to_string() })),
	}
}
