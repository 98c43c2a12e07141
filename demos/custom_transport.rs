//! Demonstrates plugging a custom transport into [`TwitterFeed`].
//!
//! 1. Implement [`FeedHttpClient`] and return every completed exchange as an [`HttpResponse`].
//! 2. Report connection-level failures through [`TransportError::network`].
//! 3. Hand the client to [`TwitterFeed::with_http_client`] behind an `Arc`.

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::Arc,
};
// crates.io
use color_eyre::Result;
// self
use twitter_feed::{
	auth::Credentials,
	cache::MemoryCache,
	endpoint::{self, TwitterFeed},
	error::TransportError,
	http::{FeedHttpClient, HttpResponse, TransportFuture},
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let credentials = Credentials::new("demo-ck", "demo-cs", "demo-at", "demo-ats")?;
	let cache = Arc::new(MemoryCache::default());
	let feed: TwitterFeed<StubHttpClient> = TwitterFeed::with_http_client(
		credentials.clone(),
		cache.clone(),
		Arc::new(StubHttpClient::Canned),
	);
	let followers = feed.followers_list([("screen_name", "bolt")]).await?;

	println!("Followers served by the stub transport: {followers}.");
	println!("Cached entries after the first call: {}.", cache.len());

	let offline: TwitterFeed<StubHttpClient> = TwitterFeed::with_http_client(
		credentials,
		cache,
		Arc::new(StubHttpClient::Offline { host: "api.twitter.com" }),
	);
	let rendered = endpoint::render(offline.friends_list([("screen_name", "bolt")]).await);

	println!("Transport failure rendered for the caller: {rendered}.");

	Ok(())
}

#[derive(Debug)]
struct OfflineError {
	host: &'static str,
}
impl Display for OfflineError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "no route to {}", self.host)
	}
}
impl StdError for OfflineError {}

enum StubHttpClient {
	Canned,
	Offline { host: &'static str },
}
impl FeedHttpClient for StubHttpClient {
	fn get<'a>(
		&'a self,
		url: &'a Url,
		authorization: &'a str,
	) -> TransportFuture<'a, HttpResponse> {
		Box::pin(async move {
			match self {
				Self::Canned => {
					println!("GET {url} ({} byte Authorization header).", authorization.len());

					Ok(HttpResponse::new(
						200,
						"{\"users\":[{\"screen_name\":\"stub\"}],\"next_cursor\":0}",
					))
				},
				Self::Offline { host } =>
					Err(TransportError::network(OfflineError { host: *host })),
			}
		})
	}
}
