//! Demonstrates loading a [`FeedConfig`] and reading a user timeline through the default
//! reqwest transport and in-memory cache.
//!
//! The API root is pointed at a local mock server so the demo runs offline; drop the
//! `api_base` entry to talk to the public API with real credentials.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use twitter_feed::{
	cache::{CacheStore, MemoryCache},
	config::FeedConfig,
	endpoint::{self, TwitterFeed},
	serde_json::json,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let timeline_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/1.1/statuses/user_timeline.json")
				.query_param("screen_name", "bolt")
				.header_exists("authorization");
			then.status(200).header("content-type", "application/json").body(
				"[{\"id\":1,\"text\":\"first tweet\"},{\"id\":2,\"text\":\"second tweet\"}]",
			);
		})
		.await;
	let config = FeedConfig::from_json_str(
		&json!({
			"consumer_key": "demo-consumer-key",
			"consumer_secret": "demo-consumer-secret",
			"oauth_access_token": "demo-access-token",
			"oauth_access_token_secret": "demo-access-token-secret",
			"api_base": server.url("/1.1"),
			"cache_ttl_secs": 120,
		})
		.to_string(),
	)?;
	let cache: Arc<dyn CacheStore> = Arc::new(MemoryCache::default());
	let feed = TwitterFeed::from_config(&config, cache)?;
	let params = [("screen_name", "bolt"), ("count", "2")];
	let timeline = endpoint::render(feed.user_timeline(params).await);

	println!("Timeline: {timeline}.");

	// Served from the cache; the mock is hit only once.
	let again = feed.user_timeline(params).await?;

	println!("Cached timeline has {} entries.", again.as_array().map_or(0, Vec::len));

	timeline_mock.assert_async().await;

	Ok(())
}
