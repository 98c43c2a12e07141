//! Plain configuration values consumed when building a
//! [`TwitterFeed`](crate::endpoint::TwitterFeed).
//!
//! Field names match the extension config keys (`consumer_key`,
//! `consumer_secret`, `oauth_access_token`, `oauth_access_token_secret`). Loading reports
//! the path of the first offending field.

// std
use std::{fs, path::Path};
// self
use crate::{
	_prelude::*,
	auth::{Credentials, Secret},
	endpoint,
	error::ConfigError,
};

/// Deserializable feed configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeedConfig {
	/// Application consumer key.
	pub consumer_key: String,
	/// Application consumer secret.
	pub consumer_secret: Secret,
	/// Access token of the account the feed reads as.
	pub oauth_access_token: String,
	/// Access token secret of the account the feed reads as.
	pub oauth_access_token_secret: Secret,
	/// API root that endpoint paths are joined onto.
	#[serde(default)]
	pub api_base: Option<Url>,
	/// Cache lifetime of successful responses, in seconds.
	#[serde(default = "FeedConfig::default_cache_ttl_secs")]
	pub cache_ttl_secs: u64,
	/// Per-request timeout, in seconds; transport default when absent.
	#[serde(default)]
	pub request_timeout_secs: Option<u64>,
}
impl FeedConfig {
	const DEFAULT_CACHE_TTL_SECS: u64 = 60;

	/// Creates a configuration with default API base, TTL, and timeout.
	pub fn new(
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<String>,
		oauth_access_token: impl Into<String>,
		oauth_access_token_secret: impl Into<String>,
	) -> Self {
		Self {
			consumer_key: consumer_key.into(),
			consumer_secret: Secret::new(consumer_secret),
			oauth_access_token: oauth_access_token.into(),
			oauth_access_token_secret: Secret::new(oauth_access_token_secret),
			api_base: None,
			cache_ttl_secs: Self::DEFAULT_CACHE_TTL_SECS,
			request_timeout_secs: None,
		}
	}

	/// Parses a JSON document.
	pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
		let de = &mut serde_json::Deserializer::from_str(raw);

		Ok(serde_path_to_error::deserialize(de)?)
	}

	/// Reads and parses a JSON file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let raw = fs::read_to_string(path)?;

		Self::from_json_str(&raw)
	}

	/// Validates and returns the credential set.
	pub fn credentials(&self) -> Result<Credentials, ConfigError> {
		Credentials::new(
			self.consumer_key.as_str(),
			self.consumer_secret.expose(),
			self.oauth_access_token.as_str(),
			self.oauth_access_token_secret.expose(),
		)
	}

	/// Normalized API base, falling back to the public v1.1 root.
	pub fn api_base(&self) -> Result<Url, ConfigError> {
		match &self.api_base {
			Some(url) => endpoint::normalize_api_base(url.clone()),
			None => Ok(endpoint::default_api_base()),
		}
	}

	/// Cache lifetime of successful responses.
	pub fn cache_ttl(&self) -> Duration {
		Duration::seconds(i64::try_from(self.cache_ttl_secs).unwrap_or(i64::MAX))
	}

	/// Per-request timeout, if configured.
	pub fn request_timeout(&self) -> Option<std::time::Duration> {
		self.request_timeout_secs.map(std::time::Duration::from_secs)
	}

	fn default_cache_ttl_secs() -> u64 {
		Self::DEFAULT_CACHE_TTL_SECS
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn minimal_document_uses_defaults() {
		let config = FeedConfig::from_json_str(
			r#"{
				"consumer_key": "CK",
				"consumer_secret": "CS",
				"oauth_access_token": "AT",
				"oauth_access_token_secret": "ATS"
			}"#,
		)
		.expect("Minimal config should parse.");

		assert_eq!(config.cache_ttl(), Duration::seconds(60));
		assert_eq!(config.request_timeout(), None);
		assert_eq!(
			config.api_base().expect("Default API base should be valid.").as_str(),
			"https://api.twitter.com/1.1/"
		);

		let credentials = config.credentials().expect("Credentials should be valid.");

		assert_eq!(credentials.consumer_key(), "CK");
		assert_eq!(credentials.access_token_secret().expose(), "ATS");
	}

	#[test]
	fn parse_errors_report_field_path() {
		let err = FeedConfig::from_json_str(
			r#"{
				"consumer_key": "CK",
				"consumer_secret": "CS",
				"oauth_access_token": "AT",
				"oauth_access_token_secret": "ATS",
				"cache_ttl_secs": "sixty"
			}"#,
		)
		.expect_err("A string TTL must be rejected.");

		assert!(matches!(&err, ConfigError::Parse { path, .. } if path == "cache_ttl_secs"));
	}

	#[test]
	fn empty_credentials_fail_fast() {
		let config = FeedConfig::new("CK", "", "AT", "ATS");

		assert!(matches!(
			config.credentials(),
			Err(ConfigError::MissingCredential { field: "consumer_secret" })
		));
	}

	#[test]
	fn overrides_are_honored() {
		let config = FeedConfig::from_json_str(
			r#"{
				"consumer_key": "CK",
				"consumer_secret": "CS",
				"oauth_access_token": "AT",
				"oauth_access_token_secret": "ATS",
				"api_base": "http://127.0.0.1:8080/1.1",
				"cache_ttl_secs": 300,
				"request_timeout_secs": 10
			}"#,
		)
		.expect("Full config should parse.");

		assert_eq!(config.cache_ttl(), Duration::seconds(300));
		assert_eq!(config.request_timeout(), Some(std::time::Duration::from_secs(10)));
		assert_eq!(
			config.api_base().expect("Override should be valid.").as_str(),
			"http://127.0.0.1:8080/1.1/"
		);
	}

	#[test]
	fn missing_file_is_a_read_error() {
		let err = FeedConfig::from_path("/nonexistent/twitter-feed.json")
			.expect_err("Missing files must be rejected.");

		assert!(matches!(err, ConfigError::Read(_)));
	}
}
