//! Consumer + access token credentials used to sign every request.

// self
use crate::{_prelude::*, auth::Secret, error::ConfigError};

/// Consumer key/secret and access token/secret pair, immutable once built.
///
/// Construction rejects empty values so misconfiguration fails when the feed is built
/// rather than when the first request is signed. Both secrets are held in [`Secret`] so
/// `Debug` output never leaks them.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	consumer_key: String,
	consumer_secret: Secret,
	access_token: String,
	access_token_secret: Secret,
}
impl Credentials {
	/// Validates and stores the four credential values.
	pub fn new(
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<String>,
		access_token: impl Into<String>,
		access_token_secret: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let consumer_key = require("consumer_key", consumer_key.into())?;
		let consumer_secret = require("consumer_secret", consumer_secret.into())?;
		let access_token = require("oauth_access_token", access_token.into())?;
		let access_token_secret =
			require("oauth_access_token_secret", access_token_secret.into())?;

		Ok(Self {
			consumer_key,
			consumer_secret: Secret::new(consumer_secret),
			access_token,
			access_token_secret: Secret::new(access_token_secret),
		})
	}

	/// Consumer (application) key sent as `oauth_consumer_key`.
	pub fn consumer_key(&self) -> &str {
		&self.consumer_key
	}

	/// Consumer secret; first half of the signing key.
	pub fn consumer_secret(&self) -> &Secret {
		&self.consumer_secret
	}

	/// Access token sent as `oauth_token`.
	pub fn access_token(&self) -> &str {
		&self.access_token
	}

	/// Access token secret; second half of the signing key.
	pub fn access_token_secret(&self) -> &Secret {
		&self.access_token_secret
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("consumer_key", &self.consumer_key)
			.field("consumer_secret", &self.consumer_secret)
			.field("access_token", &self.access_token)
			.field("access_token_secret", &self.access_token_secret)
			.finish()
	}
}

fn require(field: &'static str, value: String) -> Result<String, ConfigError> {
	if value.trim().is_empty() {
		return Err(ConfigError::MissingCredential { field });
	}

	Ok(value)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn empty_values_are_rejected_by_field() {
		let err = Credentials::new("ck", "cs", "", "ats")
			.expect_err("An empty access token must be rejected.");

		assert!(matches!(err, ConfigError::MissingCredential { field: "oauth_access_token" }));

		let err = Credentials::new("ck", "  ", "at", "ats")
			.expect_err("A whitespace-only consumer secret must be rejected.");

		assert!(matches!(err, ConfigError::MissingCredential { field: "consumer_secret" }));
	}

	#[test]
	fn debug_redacts_secrets() {
		let credentials = Credentials::new("ck", "consumer-secret", "at", "token-secret")
			.expect("Credential fixture should be valid.");
		let rendered = format!("{credentials:?}");

		assert!(rendered.contains("ck"));
		assert!(rendered.contains("at"));
		assert!(!rendered.contains("consumer-secret"));
		assert!(!rendered.contains("token-secret"));
		assert_eq!(credentials.consumer_secret().expose(), "consumer-secret");
		assert_eq!(credentials.access_token_secret().expose(), "token-secret");
	}
}
