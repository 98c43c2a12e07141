//! Caller-supplied request parameters and the signed OAuth parameter set.

// self
use crate::{
	_prelude::*,
	oauth1::{OAUTH_VERSION, SIGNATURE_METHOD},
};

/// Query parameters for a single API call, kept in the order the caller supplied them.
///
/// Inserting a name that is already present replaces its value in place, so each name
/// appears at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(String, String)>", into = "Vec<(String, String)>")]
pub struct RequestParams(Vec<(String, String)>);
impl RequestParams {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces a parameter.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
		let name = name.into();
		let value = value.into();

		match self.0.iter_mut().find(|(existing, _)| *existing == name) {
			Some((_, slot)) => *slot = value,
			None => self.0.push((name, value)),
		}

		self
	}

	/// Builder-style variant of [`insert`](Self::insert).
	pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.insert(name, value);

		self
	}

	/// Returns the value stored for `name`, if any.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.0.iter().find(|(existing, _)| existing == name).map(|(_, v)| v.as_str())
	}

	/// Number of parameters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no parameters are defined.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterator over `(name, value)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}
impl<K, V> FromIterator<(K, V)> for RequestParams
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut params = Self::new();

		for (k, v) in iter {
			params.insert(k, v);
		}

		params
	}
}
impl<K, V, const N: usize> From<[(K, V); N]> for RequestParams
where
	K: Into<String>,
	V: Into<String>,
{
	fn from(pairs: [(K, V); N]) -> Self {
		pairs.into_iter().collect()
	}
}
impl From<Vec<(String, String)>> for RequestParams {
	fn from(pairs: Vec<(String, String)>) -> Self {
		pairs.into_iter().collect()
	}
}
impl From<RequestParams> for Vec<(String, String)> {
	fn from(params: RequestParams) -> Self {
		params.0
	}
}

/// The seven `oauth_*` fields attached to a signed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuthParams {
	/// `oauth_consumer_key`.
	pub consumer_key: String,
	/// `oauth_nonce`.
	pub nonce: String,
	/// `oauth_signature` (base64 HMAC-SHA1 digest).
	pub signature: String,
	/// `oauth_timestamp` in seconds since the Unix epoch.
	pub timestamp: i64,
	/// `oauth_token`.
	pub token: String,
}
impl OAuthParams {
	/// Returns every field as `(name, value)` pairs sorted by name.
	pub fn pairs(&self) -> [(&'static str, String); 7] {
		[
			("oauth_consumer_key", self.consumer_key.clone()),
			("oauth_nonce", self.nonce.clone()),
			("oauth_signature", self.signature.clone()),
			("oauth_signature_method", SIGNATURE_METHOD.to_owned()),
			("oauth_timestamp", self.timestamp.to_string()),
			("oauth_token", self.token.clone()),
			("oauth_version", OAUTH_VERSION.to_owned()),
		]
	}

	/// Returns the six fields covered by the signature, sorted by name.
	pub(crate) fn unsigned_pairs(
		consumer_key: &str,
		nonce: &str,
		timestamp: i64,
		token: &str,
	) -> [(&'static str, String); 6] {
		[
			("oauth_consumer_key", consumer_key.to_owned()),
			("oauth_nonce", nonce.to_owned()),
			("oauth_signature_method", SIGNATURE_METHOD.to_owned()),
			("oauth_timestamp", timestamp.to_string()),
			("oauth_token", token.to_owned()),
			("oauth_version", OAUTH_VERSION.to_owned()),
		]
	}
}
