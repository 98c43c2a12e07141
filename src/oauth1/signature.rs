//! Signature base string, HMAC-SHA1 digest, and the request signer built on both.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha1::Sha1;
// self
use crate::{
	_prelude::*,
	auth::Credentials,
	error::ConfigError,
	oauth1::{
		EntropySource, OAuthParams, OsEntropy, RequestParams, codec, entropy, header,
	},
};

type HmacSha1 = Hmac<Sha1>;

/// Builds `METHOD&encoded-url&encoded-params` over the merged parameter set.
///
/// `base_url` must not carry a query component; the parameters are normalized before
/// encoding, so iteration order of `params` never affects the result.
pub fn base_string<I, K, V>(method: &str, base_url: &str, params: I) -> String
where
	I: IntoIterator<Item = (K, V)>,
	K: Into<String>,
	V: Into<String>,
{
	let normalized = codec::normalize(params);
	let param_str = codec::encode_pairs(normalized.iter().map(|(k, v)| (k.as_str(), v.as_str())));

	format!(
		"{}&{}&{}",
		method.to_ascii_uppercase(),
		codec::encode(base_url),
		codec::encode(&param_str)
	)
}

/// Computes the base64 HMAC-SHA1 signature of `base_string`.
pub fn sign(base_string: &str, consumer_secret: &str, token_secret: &str) -> String {
	let key = format!("{}&{}", codec::encode(consumer_secret), codec::encode(token_secret));
	let mut mac =
		HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC-SHA1 accepts keys of any length.");

	mac.update(base_string.as_bytes());

	STANDARD.encode(mac.finalize().into_bytes())
}

/// Builds the request URL: `base_url` plus the caller's parameters in their given order.
///
/// Keys and values go through the same RFC 3986 codec as the signature so reserved
/// characters cannot split or merge parameters on the wire.
pub fn compose_full_url(base_url: &Url, params: &RequestParams) -> Url {
	let mut full_url = base_url.clone();

	if params.is_empty() {
		full_url.set_query(None);
	} else {
		full_url.set_query(Some(&codec::encode_pairs(params.iter())));
	}

	full_url
}

/// Fully formed GET request ready for a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedRequest {
	/// HTTP method covered by the signature.
	pub method: &'static str,
	/// URL without query, as used in the base string.
	pub base_url: Url,
	/// URL with the encoded query string.
	pub full_url: Url,
	/// Value for the `Authorization` header.
	pub authorization: String,
}

/// Signs requests with a fixed credential set and a fresh nonce per call.
#[derive(Clone)]
pub struct RequestSigner {
	credentials: Arc<Credentials>,
	entropy: Arc<dyn EntropySource>,
}
impl RequestSigner {
	/// HTTP method used by every fetch.
	pub const GET: &'static str = "GET";

	/// Creates a signer backed by the operating-system CSPRNG.
	pub fn new(credentials: impl Into<Arc<Credentials>>) -> Self {
		Self::with_entropy(credentials, Arc::new(OsEntropy))
	}

	/// Creates a signer that draws nonces from `entropy`.
	pub fn with_entropy(
		credentials: impl Into<Arc<Credentials>>,
		entropy: Arc<dyn EntropySource>,
	) -> Self {
		Self { credentials: credentials.into(), entropy }
	}

	/// Credentials bound to this signer.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Signs `params` with a fresh nonce and the current timestamp.
	pub fn oauth_params(
		&self,
		method: &str,
		base_url: &str,
		params: &RequestParams,
	) -> Result<OAuthParams> {
		let nonce = entropy::generate_nonce(self.entropy.as_ref())?;
		let timestamp = OffsetDateTime::now_utc().unix_timestamp();

		Ok(self.oauth_params_with(method, base_url, params, nonce, timestamp))
	}

	/// Deterministic variant of [`oauth_params`](Self::oauth_params) with a caller-chosen
	/// nonce and timestamp.
	pub fn oauth_params_with(
		&self,
		method: &str,
		base_url: &str,
		params: &RequestParams,
		nonce: impl Into<String>,
		timestamp: i64,
	) -> OAuthParams {
		let credentials = self.credentials.as_ref();
		let nonce = nonce.into();
		let oauth = OAuthParams::unsigned_pairs(
			credentials.consumer_key(),
			&nonce,
			timestamp,
			credentials.access_token(),
		);
		// `oauth_*` names override caller parameters of the same name.
		let merged = params
			.iter()
			.filter(|(k, _)| !oauth.iter().any(|(name, _)| name == k))
			.map(|(k, v)| (k.to_owned(), v.to_owned()))
			.chain(oauth.iter().map(|(k, v)| ((*k).to_owned(), v.clone())));
		let base = base_string(method, base_url, merged);
		let signature = sign(
			&base,
			credentials.consumer_secret().expose(),
			credentials.access_token_secret().expose(),
		);

		OAuthParams {
			consumer_key: credentials.consumer_key().to_owned(),
			nonce,
			signature,
			timestamp,
			token: credentials.access_token().to_owned(),
		}
	}

	/// Produces a [`SignedRequest`] for a GET against `base_url` with `params`.
	pub fn sign_get(&self, base_url: &Url, params: &RequestParams) -> Result<SignedRequest> {
		ensure_bare(base_url)?;

		let oauth = self.oauth_params(Self::GET, base_url.as_str(), params)?;

		Ok(SignedRequest {
			method: Self::GET,
			base_url: base_url.clone(),
			full_url: compose_full_url(base_url, params),
			authorization: header::authorization_header(&oauth),
		})
	}
}
impl Debug for RequestSigner {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestSigner").field("credentials", &self.credentials).finish()
	}
}

/// Rejects base URLs that carry a query or fragment.
pub fn ensure_bare(base_url: &Url) -> Result<(), ConfigError> {
	if base_url.query().is_some() || base_url.fragment().is_some() {
		return Err(ConfigError::BaseUrlHasQuery { url: base_url.to_string() });
	}

	Ok(())
}
