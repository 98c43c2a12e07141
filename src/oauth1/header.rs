//! `Authorization: OAuth ...` header rendering.

// self
use crate::oauth1::{OAuthParams, codec};

/// Scheme prefix, followed by a single space.
pub const OAUTH_SCHEME: &str = "OAuth";

/// Renders `OAuth k1="v1", k2="v2", ...` with keys and values percent-encoded.
///
/// Pairs are emitted in the order [`OAuthParams::pairs`] yields them, which is the same
/// sorted order the signature was computed over.
pub fn authorization_header(params: &OAuthParams) -> String {
	let fields = params
		.pairs()
		.iter()
		.map(|(k, v)| format!("{}=\"{}\"", codec::encode(k), codec::encode(v)))
		.collect::<Vec<_>>()
		.join(", ");

	format!("{OAUTH_SCHEME} {fields}")
}
