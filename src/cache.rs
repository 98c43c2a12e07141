//! Cache contracts and the built-in expiring in-memory store.

pub mod memory;

pub use memory::MemoryCache;

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};
// self
use crate::_prelude::*;

/// Boxed future returned by [`CacheStore`] operations.
pub type CacheFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CacheError>> + 'a + Send>>;

/// Expiring key→value store consulted before every signed call.
///
/// Expiry is the store's responsibility: once an entry's TTL has elapsed, `contains` must
/// report `false` and `fetch` must return `None`. Individual operations must be safe to
/// call concurrently; the feed performs no locking of its own.
pub trait CacheStore
where
	Self: Send + Sync,
{
	/// Returns true when a live entry exists for `key`.
	fn contains<'a>(&'a self, key: &'a CacheKey) -> CacheFuture<'a, bool>;

	/// Returns the live value stored for `key`, if any.
	fn fetch<'a>(&'a self, key: &'a CacheKey) -> CacheFuture<'a, Option<Value>>;

	/// Stores `value` under `key` for `ttl`, replacing any previous entry.
	fn save(&self, key: CacheKey, value: Value, ttl: Duration) -> CacheFuture<'_, ()>;
}

/// Error type produced by [`CacheStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum CacheError {
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Cache key derived from an endpoint prefix and the full request URL.
///
/// The URL component is a base64 (no padding) SHA-256 digest, so keys stay short and
/// free of characters that external stores might reject.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);
impl CacheKey {
	/// Builds `"{prefix}-{digest(full_url)}"`.
	pub fn new(prefix: &str, full_url: &Url) -> Self {
		let digest = Sha256::digest(full_url.as_str().as_bytes());

		Self(format!("{prefix}-{}", URL_SAFE_NO_PAD.encode(digest)))
	}

	/// Returns the key as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for CacheKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Display for CacheKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
