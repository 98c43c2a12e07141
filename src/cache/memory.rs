//! Thread-safe in-memory [`CacheStore`] with per-entry expiry.

// crates.io
use time::PrimitiveDateTime;
// self
use crate::{
	_prelude::*,
	cache::{CacheFuture, CacheKey, CacheStore},
};

type CacheMap = Arc<RwLock<HashMap<CacheKey, CacheEntry>>>;

#[derive(Clone, Debug)]
struct CacheEntry {
	value: Value,
	expires_at: OffsetDateTime,
}
impl CacheEntry {
	fn is_live_at(&self, now: OffsetDateTime) -> bool {
		self.expires_at > now
	}
}

/// Expiring key→value store that keeps decoded responses in-process.
///
/// Expired entries are invisible to readers immediately and are dropped lazily on the
/// next read of the same key or by [`purge_expired`](Self::purge_expired).
#[derive(Clone, Debug, Default)]
pub struct MemoryCache(CacheMap);
impl MemoryCache {
	/// Number of stored entries, live or not yet purged.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns true when nothing is stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	/// Drops every expired entry and returns how many were removed.
	pub fn purge_expired(&self) -> usize {
		Self::purge_at(&self.0, OffsetDateTime::now_utc())
	}

	/// Removes the entry for `key`, returning true when one existed.
	pub fn evict(&self, key: &CacheKey) -> bool {
		self.0.write().remove(key).is_some()
	}

	fn save_at(map: &CacheMap, key: CacheKey, value: Value, ttl: Duration, now: OffsetDateTime) {
		let ttl = if ttl.is_negative() { Duration::ZERO } else { ttl };
		// TTLs past the representable range pin the entry to the last instant.
		let expires_at = now.checked_add(ttl).unwrap_or(PrimitiveDateTime::MAX.assume_utc());

		map.write().insert(key, CacheEntry { value, expires_at });
	}

	fn fetch_at(map: &CacheMap, key: &CacheKey, now: OffsetDateTime) -> Option<Value> {
		{
			let guard = map.read();

			match guard.get(key) {
				Some(entry) if entry.is_live_at(now) => return Some(entry.value.clone()),
				Some(_) => {},
				None => return None,
			}
		}

		let mut guard = map.write();

		if guard.get(key).is_some_and(|entry| !entry.is_live_at(now)) {
			guard.remove(key);
		}

		None
	}

	fn purge_at(map: &CacheMap, now: OffsetDateTime) -> usize {
		let mut guard = map.write();
		let before = guard.len();

		guard.retain(|_, entry| entry.is_live_at(now));

		before - guard.len()
	}
}
impl CacheStore for MemoryCache {
	fn contains<'a>(&'a self, key: &'a CacheKey) -> CacheFuture<'a, bool> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::fetch_at(&map, key, OffsetDateTime::now_utc()).is_some()) })
	}

	fn fetch<'a>(&'a self, key: &'a CacheKey) -> CacheFuture<'a, Option<Value>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::fetch_at(&map, key, OffsetDateTime::now_utc())) })
	}

	fn save(&self, key: CacheKey, value: Value, ttl: Duration) -> CacheFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			Self::save_at(&map, key, value, ttl, OffsetDateTime::now_utc());

			Ok(())
		})
	}
}
