//! Optional observability helpers for cached fetches.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `twitter_feed.fetch` with the `endpoint`
//!   (cache prefix) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `twitter_feed_fetch_total` counter for every
//!   attempt/hit/miss/success/failure, labeled by `endpoint` + `outcome`.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Outcome labels recorded for each fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FetchOutcome {
	/// Entry to the fetcher.
	Attempt,
	/// Served from cache without a signed call.
	CacheHit,
	/// Not cached; a signed call follows.
	CacheMiss,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FetchOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FetchOutcome::Attempt => "attempt",
			FetchOutcome::CacheHit => "cache_hit",
			FetchOutcome::CacheMiss => "cache_miss",
			FetchOutcome::Success => "success",
			FetchOutcome::Failure => "failure",
		}
	}
}
impl Display for FetchOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
