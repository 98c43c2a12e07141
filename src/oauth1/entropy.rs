//! Entropy sources used to mint `oauth_nonce` values.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use rand::{TryRngCore, rngs::OsRng};
// self
use crate::{_prelude::*, error::EntropyError};

/// Number of random bytes behind each nonce.
pub const NONCE_LEN: usize = 16;

/// Supplies cryptographically secure random bytes.
pub trait EntropySource
where
	Self: Send + Sync,
{
	/// Fills `buf` entirely or reports why it could not.
	fn fill(&self, buf: &mut [u8]) -> Result<(), EntropyError>;
}

/// Operating-system CSPRNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;
impl EntropySource for OsEntropy {
	fn fill(&self, buf: &mut [u8]) -> Result<(), EntropyError> {
		OsRng.try_fill_bytes(buf).map_err(EntropyError::new)
	}
}

/// Draws [`NONCE_LEN`] bytes from `source` and returns them base64-encoded.
pub fn generate_nonce(source: &dyn EntropySource) -> Result<String, EntropyError> {
	let mut bytes = [0_u8; NONCE_LEN];

	source.fill(&mut bytes)?;

	Ok(STANDARD.encode(bytes))
}
