//! OAuth 1.0a request signing (RFC 5849, HMAC-SHA1).
//!
//! The engine is split leaf-first: [`codec`] owns percent-encoding and ordering,
//! [`signature`] builds the base string and HMAC digest, and [`header`] renders the
//! `Authorization` value. [`RequestSigner`] ties them to a
//! [`Credentials`](crate::auth::Credentials) set and an [`EntropySource`] so every request
//! carries a fresh nonce.

pub mod codec;
pub mod entropy;
pub mod header;
pub mod params;
pub mod signature;

pub use entropy::*;
pub use header::*;
pub use params::*;
pub use signature::*;

/// Signature method advertised in `oauth_signature_method`.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// Protocol version advertised in `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";
