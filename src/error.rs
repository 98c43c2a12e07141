//! Feed-level error types shared across signing, transport, and caching layers.

// self
use crate::_prelude::*;

/// Feed-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical feed error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, non-success status).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Upstream returned a body that is not valid JSON.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// No nonce could be generated, so no request can be signed.
	#[error(transparent)]
	Entropy(#[from] EntropyError),
}
impl Error {
	/// Returns the failure category so callers can branch without matching on messages.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Config(_) => ErrorKind::Config,
			Self::Transport(_) => ErrorKind::Transport,
			Self::Decode(_) => ErrorKind::Decode,
			Self::Entropy(_) => ErrorKind::Entropy,
		}
	}

	/// Converts the error into the uniform `{error, kind}` shape handed to embedding layers.
	pub fn descriptor(&self) -> ErrorDescriptor {
		ErrorDescriptor { error: self.to_string(), kind: self.kind() }
	}
}

/// Failure categories surfaced by [`Error::kind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
	/// See [`Error::Config`].
	Config,
	/// See [`Error::Transport`].
	Transport,
	/// See [`Error::Decode`].
	Decode,
	/// See [`Error::Entropy`].
	Entropy,
}
impl ErrorKind {
	/// Returns a stable label suitable for logs or serialized payloads.
	pub const fn as_str(self) -> &'static str {
		match self {
			ErrorKind::Config => "config",
			ErrorKind::Transport => "transport",
			ErrorKind::Decode => "decode",
			ErrorKind::Entropy => "entropy",
		}
	}
}
impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Error-shaped result rendered in place of a decoded payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
	/// Human-readable failure message.
	pub error: String,
	/// Failure category.
	pub kind: ErrorKind,
}
impl From<&Error> for ErrorDescriptor {
	fn from(e: &Error) -> Self {
		e.descriptor()
	}
}

/// Configuration and validation failures raised while constructing a feed.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A credential value is missing or empty.
	#[error("Credential `{field}` is missing or empty.")]
	MissingCredential {
		/// Configuration field name.
		field: &'static str,
	},
	/// The API base URL cannot serve as a root for endpoint paths.
	#[error("API base URL `{url}` is invalid: {reason}.")]
	InvalidApiBase {
		/// Offending URL.
		url: String,
		/// Why the URL was rejected.
		reason: &'static str,
	},
	/// An endpoint URL could not be derived from the API base.
	#[error("Endpoint URL could not be built.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URLs handed to the signer must not carry a query or fragment.
	#[error("Base URL `{url}` must not carry a query or fragment.")]
	BaseUrlHasQuery {
		/// Offending URL.
		url: String,
	},
	/// Configuration document could not be read.
	#[error("Configuration file could not be read.")]
	Read(#[from] std::io::Error),
	/// Configuration document could not be parsed.
	#[error("Configuration is invalid at `{path}`.")]
	Parse {
		/// Path to the offending field.
		path: String,
		/// Structured parsing failure.
		#[source]
		source: serde_json::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<serde_path_to_error::Error<serde_json::Error>> for ConfigError {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = e.path().to_string();

		Self::Parse { path, source: e.into_inner() }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, upstream status).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API: {source}")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Upstream answered with a non-success status.
	#[error("API responded with HTTP {status}: {body_preview}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Leading slice of the response body.
		body_preview: String,
	},
}
impl TransportError {
	const BODY_PREVIEW_LEN: usize = 256;

	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Builds a [`TransportError::Status`] from a raw response body.
	pub fn status(status: u16, body: &[u8]) -> Self {
		let body = String::from_utf8_lossy(body);
		let body_preview = match body.char_indices().nth(Self::BODY_PREVIEW_LEN) {
			Some((idx, _)) => format!("{}...", &body[..idx]),
			None => body.into_owned(),
		};

		Self::Status { status, body_preview }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Response body could not be decoded as JSON.
#[derive(Debug, ThisError)]
#[error("API returned malformed JSON (HTTP {status}).")]
pub struct DecodeError {
	/// HTTP status code of the response.
	pub status: u16,
	/// Structured parsing failure.
	#[source]
	pub source: serde_json::Error,
}

/// The entropy source failed to produce nonce material.
#[derive(Debug, ThisError)]
#[error("Entropy source failed to produce a nonce.")]
pub struct EntropyError {
	/// Underlying RNG failure.
	#[source]
	pub source: BoxError,
}
impl EntropyError {
	/// Wraps an RNG-specific failure.
	pub fn new(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self { source: Box::new(src) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn kind_and_descriptor_follow_variant() {
		let err: Error = TransportError::status(503, b"over capacity").into();

		assert_eq!(err.kind(), ErrorKind::Transport);

		let descriptor = err.descriptor();

		assert_eq!(descriptor.kind, ErrorKind::Transport);
		assert!(descriptor.error.contains("503"));
		assert!(descriptor.error.contains("over capacity"));

		let json = serde_json::to_value(&descriptor).expect("Descriptor should serialize.");

		assert_eq!(json["kind"], "transport");
	}

	#[test]
	fn status_preview_truncates_long_bodies() {
		let body = "x".repeat(1_000);
		let err = TransportError::status(500, body.as_bytes());
		let TransportError::Status { body_preview, .. } = err else {
			panic!("Expected a status error.");
		};

		assert_eq!(body_preview.len(), TransportError::BODY_PREVIEW_LEN + 3);
		assert!(body_preview.ends_with("..."));
	}

	#[test]
	fn missing_credential_names_field() {
		let err: Error = ConfigError::MissingCredential { field: "consumer_key" }.into();

		assert_eq!(err.kind(), ErrorKind::Config);
		assert!(err.to_string().contains("consumer_key"));
	}
}
