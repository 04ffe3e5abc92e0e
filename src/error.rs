//! Client-level error types shared by the signer, the transport, and every API operation.

// self
use crate::{_prelude::*, auth::SigningError, id::IdentifierError};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Request signing failed; nothing was sent.
	#[error(transparent)]
	Signing(#[from] SigningError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The API answered with a status other than `200 OK`.
	#[error("API call failed with status: {status} - text: {body}")]
	Api {
		/// HTTP status code returned by the API.
		status: u16,
		/// Raw response body, decoded lossily as UTF-8.
		body: String,
	},
	/// A `200 OK` body could not be decoded into the requested type.
	#[error("API returned malformed JSON.")]
	Decode {
		/// Structured parsing failure, including the JSON path that failed.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
}
impl Error {
	/// Returns the HTTP status carried by API and decode failures.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api { status, .. } | Self::Decode { status, .. } => Some(*status),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised before a request leaves the process.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
	/// Base URL cannot anchor relative API paths.
	#[error("Base URL `{url}` must be an http(s) URL that can carry a path.")]
	InvalidBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// Base URL could not be parsed.
	#[error("Base URL is invalid.")]
	UnparsableBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// An operation path could not be joined onto the base URL.
	#[error("Endpoint path `{path}` cannot be joined onto the base URL.")]
	InvalidEndpoint {
		/// Relative path that failed.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request body could not be serialized as JSON.
	#[error("Request body could not be serialized.")]
	InvalidBody(#[source] serde_json::Error),
	/// Time bound could not be rendered as ISO-8601.
	#[error("Time bound could not be formatted.")]
	InvalidTimeBound(#[from] time::error::Format),
	/// Identifier failed validation.
	#[error(transparent)]
	InvalidIdentifier(#[from] IdentifierError),
	/// Required environment variable is missing or not valid Unicode.
	#[error("Environment variable `{name}` is not set.")]
	MissingEnv {
		/// Variable name.
		name: &'static str,
	},
}

/// Transport-level failures.
///
/// The transport's own error is kept as the [`source`](std::error::Error::source) so callers can
/// downcast it without this crate reclassifying it.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn api_error_renders_status_and_body() {
		let err = Error::Api { status: 404, body: "not found".into() };

		assert_eq!(err.to_string(), "API call failed with status: 404 - text: not found");
		assert_eq!(err.status(), Some(404));
	}

	#[test]
	fn transport_error_keeps_source() {
		let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
		let err = Error::from(TransportError::network(io));

		assert_eq!(err.status(), None);

		let source = StdError::source(&err)
			.expect("Network errors should expose the transport error.");

		assert!(source.downcast_ref::<std::io::Error>().is_some());
	}
}
