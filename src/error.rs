//! Crate-level error types shared by the provider adapter and the client core.

// std
use std::borrow::Cow;
// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Zendesk answered with an error status or error envelope.
	#[error(transparent)]
	IdentityProvider(#[from] IdentityProviderError),
	/// Zendesk answered successfully but the payload could not be mapped.
	#[error(transparent)]
	Response(#[from] ResponseError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The `state` returned through the redirect does not match the issued one.
	#[error("Authorization state mismatch.")]
	StateMismatch,
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required provider option was not supplied.
	#[error("Required option not passed: `{option}`.")]
	MissingOption {
		/// Option name.
		option: &'static str,
	},
	/// The subdomain cannot be used as a host label.
	#[error("Subdomain `{subdomain}` is not a valid host label.")]
	InvalidSubdomain {
		/// Rejected subdomain value.
		subdomain: String,
	},
	/// Requested scopes are invalid.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Error response returned by Zendesk.
///
/// Carries the HTTP status and the raw body untouched so callers can inspect
/// whatever envelope Zendesk produced.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Zendesk returned an error (HTTP {status}): {message}.")]
pub struct IdentityProviderError {
	/// Human-readable message extracted from the envelope or the status line.
	pub message: String,
	/// Service error code (`error`, `errorCode`, `code`), when present.
	pub code: Option<String>,
	/// HTTP status code of the response.
	pub status: u16,
	/// Raw response body, byte for byte.
	pub body: Vec<u8>,
}
impl IdentityProviderError {
	/// Response body decoded as UTF-8, replacing invalid sequences.
	pub fn body_text(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.body)
	}
}

/// Failures mapping a successful response into typed values.
#[derive(Debug, ThisError)]
pub enum ResponseError {
	/// Response body is not valid JSON or does not have the expected shape.
	#[error("Zendesk returned a malformed payload (HTTP {status}).")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Token expiry does not fit the supported time range.
	#[error("The token expiry exceeds the supported range.")]
	ExpiryOutOfRange,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling Zendesk.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling Zendesk.")]
	Io(#[from] std::io::Error),
	/// Transport reported a failure without a typed source.
	#[error("HTTP client error occurred while calling Zendesk: {message}.")]
	Other {
		/// Transport-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn missing_option_names_the_option() {
		let err = Error::from(ConfigError::MissingOption { option: "subdomain" });

		assert_eq!(err.to_string(), "Required option not passed: `subdomain`.");
	}

	#[test]
	fn identity_provider_error_keeps_status_and_body() {
		let err = IdentityProviderError {
			message: "Session expired or invalid".into(),
			code: Some("INVALID_SESSION_ID".into()),
			status: 401,
			body: "[]".into(),
		};

		assert_eq!(
			err.to_string(),
			"Zendesk returned an error (HTTP 401): Session expired or invalid."
		);
		assert_eq!(err.body_text(), "[]");
		assert!(matches!(
			Error::from(err),
			Error::IdentityProvider(IdentityProviderError { status: 401, .. })
		));
	}
}
