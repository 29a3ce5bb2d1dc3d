//! Transport primitives for calls to Zendesk.
//!
//! The module exposes [`TokenHttpClient`] so downstream crates can plug in custom HTTP
//! clients, plus a reqwest-backed implementation behind the default `reqwest` feature.
//! The client core only ever sees [`oauth2::HttpRequest`]/[`oauth2::HttpResponse`] values from the
//! `oauth2` crate, so nothing here leaks a specific HTTP stack into the provider.

// std
#[cfg(feature = "reqwest")] use std::pin::Pin;
// crates.io
use oauth2::{AsyncHttpClient, HttpClientError};
#[cfg(feature = "reqwest")] use oauth2::{HttpRequest, HttpResponse};
#[cfg(feature = "reqwest")] use reqwest::redirect::Policy;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// Abstraction over HTTP transports capable of executing token and profile requests.
///
/// The client core asks for a short-lived [`AsyncHttpClient`] handle per call.
/// Implementations must be `Send + Sync + 'static` so they can be shared behind an
/// `Arc`, and the request futures their handles return must be `Send` so client
/// futures can hop executors.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle used for a single request.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds an [`AsyncHttpClient`] handle for the next request.
	fn handle(&self) -> Self::Handle;
}

/// Maps a transport failure into a crate [`Error`].
pub fn map_transport_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::network(*inner).into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { message }.into(),
		_ => TransportError::Other { message: "unrecognized transport failure".into() }.into(),
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Zendesk token and profile endpoints answer directly, so [`ReqwestHttpClient::new`]
/// disables redirect following. Configure any custom client passed to
/// [`ReqwestHttpClient::with_client`] the same way.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client that never follows redirects.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().redirect(Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	type Handle = ReqwestHandle;
	type TransportError = ReqwestError;

	fn handle(&self) -> Self::Handle {
		ReqwestHandle(self.0.clone())
	}
}

/// Handle returned by [`ReqwestHttpClient`] that satisfies [`TokenHttpClient`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHandle(ReqwestClient);
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client
				.execute(request.try_into().map_err(Box::new)?)
				.await
				.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::io;
	// self
	use super::*;

	#[test]
	fn transport_errors_map_into_taxonomy() {
		let err = map_transport_error::<io::Error>(HttpClientError::Io(io::Error::other("reset")));

		assert!(matches!(err, Error::Transport(TransportError::Io(_))));

		let err = map_transport_error::<io::Error>(HttpClientError::Reqwest(Box::new(
			io::Error::other("dns"),
		)));

		assert!(matches!(err, Error::Transport(TransportError::Network { .. })));

		let err = map_transport_error::<io::Error>(HttpClientError::Other("boom".into()));

		assert!(matches!(err, Error::Transport(TransportError::Other { .. })));
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn reqwest_client_builds_without_redirects() {
		assert!(ReqwestHttpClient::new().is_ok());
	}
}
