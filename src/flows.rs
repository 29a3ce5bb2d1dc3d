//! Client core driving the Authorization Code flow against one provider.
//!
//! [`Client`] owns the provider adapter and the HTTP transport. It builds authorization
//! URLs (state + optional PKCE), exchanges grants at the token endpoint, and fetches the
//! resource owner profile. It keeps no mutable state: nothing is cached, stored, or
//! retried, so a single client can be shared across tasks.

pub mod authorization;
mod common;
pub mod owner;
pub mod token;

pub use authorization::*;
pub use token::*;

// self
use crate::{_prelude::*, http::TokenHttpClient, provider::OAuthProvider};
#[cfg(feature = "reqwest")]
use crate::{error::ConfigError, http::ReqwestHttpClient, provider::Zendesk};

#[cfg(feature = "reqwest")]
/// Client specialized for Zendesk over the crate's default reqwest transport.
pub type ReqwestZendeskClient = Client<Zendesk, ReqwestHttpClient>;

/// Coordinates OAuth 2.0 calls for a single provider.
pub struct Client<P, C>
where
	P: ?Sized + OAuthProvider,
	C: ?Sized + TokenHttpClient,
{
	/// Provider adapter supplying endpoints, defaults, and response mapping.
	pub provider: Arc<P>,
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
}
impl<P, C> Client<P, C>
where
	P: ?Sized + OAuthProvider,
	C: ?Sized + TokenHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(provider: impl Into<Arc<P>>, http_client: impl Into<Arc<C>>) -> Self {
		Self { provider: provider.into(), http_client: http_client.into() }
	}
}
#[cfg(feature = "reqwest")]
impl<P> Client<P, ReqwestHttpClient>
where
	P: ?Sized + OAuthProvider,
{
	/// Creates a client backed by a reqwest transport that does not follow redirects.
	pub fn new(provider: impl Into<Arc<P>>) -> Result<Self, ConfigError> {
		Ok(Self::with_http_client(provider, ReqwestHttpClient::new()?))
	}
}
impl<P, C> Clone for Client<P, C>
where
	P: ?Sized + OAuthProvider,
	C: ?Sized + TokenHttpClient,
{
	fn clone(&self) -> Self {
		Self { provider: self.provider.clone(), http_client: self.http_client.clone() }
	}
}
impl<P, C> Debug for Client<P, C>
where
	P: ?Sized + OAuthProvider,
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("provider", &self.provider.name())
			.field("credentials", self.provider.credentials())
			.finish()
	}
}
