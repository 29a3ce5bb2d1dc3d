//! Provider-facing configuration (data) and the adapter seam (behavior).
//!
//! `config` exposes validated Zendesk settings ([`ZendeskConfig`]) that fail fast when the
//! subdomain is missing. [`OAuthProvider`] is the HTTP-client-agnostic hook the client core
//! uses to build endpoint URLs, classify raw responses, and map profiles, and [`Zendesk`]
//! is its Zendesk implementation.

pub mod config;
pub mod grant;
pub mod response;
pub mod zendesk;

pub use config::*;
pub use grant::*;
pub use response::*;
pub use zendesk::*;

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ResourceOwner, ScopeList},
	flows::PkceCodeChallengeMethod,
};

/// Client credentials registered with the provider.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCredentials {
	/// OAuth 2.0 client identifier (Zendesk "unique identifier").
	pub client_id: Option<String>,
	/// Client secret for confidential clients.
	pub client_secret: Option<String>,
	/// Redirect URI registered for the client.
	pub redirect_uri: Option<Url>,
}
impl Debug for ClientCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentials")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("redirect_uri", &self.redirect_uri)
			.finish()
	}
}

/// Hooks a provider supplies to the client core.
///
/// Implementors are required to be `Send + Sync` and must not perform I/O: every method
/// is a pure function of the provider's immutable configuration and its arguments. Only
/// the endpoint builders, [`check_response`](Self::check_response), and
/// [`create_resource_owner`](Self::create_resource_owner) are mandatory.
pub trait OAuthProvider: Send + Sync {
	/// Stable provider label used in spans and metrics.
	fn name(&self) -> &'static str;

	/// Client credentials used for authorization and token requests.
	fn credentials(&self) -> &ClientCredentials;

	/// Authorization endpoint without query parameters.
	fn base_authorization_url(&self) -> Url;

	/// Token endpoint for the given token request parameters.
	fn base_access_token_url(&self, params: &BTreeMap<String, String>) -> Url;

	/// Endpoint returning the authenticated resource owner's profile.
	fn resource_owner_details_url(&self, token: &AccessToken) -> Url;

	/// Fails with [`Error::IdentityProvider`] when the response represents an error.
	fn check_response(&self, status: u16, body: &[u8]) -> Result<()>;

	/// Maps a profile response received with `status` into a [`ResourceOwner`].
	fn create_resource_owner(
		&self,
		status: u16,
		body: &[u8],
		token: &AccessToken,
	) -> Result<ResourceOwner>;

	/// Scopes requested when the caller does not supply any.
	fn default_scopes(&self) -> ScopeList {
		ScopeList::default()
	}

	/// Character joining scopes in the `scope` parameter.
	fn scope_separator(&self) -> char {
		','
	}

	/// Fixed query parameters added to every authorization URL.
	fn default_authorization_params(&self) -> BTreeMap<String, String> {
		BTreeMap::from([
			("response_type".into(), "code".into()),
			("approval_prompt".into(), "auto".into()),
		])
	}

	/// Headers attached to authenticated requests.
	fn authorization_headers(&self, _token: &AccessToken) -> Vec<(String, String)> {
		Vec::new()
	}

	/// Token response field carrying the resource owner id, if any.
	fn access_token_resource_owner_id(&self) -> Option<&str> {
		None
	}

	/// PKCE challenge method to apply to authorization requests, if any.
	fn pkce_method(&self) -> Option<PkceCodeChallengeMethod> {
		None
	}
}
