//! Zendesk implementation of [`OAuthProvider`].

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ResourceOwner, ScopeList},
	error::ConfigError,
	flows::PkceCodeChallengeMethod,
	provider::{ClientCredentials, OAuthProvider, ZendeskConfig, ZendeskOptions, response},
};

const AUTHORIZATION_PATH: &str = "/oauth/authorizations/new";
const TOKEN_PATH: &str = "/oauth/tokens";
const RESOURCE_OWNER_PATH: &str = "/api/v2/users/me.json";

/// Zendesk provider adapter bound to one account subdomain.
#[derive(Clone, Debug)]
pub struct Zendesk {
	config: ZendeskConfig,
}
impl Zendesk {
	/// Wraps a validated configuration.
	pub fn new(config: ZendeskConfig) -> Self {
		Self { config }
	}

	/// Validates raw options and builds the adapter.
	///
	/// Fails with [`ConfigError::MissingOption`] when no subdomain is configured.
	pub fn from_options(options: ZendeskOptions) -> Result<Self, ConfigError> {
		options.build().map(Self::new)
	}

	/// Underlying configuration.
	pub fn config(&self) -> &ZendeskConfig {
		&self.config
	}
}
impl OAuthProvider for Zendesk {
	fn name(&self) -> &'static str {
		"zendesk"
	}

	fn credentials(&self) -> &ClientCredentials {
		self.config.credentials()
	}

	fn base_authorization_url(&self) -> Url {
		self.config.endpoint(AUTHORIZATION_PATH)
	}

	fn base_access_token_url(&self, _params: &BTreeMap<String, String>) -> Url {
		self.config.endpoint(TOKEN_PATH)
	}

	fn resource_owner_details_url(&self, _token: &AccessToken) -> Url {
		self.config.endpoint(RESOURCE_OWNER_PATH)
	}

	fn check_response(&self, status: u16, body: &[u8]) -> Result<()> {
		match response::detect_error(status, body) {
			Some(err) => Err(err.into()),
			None => Ok(()),
		}
	}

	fn create_resource_owner(
		&self,
		status: u16,
		body: &[u8],
		_token: &AccessToken,
	) -> Result<ResourceOwner> {
		Ok(ResourceOwner::from_response(body, status)?)
	}

	fn default_scopes(&self) -> ScopeList {
		ScopeList::default()
	}

	fn scope_separator(&self) -> char {
		' '
	}

	fn default_authorization_params(&self) -> BTreeMap<String, String> {
		BTreeMap::from([
			("response_type".into(), "code".into()),
			("approval_prompt".into(), "force".into()),
		])
	}

	fn authorization_headers(&self, token: &AccessToken) -> Vec<(String, String)> {
		vec![("Authorization".into(), format!("Bearer {}", token.token()))]
	}

	fn pkce_method(&self) -> Option<PkceCodeChallengeMethod> {
		self.config.pkce().then_some(PkceCodeChallengeMethod::S256)
	}
}
