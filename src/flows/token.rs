//! Token endpoint exchanges (authorization code, refresh token, client credentials).

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ScopeList, TokenSecret},
	flows::{AuthorizationRequest, Client, common},
	http::TokenHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::{GrantType, OAuthProvider},
};

/// Grant presented to the token endpoint.
#[derive(Clone, Debug)]
pub enum Grant {
	/// Exchange of an authorization code received on the redirect URI.
	AuthorizationCode {
		/// Code from the `code` query parameter.
		code: String,
		/// PKCE verifier from the originating [`AuthorizationRequest`].
		pkce_verifier: Option<TokenSecret>,
		/// Redirect URI sent with the authorization request; falls back to the configured one.
		redirect_uri: Option<Url>,
	},
	/// Refresh of a previously issued token.
	RefreshToken {
		/// Refresh token returned alongside an earlier access token.
		refresh_token: TokenSecret,
	},
	/// Client credentials grant.
	ClientCredentials,
}
impl Grant {
	/// Authorization code grant without PKCE or redirect override.
	pub fn authorization_code(code: impl Into<String>) -> Self {
		Grant::AuthorizationCode { code: code.into(), pkce_verifier: None, redirect_uri: None }
	}

	/// Refresh token grant.
	pub fn refresh_token(refresh_token: impl Into<TokenSecret>) -> Self {
		Grant::RefreshToken { refresh_token: refresh_token.into() }
	}

	/// OAuth 2.0 grant type for this grant.
	pub fn grant_type(&self) -> GrantType {
		match self {
			Grant::AuthorizationCode { .. } => GrantType::AuthorizationCode,
			Grant::RefreshToken { .. } => GrantType::RefreshToken,
			Grant::ClientCredentials => GrantType::ClientCredentials,
		}
	}
}

/// Grant plus optional scope and extra form fields.
#[derive(Clone, Debug)]
pub struct TokenRequest {
	/// Grant being exchanged.
	pub grant: Grant,
	/// Scopes to request, when the grant allows narrowing them.
	pub scope: Option<ScopeList>,
	/// Extra form fields. Fields already set by the grant or credentials win.
	pub params: BTreeMap<String, String>,
}
impl TokenRequest {
	/// Creates a request for `grant`.
	pub fn new(grant: Grant) -> Self {
		Self { grant, scope: None, params: BTreeMap::new() }
	}

	/// Requests `scope` with the grant.
	pub fn with_scope(mut self, scope: ScopeList) -> Self {
		self.scope = Some(scope);

		self
	}

	/// Adds an extra form field.
	pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.insert(key.into(), value.into());

		self
	}
}
impl From<Grant> for TokenRequest {
	fn from(grant: Grant) -> Self {
		Self::new(grant)
	}
}

impl<P, C> Client<P, C>
where
	P: ?Sized + OAuthProvider,
	C: ?Sized + TokenHttpClient,
{
	/// Exchanges a grant at the token endpoint.
	///
	/// The provider validates the response before it is parsed, so error envelopes
	/// surface as [`Error::IdentityProvider`] even when the status is 2xx.
	pub async fn access_token(&self, request: impl Into<TokenRequest>) -> Result<AccessToken> {
		const KIND: FlowKind = FlowKind::AccessToken;

		let request = request.into();
		let span = FlowSpan::new(KIND, self.provider.name(), "access_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let form = self.token_form(request);
				let url = self.provider.base_access_token_url(&form);
				let http_request = common::form_post(&url, &form)?;
				let response = common::dispatch(self.http_client.as_ref(), http_request).await?;

				self.provider.check_response(response.status, &response.body)?;

				AccessToken::from_response(
					&response.body,
					response.status,
					self.provider.access_token_resource_owner_id(),
				)
				.map_err(Error::from)
			})
			.await;

		obs::record_flow_outcome(KIND, FlowOutcome::of(&result));

		result
	}

	/// Exchanges the `code` returned for `authorization`, forwarding its PKCE verifier and
	/// redirect URI.
	///
	/// Validate the returned state with [`AuthorizationRequest::validate_state`] first.
	pub async fn exchange_code(
		&self,
		authorization: &AuthorizationRequest,
		code: impl Into<String>,
	) -> Result<AccessToken> {
		let grant = Grant::AuthorizationCode {
			code: code.into(),
			pkce_verifier: authorization.pkce_verifier().map(TokenSecret::new),
			redirect_uri: authorization.redirect_uri.clone(),
		};

		self.access_token(grant).await
	}

	/// Exchanges a refresh token for a new access token.
	pub async fn refresh(&self, refresh_token: &TokenSecret) -> Result<AccessToken> {
		self.access_token(Grant::refresh_token(refresh_token.clone())).await
	}

	fn token_form(&self, request: TokenRequest) -> BTreeMap<String, String> {
		let TokenRequest { grant, scope, params: extra } = request;
		let credentials = self.provider.credentials();
		let mut form = BTreeMap::new();

		form.insert("grant_type".to_owned(), grant.grant_type().as_str().to_owned());

		if let Some(client_id) = credentials.client_id.as_ref() {
			form.insert("client_id".into(), client_id.clone());
		}
		if let Some(client_secret) = credentials.client_secret.as_ref() {
			form.insert("client_secret".into(), client_secret.clone());
		}

		match grant {
			Grant::AuthorizationCode { code, pkce_verifier, redirect_uri } => {
				form.insert("code".into(), code);

				if let Some(redirect_uri) = redirect_uri.or_else(|| credentials.redirect_uri.clone())
				{
					form.insert("redirect_uri".into(), redirect_uri.to_string());
				}
				if let Some(verifier) = pkce_verifier {
					form.insert("code_verifier".into(), verifier.expose().to_owned());
				}
			},
			Grant::RefreshToken { refresh_token } => {
				form.insert("refresh_token".into(), refresh_token.expose().to_owned());
			},
			Grant::ClientCredentials => {},
		}

		if let Some(scope) = scope.filter(|scope| !scope.is_empty()) {
			form.insert("scope".into(), scope.join(self.provider.scope_separator()));
		}

		for (key, value) in extra {
			form.entry(key).or_insert(value);
		}

		form
	}
}
