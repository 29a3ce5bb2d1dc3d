//! Authorization URL construction with anti-forgery state and optional PKCE.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};
// self
use crate::{
	_prelude::*,
	auth::ScopeList,
	flows::Client,
	http::TokenHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::OAuthProvider,
};

const STATE_LEN: usize = 32;
const PKCE_VERIFIER_LEN: usize = 64;

/// Supported PKCE challenge methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PkceCodeChallengeMethod {
	/// SHA-256 based PKCE (RFC 7636 S256).
	S256,
}
impl PkceCodeChallengeMethod {
	/// Returns the RFC 7636 identifier for the challenge method.
	pub fn as_str(self) -> &'static str {
		match self {
			PkceCodeChallengeMethod::S256 => "S256",
		}
	}
}

/// Caller overrides for a single authorization URL.
///
/// `params` may override the provider's fixed defaults (`response_type`,
/// `approval_prompt`), but never `state`, `scope`, `client_id`, or `redirect_uri`; use
/// the dedicated fields for those.
#[derive(Clone, Debug, Default)]
pub struct AuthorizationOptions {
	/// Replaces the provider's default scopes entirely.
	pub scope: Option<ScopeList>,
	/// Uses this state instead of a generated one.
	pub state: Option<String>,
	/// Overrides the configured redirect URI.
	pub redirect_uri: Option<Url>,
	/// Extra query parameters.
	pub params: BTreeMap<String, String>,
}
impl AuthorizationOptions {
	/// Sets the requested scopes.
	pub fn scope(mut self, scope: ScopeList) -> Self {
		self.scope = Some(scope);

		self
	}

	/// Sets a caller-chosen state value.
	pub fn state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}

	/// Overrides the redirect URI.
	pub fn redirect_uri(mut self, redirect_uri: Url) -> Self {
		self.redirect_uri = Some(redirect_uri);

		self
	}

	/// Adds an extra query parameter.
	pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.insert(key.into(), value.into());

		self
	}
}

/// Authorization request metadata returned by [`Client::authorization_url`].
#[derive(Clone)]
pub struct AuthorizationRequest {
	/// Fully-formed authorize URL that callers should send end-users to.
	pub url: Url,
	/// Opaque state value that must round-trip via the redirect handler.
	pub state: String,
	/// Scopes sent with the request.
	pub scope: ScopeList,
	/// Redirect URI sent with the request, if any.
	pub redirect_uri: Option<Url>,
	pkce: Option<PkcePair>,
}
impl AuthorizationRequest {
	/// PKCE code challenge derived from the secret verifier.
	pub fn code_challenge(&self) -> Option<&str> {
		self.pkce.as_ref().map(|pkce| pkce.challenge.as_str())
	}

	/// PKCE challenge method, when PKCE is enabled.
	pub fn code_challenge_method(&self) -> Option<PkceCodeChallengeMethod> {
		self.pkce.as_ref().map(|pkce| pkce.method)
	}

	/// Secret PKCE verifier to send with the code exchange.
	pub fn pkce_verifier(&self) -> Option<&str> {
		self.pkce.as_ref().map(|pkce| pkce.verifier.as_str())
	}

	/// Validates the returned `state` parameter after the authorization redirect.
	pub fn validate_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.state { Ok(()) } else { Err(Error::StateMismatch) }
	}
}
impl Debug for AuthorizationRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationRequest")
			.field("url", &self.url)
			.field("state", &self.state)
			.field("scope", &self.scope)
			.field("redirect_uri", &self.redirect_uri)
			.field("code_challenge", &self.code_challenge())
			.finish()
	}
}

#[derive(Clone)]
struct PkcePair {
	verifier: String,
	challenge: String,
	method: PkceCodeChallengeMethod,
}
impl PkcePair {
	fn generate(method: PkceCodeChallengeMethod) -> Self {
		let verifier = random_string(PKCE_VERIFIER_LEN);
		let challenge = match method {
			PkceCodeChallengeMethod::S256 => compute_s256_challenge(&verifier),
		};

		Self { verifier, challenge, method }
	}
}

impl<P, C> Client<P, C>
where
	P: ?Sized + OAuthProvider,
	C: ?Sized + TokenHttpClient,
{
	/// Builds the URL end-users are redirected to, together with its state and PKCE data.
	pub fn authorization_url(&self, options: AuthorizationOptions) -> AuthorizationRequest {
		const KIND: FlowKind = FlowKind::Authorization;

		let _span = FlowSpan::new(KIND, self.provider.name(), "authorization_url").entered();

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let request = build_authorization_request(self.provider.as_ref(), options);

		obs::record_flow_outcome(KIND, FlowOutcome::Success);

		request
	}
}

/// Builds an authorization request for `provider`.
///
/// Query parameters are merged from the provider defaults, caller `params`, the state
/// (generated unless supplied), the scope list joined by the provider separator, the
/// client id, the redirect URI, and the PKCE challenge when the provider asks for one.
pub fn build_authorization_request<P>(
	provider: &P,
	options: AuthorizationOptions,
) -> AuthorizationRequest
where
	P: ?Sized + OAuthProvider,
{
	let AuthorizationOptions { scope, state, redirect_uri, params: extra } = options;
	let credentials = provider.credentials();
	let state = state.unwrap_or_else(|| random_string(STATE_LEN));
	let scope = scope.unwrap_or_else(|| provider.default_scopes());
	let redirect_uri = redirect_uri.or_else(|| credentials.redirect_uri.clone());
	let pkce = provider.pkce_method().map(PkcePair::generate);
	let mut params = provider.default_authorization_params();

	params.extend(extra);
	params.insert("state".into(), state.clone());
	params.insert("scope".into(), scope.join(provider.scope_separator()));
	params.insert("client_id".into(), credentials.client_id.clone().unwrap_or_default());
	params.insert(
		"redirect_uri".into(),
		redirect_uri.as_ref().map(Url::to_string).unwrap_or_default(),
	);

	if let Some(pkce) = pkce.as_ref() {
		params.insert("code_challenge".into(), pkce.challenge.clone());
		params.insert("code_challenge_method".into(), pkce.method.as_str().into());
	}

	let mut url = provider.base_authorization_url();

	url.query_pairs_mut().extend_pairs(params.iter());

	AuthorizationRequest { url, state, scope, redirect_uri, pkce }
}

fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}

fn compute_s256_challenge(verifier: &str) -> String {
	let mut hasher = Sha256::new();

	hasher.update(verifier.as_bytes());

	URL_SAFE_NO_PAD.encode(hasher.finalize())
}
