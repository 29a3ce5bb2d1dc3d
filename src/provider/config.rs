//! Zendesk provider configuration with eager validation.

// self
use crate::{_prelude::*, error::ConfigError, provider::ClientCredentials};

const HOST_SUFFIX: &str = "zendesk.com";
const LABEL_MAX_LEN: usize = 63;

/// Unvalidated provider options, as read from code or configuration files.
///
/// Every field is optional here; [`build`](Self::build) enforces the required ones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZendeskOptions {
	/// OAuth client identifier.
	pub client_id: Option<String>,
	/// OAuth client secret.
	pub client_secret: Option<String>,
	/// Redirect URI registered with the Zendesk OAuth client.
	pub redirect_uri: Option<Url>,
	/// Zendesk account subdomain (`{subdomain}.zendesk.com`).
	pub subdomain: Option<String>,
	/// Adds an S256 PKCE challenge to authorization requests.
	pub pkce: bool,
}
impl ZendeskOptions {
	/// Sets the client identifier.
	pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(client_id.into());

		self
	}

	/// Sets the client secret.
	pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
		self.client_secret = Some(client_secret.into());

		self
	}

	/// Sets the redirect URI.
	pub fn redirect_uri(mut self, redirect_uri: Url) -> Self {
		self.redirect_uri = Some(redirect_uri);

		self
	}

	/// Sets the account subdomain.
	pub fn subdomain(mut self, subdomain: impl Into<String>) -> Self {
		self.subdomain = Some(subdomain.into());

		self
	}

	/// Toggles PKCE for authorization requests.
	pub fn pkce(mut self, enabled: bool) -> Self {
		self.pkce = enabled;

		self
	}

	/// Consumes the options and validates the resulting configuration.
	pub fn build(self) -> Result<ZendeskConfig, ConfigError> {
		let subdomain = self
			.subdomain
			.filter(|value| !value.is_empty())
			.ok_or(ConfigError::MissingOption { option: "subdomain" })?;
		let subdomain = validate_subdomain(subdomain)?;
		let base_url = Url::parse(&format!("https://{subdomain}.{HOST_SUFFIX}/"))
			.map_err(|_| ConfigError::InvalidSubdomain { subdomain: subdomain.clone() })?;

		Ok(ZendeskConfig {
			credentials: ClientCredentials {
				client_id: self.client_id,
				client_secret: self.client_secret,
				redirect_uri: self.redirect_uri,
			},
			subdomain,
			base_url,
			pkce: self.pkce,
		})
	}
}

/// Validated, immutable Zendesk configuration.
///
/// Deserializing goes through [`ZendeskOptions::build`], so a configuration file without
/// a subdomain fails at load time rather than on the first request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ZendeskOptions", into = "ZendeskOptions")]
pub struct ZendeskConfig {
	credentials: ClientCredentials,
	subdomain: String,
	base_url: Url,
	pkce: bool,
}
impl ZendeskConfig {
	/// Returns an empty options builder.
	pub fn builder() -> ZendeskOptions {
		ZendeskOptions::default()
	}

	/// Client credentials.
	pub fn credentials(&self) -> &ClientCredentials {
		&self.credentials
	}

	/// Account subdomain, lowercased.
	pub fn subdomain(&self) -> &str {
		&self.subdomain
	}

	/// `https://{subdomain}.zendesk.com/`.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Whether authorization requests carry a PKCE challenge.
	pub fn pkce(&self) -> bool {
		self.pkce
	}

	/// Account URL with `path` replacing the root path.
	pub(crate) fn endpoint(&self, path: &str) -> Url {
		let mut url = self.base_url.clone();

		url.set_path(path);

		url
	}
}
impl TryFrom<ZendeskOptions> for ZendeskConfig {
	type Error = ConfigError;

	fn try_from(value: ZendeskOptions) -> Result<Self, Self::Error> {
		value.build()
	}
}
impl From<ZendeskConfig> for ZendeskOptions {
	fn from(value: ZendeskConfig) -> Self {
		let ClientCredentials { client_id, client_secret, redirect_uri } = value.credentials;

		Self { client_id, client_secret, redirect_uri, subdomain: Some(value.subdomain), pkce: value.pkce }
	}
}

fn validate_subdomain(subdomain: String) -> Result<String, ConfigError> {
	let valid = subdomain.len() <= LABEL_MAX_LEN
		&& subdomain.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
		&& !subdomain.starts_with('-')
		&& !subdomain.ends_with('-');

	if valid {
		Ok(subdomain.to_ascii_lowercase())
	} else {
		Err(ConfigError::InvalidSubdomain { subdomain })
	}
}
