//! OAuth 2.0 grant type identifiers sent as `grant_type`.

// self
use crate::_prelude::*;

/// OAuth 2.0 grant types accepted by the Zendesk token endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Authorization Code grant.
	AuthorizationCode,
	/// Refresh Token grant.
	RefreshToken,
	/// Client Credentials grant for app-only tokens.
	ClientCredentials,
}
impl GrantType {
	/// Returns the RFC 6749 identifier for the grant type.
	pub fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::RefreshToken => "refresh_token",
			GrantType::ClientCredentials => "client_credentials",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn grant_labels_follow_rfc_6749() {
		assert_eq!(GrantType::AuthorizationCode.to_string(), "authorization_code");
		assert_eq!(GrantType::RefreshToken.as_str(), "refresh_token");
		assert_eq!(
			serde_json::to_string(&GrantType::ClientCredentials)
				.expect("Grant type should serialize."),
			"\"client_credentials\""
		);
	}
}
