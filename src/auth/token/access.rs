//! Access tokens parsed from token endpoint responses.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ResponseError};

/// `expires` values after the first OAuth 2.0 draft (2012-10-01) are absolute timestamps.
const OAUTH2_INITIAL_DRAFT_TIMESTAMP: i64 = 1_349_067_600;

/// Access token issued by the token endpoint.
///
/// Zendesk usually returns only `access_token`, `token_type`, and `scope`; every other
/// field stays `None` unless the response actually carries it.
#[derive(Clone, Serialize, Deserialize)]
pub struct AccessToken {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Token type reported by the provider (`bearer`).
	pub token_type: Option<String>,
	/// Space-delimited scope string granted by the provider.
	pub scope: Option<String>,
	/// Refresh token secret, if the provider issued one.
	pub refresh_token: Option<TokenSecret>,
	/// Absolute expiry derived from `expires_in` or `expires`.
	pub expires_at: Option<OffsetDateTime>,
	/// Resource owner identifier embedded in the token response.
	pub resource_owner_id: Option<String>,
	/// Remaining response fields, kept verbatim.
	pub values: Map<String, Value>,
}
impl AccessToken {
	/// Parses a token endpoint body received with `status`.
	///
	/// `resource_owner_id_field` names the response field holding the owner id, if the
	/// provider embeds one.
	pub fn from_response(
		body: &[u8],
		status: u16,
		resource_owner_id_field: Option<&str>,
	) -> Result<Self, ResponseError> {
		Self::from_response_at(body, status, resource_owner_id_field, OffsetDateTime::now_utc())
	}

	/// Same as [`from_response`](Self::from_response) with an explicit issue instant.
	pub fn from_response_at(
		body: &[u8],
		status: u16,
		resource_owner_id_field: Option<&str>,
		issued_at: OffsetDateTime,
	) -> Result<Self, ResponseError> {
		let de = &mut serde_json::Deserializer::from_slice(body);
		let raw: RawTokenResponse = serde_path_to_error::deserialize(de)
			.map_err(|source| ResponseError::Parse { source, status })?;
		let expires_at = match (raw.expires_in, raw.expires) {
			(Some(expires_in), _) => Some(offset(issued_at, expires_in)?),
			(None, Some(expires)) if expires > OAUTH2_INITIAL_DRAFT_TIMESTAMP =>
				Some(OffsetDateTime::from_unix_timestamp(expires)
					.map_err(|_| ResponseError::ExpiryOutOfRange)?),
			(None, Some(expires)) => Some(offset(issued_at, expires)?),
			(None, None) => None,
		};
		let resource_owner_id =
			resource_owner_id_field.and_then(|field| raw.values.get(field)).and_then(render_id);

		Ok(Self {
			access_token: TokenSecret::new(raw.access_token),
			token_type: raw.token_type,
			scope: raw.scope,
			refresh_token: raw.refresh_token.map(TokenSecret::new),
			expires_at,
			resource_owner_id,
			values: raw.values,
		})
	}

	/// Returns the access token value. Callers must avoid logging this string.
	pub fn token(&self) -> &str {
		self.access_token.expose()
	}

	/// Returns `Some(true)` once `instant` reaches the expiry, `None` without an expiry.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> Option<bool> {
		self.expires_at.map(|expires_at| instant >= expires_at)
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("scope", &self.scope)
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("expires_at", &self.expires_at)
			.field("resource_owner_id", &self.resource_owner_id)
			.finish()
	}
}

#[derive(Deserialize)]
struct RawTokenResponse {
	access_token: String,
	#[serde(default)]
	token_type: Option<String>,
	#[serde(default)]
	scope: Option<String>,
	#[serde(default)]
	refresh_token: Option<String>,
	#[serde(default)]
	expires_in: Option<i64>,
	#[serde(default)]
	expires: Option<i64>,
	#[serde(flatten)]
	values: Map<String, Value>,
}

fn offset(issued_at: OffsetDateTime, seconds: i64) -> Result<OffsetDateTime, ResponseError> {
	issued_at.checked_add(Duration::seconds(seconds)).ok_or(ResponseError::ExpiryOutOfRange)
}

fn render_id(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn issued_at() -> OffsetDateTime {
		OffsetDateTime::from_unix_timestamp(1_700_000_000)
			.expect("Issue instant fixture should be valid.")
	}

	#[test]
	fn bare_token_response_leaves_optional_fields_empty() {
		let token = AccessToken::from_response(b"{\"access_token\":\"mock_access_token\"}", 200, None)
			.expect("Bare token response should parse.");

		assert_eq!(token.token(), "mock_access_token");
		assert!(token.expires_at.is_none());
		assert!(token.refresh_token.is_none());
		assert!(token.resource_owner_id.is_none());
		assert!(token.token_type.is_none());
		assert!(token.values.is_empty());
		assert_eq!(token.is_expired_at(OffsetDateTime::now_utc()), None);
	}

	#[test]
	fn zendesk_token_response_keeps_type_and_scope() {
		let token = AccessToken::from_response(
			b"{\"access_token\":\"abc\",\"token_type\":\"bearer\",\"scope\":\"read write\"}",
			200,
			None,
		)
		.expect("Zendesk token response should parse.");

		assert_eq!(token.token_type.as_deref(), Some("bearer"));
		assert_eq!(token.scope.as_deref(), Some("read write"));
	}

	#[test]
	fn expires_in_is_relative_to_issue_instant() {
		let token = AccessToken::from_response_at(
			b"{\"access_token\":\"abc\",\"refresh_token\":\"def\",\"expires_in\":3600}",
			200,
			None,
			issued_at(),
		)
		.expect("Token response with expiry should parse.");

		assert_eq!(token.expires_at, Some(issued_at() + Duration::seconds(3600)));
		assert_eq!(token.refresh_token.as_ref().map(TokenSecret::expose), Some("def"));
		assert_eq!(token.is_expired_at(issued_at()), Some(false));
		assert_eq!(token.is_expired_at(issued_at() + Duration::hours(2)), Some(true));
	}

	#[test]
	fn expires_distinguishes_timestamps_from_durations() {
		let absolute = AccessToken::from_response_at(
			b"{\"access_token\":\"abc\",\"expires\":1800000000}",
			200,
			None,
			issued_at(),
		)
		.expect("Absolute expiry should parse.");

		assert_eq!(absolute.expires_at.map(OffsetDateTime::unix_timestamp), Some(1_800_000_000));

		let relative = AccessToken::from_response_at(
			b"{\"access_token\":\"abc\",\"expires\":60}",
			200,
			None,
			issued_at(),
		)
		.expect("Relative expiry should parse.");

		assert_eq!(relative.expires_at, Some(issued_at() + Duration::seconds(60)));
	}

	#[test]
	fn resource_owner_id_reads_configured_field() {
		let token = AccessToken::from_response(
			b"{\"access_token\":\"abc\",\"user_id\":42,\"account\":\"acme\"}",
			200,
			Some("user_id"),
		)
		.expect("Token response with owner id should parse.");

		assert_eq!(token.resource_owner_id.as_deref(), Some("42"));
		assert_eq!(token.values.get("account"), Some(&Value::from("acme")));
	}

	#[test]
	fn malformed_payloads_surface_parse_errors() {
		let err = AccessToken::from_response(b"not json", 200, None)
			.expect_err("Malformed JSON must fail.");

		assert!(matches!(err, ResponseError::Parse { status: 200, .. }));

		let err = AccessToken::from_response(b"{\"token_type\":\"bearer\"}", 200, None)
			.expect_err("Missing access_token must fail.");

		assert!(matches!(err, ResponseError::Parse { .. }));
	}

	#[test]
	fn debug_redacts_secrets() {
		let token = AccessToken::from_response(b"{\"access_token\":\"secret-value\"}", 200, None)
			.expect("Token response should parse.");

		assert!(!format!("{token:?}").contains("secret-value"));
	}
}
