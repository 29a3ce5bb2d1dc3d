//! Resource owner profiles fetched after a token exchange.

// self
use crate::{_prelude::*, error::ResponseError};

/// Authenticated Zendesk user.
///
/// The raw profile object is kept verbatim; [`to_map`](Self::to_map) returns exactly what
/// the profile endpoint sent. Accessors look inside the `user` envelope that
/// `/api/v2/users/me.json` wraps profiles in and fall back to top-level fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceOwner(Map<String, Value>);
impl ResourceOwner {
	/// Parses a profile body received with `status`.
	pub fn from_response(body: &[u8], status: u16) -> Result<Self, ResponseError> {
		let de = &mut serde_json::Deserializer::from_slice(body);

		serde_path_to_error::deserialize(de)
			.map(Self)
			.map_err(|source| ResponseError::Parse { source, status })
	}

	/// Zendesk user id, sent either as a JSON number or as a numeric string.
	///
	/// Use [`get`](Self::get) or [`to_map`](Self::to_map) for ids of any other shape.
	pub fn id(&self) -> Option<u64> {
		match self.field("id")? {
			Value::Number(id) => id.as_u64(),
			Value::String(id) => id.parse().ok(),
			_ => None,
		}
	}

	/// Display name.
	pub fn name(&self) -> Option<&str> {
		self.field("name").and_then(Value::as_str)
	}

	/// Primary email address.
	pub fn email(&self) -> Option<&str> {
		self.field("email").and_then(Value::as_str)
	}

	/// Looks up a top-level field of the raw response.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	/// Raw response mapping.
	pub fn to_map(&self) -> &Map<String, Value> {
		&self.0
	}

	/// Consumes the owner, returning the raw response mapping.
	pub fn into_map(self) -> Map<String, Value> {
		self.0
	}

	fn field(&self, key: &str) -> Option<&Value> {
		match self.0.get("user") {
			Some(Value::Object(user)) => user.get(key),
			_ => self.0.get(key),
		}
	}
}
impl From<Map<String, Value>> for ResourceOwner {
	fn from(value: Map<String, Value>) -> Self {
		Self(value)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn flat_profile_exposes_accessors_and_raw_form() {
		let body = br#"{"id":1,"name":"A","email":"a@x.com","role":"admin"}"#;
		let owner = ResourceOwner::from_response(body, 200).expect("Profile should parse.");
		let expected: Map<String, Value> =
			serde_json::from_slice(body).expect("Fixture should be valid JSON.");

		assert_eq!(owner.to_map(), &expected);
		assert_eq!(owner.id(), Some(1));
		assert_eq!(owner.name(), Some("A"));
		assert_eq!(owner.email(), Some("a@x.com"));
		assert_eq!(owner.get("role"), Some(&Value::from("admin")));
	}

	#[test]
	fn user_envelope_is_unwrapped_for_accessors_only() {
		let body = br#"{"user":{"id":35436,"name":"Johnny Agent","email":"johnny@example.com"}}"#;
		let owner = ResourceOwner::from_response(body, 200).expect("Profile should parse.");

		assert_eq!(owner.id(), Some(35436));
		assert_eq!(owner.name(), Some("Johnny Agent"));
		assert_eq!(owner.email(), Some("johnny@example.com"));
		assert!(owner.get("id").is_none());
		assert_eq!(owner.clone().into_map().len(), 1);
	}

	#[test]
	fn string_ids_are_parsed() {
		let owner = ResourceOwner::from_response(br#"{"user":{"id":"1"}}"#, 200)
			.expect("Profile should parse.");

		assert_eq!(owner.id(), Some(1));

		let owner = ResourceOwner::from_response(br#"{"id":"agent-1"}"#, 200)
			.expect("Profile should parse.");

		assert!(owner.id().is_none());
		assert_eq!(owner.get("id"), Some(&Value::from("agent-1")));
	}

	#[test]
	fn missing_fields_are_none() {
		let owner = ResourceOwner::from_response(b"{}", 200).expect("Empty profile should parse.");

		assert!(owner.id().is_none());
		assert!(owner.name().is_none());
		assert!(owner.email().is_none());
	}

	#[test]
	fn invalid_payloads_propagate_parse_errors() {
		let err = ResourceOwner::from_response(b"<html>", 200).expect_err("HTML must fail.");

		assert!(matches!(err, ResponseError::Parse { status: 200, .. }));
		assert!(ResourceOwner::from_response(b"[1,2]", 200).is_err());
	}
}
