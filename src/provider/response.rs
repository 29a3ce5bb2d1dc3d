//! Error detection over raw Zendesk responses.
//!
//! Zendesk reports failures in several shapes depending on the endpoint:
//!
//! - OAuth endpoints: `{"error": "invalid_grant", "error_description": "..."}`
//! - Core API: `{"error": "RecordNotFound", "description": "..."}` or
//!   `{"error": {"title": "...", "message": "..."}}`
//! - Newer APIs: `{"errors": [{"code": "...", "title": "...", "detail": "..."}]}`
//! - Session failures: `[{"errorCode": "INVALID_SESSION_ID", "message": "..."}]`
//!
//! A non-2xx status is always an error, whatever the body looks like.

// crates.io
use oauth2::http::StatusCode;
// self
use crate::{_prelude::*, error::IdentityProviderError};

const UNKNOWN_ERROR: &str = "Unknown error";

/// Returns the error represented by the response, or `None` for a clean response.
///
/// Bodies that are not JSON never count as error envelopes on their own.
pub fn detect_error(status: u16, body: &[u8]) -> Option<IdentityProviderError> {
	let decoded = serde_json::from_slice::<Value>(body).ok();
	let envelope = decoded.as_ref().filter(|value| is_error_envelope(value));
	let success = (200..300).contains(&status);

	if success && envelope.is_none() {
		return None;
	}

	let message = envelope
		.and_then(extract_message)
		.or_else(|| StatusCode::from_u16(status).ok()?.canonical_reason().map(str::to_owned))
		.unwrap_or_else(|| UNKNOWN_ERROR.into());

	Some(IdentityProviderError {
		message,
		code: envelope.and_then(extract_code),
		status,
		body: body.to_vec(),
	})
}

fn is_error_envelope(value: &Value) -> bool {
	match value {
		Value::Object(map) =>
			map.get("error").is_some_and(|error| !error.is_null())
				|| map.contains_key("errorCode")
				|| map.get("errors").and_then(Value::as_array).is_some_and(|errors| !errors.is_empty()),
		Value::Array(items) => items.iter().any(|item| {
			item.as_object().is_some_and(|obj| {
				obj.contains_key("errorCode") || obj.contains_key("error") || obj.contains_key("message")
			})
		}),
		_ => false,
	}
}

fn extract_message(value: &Value) -> Option<String> {
	match value {
		Value::Object(map) => ["error_description", "description", "message"]
			.into_iter()
			.find_map(|key| non_empty_str(map.get(key)))
			.or_else(|| {
				let error = map.get("error")?.as_object()?;

				non_empty_str(error.get("message")).or_else(|| non_empty_str(error.get("title")))
			})
			.or_else(|| non_empty_str(map.get("error")))
			.or_else(|| map.get("errors").and_then(first_item_message))
			.or_else(|| extract_code(value)),
		Value::Array(_) => first_item_message(value).or_else(|| extract_code(value)),
		_ => None,
	}
}

fn first_item_message(items: &Value) -> Option<String> {
	items.as_array()?.iter().filter_map(Value::as_object).find_map(|obj| {
		["message", "detail", "title"].into_iter().find_map(|key| non_empty_str(obj.get(key)))
	})
}

fn extract_code(value: &Value) -> Option<String> {
	match value {
		Value::Object(map) => ["errorCode", "error", "code"]
			.into_iter()
			.find_map(|key| non_empty_str(map.get(key)))
			.or_else(|| map.get("errors").and_then(extract_code)),
		Value::Array(items) =>
			items.iter().filter(|item| item.is_object()).find_map(extract_code),
		_ => None,
	}
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
	value.and_then(Value::as_str).filter(|s| !s.is_empty()).map(str::to_owned)
}
