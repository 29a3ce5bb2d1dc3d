//! Ordered scope lists sent with authorization and token requests.

// std
use std::slice::Iter;
// crates.io
use serde::{Deserializer, Serializer, de::Error as DeError, ser::SerializeSeq};
// self
use crate::_prelude::*;

/// Errors emitted when validating scopes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ScopeValidationError {
	/// Empty scope entries are not allowed.
	#[error("Scope entries cannot be empty.")]
	Empty,
	/// Scopes cannot contain embedded whitespace characters.
	#[error("Scope contains whitespace: {scope}.")]
	ContainsWhitespace {
		/// The offending scope string.
		scope: String,
	},
}

/// Ordered list of OAuth scopes.
///
/// Unlike a set, the list keeps the caller's order and duplicates: Zendesk receives the
/// scopes exactly as given, joined by the provider's separator.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ScopeList(Vec<String>);
impl ScopeList {
	/// Creates a validated scope list from any iterator.
	pub fn new<I, S>(scopes: I) -> Result<Self, ScopeValidationError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut list = Vec::new();

		for scope in scopes {
			let owned: String = scope.into();

			if owned.is_empty() {
				return Err(ScopeValidationError::Empty);
			}
			if owned.chars().any(char::is_whitespace) {
				return Err(ScopeValidationError::ContainsWhitespace { scope: owned });
			}

			list.push(owned);
		}

		Ok(Self(list))
	}

	/// Number of scopes.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no scopes are defined.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns true if the list contains the provided scope.
	pub fn contains(&self, scope: &str) -> bool {
		self.0.iter().any(|candidate| candidate == scope)
	}

	/// Iterator over scopes in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|s| s.as_str())
	}

	/// Joins the scopes with `separator`.
	pub fn join(&self, separator: char) -> String {
		let mut buf = String::new();

		for (idx, value) in self.0.iter().enumerate() {
			if idx > 0 {
				buf.push(separator);
			}

			buf.push_str(value);
		}

		buf
	}

	/// Returns the underlying slice of scope strings.
	pub fn as_slice(&self) -> &[String] {
		&self.0
	}
}
impl Debug for ScopeList {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ScopeList").field(&self.0).finish()
	}
}
impl Display for ScopeList {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.join(' '))
	}
}

/// Iterator over scope strings.
pub struct ScopeIter<'a> {
	inner: Iter<'a, String>,
}
impl<'a> Iterator for ScopeIter<'a> {
	type Item = &'a str;

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(|s| s.as_str())
	}
}
impl<'a> IntoIterator for &'a ScopeList {
	type IntoIter = ScopeIter<'a>;
	type Item = &'a str;

	fn into_iter(self) -> Self::IntoIter {
		ScopeIter { inner: self.0.iter() }
	}
}
impl TryFrom<Vec<String>> for ScopeList {
	type Error = ScopeValidationError;

	fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl FromStr for ScopeList {
	type Err = ScopeValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.is_empty() {
			return Ok(Self::default());
		}
		if s.chars().all(char::is_whitespace) {
			return Err(ScopeValidationError::Empty);
		}

		Self::new(s.split_whitespace())
	}
}
impl Serialize for ScopeList {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut seq = serializer.serialize_seq(Some(self.0.len()))?;

		for scope in self.0.iter() {
			seq.serialize_element(scope)?;
		}

		seq.end()
	}
}
impl<'de> Deserialize<'de> for ScopeList {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let values = <Vec<String>>::deserialize(deserializer)?;

		ScopeList::new(values).map_err(DeError::custom)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn scopes_keep_order_and_duplicates() {
		let scopes = ScopeList::new(["write", "read", "read"])
			.expect("Scope list fixture should be valid.");

		assert_eq!(scopes.len(), 3);
		assert_eq!(scopes.join(' '), "write read read");
		assert_eq!(scopes.join(','), "write,read,read");
		assert_eq!(scopes.to_string(), "write read read");
	}

	#[test]
	fn scopes_reject_whitespace_padding() {
		let err = ScopeList::new([" read "]).expect_err("Padded scopes must be rejected.");

		assert!(matches!(err, ScopeValidationError::ContainsWhitespace { .. }));
		assert!(ScopeList::new([""]).is_err());
		assert!(ScopeList::from_str("").is_ok(), "Empty string represents an empty scope list.");
		assert!(ScopeList::from_str("   ").is_err(), "Whitespace-only input must be rejected.");
	}

	#[test]
	fn joined_scopes_must_be_split_before_listing() {
		let err = ScopeList::new(["read write"]).expect_err("Entries holding two scopes must be rejected.");

		assert_eq!(err, ScopeValidationError::ContainsWhitespace { scope: "read write".into() });

		let scopes = ScopeList::from_str("read write").expect("Space-joined scopes should parse.");

		assert_eq!(scopes.as_slice(), ["read", "write"]);
	}

	#[test]
	fn iter_and_contains_work() {
		let scopes = ScopeList::from_str("users:read tickets:write")
			.expect("Scope string should parse successfully.");

		assert!(scopes.contains("users:read"));
		assert!(!scopes.contains("read"));
		assert_eq!((&scopes).into_iter().collect::<Vec<_>>(), vec!["users:read", "tickets:write"]);
	}

	#[test]
	fn serde_validates_entries() {
		let scopes: ScopeList =
			serde_json::from_str("[\"read\",\"write\"]").expect("Scope list should deserialize.");

		assert_eq!(scopes.as_slice(), ["read".to_owned(), "write".to_owned()]);
		assert!(serde_json::from_str::<ScopeList>("[\"with space\"]").is_err());
	}
}
