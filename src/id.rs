//! Strongly typed identifiers for API keys and quotes.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal, $validate:ident) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				$validate($kind, view)?;

				Ok(Self(view.to_owned()))
			}

			/// Returns the identifier as a string slice.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				$validate($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 128;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (key, quote).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (key, quote).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (key, quote).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
	/// The identifier would change the shape of the URL path it is embedded in.
	#[error("{kind} identifier is not a single URL path segment.")]
	NotPathSegment {
		/// Kind of identifier (key, quote).
		kind: &'static str,
	},
}

def_id! { KeyId, "API key identifier sent as `FX-ACCESS-KEY`.", "Key", validate_view }
def_id! {
	QuoteId,
	"Quote identifier (`fx_quote_id`) returned when a quote is requested.",
	"Quote",
	validate_segment
}

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

// Quote ids are interpolated into `quotes/{id}`.
fn validate_segment(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	validate_view(kind, view)?;

	if matches!(view, "." | "..") || view.contains(['/', '\\', '?', '#', '%']) {
		return Err(IdentifierError::NotPathSegment { kind });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	#[test]
	fn identifiers_validate() {
		assert!(KeyId::new(" key-123").is_err(), "Leading whitespace must be rejected.");
		assert!(KeyId::new("key-123 ").is_err(), "Trailing whitespace must be rejected.");

		let key = KeyId::new("key-123").expect("Key fixture should be considered valid.");

		assert_eq!(key.as_ref(), "key-123");
		assert!(QuoteId::new("").is_err());
		assert!(QuoteId::new("with space").is_err());
	}

	#[test]
	fn quote_ids_stay_inside_their_path_segment() {
		for raw in ["abc/def", "..", ".", "abc?x=1", "abc#frag", "abc%2F", "a\\b"] {
			assert_eq!(
				QuoteId::new(raw),
				Err(IdentifierError::NotPathSegment { kind: "Quote" }),
				"`{raw}` must be rejected."
			);
		}

		QuoteId::new("00c884b056f949338788dfb59e495377").expect("Hex quote ids should be valid.");
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let quote: QuoteId =
			serde_json::from_str("\"q1\"").expect("Quote id should deserialize successfully.");

		assert_eq!(quote.as_str(), "q1");
		assert!(serde_json::from_str::<QuoteId>("\"q/1\"").is_err());
		assert!(serde_json::from_str::<KeyId>("\" k1\"").is_err());
	}

	#[test]
	fn length_limits() {
		let exact = "a".repeat(IDENTIFIER_MAX_LEN);

		KeyId::new(&exact).expect("Exact length should succeed.");

		let too_long = "a".repeat(IDENTIFIER_MAX_LEN + 1);

		assert!(KeyId::new(&too_long).is_err());
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<QuoteId, u8> = HashMap::from_iter([(
			QuoteId::new("q-123").expect("Quote used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("q-123"), Some(&7));
	}
}
