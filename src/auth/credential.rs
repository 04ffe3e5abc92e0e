//! API credential triple with redacting wrappers for the secret halves.

// self
use crate::{_prelude::*, error::ConfigError, id::KeyId};

/// Environment variable holding the API key identifier.
pub const ENV_API_KEY: &str = "FALCONX_API_KEY";
/// Environment variable holding the base64 shared secret.
pub const ENV_API_SECRET: &str = "FALCONX_API_SECRET";
/// Environment variable holding the passphrase.
pub const ENV_API_PASSPHRASE: &str = "FALCONX_API_PASSPHRASE";

macro_rules! def_secret {
	($name:ident, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq)]
		pub struct $name(String);
		impl $name {
			/// Wraps a new secret string.
			pub fn new(value: impl Into<String>) -> Self {
				Self(value.into())
			}

			/// Returns the inner value. Callers must avoid logging this string.
			pub fn expose(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_tuple(stringify!($name)).field(&"<redacted>").finish()
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str("<redacted>")
			}
		}
	};
}

def_secret! { ApiSecret, "Base64-encoded shared secret used as the HMAC key once decoded." }
def_secret! { Passphrase, "Static passphrase sent as `FX-ACCESS-PASSPHRASE`." }

/// Key id, shared secret, and passphrase issued together by the API.
///
/// The secret is kept in its base64 text form; it is decoded on every signature so a malformed
/// secret surfaces as a signing error on first use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
	key: KeyId,
	secret: ApiSecret,
	passphrase: Passphrase,
}
impl Credential {
	/// Builds a credential, validating the key identifier.
	pub fn new(
		key: impl AsRef<str>,
		secret: impl Into<String>,
		passphrase: impl Into<String>,
	) -> Result<Self, ConfigError> {
		Ok(Self::from_parts(KeyId::new(key)?, ApiSecret::new(secret), Passphrase::new(passphrase)))
	}

	/// Assembles a credential from already validated parts.
	pub fn from_parts(key: KeyId, secret: ApiSecret, passphrase: Passphrase) -> Self {
		Self { key, secret, passphrase }
	}

	/// Loads the credential from `FALCONX_API_KEY`, `FALCONX_API_SECRET`, and
	/// `FALCONX_API_PASSPHRASE`.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&'static str) -> Option<String>,
	{
		let var = |name| lookup(name).ok_or(ConfigError::MissingEnv { name });

		Self::new(var(ENV_API_KEY)?, var(ENV_API_SECRET)?, var(ENV_API_PASSPHRASE)?)
	}

	/// API key identifier.
	pub fn key(&self) -> &KeyId {
		&self.key
	}

	/// Base64 shared secret.
	pub fn secret(&self) -> &ApiSecret {
		&self.secret
	}

	/// Passphrase sent with every request.
	pub fn passphrase(&self) -> &Passphrase {
		&self.passphrase
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let credential = Credential::new("k1", "czNjcjN0", "p1")
			.expect("Credential fixture should be valid.");
		let rendered = format!("{credential:?}");

		assert!(rendered.contains("Key(k1)"));
		assert!(!rendered.contains("czNjcjN0"), "Secret leaked into Debug output: {rendered}.");
		assert!(!rendered.contains("p1\""), "Passphrase leaked into Debug output: {rendered}.");
		assert_eq!(format!("{}", credential.secret()), "<redacted>");
		assert_eq!(format!("{:?}", credential.passphrase()), "Passphrase(\"<redacted>\")");
	}

	#[test]
	fn lookup_reports_first_missing_variable() {
		let env = HashMap::from([(ENV_API_KEY, "k1"), (ENV_API_PASSPHRASE, "p1")]);
		let err = Credential::from_lookup(|name| env.get(name).map(|v| v.to_string()))
			.expect_err("Missing secret should be reported.");

		assert!(matches!(err, ConfigError::MissingEnv { name: ENV_API_SECRET }));
	}

	#[test]
	fn lookup_builds_credential() {
		let env = HashMap::from([
			(ENV_API_KEY, "k1"),
			(ENV_API_SECRET, "czNjcjN0"),
			(ENV_API_PASSPHRASE, "p1"),
		]);
		let credential = Credential::from_lookup(|name| env.get(name).map(|v| v.to_string()))
			.expect("Complete environment should build a credential.");

		assert_eq!(credential.key().as_str(), "k1");
		assert_eq!(credential.secret().expose(), "czNjcjN0");
		assert_eq!(credential.passphrase().expose(), "p1");
	}

	#[test]
	fn key_identifier_is_validated() {
		let err = Credential::new("bad key", "czNjcjN0", "p1")
			.expect_err("Whitespace in key ids should be rejected.");

		assert!(matches!(err, ConfigError::InvalidIdentifier(_)));
	}
}
