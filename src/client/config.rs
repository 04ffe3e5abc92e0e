//! Client configuration: where requests go.

// self
use crate::{_prelude::*, error::ConfigError};

/// Environment variable that overrides the base URL.
pub const ENV_BASE_URL: &str = "FALCONX_BASE_URL";

/// Endpoint configuration shared by every operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	base_url: Url,
}
impl ClientConfig {
	/// Production API root; every operation path is relative to it.
	pub const DEFAULT_BASE_URL: &'static str = "https://api.falconx.io/v1/";

	/// Validates `base_url` and normalizes it to end with `/` so relative paths append to it.
	pub fn new(mut base_url: Url) -> Result<Self, ConfigError> {
		if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
			return Err(ConfigError::InvalidBaseUrl { url: base_url.to_string() });
		}
		if !base_url.path().ends_with('/') {
			let path = format!("{}/", base_url.path());

			base_url.set_path(&path);
		}

		base_url.set_query(None);
		base_url.set_fragment(None);

		Ok(Self { base_url })
	}

	/// Parses and validates `base_url`.
	pub fn parse(base_url: &str) -> Result<Self, ConfigError> {
		Self::new(Url::parse(base_url).map_err(|source| ConfigError::UnparsableBaseUrl { source })?)
	}

	/// Reads `FALCONX_BASE_URL`, falling back to [`Self::DEFAULT_BASE_URL`].
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&'static str) -> Option<String>,
	{
		match lookup(ENV_BASE_URL) {
			Some(raw) => Self::parse(&raw),
			None => Self::parse(Self::DEFAULT_BASE_URL),
		}
	}

	/// Base URL every operation path is joined onto.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Resolves an operation path against the base URL.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		self.base_url
			.join(path)
			.map_err(|source| ConfigError::InvalidEndpoint { path: path.to_owned(), source })
	}
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self::parse(Self::DEFAULT_BASE_URL).expect("Default base URL must be valid.")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn default_points_at_production() {
		let config = ClientConfig::default();

		assert_eq!(config.base_url().as_str(), "https://api.falconx.io/v1/");
		assert_eq!(
			config.endpoint("quotes/execute").expect("Endpoint should join.").as_str(),
			"https://api.falconx.io/v1/quotes/execute"
		);
	}

	#[test]
	fn base_url_is_normalized_to_a_directory() {
		let config = ClientConfig::parse("http://127.0.0.1:8080/v1?debug=1#top")
			.expect("Local base URL should be accepted.");

		assert_eq!(config.base_url().as_str(), "http://127.0.0.1:8080/v1/");
		assert_eq!(
			config.endpoint("pairs").expect("Endpoint should join.").as_str(),
			"http://127.0.0.1:8080/v1/pairs"
		);
	}

	#[test]
	fn rejects_non_http_urls() {
		assert!(matches!(
			ClientConfig::parse("ftp://example.com/v1/"),
			Err(ConfigError::InvalidBaseUrl { .. })
		));
		assert!(matches!(
			ClientConfig::parse("mailto:desk@example.com"),
			Err(ConfigError::InvalidBaseUrl { .. })
		));
		assert!(matches!(
			ClientConfig::parse("not a url"),
			Err(ConfigError::UnparsableBaseUrl { .. })
		));
	}

	#[test]
	fn lookup_prefers_environment_override() {
		let config = ClientConfig::from_lookup(|_| Some("https://sandbox.example.com/v1/".into()))
			.expect("Override should parse.");

		assert_eq!(config.base_url().as_str(), "https://sandbox.example.com/v1/");
		assert_eq!(
			ClientConfig::from_lookup(|_| None).expect("Default should parse."),
			ClientConfig::default()
		);
	}
}
