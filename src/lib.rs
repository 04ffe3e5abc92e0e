//! Signed REST client for the FalconX RFQ API: HMAC request signing, quotes, execution, and
//! balances over a pluggable transport.
//!
//! The crate is split around a single seam. [`auth`] turns a [`Credential`](auth::Credential)
//! and one outgoing request into the `FX-ACCESS-*` header set, while [`client`] shapes the six
//! REST operations, hands each request to the signer, and ships it through a
//! [`transport::ApiHttpClient`].

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod id;
pub mod obs;
pub mod transport;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{Credential, FixedClock, HmacSigner, RequestSigner, Timestamp},
		client::{ClientConfig, ReqwestFxClient},
		transport::ReqwestHttpClient,
	};

	/// Key identifier used by the shared test credential.
	pub const TEST_KEY: &str = "k1";
	/// Plain-text secret behind [`TEST_SECRET_B64`].
	pub const TEST_SECRET: &[u8] = b"s3cr3t";
	/// Base64 form of [`TEST_SECRET`], as issued by the API.
	pub const TEST_SECRET_B64: &str = "czNjcjN0";
	/// Passphrase used by the shared test credential.
	pub const TEST_PASSPHRASE: &str = "p1";
	/// Frozen timestamp used for reproducible signatures.
	pub const TEST_TIMESTAMP: &str = "1700000000.0";

	/// Builds the credential shared by integration tests.
	pub fn test_credential() -> Credential {
		Credential::new(TEST_KEY, TEST_SECRET_B64, TEST_PASSPHRASE)
			.expect("Test credential should be valid.")
	}

	/// Builds a plain reqwest transport for tests talking to `httpmock`.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a reqwest-backed client pointed at `base_url` whose signer always stamps
	/// [`TEST_TIMESTAMP`].
	pub fn build_reqwest_test_client(base_url: &str) -> ReqwestFxClient {
		let config = ClientConfig::new(
			Url::parse(base_url).expect("Mock server base URL should parse successfully."),
		)
		.expect("Mock server base URL should be accepted.");
		let signer: Arc<dyn RequestSigner> = Arc::new(HmacSigner::with_clock(
			test_credential(),
			Arc::new(FixedClock::new(Timestamp::new(TEST_TIMESTAMP))),
		));

		ReqwestFxClient::with_http_client(config, signer, test_reqwest_http_client())
	}
}

mod _prelude {
	pub use std::{
		borrow::Cow,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use http;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
