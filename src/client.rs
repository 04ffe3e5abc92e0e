//! Signed API client.
//!
//! [`FxClient`] owns one [`RequestSigner`] and one [`ApiHttpClient`] for its whole lifetime.
//! Every operation follows the same path: describe the call as an [`ApiCall`], resolve it
//! against the configured base URL, let the signer attach the `FX-ACCESS-*` headers, send it,
//! and classify the response. `200 OK` bodies are decoded as JSON; any other status becomes
//! [`Error::Api`] carrying the status and the raw body text. Nothing is retried.

mod config;
mod operations;

pub use config::*;

// self
use crate::{
	_prelude::*,
	api::ApiCall,
	auth::RequestSigner,
	error::{ConfigError, TransportError},
	obs::{self, RequestOutcome, RequestSpan},
	transport::{ApiHttpClient, HttpRequest, HttpResponse},
};
#[cfg(feature = "reqwest")]
use crate::{
	auth::{Credential, HmacSigner},
	transport::ReqwestHttpClient,
};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestFxClient = FxClient<ReqwestHttpClient>;

/// RFQ API client bound to one credential.
pub struct FxClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	http_client: Arc<C>,
	signer: Arc<dyn RequestSigner>,
	config: ClientConfig,
}
impl<C> FxClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client from explicit configuration, signer, and transport.
	pub fn with_http_client(
		config: ClientConfig,
		signer: Arc<dyn RequestSigner>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self { http_client: http_client.into(), signer, config }
	}

	/// Replaces the endpoint configuration.
	pub fn with_config(mut self, config: ClientConfig) -> Self {
		self.config = config;

		self
	}

	/// Endpoint configuration in use.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Sends `call` and decodes a `200 OK` body into `T`.
	///
	/// This is the single path every operation goes through; use it directly to reach endpoints
	/// this crate does not wrap, or to decode into your own response types.
	pub async fn call<T>(&self, call: ApiCall) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let operation = call.operation;
		let span = RequestSpan::new(operation, &call.method, &call.path);

		obs::record_request_outcome(operation, RequestOutcome::Attempt);

		let result = span
			.instrument(async {
				let request = self.signed_request(&call)?;
				let response =
					self.http_client.execute(request).await.map_err(TransportError::network)?;

				span.record_status(response.status().as_u16());

				decode_response(response)
			})
			.await;

		match &result {
			Ok(_) => obs::record_request_outcome(operation, RequestOutcome::Success),
			Err(_) => obs::record_request_outcome(operation, RequestOutcome::Failure),
		}

		result
	}

	/// Builds the outgoing request for `call` and signs it, without sending it.
	pub fn signed_request(&self, call: &ApiCall) -> Result<HttpRequest> {
		let mut url = self.config.endpoint(&call.path)?;

		if !call.query.is_empty() {
			url.query_pairs_mut()
				.extend_pairs(call.query.iter().map(|(name, value)| (*name, value.as_str())));
		}

		let request = http::Request::builder()
			.method(call.method.clone())
			.uri(url.as_str())
			.body(call.body.clone())
			.map_err(ConfigError::from)?;

		Ok(self.signer.authorize(request)?)
	}
}
#[cfg(feature = "reqwest")]
impl FxClient<ReqwestHttpClient> {
	/// Creates a client for the production API that signs with `credential` and the system
	/// clock over a default reqwest transport.
	pub fn new(credential: Credential) -> Self {
		Self::with_http_client(
			ClientConfig::default(),
			Arc::new(HmacSigner::new(credential)),
			ReqwestHttpClient::default(),
		)
	}

	/// Creates a client from `FALCONX_API_KEY`, `FALCONX_API_SECRET`,
	/// `FALCONX_API_PASSPHRASE`, and the optional `FALCONX_BASE_URL`.
	pub fn from_env() -> Result<Self> {
		let config = ClientConfig::from_env()?;
		let credential = Credential::from_env()?;

		Ok(Self::new(credential).with_config(config))
	}
}
impl<C> Clone for FxClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			signer: Arc::clone(&self.signer),
			config: self.config.clone(),
		}
	}
}
impl<C> Debug for FxClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("FxClient").field("base_url", &self.config.base_url().as_str()).finish()
	}
}

/// Maps a raw response onto the client's success/failure contract.
fn decode_response<T>(response: HttpResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	let status = response.status().as_u16();
	let body = response.into_body();

	if status != 200 {
		return Err(Error::Api { status, body: String::from_utf8_lossy(&body).into_owned() });
	}

	let mut deserializer = serde_json::Deserializer::from_slice(&body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::Decode { source, status })
}
