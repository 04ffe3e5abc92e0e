//! Transport primitives for signed API calls.
//!
//! The client depends on a single trait, [`ApiHttpClient`], which sends one fully built and
//! signed [`HttpRequest`] and hands back the raw [`HttpResponse`]. Status interpretation and
//! JSON decoding stay in the client, so transports only move bytes. The default implementation
//! wraps [`reqwest`] behind the `reqwest` feature; tests and custom stacks can plug in their
//! own.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::_prelude::*;

/// Outgoing request: method, absolute URI, headers, and the exact body bytes that were signed.
pub type HttpRequest = http::Request<Vec<u8>>;
/// Response as received: status, headers, and raw body bytes.
pub type HttpResponse = http::Response<Vec<u8>>;
/// Boxed future returned by [`ApiHttpClient::execute`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP stacks able to deliver signed API requests.
///
/// Implementations must send the request exactly as given: the URI, the headers, and the body
/// are covered by (or travel next to) the signature, and any rewrite invalidates it server side.
/// They must be `Send + Sync + 'static` so one transport can back a client shared across tasks.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and resolves with whatever response the server produced, whatever its
	/// status.
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.execute(reqwest::Request::try_from(request)?).await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new = HttpResponse::new(response.bytes().await?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// crates.io
	use httpmock::prelude::*;
	// self
	use super::*;
	use crate::_preludet::test_reqwest_http_client;

	#[tokio::test]
	async fn reqwest_transport_preserves_status_headers_and_body() {
		let server = MockServer::start_async().await;
		let mock = server
			.mock_async(|when, then| {
				when.method(POST).path("/v1/echo").header("x-probe", "1").body("payload");
				then.status(418).header("x-reply", "teapot").body("short and stout");
			})
			.await;
		let request = http::Request::post(server.url("/v1/echo"))
			.header("x-probe", "1")
			.body(b"payload".to_vec())
			.expect("Request fixture should build.");
		let response = test_reqwest_http_client()
			.execute(request)
			.await
			.expect("Mock server should answer.");

		assert_eq!(response.status().as_u16(), 418);
		assert_eq!(response.headers()["x-reply"], "teapot");
		assert_eq!(response.body().as_slice(), b"short and stout");

		mock.assert_async().await;
	}
}
