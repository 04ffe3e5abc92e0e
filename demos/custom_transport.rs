//! Demonstrates plugging a non-reqwest transport into the client.
//!
//! 1. Implement [`ApiHttpClient`] for any type that can send an [`HttpRequest`]. This one answers
//!    in process and checks every signature the way the API would.
//! 2. Wrap the credential in an [`HmacSigner`] and hand both to [`FxClient::with_http_client`].
//! 3. Transport failures arrive as [`TransportError::Network`] with the underlying error kept as
//!    the source; non-200 replies arrive as [`Error::Api`].

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::Arc,
};
// crates.io
use color_eyre::Result;
// self
use falconx_client::{
	api::{QuoteRequest, Side},
	auth::{Credential, FX_ACCESS_SIGN, FX_ACCESS_TIMESTAMP, HmacSigner, Timestamp, verify},
	client::{ClientConfig, FxClient},
	error::{Error, TransportError},
	http::{Response, StatusCode},
	id::QuoteId,
	transport::{ApiHttpClient, HttpRequest, HttpResponse, TransportFuture},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let credential = Credential::new("desk-1", "ZGVtby1zZWNyZXQ=", "demo-passphrase")?;
	let signer = Arc::new(HmacSigner::new(credential.clone()));
	let client: FxClient<InProcessDesk> = FxClient::with_http_client(
		ClientConfig::default(),
		signer.clone(),
		InProcessDesk { credential: credential.clone(), offline: false },
	);
	let quote = client.get_quote(&QuoteRequest::new("ETH", "USD", 2, Side::Sell)).await?;

	println!("In-process desk quoted: {quote}.");

	match client.get_quote_status(&QuoteId::new("missing-quote")?).await {
		Err(Error::Api { status, body }) => println!("Desk rejected the lookup: {status} {body}."),
		other => println!("Unexpected lookup outcome: {other:?}."),
	}

	let offline: FxClient<InProcessDesk> = FxClient::with_http_client(
		ClientConfig::default(),
		signer,
		InProcessDesk { credential, offline: true },
	);

	match offline.get_balances().await {
		Err(Error::Transport(TransportError::Network { source })) =>
			println!("Transport failure surfaced with its source: {source}."),
		other => println!("Unexpected offline outcome: {other:?}."),
	}

	Ok(())
}

#[derive(Debug)]
struct DeskOffline;
impl Display for DeskOffline {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "In-process desk is offline")
	}
}
impl StdError for DeskOffline {}

struct InProcessDesk {
	credential: Credential,
	offline: bool,
}
impl InProcessDesk {
	fn reply(&self, request: &HttpRequest) -> (StatusCode, String) {
		let headers = request.headers();
		let signature = headers.get(FX_ACCESS_SIGN).and_then(|v| v.to_str().ok());
		let timestamp = headers.get(FX_ACCESS_TIMESTAMP).and_then(|v| v.to_str().ok());
		let target = request.uri().path_and_query().map_or("/", |p| p.as_str());
		let authentic = match (signature, timestamp) {
			(Some(signature), Some(timestamp)) => verify(
				&self.credential,
				request.method(),
				target,
				request.body(),
				&Timestamp::new(timestamp),
				signature,
			),
			_ => false,
		};

		if !authentic {
			return (StatusCode::UNAUTHORIZED, "invalid signature".into());
		}

		match request.uri().path() {
			"/v1/quotes" => (
				StatusCode::OK,
				r#"{"fx_quote_id":"q-eth-1","buy_price":"2010.5","sell_price":"2008.1"}"#.into(),
			),
			_ => (StatusCode::NOT_FOUND, "not found".into()),
		}
	}
}
impl ApiHttpClient for InProcessDesk {
	type TransportError = DeskOffline;

	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError> {
		Box::pin(async move {
			if self.offline {
				return Err(DeskOffline);
			}

			let (status, body) = self.reply(&request);
			let response: HttpResponse = Response::builder()
				.status(status)
				.body(body.into_bytes())
				.map_err(|_| DeskOffline)?;

			Ok(response)
		})
	}
}
