//! Walks through the RFQ round trip (list pairs, request a quote, execute it, check its status)
//! against a local mock of the API using the reqwest transport.
//!
//! The mock server speaks HTTPS with a self-signed certificate, so the demo hands the client a
//! reqwest transport that accepts it. Set `FALCONX_API_KEY`, `FALCONX_API_SECRET`,
//! `FALCONX_API_PASSPHRASE`, and `FALCONX_BASE_URL` and swap the client construction for
//! [`ReqwestFxClient::from_env`] to run it for real.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use falconx_client::{
	api::{QuoteRequest, QuoteSide, Side},
	auth::{Credential, HmacSigner},
	client::{ClientConfig, ReqwestFxClient},
	id::QuoteId,
	reqwest::Client,
	transport::ReqwestHttpClient,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let pairs_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/pairs").header_exists("fx-access-sign");
			then.status(200).json_body(json!([{ "base_token": "BTC", "quote_token": "USD" }]));
		})
		.await;
	let quote_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/quotes").header_exists("fx-access-sign");
			then.status(200).json_body(json!({
				"fx_quote_id": "00c884b056f949338788dfb59e495377",
				"buy_price": "35120.25",
				"sell_price": "35080.75",
			}));
		})
		.await;
	let execute_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/quotes/execute").header_exists("fx-access-sign");
			then.status(200).json_body(json!({
				"fx_quote_id": "00c884b056f949338788dfb59e495377",
				"side_executed": "buy",
				"status": "success",
			}));
		})
		.await;
	let status_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/quotes/00c884b056f949338788dfb59e495377");
			then.status(404).body("quote not found");
		})
		.await;
	let credential = Credential::new("demo-key", "ZGVtby1zZWNyZXQ=", "demo-passphrase")?;
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let client = ReqwestFxClient::with_http_client(
		ClientConfig::parse(&server.url("/v1/"))?,
		Arc::new(HmacSigner::new(credential)),
		http_client,
	);
	let pairs = client.get_trading_pairs().await?;

	println!("Tradable pairs: {pairs}.");

	let request = QuoteRequest::new("BTC", "USD", "0.1", QuoteSide::TwoWay);
	let quote = client.get_quote(&request).await?;
	let quote_id = QuoteId::new(quote["fx_quote_id"].as_str().unwrap_or_default())?;

	println!("Quote {quote_id}: buy {}, sell {}.", quote["buy_price"], quote["sell_price"]);

	let executed = client.execute_quote(&quote_id, Side::Buy).await?;

	println!("Execution result: {executed}.");

	match client.get_quote_status(&quote_id).await {
		Ok(status) => println!("Quote status: {status}."),
		Err(e) => println!("Status lookup failed as expected: {e}."),
	}

	pairs_mock.assert_async().await;
	quote_mock.assert_async().await;
	execute_mock.assert_async().await;
	status_mock.assert_async().await;

	Ok(())
}
