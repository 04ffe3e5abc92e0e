//! The six RFQ operations.
//!
//! Each operation returns the decoded `200 OK` body as a [`Value`], untouched. Use
//! [`FxClient::call`] with your own types when a typed response is preferable.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	api::{ApiCall, ExecuteQuoteRequest, ExecutedQuotesRange, Operation, QuoteRequest, Side},
	client::FxClient,
	id::QuoteId,
	transport::ApiHttpClient,
};

impl<C> FxClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// `GET pairs`: token pairs the account may trade.
	pub async fn get_trading_pairs(&self) -> Result<Value> {
		self.call(ApiCall::get(Operation::TradingPairs, "pairs")).await
	}

	/// `POST quotes`: requests a quote for `request`.
	///
	/// The returned object carries `fx_quote_id`, which [`Self::execute_quote`] and
	/// [`Self::get_quote_status`] take.
	pub async fn get_quote(&self, request: &QuoteRequest) -> Result<Value> {
		self.call(ApiCall::post_json(Operation::Quote, "quotes", request)?).await
	}

	/// `POST quotes/execute`: executes a previously obtained quote on `side`.
	pub async fn execute_quote(&self, fx_quote_id: &QuoteId, side: Side) -> Result<Value> {
		let body = ExecuteQuoteRequest { fx_quote_id: fx_quote_id.clone(), side };

		self.call(ApiCall::post_json(Operation::ExecuteQuote, "quotes/execute", &body)?).await
	}

	/// `GET quotes/{fx_quote_id}`: current state of one quote.
	pub async fn get_quote_status(&self, fx_quote_id: &QuoteId) -> Result<Value> {
		self.call(ApiCall::get(Operation::QuoteStatus, format!("quotes/{fx_quote_id}"))).await
	}

	/// `GET quotes?t_start=..&t_end=..`: quotes executed inside `range`.
	pub async fn get_executed_quotes(&self, range: ExecutedQuotesRange) -> Result<Value> {
		let [(start_name, start), (end_name, end)] = range.query_pairs()?;
		let call = ApiCall::get(Operation::ExecutedQuotes, "quotes")
			.with_query(start_name, start)
			.with_query(end_name, end);

		self.call(call).await
	}

	/// `GET balances`: per-token balances of the account.
	pub async fn get_balances(&self) -> Result<Value> {
		self.call(ApiCall::get(Operation::Balances, "balances")).await
	}
}
