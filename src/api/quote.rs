//! Quote, execution, and history payloads.

// crates.io
use time::format_description::well_known::Rfc3339;
// self
use crate::{_prelude::*, error::ConfigError, id::QuoteId};

/// Base and quote tokens of a market, e.g. `BTC`/`USD`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
	/// Token being bought or sold.
	pub base_token: String,
	/// Token the price is expressed in.
	pub quote_token: String,
}
impl TokenPair {
	/// Creates a pair from its two token symbols.
	pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
		Self { base_token: base.into(), quote_token: quote.into() }
	}
}

/// Requested size, denominated in `token`.
///
/// The value travels as a decimal string so no precision is lost on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
	/// Token the value is expressed in.
	pub token: String,
	/// Decimal amount rendered as text.
	pub value: String,
}
impl Quantity {
	/// Creates a quantity from any value with a decimal [`Display`] form.
	pub fn new(token: impl Into<String>, value: impl Display) -> Self {
		Self { token: token.into(), value: value.to_string() }
	}
}

/// Side requested when asking for a quote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteSide {
	/// Price to buy the base token.
	Buy,
	/// Price to sell the base token.
	Sell,
	/// Both prices at once.
	TwoWay,
}
impl From<Side> for QuoteSide {
	fn from(side: Side) -> Self {
		match side {
			Side::Buy => QuoteSide::Buy,
			Side::Sell => QuoteSide::Sell,
		}
	}
}

/// Side taken when executing a quote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
	/// Buy the base token.
	Buy,
	/// Sell the base token.
	Sell,
}

/// Body of `POST quotes`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
	/// Market being quoted.
	pub token_pair: TokenPair,
	/// Requested size.
	pub quantity: Quantity,
	/// Requested side.
	pub side: QuoteSide,
}
impl QuoteRequest {
	/// Builds a quote request sized in the base token.
	pub fn new(
		base: impl Into<String>,
		quote: impl Into<String>,
		quantity: impl Display,
		side: impl Into<QuoteSide>,
	) -> Self {
		let token_pair = TokenPair::new(base, quote);
		let quantity = Quantity::new(token_pair.base_token.clone(), quantity);

		Self { token_pair, quantity, side: side.into() }
	}

	/// Denominates the quantity in `token` instead of the base token.
	pub fn with_quantity_token(mut self, token: impl Into<String>) -> Self {
		self.quantity.token = token.into();

		self
	}
}

/// Body of `POST quotes/execute`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteQuoteRequest {
	/// Quote being executed.
	pub fx_quote_id: QuoteId,
	/// Side taken.
	pub side: Side,
}

/// Inclusive time window for `GET quotes`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecutedQuotesRange {
	/// Start of the window.
	pub start: OffsetDateTime,
	/// End of the window.
	pub end: OffsetDateTime,
}
impl ExecutedQuotesRange {
	/// Creates a window from `start` to `end`.
	pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Self {
		Self { start, end }
	}

	/// Renders the `t_start`/`t_end` query pairs as RFC 3339 (ISO-8601) strings.
	pub fn query_pairs(&self) -> Result<[(&'static str, String); 2], ConfigError> {
		Ok([("t_start", self.start.format(&Rfc3339)?), ("t_end", self.end.format(&Rfc3339)?)])
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn quote_request_matches_wire_shape() {
		let request = QuoteRequest::new("BTC", "USD", 0.25, QuoteSide::TwoWay);

		assert_eq!(
			serde_json::to_value(&request).expect("Quote request should serialize."),
			json!({
				"token_pair": { "base_token": "BTC", "quote_token": "USD" },
				"quantity": { "token": "BTC", "value": "0.25" },
				"side": "two_way"
			})
		);
	}

	#[test]
	fn quantity_token_can_be_overridden() {
		let request = QuoteRequest::new("ETH", "USD", "1000", Side::Buy).with_quantity_token("USD");

		assert_eq!(request.quantity, Quantity { token: "USD".into(), value: "1000".into() });
		assert_eq!(request.side, QuoteSide::Buy);
	}

	#[test]
	fn execute_request_serializes_quote_id_and_side() {
		let request = ExecuteQuoteRequest {
			fx_quote_id: QuoteId::new("q1").expect("Quote id should be valid."),
			side: Side::Sell,
		};

		assert_eq!(
			serde_json::to_string(&request).expect("Execute request should serialize."),
			r#"{"fx_quote_id":"q1","side":"sell"}"#
		);
	}

	#[test]
	fn executed_quotes_range_renders_rfc3339() {
		let range = ExecutedQuotesRange::new(
			datetime!(2024-01-01 00:00:00 UTC),
			datetime!(2024-01-02 12:30:00 +02:00),
		);
		let [start, end] = range.query_pairs().expect("Range should format.");

		assert_eq!(start, ("t_start", "2024-01-01T00:00:00Z".to_owned()));
		assert_eq!(end, ("t_end", "2024-01-02T12:30:00+02:00".to_owned()));
	}
}
