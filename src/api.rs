//! Request shapes for the RFQ endpoints.
//!
//! [`ApiCall`] is the unsigned description of one request: the operation label, the method,
//! the path relative to the base URL, query pairs, and the JSON body bytes. The client turns
//! it into an [`HttpRequest`](crate::transport::HttpRequest), signs it, and sends it.

pub mod quote;

pub use quote::*;

// crates.io
use http::Method;
// self
use crate::{_prelude::*, error::ConfigError};

/// API operations, used as span and metric labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// `GET pairs`.
	TradingPairs,
	/// `POST quotes`.
	Quote,
	/// `POST quotes/execute`.
	ExecuteQuote,
	/// `GET quotes/{id}`.
	QuoteStatus,
	/// `GET quotes?t_start=..&t_end=..`.
	ExecutedQuotes,
	/// `GET balances`.
	Balances,
	/// Caller-defined call issued through [`FxClient::call`](crate::client::FxClient::call).
	Custom(&'static str),
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::TradingPairs => "get_trading_pairs",
			Operation::Quote => "get_quote",
			Operation::ExecuteQuote => "execute_quote",
			Operation::QuoteStatus => "get_quote_status",
			Operation::ExecutedQuotes => "get_executed_quotes",
			Operation::Balances => "get_balances",
			Operation::Custom(label) => label,
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Unsigned description of a single API request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiCall {
	/// Label used for observability.
	pub operation: Operation,
	/// HTTP method; the signing scheme accepts GET and POST.
	pub method: Method,
	/// Path relative to the base URL, without a leading slash.
	pub path: Cow<'static, str>,
	/// Query pairs appended form-urlencoded, in order.
	pub query: Vec<(&'static str, String)>,
	/// Serialized JSON body; empty for GET.
	pub body: Vec<u8>,
}
impl ApiCall {
	/// Describes a body-less GET.
	pub fn get(operation: Operation, path: impl Into<Cow<'static, str>>) -> Self {
		Self {
			operation,
			method: Method::GET,
			path: path.into(),
			query: Vec::new(),
			body: Vec::new(),
		}
	}

	/// Describes a POST whose body is `payload` serialized as compact JSON.
	pub fn post_json<T>(
		operation: Operation,
		path: impl Into<Cow<'static, str>>,
		payload: &T,
	) -> Result<Self, ConfigError>
	where
		T: ?Sized + Serialize,
	{
		let body = serde_json::to_vec(payload).map_err(ConfigError::InvalidBody)?;

		Ok(Self { operation, method: Method::POST, path: path.into(), query: Vec::new(), body })
	}

	/// Appends one query pair.
	pub fn with_query(mut self, name: &'static str, value: impl Into<String>) -> Self {
		self.query.push((name, value.into()));

		self
	}
}
