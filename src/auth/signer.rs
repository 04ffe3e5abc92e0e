//! HMAC-SHA256 request signing for the `FX-ACCESS-*` header scheme.
//!
//! Every request is signed over its canonical message: the timestamp, the uppercase HTTP
//! method, the request-target (path plus query, no scheme or host), and the body text,
//! concatenated without separators. The base64-decoded shared secret keys an HMAC-SHA256 over
//! that message and the base64 digest travels as `FX-ACCESS-SIGN`, next to the timestamp, the
//! key id, and the passphrase.
//!
//! [`sign_at`] is the pure core. [`HmacSigner`] pairs it with a credential and a
//! [`TimeSource`] and implements [`RequestSigner`], the hook the client invokes once per
//! request.

// crates.io
use base64::{
	DecodeError, Engine, alphabet,
	engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
	prelude::BASE64_STANDARD,
};
use hmac::{
	Hmac, Mac,
	digest::{InvalidLength, KeyInit},
};
use http::{
	HeaderMap, HeaderName, HeaderValue, Method,
	header::{CONTENT_TYPE, InvalidHeaderValue},
	uri::PathAndQuery,
};
use sha2::Sha256;
// self
use crate::{
	_prelude::*,
	auth::{Credential, Passphrase, SystemClock, TimeSource, Timestamp},
	id::KeyId,
	transport::HttpRequest,
};

type HmacSha256 = Hmac<Sha256>;

/// Secret decoder: padding optional, trailing bits ignored.
const SECRET_ENGINE: GeneralPurpose = GeneralPurpose::new(
	&alphabet::STANDARD,
	GeneralPurposeConfig::new()
		.with_decode_padding_mode(DecodePaddingMode::Indifferent)
		.with_decode_allow_trailing_bits(true),
);

/// Header carrying the base64 HMAC signature.
pub const FX_ACCESS_SIGN: HeaderName = HeaderName::from_static("fx-access-sign");
/// Header carrying the timestamp that was signed.
pub const FX_ACCESS_TIMESTAMP: HeaderName = HeaderName::from_static("fx-access-timestamp");
/// Header carrying the API key identifier.
pub const FX_ACCESS_KEY: HeaderName = HeaderName::from_static("fx-access-key");
/// Header carrying the passphrase.
pub const FX_ACCESS_PASSPHRASE: HeaderName = HeaderName::from_static("fx-access-passphrase");
/// Content type attached to every signed request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Failures raised while computing or attaching a signature.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// Shared secret is not valid base64.
	#[error("Shared secret is not valid base64.")]
	InvalidSecret {
		/// Underlying decoding failure.
		#[source]
		source: DecodeError,
	},
	/// Decoded secret was refused as an HMAC key.
	///
	/// HMAC-SHA256 accepts keys of any length; this only mirrors the fallible `KeyInit` API.
	#[error("Shared secret cannot be used as an HMAC key.")]
	InvalidKey(#[from] InvalidLength),
	/// Request body is not valid UTF-8 text.
	#[error("Request body is not valid UTF-8.")]
	Encoding {
		/// Underlying decoding failure.
		#[source]
		source: std::str::Utf8Error,
	},
	/// Only GET and POST requests are signed.
	#[error("HTTP method `{method}` is not supported by the signing scheme.")]
	UnsupportedMethod {
		/// Rejected method.
		method: String,
	},
	/// A signed value cannot be carried in an HTTP header.
	#[error("Value for `{header}` is not a valid HTTP header value.")]
	InvalidHeaderValue {
		/// Header that failed.
		header: HeaderName,
		/// Underlying header failure.
		#[source]
		source: InvalidHeaderValue,
	},
}

/// Authentication headers produced for exactly one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedHeaders {
	/// Base64 HMAC-SHA256 digest.
	pub signature: String,
	/// Timestamp the signature was computed over.
	pub timestamp: Timestamp,
	/// API key identifier.
	pub key: KeyId,
	/// Passphrase sent alongside the signature.
	pub passphrase: Passphrase,
	/// Always [`JSON_CONTENT_TYPE`].
	pub content_type: &'static str,
}
impl SignedHeaders {
	/// Writes the five wire headers into `headers`, replacing existing values.
	///
	/// All values are validated before the map is touched, so a failure leaves `headers`
	/// unchanged.
	pub fn apply(&self, headers: &mut HeaderMap) -> Result<(), SigningError> {
		let signature = header_value(FX_ACCESS_SIGN, &self.signature)?;
		let timestamp = header_value(FX_ACCESS_TIMESTAMP, self.timestamp.as_str())?;
		let key = header_value(FX_ACCESS_KEY, self.key.as_str())?;
		let mut passphrase = header_value(FX_ACCESS_PASSPHRASE, self.passphrase.expose())?;
		let content_type = header_value(CONTENT_TYPE, self.content_type)?;

		passphrase.set_sensitive(true);

		headers.insert(FX_ACCESS_SIGN, signature);
		headers.insert(FX_ACCESS_TIMESTAMP, timestamp);
		headers.insert(FX_ACCESS_KEY, key);
		headers.insert(FX_ACCESS_PASSPHRASE, passphrase);
		headers.insert(CONTENT_TYPE, content_type);

		Ok(())
	}
}

/// Per-request authentication hook invoked by the client before every send.
pub trait RequestSigner
where
	Self: Send + Sync,
{
	/// Signs one request given its method, request-target, and exact body bytes.
	fn sign(
		&self,
		method: &Method,
		path: &str,
		body: &[u8],
	) -> Result<SignedHeaders, SigningError>;

	/// Signs `request` and returns it with the authentication headers attached.
	///
	/// The request-target is read from the URI (path plus query), so it must not be modified
	/// after this call.
	fn authorize(&self, mut request: HttpRequest) -> Result<HttpRequest, SigningError> {
		let path = request.uri().path_and_query().map_or("/", PathAndQuery::as_str);
		let signed = self.sign(request.method(), path, request.body())?;

		signed.apply(request.headers_mut())?;

		Ok(request)
	}
}

/// [`RequestSigner`] that holds one credential and reads timestamps from a [`TimeSource`].
#[derive(Clone)]
pub struct HmacSigner {
	credential: Credential,
	clock: Arc<dyn TimeSource>,
}
impl HmacSigner {
	/// Creates a signer stamped by the system wall clock.
	pub fn new(credential: Credential) -> Self {
		Self::with_clock(credential, Arc::new(SystemClock))
	}

	/// Creates a signer stamped by `clock`.
	pub fn with_clock(credential: Credential, clock: Arc<dyn TimeSource>) -> Self {
		Self { credential, clock }
	}

	/// Credential used for every signature.
	pub fn credential(&self) -> &Credential {
		&self.credential
	}
}
impl RequestSigner for HmacSigner {
	fn sign(
		&self,
		method: &Method,
		path: &str,
		body: &[u8],
	) -> Result<SignedHeaders, SigningError> {
		sign_at(&self.credential, method, path, body, self.clock.now())
	}
}
impl Debug for HmacSigner {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("HmacSigner")
			.field("credential", &self.credential)
			.finish_non_exhaustive()
	}
}

/// Signs a request at a caller-supplied timestamp.
pub fn sign_at(
	credential: &Credential,
	method: &Method,
	path: &str,
	body: &[u8],
	timestamp: Timestamp,
) -> Result<SignedHeaders, SigningError> {
	let mac = keyed_mac(credential, method, path, body, &timestamp)?;
	let signature = BASE64_STANDARD.encode(mac.finalize().into_bytes());

	Ok(SignedHeaders {
		signature,
		timestamp,
		key: credential.key().clone(),
		passphrase: credential.passphrase().clone(),
		content_type: JSON_CONTENT_TYPE,
	})
}

/// Checks `signature` the way the API does: recompute over the same four inputs and compare in
/// constant time.
pub fn verify(
	credential: &Credential,
	method: &Method,
	path: &str,
	body: &[u8],
	timestamp: &Timestamp,
	signature: &str,
) -> bool {
	let Ok(expected) = BASE64_STANDARD.decode(signature) else {
		return false;
	};

	keyed_mac(credential, method, path, body, timestamp)
		.is_ok_and(|mac| mac.verify_slice(&expected).is_ok())
}

/// Builds the canonical message `timestamp ++ METHOD ++ path ++ body`.
pub fn canonical_message(
	timestamp: &Timestamp,
	method: &Method,
	path: &str,
	body: &[u8],
) -> Result<String, SigningError> {
	let method = signable_method(method)?;
	let body = std::str::from_utf8(body).map_err(|source| SigningError::Encoding { source })?;

	Ok([timestamp.as_str(), method, path, body].concat())
}

fn keyed_mac(
	credential: &Credential,
	method: &Method,
	path: &str,
	body: &[u8],
	timestamp: &Timestamp,
) -> Result<HmacSha256, SigningError> {
	let message = canonical_message(timestamp, method, path, body)?;
	let key = decode_secret(credential.secret().expose())?;
	let mut mac = <HmacSha256 as KeyInit>::new_from_slice(&key)?;

	mac.update(message.as_bytes());

	Ok(mac)
}

/// Decodes the shared secret, ignoring ASCII whitespace and any `=` padding.
fn decode_secret(secret: &str) -> Result<Vec<u8>, SigningError> {
	let compact = secret.chars().filter(|c| !c.is_ascii_whitespace()).collect::<String>();

	SECRET_ENGINE
		.decode(compact.trim_end_matches('='))
		.map_err(|source| SigningError::InvalidSecret { source })
}

fn signable_method(method: &Method) -> Result<&'static str, SigningError> {
	if method == Method::GET {
		Ok("GET")
	} else if method == Method::POST {
		Ok("POST")
	} else {
		Err(SigningError::UnsupportedMethod { method: method.to_string() })
	}
}

fn header_value(header: HeaderName, value: &str) -> Result<HeaderValue, SigningError> {
	HeaderValue::from_str(value)
		.map_err(|source| SigningError::InvalidHeaderValue { header, source })
}
