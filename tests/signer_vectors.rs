// crates.io
use base64::prelude::*;
// self
use falconx_client::{
	_preludet::*,
	auth::{FixedClock, HmacSigner, RequestSigner, Timestamp, sign_at, verify},
	http::Method as HttpMethod,
};

#[test]
fn secret_fixture_decodes_to_plain_key() {
	assert_eq!(
		BASE64_STANDARD.decode(TEST_SECRET_B64).expect("Fixture secret should be base64."),
		TEST_SECRET
	);
}

#[test]
fn pairs_vector_matches() {
	let signed = sign_at(
		&test_credential(),
		&HttpMethod::GET,
		"pairs",
		b"",
		Timestamp::new(TEST_TIMESTAMP),
	)
	.expect("Pairs vector should sign.");

	assert_eq!(signed.signature, "vAFbs+H7MoetWARLBaxvyQOxs0Em3k8F3wx3XX7jywY=");
	assert_eq!(signed.timestamp.as_str(), TEST_TIMESTAMP);
	assert_eq!(signed.key.as_str(), TEST_KEY);
	assert_eq!(signed.passphrase.expose(), TEST_PASSPHRASE);
}

#[test]
fn execute_vector_matches_through_signer_trait() {
	let signer = HmacSigner::with_clock(
		test_credential(),
		Arc::new(FixedClock::new(Timestamp::new(TEST_TIMESTAMP))),
	);
	let body = br#"{"fx_quote_id":"q1","side":"buy"}"#;
	let signed = signer
		.sign(&HttpMethod::POST, "quotes/execute", body)
		.expect("Execute vector should sign.");

	assert_eq!(signed.signature, "Pp9FYTTVV9ZeH/NQ1fIPSJxEp/pO6Ki2HjolJnOxl3Q=");
	assert!(verify(
		&test_credential(),
		&HttpMethod::POST,
		"quotes/execute",
		body,
		&signed.timestamp,
		&signed.signature,
	));
	assert!(!verify(
		&test_credential(),
		&HttpMethod::POST,
		"quotes/execute",
		br#"{"fx_quote_id":"q1","side":"sell"}"#,
		&signed.timestamp,
		&signed.signature,
	));
}
