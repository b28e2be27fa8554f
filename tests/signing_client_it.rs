use std::cell::Cell;
use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use oauth1_client::{
    fetch_timeline, ClientConfig, Credentials, Error, HttpTransport, OAuthClient, Params,
    RequestSpec, TransportRequest, TransportResponse,
};
use sha1::Sha1;

#[derive(Debug)]
struct Unreachable;

impl fmt::Display for Unreachable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("connection refused")
    }
}

impl std::error::Error for Unreachable {}

/// Counts calls and answers with a fixed body, or fails when `fail` is set.
struct CountingTransport {
    calls: Cell<usize>,
    body: &'static str,
    fail: bool,
}

impl CountingTransport {
    fn replying(body: &'static str) -> Self {
        CountingTransport {
            calls: Cell::new(0),
            body,
            fail: false,
        }
    }

    fn failing() -> Self {
        CountingTransport {
            calls: Cell::new(0),
            body: "",
            fail: true,
        }
    }
}

impl HttpTransport for CountingTransport {
    type Error = Unreachable;

    fn send(&self, _request: TransportRequest) -> Result<TransportResponse, Unreachable> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(Unreachable);
        }
        Ok(TransportResponse {
            status: 200,
            body: self.body.to_string(),
        })
    }
}

fn full_credentials() -> Credentials {
    Credentials::new("ck", "cs", "tk", "ts")
}

#[test]
fn fetch_timeline_checks_every_credential_before_sending() {
    let variants = [
        Credentials::new("", "cs", "tk", "ts"),
        Credentials::new("ck", "", "tk", "ts"),
        Credentials::new("ck", "cs", "", "ts"),
        Credentials::new("ck", "cs", "tk", ""),
    ];
    let expected = ["consumer_key", "consumer_secret", "access_token", "access_token_secret"];
    for (creds, expected) in variants.iter().zip(expected.iter()) {
        let transport = CountingTransport::replying("[]");
        match fetch_timeline(creds, &transport, &ClientConfig::default(), 5) {
            Err(Error::IncompleteCredentials { field }) => assert_eq!(field, *expected),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(transport.calls.get(), 0);
    }
}

#[test]
fn fetch_timeline_decodes_posts() {
    let transport = CountingTransport::replying(
        r#"[{"id":1,"text":"hello","created_at":"Wed Oct 10 20:19:24 +0000 2018"}]"#,
    );
    let posts = fetch_timeline(&full_credentials(), &transport, &ClientConfig::default(), 1).unwrap();
    assert_eq!(transport.calls.get(), 1);
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].text, "hello");
}

#[test]
fn transport_errors_propagate_unchanged() {
    let client = OAuthClient::new(full_credentials(), CountingTransport::failing()).unwrap();
    match client.fetch_timeline(5) {
        Err(Error::Transport(source)) => assert_eq!(source.to_string(), "connection refused"),
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(client.transport().calls.get(), 1);
}

#[test]
fn non_success_bodies_are_returned_verbatim() {
    let body = r#"{"errors":[{"code":32,"message":"Could not authenticate you."}]}"#;
    let client = OAuthClient::new(full_credentials(), CountingTransport::replying(body)).unwrap();
    let spec = client.configure("GET", "count=5", Params::new()).unwrap();
    let signed = client
        .build_oauth(&spec, "https://api.example.com/timeline.json")
        .unwrap();
    assert_eq!(client.execute(&signed).unwrap(), body);
}

#[test]
fn authorization_header_matches_independent_signature() {
    let client = OAuthClient::new(full_credentials(), CountingTransport::replying("[]")).unwrap();
    let spec = RequestSpec::get()
        .query_pair("count", "5")
        .oauth_nonce("N")
        .oauth_timestamp(1_700_000_000);
    let signed = client
        .build_oauth(&spec, "https://api.example.com/timeline.json")
        .unwrap();

    let expected_base = "GET&https%3A%2F%2Fapi.example.com%2Ftimeline.json&\
        count%3D5%26oauth_consumer_key%3Dck%26oauth_nonce%3DN%26\
        oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1700000000%26\
        oauth_token%3Dtk%26oauth_version%3D1.0";
    let mut mac = Hmac::<Sha1>::new_from_slice(b"cs&ts").unwrap();
    mac.update(expected_base.as_bytes());
    let expected_signature = STANDARD.encode(mac.finalize().into_bytes());

    assert_eq!(signed.base_string(), expected_base);
    assert_eq!(signed.signature(), expected_signature);

    let header = signed.authorization_header();
    let pairs: Vec<&str> = header
        .strip_prefix("OAuth ")
        .unwrap()
        .split(", ")
        .collect();
    // six protocol parameters plus the signature
    assert_eq!(pairs.len(), 7);
    assert!(pairs.iter().all(|p| p.starts_with("oauth_")));
    let sig_pair = pairs
        .iter()
        .find(|p| p.starts_with("oauth_signature="))
        .unwrap();
    let encoded: String = percent_encoding::utf8_percent_encode(
        &expected_signature,
        percent_encoding::NON_ALPHANUMERIC,
    )
    .to_string();
    assert_eq!(*sig_pair, format!("oauth_signature=\"{}\"", encoded));
}
