use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode};
use url::Url;

use crate::error::{Error, Result};

// https://tools.ietf.org/html/rfc5849#section-3.6
// * ALPHA, DIGIT, '-', '.', '_', '~' MUST NOT be encoded.
// * All other characters MUST be encoded.
// * The two hexadecimal characters used to represent encoded
//   characters MUST be uppercase.
const TARGETS_FOR_PARAMS: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub fn percent_encode(input: &str) -> PercentEncode<'_> {
    utf8_percent_encode(input, TARGETS_FOR_PARAMS)
}

pub fn percent_encode_str(input: &str) -> String {
    percent_encode(input).to_string()
}

/// Split an endpoint into its signable base URI and any query pairs it carries.
///
/// Only absolute `http`/`https` URLs with a host are accepted.
pub fn url_to_endpoint_and_queries(url: &Url) -> Result<(Url, Vec<(String, String)>)> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid_endpoint(url.as_str(), "scheme must be http or https"));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid_endpoint(url.as_str(), "missing host"));
    }
    let queries = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let mut endpoint = url.clone();
    endpoint.set_query(None);
    endpoint.set_fragment(None);
    Ok((endpoint, queries))
}

pub fn parse_endpoint(endpoint: &str) -> Result<Url> {
    Url::parse(endpoint).map_err(|e| invalid_endpoint(endpoint, &e.to_string()))
}

fn invalid_endpoint(endpoint: &str, reason: &str) -> Error {
    Error::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse `"?count=5&foo=bar"` style input into raw (decoded) pairs, keeping order.
pub fn query_to_pairs(query: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// `application/x-www-form-urlencoded` serialization, used on the wire (not for signing).
pub fn form_urlencode<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = &'a (String, String)>,
{
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (k, v) in pairs {
        serializer.append_pair(k, v);
    }
    serializer.finish()
}

#[test]
fn test_url_to_endpoint_and_queries() {
    let u = Url::parse("https://example.com/example+.html?count=5&screen_name=karno#top").unwrap();
    let (core, queries) = url_to_endpoint_and_queries(&u).unwrap();
    assert_eq!(core.as_str(), "https://example.com/example+.html");
    assert_eq!(
        queries,
        vec![
            ("count".to_string(), "5".to_string()),
            ("screen_name".to_string(), "karno".to_string()),
        ]
    );
    let n = Url::parse("https://example.com/").unwrap();
    let (core, queries2) = url_to_endpoint_and_queries(&n).unwrap();
    assert_eq!(core.as_str(), "https://example.com/");
    assert!(queries2.is_empty());

    let ftp = Url::parse("ftp://example.com/file").unwrap();
    assert!(matches!(
        url_to_endpoint_and_queries(&ftp),
        Err(Error::InvalidEndpoint { .. })
    ));
    assert!(matches!(
        parse_endpoint("/relative/path"),
        Err(Error::InvalidEndpoint { .. })
    ));
}

#[test]
fn test_query_to_pairs() {
    let pairs = query_to_pairs("?count=5&&&foo=bar&flag&enc=a%20b+c");
    assert_eq!(
        pairs,
        vec![
            ("count".to_string(), "5".to_string()),
            ("foo".to_string(), "bar".to_string()),
            ("flag".to_string(), "".to_string()),
            ("enc".to_string(), "a b c".to_string()),
        ]
    );
    assert!(query_to_pairs("").is_empty());
    assert!(query_to_pairs("?").is_empty());
}

#[test]
fn test_percent_encode() {
    assert_eq!(percent_encode_str("AZaz09-._~"), "AZaz09-._~");
    assert_eq!(
        percent_encode_str("Hello Ladies + Gentlemen, a signed OAuth request!"),
        "Hello%20Ladies%20%2B%20Gentlemen%2C%20a%20signed%20OAuth%20request%21"
    );
    assert_eq!(percent_encode_str("☃"), "%E2%98%83");
    assert_eq!(percent_encode_str("%20"), "%2520");
}

#[test]
fn test_form_urlencode() {
    let pairs = vec![
        ("status".to_string(), "hello world".to_string()),
        ("x".to_string(), "a&b".to_string()),
    ];
    assert_eq!(form_urlencode(&pairs), "status=hello+world&x=a%26b");
}
