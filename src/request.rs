use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::util;

/// HTTP methods the signer accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            _ => Err(Error::UnsupportedMethod {
                method: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters, either as a raw query string or as key/value pairs.
///
/// Both forms normalise to the same ordered list of raw (decoded) pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Params(Vec::new())
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.push((key.into(), value.into()));
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<&str> for Params {
    fn from(query: &str) -> Self {
        Params(util::query_to_pairs(query))
    }
}

impl From<String> for Params {
    fn from(query: String) -> Self {
        Params::from(query.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Params(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Params {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for Params {
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> From<std::collections::BTreeMap<K, V>> for Params {
    fn from(map: std::collections::BTreeMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> From<std::collections::HashMap<K, V>> for Params {
    fn from(map: std::collections::HashMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

/// One outbound call, before signing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestSpec {
    method: Method,
    query: Params,
    body: Params,
    nonce: Option<String>,
    timestamp: Option<i64>,
}

impl RequestSpec {
    pub fn new(method: Method) -> Self {
        RequestSpec {
            method,
            query: Params::new(),
            body: Params::new(),
            nonce: None,
            timestamp: None,
        }
    }

    pub fn get() -> Self {
        RequestSpec::new(Method::Get)
    }

    pub fn post() -> Self {
        RequestSpec::new(Method::Post)
    }

    /// Case-insensitive; anything but GET or POST is rejected.
    pub fn with_method(method: &str) -> Result<Self> {
        method.parse().map(RequestSpec::new)
    }

    pub fn query(mut self, query: impl Into<Params>) -> Self {
        self.query = query.into();
        self
    }

    pub fn query_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push(key, value);
        self
    }

    pub fn body(mut self, body: impl Into<Params>) -> Self {
        self.body = body.into();
        self
    }

    pub fn body_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.body.push(key, value);
        self
    }

    /// Pin the nonce instead of generating a random one.
    pub fn oauth_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Pin the timestamp instead of using the current time.
    pub fn oauth_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn query_params(&self) -> &Params {
        &self.query
    }

    pub fn body_params(&self) -> &Params {
        &self.body
    }

    pub(crate) fn fixed_nonce(&self) -> Option<&str> {
        self.nonce.as_deref()
    }

    pub(crate) fn fixed_timestamp(&self) -> Option<i64> {
        self.timestamp
    }
}
