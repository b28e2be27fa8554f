//! OAuth 1.0a signing: parameter set, signature base string, HMAC-SHA1 and header assembly.
//!
//! Signing is a pure function from [`Credentials`] and a [`RequestSpec`] to an immutable
//! [`SignedRequest`]; nothing about the current request is stored on the client.

pub mod signer;
pub mod values;

use chrono::Utc;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::credentials::Credentials;
use crate::error::Result;
use crate::request::{Method, Params, RequestSpec};
use crate::util;
use values::*;

/// A request whose OAuth parameters are final and signed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedRequest {
    method: Method,
    endpoint: Url,
    query: Params,
    body: Params,
    oauth_params: Vec<(String, String)>,
    base_string: String,
}

impl SignedRequest {
    pub fn method(&self) -> Method {
        self.method
    }

    /// Base URI that was signed (no query, no fragment).
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn query(&self) -> &Params {
        &self.query
    }

    pub fn body(&self) -> &Params {
        &self.body
    }

    /// Protocol parameters including `oauth_signature`, sorted by key.
    pub fn oauth_params(&self) -> &[(String, String)] {
        &self.oauth_params
    }

    pub fn base_string(&self) -> &str {
        &self.base_string
    }

    pub fn oauth_param(&self, key: &str) -> Option<&str> {
        self.oauth_params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn signature(&self) -> &str {
        self.oauth_param(OAUTH_PARAM_KEY_SIGNATURE).unwrap_or_default()
    }

    pub fn nonce(&self) -> &str {
        self.oauth_param(OAUTH_PARAM_KEY_NONCE).unwrap_or_default()
    }

    /// Value for the `Authorization` header.
    pub fn authorization_header(&self) -> String {
        let params = self
            .oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", util::percent_encode(k), util::percent_encode(v)))
            .collect::<Vec<String>>()
            .join(", ");
        format!("{} {}", OAUTH_HEADER, params)
    }

    /// URL to send to: the endpoint plus form-encoded query for GET, the bare endpoint for POST.
    pub fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        if self.method == Method::Get && !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.pairs());
        }
        url
    }

    /// Form-encoded body for POST.
    pub fn form_body(&self) -> Option<String> {
        match self.method {
            Method::Post => Some(util::form_urlencode(self.body.pairs())),
            Method::Get => None,
        }
    }
}

/// Sign `spec` for `url` with `credentials`.
///
/// Query parameters take part in the signature for GET only; body parameters never do.
/// A query already present on `url` is moved into the query parameters.
pub fn sign(credentials: &Credentials, spec: &RequestSpec, url: &Url) -> Result<SignedRequest> {
    credentials.ensure_complete()?;

    let (endpoint, url_queries) = util::url_to_endpoint_and_queries(url)?;
    let mut query = Params::new();
    for (k, v) in url_queries.iter().chain(spec.query_params().pairs()) {
        query.push(k.as_str(), v.as_str());
    }
    let method = spec.method();
    match method {
        Method::Get if !spec.body_params().is_empty() => {
            warn!(endpoint = %endpoint, "body parameters are ignored for GET requests");
        }
        Method::Post if !query.is_empty() => {
            warn!(endpoint = %endpoint, "query parameters are neither signed nor sent for POST requests");
        }
        _ => {}
    }

    let timestamp = spec
        .fixed_timestamp()
        .unwrap_or_else(|| Utc::now().timestamp());
    // generate nonce when it is not specified
    let nonce = spec
        .fixed_nonce()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}", Uuid::new_v4()));

    let mut oauth_params = build_basic_params(credentials, nonce, timestamp);
    let mut signed_params = oauth_params.clone();
    if method == Method::Get {
        signed_params.extend(query.pairs().iter().cloned());
    }
    sort_params(&mut signed_params);

    let base_string = signer::signature_base_string(method.as_str(), endpoint.as_str(), &signed_params);
    let sign_key = signer::signing_key(&credentials.consumer_secret, &credentials.access_token_secret);
    let signature = signer::hmac_sha1_signature(&base_string, &sign_key)?;

    oauth_params.push((OAUTH_PARAM_KEY_SIGNATURE.to_string(), signature));
    sort_params(&mut oauth_params);

    debug!(
        method = %method,
        endpoint = %endpoint,
        signed_params = signed_params.len(),
        "signed OAuth request"
    );

    Ok(SignedRequest {
        method,
        endpoint,
        query,
        body: spec.body_params().clone(),
        oauth_params,
        base_string,
    })
}

fn build_basic_params(credentials: &Credentials, nonce: String, timestamp: i64) -> Vec<(String, String)> {
    vec![
        (OAUTH_PARAM_KEY_CONSUMER_KEY.to_string(), credentials.consumer_key.clone()),
        (OAUTH_PARAM_KEY_NONCE.to_string(), nonce),
        (OAUTH_PARAM_KEY_SIGNATURE_METHOD.to_string(), OAUTH_VALUE_SIGMETHOD_HMACSHA1.to_string()),
        (OAUTH_PARAM_KEY_TIMESTAMP.to_string(), timestamp.to_string()),
        (OAUTH_PARAM_KEY_TOKEN.to_string(), credentials.access_token.clone()),
        (OAUTH_PARAM_KEY_VERSION.to_string(), OAUTH_VALUE_VERSION.to_string()),
    ]
}

/// Byte order of the encoded key, then of the encoded value.
fn sort_params(params: &mut [(String, String)]) {
    params.sort_by_cached_key(|(k, v)| (util::percent_encode_str(k), util::percent_encode_str(v)));
}
