use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::request::{Method, Params, RequestSpec};
use crate::timeline::{self, Post};
use crate::transport::{HttpTransport, TransportRequest};
use crate::util;
use crate::v1::{self, SignedRequest};

const AUTHORIZATION: &str = "Authorization";
const CONTENT_TYPE: &str = "Content-Type";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// OAuth 1.0a client bound to one set of credentials and one transport.
///
/// The client holds no per-request state: every call signs a fresh [`SignedRequest`],
/// so a shared `&OAuthClient` can serve overlapping requests.
#[derive(Debug)]
pub struct OAuthClient<T> {
    credentials: Credentials,
    transport: T,
    config: ClientConfig,
}

impl<T: HttpTransport> OAuthClient<T> {
    /// Fails with [`Error::InvalidCredentials`] if any credential is empty.
    pub fn new(credentials: Credentials, transport: T) -> Result<Self> {
        if let Some(field) = credentials.missing_field() {
            return Err(Error::InvalidCredentials { field });
        }
        Ok(OAuthClient {
            credentials,
            transport,
            config: ClientConfig::default(),
        })
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Describe a request; `method` is case-insensitive and must be GET or POST.
    pub fn configure(
        &self,
        method: &str,
        query: impl Into<Params>,
        body: impl Into<Params>,
    ) -> Result<RequestSpec> {
        Ok(RequestSpec::with_method(method)?.query(query).body(body))
    }

    /// Sign `spec` for the endpoint `url`.
    pub fn build_oauth(&self, spec: &RequestSpec, url: &str) -> Result<SignedRequest> {
        self.build_oauth_url(spec, &util::parse_endpoint(url)?)
    }

    pub fn build_oauth_url(&self, spec: &RequestSpec, url: &Url) -> Result<SignedRequest> {
        v1::sign(&self.credentials, spec, url)
    }

    /// Send a signed request and return the body verbatim, whatever the status.
    pub fn execute(&self, signed: &SignedRequest) -> Result<String> {
        let mut headers = vec![(AUTHORIZATION.to_string(), signed.authorization_header())];
        if signed.method() == Method::Post {
            headers.push((CONTENT_TYPE.to_string(), FORM_URLENCODED.to_string()));
        }
        let request = TransportRequest {
            method: signed.method(),
            url: signed.request_url(),
            headers,
            body: signed.form_body(),
            timeout: self.config.timeout,
            verify_tls: self.config.verify_tls,
        };
        debug!(method = %request.method, url = %request.url, "dispatching OAuth request");
        let response = self.transport.send(request).map_err(Error::transport)?;
        debug!(status = response.status, bytes = response.body.len(), "received response");
        Ok(response.body)
    }

    /// Sign and send in one step.
    pub fn process_request(&self, spec: &RequestSpec, url: &Url) -> Result<String> {
        let signed = self.build_oauth_url(spec, url)?;
        self.execute(&signed)
    }

    /// Latest `count` posts from the configured timeline endpoint.
    pub fn fetch_timeline(&self, count: u32) -> Result<Vec<Post>> {
        let spec = RequestSpec::get().query_pair("count", count.to_string());
        let endpoint = self.config.timeline_url()?;
        let body = self.process_request(&spec, &endpoint)?;
        timeline::decode_timeline(&body)
    }
}
