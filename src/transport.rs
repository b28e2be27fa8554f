//! The HTTP capability the client needs from its environment.
//!
//! [`HttpTransport`] is the only seam between the signing core and a network stack. The
//! default [`ReqwestTransport`] is a blocking `reqwest` client; tests and hosts with their
//! own stack implement the trait directly.

use std::time::Duration;
use url::Url;

use crate::request::Method;

/// Everything a transport needs to perform one call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Duration,
    pub verify_tls: bool,
}

impl TransportRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Performs a single blocking HTTP call.
///
/// Timeouts, TLS and connection reuse belong to the implementation; the client only passes
/// the configured values through.
pub trait HttpTransport {
    type Error: std::error::Error + Send + Sync + 'static;

    fn send(&self, request: TransportRequest) -> Result<TransportResponse, Self::Error>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    type Error = T::Error;

    fn send(&self, request: TransportRequest) -> Result<TransportResponse, Self::Error> {
        (**self).send(request)
    }
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use reqwest::blocking::Client;

    use super::{HttpTransport, TransportRequest, TransportResponse};
    use crate::request::Method;

    /// Blocking `reqwest` transport.
    ///
    /// Must not be used from inside an async runtime; `reqwest::blocking` panics there.
    #[derive(Clone, Debug)]
    pub struct ReqwestTransport {
        client: Client,
        insecure: Client,
    }

    impl ReqwestTransport {
        pub fn new() -> reqwest::Result<Self> {
            Ok(ReqwestTransport {
                client: Client::builder().build()?,
                insecure: Client::builder().danger_accept_invalid_certs(true).build()?,
            })
        }

        /// Use `client` for verified requests; unverified ones still get a dedicated client.
        pub fn with_client(client: Client) -> reqwest::Result<Self> {
            Ok(ReqwestTransport {
                client,
                insecure: Client::builder().danger_accept_invalid_certs(true).build()?,
            })
        }
    }

    impl HttpTransport for ReqwestTransport {
        type Error = reqwest::Error;

        fn send(&self, request: TransportRequest) -> reqwest::Result<TransportResponse> {
            let client = if request.verify_tls {
                &self.client
            } else {
                &self.insecure
            };
            let method = match request.method {
                Method::Get => reqwest::Method::GET,
                Method::Post => reqwest::Method::POST,
            };
            let mut builder = client.request(method, request.url).timeout(request.timeout);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }
            let response = builder.send()?;
            let status = response.status().as_u16();
            let body = response.text()?;
            Ok(TransportResponse { status, body })
        }
    }
}
