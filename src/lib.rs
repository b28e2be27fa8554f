//! OAuth 1.0a request signing client.
//!
//! ```no_run
//! use oauth1_client::{Credentials, OAuthClient, ReqwestTransport};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = Credentials::new("consumer_key", "consumer_secret", "token", "token_secret");
//! let client = OAuthClient::new(credentials, ReqwestTransport::new()?)?;
//! for post in client.fetch_timeline(5)? {
//!     println!("{}: {}", post.created_at, post.text);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod request;
pub mod timeline;
pub mod transport;
pub mod v1;

mod util;

pub use client::OAuthClient;
pub use config::{ClientConfig, TimelineSettings};
pub use credentials::Credentials;
pub use error::{Error, Result};
pub use request::{Method, Params, RequestSpec};
pub use timeline::{fetch_timeline, Post, User};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::{HttpTransport, TransportRequest, TransportResponse};
pub use v1::SignedRequest;
