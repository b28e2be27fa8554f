//! The "latest posts" convenience built on top of the signing client.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::client::OAuthClient;
use crate::config::{ClientConfig, TimelineSettings};
use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::transport::HttpTransport;

/// Format of `created_at`, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
pub const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: u64,
    #[serde(alias = "full_text")]
    pub text: String,
    pub created_at: String,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct User {
    pub screen_name: String,
    #[serde(default)]
    pub name: String,
}

impl Post {
    pub fn created_time(&self) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_str(&self.created_at, CREATED_AT_FORMAT).map(|t| t.with_timezone(&Utc))
    }
}

#[derive(Deserialize)]
struct ApiErrorEntry {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// Decode a timeline body, turning the API's error payloads into [`Error::Api`].
pub fn decode_timeline(body: &str) -> Result<Vec<Post>> {
    let value: Value = serde_json::from_str(body)?;
    if let Some(errors) = value.get("errors") {
        let entries: Vec<ApiErrorEntry> = serde_json::from_value(errors.clone())?;
        let first = entries.into_iter().next();
        return Err(Error::Api {
            code: first.as_ref().map_or(0, |e| e.code),
            message: first.map(|e| e.message).unwrap_or_default(),
        });
    }
    if let Some(message) = value.get("error").and_then(Value::as_str) {
        return Err(Error::Api {
            code: 0,
            message: message.to_string(),
        });
    }
    Ok(serde_json::from_value(value)?)
}

/// Fetch the latest `count` posts, checking credentials before any network activity.
pub fn fetch_timeline<T: HttpTransport>(
    credentials: &Credentials,
    transport: T,
    config: &ClientConfig,
    count: u32,
) -> Result<Vec<Post>> {
    credentials.ensure_complete()?;
    OAuthClient::new(credentials.clone(), transport)?
        .with_config(config.clone())
        .fetch_timeline(count)
}

pub fn fetch_with_settings<T: HttpTransport>(
    settings: &TimelineSettings,
    transport: T,
) -> Result<Vec<Post>> {
    fetch_timeline(
        &settings.credentials,
        transport,
        &settings.client_config(),
        settings.count,
    )
}
