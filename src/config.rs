use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::credentials::Credentials;
use crate::error::Result;
use crate::util;

/// Twitter API endpoint for the user timeline.
pub const USER_TIMELINE: &str = "https://api.twitter.com/1.1/statuses/user_timeline.json";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(45);

pub const DEFAULT_TIMELINE_COUNT: u32 = 5;

/// Options handed to the transport with every request.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub verify_tls: bool,
    /// `None` targets [`USER_TIMELINE`].
    pub timeline_endpoint: Option<Url>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            timeout: DEFAULT_TIMEOUT,
            verify_tls: true,
            timeline_endpoint: None,
        }
    }
}

impl ClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    pub fn with_timeline_endpoint(mut self, endpoint: Url) -> Self {
        self.timeline_endpoint = Some(endpoint);
        self
    }

    /// Endpoint used by the timeline helper.
    pub fn timeline_url(&self) -> Result<Url> {
        match &self.timeline_endpoint {
            Some(url) => Ok(url.clone()),
            None => util::parse_endpoint(USER_TIMELINE),
        }
    }
}

/// Settings as a host persists them for a "latest posts" view.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    #[serde(flatten)]
    pub credentials: Credentials,
    #[serde(alias = "update_count")]
    pub count: u32,
    pub timeout_secs: u64,
    pub verify_tls: bool,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        TimelineSettings {
            credentials: Credentials::default(),
            count: DEFAULT_TIMELINE_COUNT,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            verify_tls: true,
        }
    }
}

impl TimelineSettings {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_verify_tls(self.verify_tls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_source_behaviour() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(45));
        assert!(config.verify_tls);
        assert_eq!(config.timeline_endpoint, None);
        assert_eq!(config.timeline_url().unwrap().as_str(), USER_TIMELINE);
    }

    #[test]
    fn custom_timeline_endpoint_overrides_default() {
        let custom = Url::parse("http://127.0.0.1:8080/timeline.json").unwrap();
        let config = ClientConfig::default().with_timeline_endpoint(custom.clone());
        assert_eq!(config.timeline_url().unwrap(), custom);
    }

    #[test]
    fn settings_accept_widget_keys() {
        let json = r#"{
            "consumer_key": "ck",
            "consumer_secret": "cs",
            "oauth_access_token": "tk",
            "oauth_access_token_secret": "ts",
            "update_count": 3
        }"#;
        let settings: TimelineSettings = serde_json::from_str(json).unwrap();
        assert!(settings.credentials.is_complete());
        assert_eq!(settings.count, 3);
        assert_eq!(settings.client_config().timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn empty_settings_fall_back_to_defaults() {
        let settings: TimelineSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.count, DEFAULT_TIMELINE_COUNT);
        assert!(!settings.credentials.is_complete());
        assert!(settings.verify_tls);
    }
}
