use serde::Deserialize;
use std::fmt;

use crate::error::{Error, Result};

/// Long-lived identity used to sign every request.
///
/// Missing keys deserialize to empty strings so settings persisted by a host
/// can be loaded first and validated afterwards.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    #[serde(alias = "oauth_access_token")]
    pub access_token: String,
    #[serde(alias = "oauth_access_token_secret")]
    pub access_token_secret: String,
}

impl Credentials {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        Credentials {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
        }
    }

    /// Name of the first empty field, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("consumer_key", &self.consumer_key),
            ("consumer_secret", &self.consumer_secret),
            ("access_token", &self.access_token),
            ("access_token_secret", &self.access_token_secret),
        ]
        .iter()
        .find(|(_, v)| v.is_empty())
        .map(|(k, _)| *k)
    }

    pub fn is_complete(&self) -> bool {
        self.missing_field().is_none()
    }

    /// Checks completeness ahead of a convenience call.
    pub fn ensure_complete(&self) -> Result<()> {
        match self.missing_field() {
            Some(field) => Err(Error::IncompleteCredentials { field }),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &self.access_token)
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_first_missing_field() {
        let full = Credentials::new("ck", "cs", "tk", "ts");
        assert!(full.is_complete());
        assert!(full.ensure_complete().is_ok());

        let no_secret = Credentials::new("ck", "", "tk", "");
        assert_eq!(no_secret.missing_field(), Some("consumer_secret"));
        match no_secret.ensure_complete() {
            Err(Error::IncompleteCredentials { field }) => assert_eq!(field, "consumer_secret"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn deserializes_widget_settings() {
        let json = r#"{
            "consumer_key": "ck",
            "consumer_secret": "cs",
            "oauth_access_token": "tk"
        }"#;
        let creds: Credentials = serde_json::from_str(json).unwrap();
        assert_eq!(creds.access_token, "tk");
        assert_eq!(creds.access_token_secret, "");
        assert_eq!(creds.missing_field(), Some("access_token_secret"));
    }

    #[test]
    fn debug_redacts_secrets() {
        let creds = Credentials::new("ck", "very-secret", "tk", "token-secret");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("ck"));
        assert!(!printed.contains("very-secret"));
        assert!(!printed.contains("token-secret"));
    }
}
