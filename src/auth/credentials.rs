use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use serde::Deserialize;
use std::fmt;

use crate::error::Error;

/// API key pair issued by the provider console.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub api_id: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_id: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_id: api_id.into(),
            api_secret: api_secret.into(),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.api_id.trim().is_empty() {
            return Err(Error::Credential("api_id must not be empty".into()));
        }
        if self.api_secret.trim().is_empty() {
            return Err(Error::Credential("api_secret must not be empty".into()));
        }
        Ok(())
    }

    /// `id:secret`, URL-safe base64 encoded.
    pub fn token(&self) -> String {
        URL_SAFE.encode(format!("{}:{}", self.api_id, self.api_secret))
    }

    pub fn authorization(&self) -> String {
        format!("Basic {}", self.token())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_id", &self.api_id)
            .field("api_secret", &"<REDACTED>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_encoding() {
        let creds = Credentials::new("id", "secret");
        assert_eq!(creds.token(), "aWQ6c2VjcmV0");
        assert_eq!(creds.authorization(), "Basic aWQ6c2VjcmV0");
    }

    #[test]
    fn test_token_is_url_safe() {
        // "~~~" is "fn5+" in the standard alphabet
        let creds = Credentials::new("~~~", "x");
        assert!(creds.token().starts_with("fn5-"));
        assert!(!creds.token().contains('+'));
    }

    #[test]
    fn test_validate() {
        assert!(Credentials::new("id", "secret").validate().is_ok());
        assert!(matches!(
            Credentials::new("", "secret").validate(),
            Err(Error::Credential(_))
        ));
        assert!(matches!(
            Credentials::new("id", "  ").validate(),
            Err(Error::Credential(_))
        ));
    }

    #[test]
    fn test_secret_not_exposed_in_debug() {
        let creds = Credentials::new("id", "secret_value_123");
        let out = format!("{creds:?}");
        assert!(!out.contains("secret_value_123"));
        assert!(out.contains("<REDACTED>"));
    }
}
