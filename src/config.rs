//! Run configuration: the `api` section credentials and where the provider lives.
//!
//! Values come from `API_`-prefixed environment variables (`API_CLIENT_ID`,
//! `API_AUTH_BASIC`, `API_BASE_URL`).

use std::fmt;

use serde::Deserialize;

use crate::error::Error;

pub const DEFAULT_BASE_URL: &str = "https://axustravelapp.com";
const ENV_PREFIX: &str = "API_";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[derive(Deserialize)]
struct ApiSectionFlat {
    #[serde(default)]
    client_id: String,
    #[serde(default)]
    auth_basic: String,
    #[serde(default = "default_base_url")]
    base_url: String,
}

/// The two pre-shared secrets sent with every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    auth_basic: String,
}

impl Credentials {
    /// Fails with [`Error::Config`] when either value is empty.
    pub fn new(client_id: impl Into<String>, auth_basic: impl Into<String>) -> Result<Self, Error> {
        let client_id = client_id.into();
        let auth_basic = auth_basic.into();

        if client_id.is_empty() {
            return Err(Error::Config("client_id parameter is required".to_string()));
        }
        if auth_basic.is_empty() {
            return Err(Error::Config("auth_basic parameter is required".to_string()));
        }

        Ok(Credentials {
            client_id,
            auth_basic,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn auth_basic(&self) -> &str {
        &self.auth_basic
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("auth_basic", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub base_url: String,
}

impl Config {
    pub fn load() -> Result<Config, Error> {
        Config::from_vars(std::env::vars())
    }

    pub fn from_vars<I>(vars: I) -> Result<Config, Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let flat = envy::prefixed(ENV_PREFIX)
            .from_iter::<_, ApiSectionFlat>(vars)
            .map_err(|e| Error::Config(format!("Invalid api configuration: {}", e)))?;

        Ok(Config {
            credentials: Credentials::new(flat.client_id, flat.auth_basic)?,
            base_url: flat.base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn loads_api_section_from_prefixed_vars() {
        let config = Config::from_vars(vars(&[
            ("API_CLIENT_ID", "abc123"),
            ("API_AUTH_BASIC", "Basic xyz"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();

        assert_eq!(config.credentials.client_id(), "abc123");
        assert_eq!(config.credentials.auth_basic(), "Basic xyz");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_can_be_overridden() {
        let config = Config::from_vars(vars(&[
            ("API_CLIENT_ID", "abc123"),
            ("API_AUTH_BASIC", "Basic xyz"),
            ("API_BASE_URL", "http://127.0.0.1:9000"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn missing_client_id_is_a_config_error() {
        let err = Config::from_vars(vars(&[("API_AUTH_BASIC", "Basic xyz")])).unwrap_err();

        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.to_string(), "client_id parameter is required");
    }

    #[test]
    fn empty_auth_basic_is_a_config_error() {
        let err = Credentials::new("abc123", "").unwrap_err();

        assert_eq!(err.to_string(), "auth_basic parameter is required");
    }

    #[test]
    fn debug_output_hides_auth_basic() {
        let credentials = Credentials::new("abc123", "Basic xyz").unwrap();
        let printed = format!("{:?}", credentials);

        assert!(printed.contains("abc123"));
        assert!(!printed.contains("xyz"));
    }
}
