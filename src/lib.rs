use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub mod api;
pub mod config;
pub mod error;
pub mod output;
pub mod record;
pub mod retry;

pub use config::{Config, Credentials};
pub use error::{Error, Result};
pub use output::OutputFormat;
pub use retry::RetryPolicy;

use api::itineraries::Itineraries;

/// Status and body of a provider reply. Error replies carry an `errors` array
/// in the body, so the body is kept whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

pub trait ApiClient {
    fn http_get(&self, path: &str, query_string: &[(String, String)]) -> Result<ApiResponse>;
}

pub struct AxusApi {
    credentials: Credentials,
    base_url: String,
    retry: RetryPolicy,

    token: Option<String>,
}

impl AxusApi {
    pub fn new(credentials: Credentials) -> Self {
        AxusApi {
            credentials,
            base_url: config::DEFAULT_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
            token: None,
        }
    }

    pub fn from_config(config: Config) -> Self {
        AxusApi::new(config.credentials).with_base_url(config.base_url)
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Fetches a fresh token and keeps it for the itinerary call.
    pub fn authenticate(&mut self) -> Result<()> {
        let token = api::token::fetch_token(&*self)?;
        info!("obtained provider token");
        self.token = Some(token);

        Ok(())
    }

    pub fn get_token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| Error::Protocol("Not authenticated: no token available".to_string()))
    }
}

impl fmt::Debug for AxusApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxusApi")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .field("retry", &self.retry)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ApiClient for AxusApi {
    fn http_get(&self, path: &str, query_string: &[(String, String)]) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);

        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = self.retry.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        self.retry.run(|attempt| {
            debug!(url = %url, attempt, "GET");
            let response = http_client
                .get(&url)
                .query(query_string)
                .header("Authorization", self.credentials.auth_basic())
                .header("clientId", self.credentials.client_id())
                .send()?;

            let status = response.status().as_u16();
            let body = response.text()?;
            debug!(url = %url, status, bytes = body.len(), "response");

            Ok(ApiResponse { status, body })
        })
    }
}

/// Runs one full pull: token, itineraries, normalization, dated output file.
///
/// Returns the path of the file that was written.
pub fn pull_to_file(api: &mut AxusApi, output_dir: &Path, format: OutputFormat) -> Result<PathBuf> {
    api.authenticate()?;
    let api: &AxusApi = api;

    let raw = Itineraries::new(api).fetch(api.get_token()?)?;
    let records = record::normalize(raw)?;
    info!(count = records.len(), "fetched itineraries");

    output::write_records(output_dir, format, &records)
}
