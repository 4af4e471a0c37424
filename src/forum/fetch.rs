//! Retrieval of raw forum pages.
//!
//! Every extraction starts with exactly one blocking GET. There is no retry: a failed request is reported
//! to the caller, which decides what to do with it.
use log::debug;
use reqwest::blocking::Client;

use super::error::ExtractorError;
use super::ForumConfig;

/// Anything that can turn a URL into the text of a document.
///
/// The extractors only depend on this trait, so they can be fed with pages stored on disk or built in tests.
pub trait DocumentFetcher {
    fn fetch(&self, url: &str) -> Result<String, ExtractorError>;
}

/// [`DocumentFetcher`] doing real HTTP requests against the forum.
pub struct HttpFetcher {
    client: Client,
    config: ForumConfig,
}

impl HttpFetcher {
    pub fn new(config: &ForumConfig) -> Result<Self, ExtractorError> {
        let client = Client::builder()
            .user_agent(config.user_agent())
            .connect_timeout(config.connect_timeout())
            .timeout(config.read_timeout())
            .build()
            .map_err(|e| transport_error(config, &e))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Checks if the forum answers at all. Should be called once before doing any real work.
    pub fn check_status(&self) -> Result<(), ExtractorError> {
        debug!("Checking server status");
        self.fetch(self.config.base_url()).map(|_| ())
    }

    #[inline]
    pub fn config(&self) -> &ForumConfig {
        &self.config
    }
}

impl DocumentFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, ExtractorError> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| transport_error(&self.config, &e))?;

        let text = response
            .text()
            .map_err(|e| transport_error(&self.config, &e))?;

        debug!("Received {} bytes", text.len());
        Ok(text)
    }
}

fn transport_error(config: &ForumConfig, err: &reqwest::Error) -> ExtractorError {
    let reason = config.redact(&err.to_string());
    debug!("Request failed: {}", reason);

    match err.status() {
        Some(status) => ExtractorError::ServerStatus {
            status: status.as_u16(),
            reason,
        },
        None => ExtractorError::ConnectionError { reason },
    }
}
