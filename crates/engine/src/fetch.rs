//! Remote content fetching
//!
//! Materializing a Url or Gist source goes through a [`Fetcher`], so tests and
//! embedders can swap the network for anything that produces bytes.

use githook_core::{Error, Result};
use std::io::Write;
use std::time::Duration;

/// Default base URL for raw gist content
pub const DEFAULT_GIST_BASE_URL: &str = "https://raw.github.com/gist";

/// Retrieves the resource at a URL
pub trait Fetcher {
    /// Write the content at `url` into `out`, returning the number of bytes
    ///
    /// Transfer failures must surface as `SourceUnavailable`.
    fn fetch(&self, url: &str, out: &mut dyn Write) -> Result<u64>;

    /// Raw content URL for a gist id
    fn gist_url(&self, id: u64) -> String {
        format!("{DEFAULT_GIST_BASE_URL}/{id}")
    }
}

/// Implement Fetcher for closures
impl<F> Fetcher for F
where
    F: Fn(&str, &mut dyn Write) -> Result<u64>,
{
    fn fetch(&self, url: &str, out: &mut dyn Write) -> Result<u64> {
        self(url, out)
    }
}

/// Blocking HTTP fetcher backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    gist_base_url: String,
}

impl HttpFetcher {
    /// Build a fetcher with the given User-Agent and request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed (e.g. no TLS backend).
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Message(format!("Failed to build blocking HTTP client: {e}")))?;

        Ok(Self {
            client,
            gist_base_url: DEFAULT_GIST_BASE_URL.to_string(),
        })
    }

    /// Use a different base URL for gist ids
    #[must_use]
    pub fn with_gist_base_url(mut self, base: impl Into<String>) -> Self {
        self.gist_base_url = base.into();
        self
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, out: &mut dyn Write) -> Result<u64> {
        let parsed = url::Url::parse(url).map_err(|e| Error::source_unavailable(url, e))?;

        tracing::debug!(%url, "Fetching hook");
        let mut response = self
            .client
            .get(parsed)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| Error::source_unavailable(url, e))?;

        std::io::copy(&mut response, out).map_err(|e| Error::source_unavailable(url, e))
    }

    fn gist_url(&self, id: u64) -> String {
        format!("{}/{id}", self.gist_base_url.trim_end_matches('/'))
    }
}
