//! PubMed web client.
//!
//! Fetches raw HTML for search listings and single article pages. Status codes
//! are mapped to [`ClientError`]; nothing is retried or cached.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::config::{Config, pubmed};
use crate::error::{ClientError, ClientResult};
use crate::models::DateRange;

/// PubMed web client.
#[derive(Clone)]
pub struct PubMedClient {
    /// HTTP client.
    client: Client,

    /// PubMed base URL, always ending in `/`.
    base_url: Url,

    /// Journal search term.
    journal_term: String,

    /// Page size for listings.
    max_articles: u32,

    /// Request timeout, reported on timeouts.
    request_timeout: Duration,
}

impl PubMedClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or HTTP client initialization fails.
    pub fn new(config: &Config) -> ClientResult<Self> {
        let client = Client::builder()
            .user_agent(pubmed::USER_AGENT)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        let mut base_url = Url::parse(&config.pubmed_base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            journal_term: config.journal_term.clone(),
            max_articles: config.max_articles,
            request_timeout: config.request_timeout,
        })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the search listing for the journal within `range`, newest first.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-success status.
    #[instrument(skip(self, range), fields(range = %range))]
    pub async fn fetch_listing(&self, range: &DateRange) -> ClientResult<String> {
        let params = [
            ("term", format!("\"{}\"[Journal]", self.journal_term)),
            ("filter", range.pubmed_filter()),
            ("sort", "date".to_string()),
            ("format", "pubmed".to_string()),
            ("size", self.max_articles.to_string()),
        ];

        self.get(self.base_url.clone(), &params).await
    }

    /// Fetch the MEDLINE page of a single article.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-success status
    /// ([`ClientError::NotFound`] for unknown articles).
    #[instrument(skip(self))]
    pub async fn fetch_article(&self, pmid: &str) -> ClientResult<String> {
        let url = self.base_url.join(&format!("{pmid}/"))?;
        self.get(url, &[("format", "pubmed".to_string())]).await
    }

    /// Make a GET request and return the body text.
    async fn get(&self, url: Url, params: &[(&str, String)]) -> ClientResult<String> {
        debug!(%url, "GET");

        let response =
            self.client.get(url).query(params).send().await.map_err(|e| self.map_error(e))?;
        let response = Self::handle_response(response).await?;

        response.text().await.map_err(|e| self.map_error(e))
    }

    fn map_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() { ClientError::Timeout(self.request_timeout) } else { err.into() }
    }

    /// Handle status codes.
    async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let resource = response.url().path().to_string();
        let text = response.text().await.unwrap_or_default();
        match status.as_u16() {
            404 => Err(ClientError::not_found(resource)),
            500..=599 => Err(ClientError::server(status.as_u16(), text)),
            _ => Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text }),
        }
    }
}

impl std::fmt::Debug for PubMedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PubMedClient")
            .field("base_url", &self.base_url.as_str())
            .field("journal_term", &self.journal_term)
            .finish_non_exhaustive()
    }
}
