//! Configuration for the digest bot.

use std::time::Duration;

/// PubMed access constants.
pub mod pubmed {
    use std::time::Duration;

    /// Base URL for PubMed web search.
    pub const BASE_URL: &str = "https://pubmed.ncbi.nlm.nih.gov/";

    /// Journal abbreviation as PubMed indexes it.
    pub const JOURNAL_TERM: &str = "CPT Pharmacometrics Syst Pharmacol";

    /// Human readable journal name used in messages.
    pub const JOURNAL_NAME: &str = "CPT Pharmacometrics & Systems Pharmacology";

    /// Number of days covered by the default listing.
    pub const DAYS_BACK: u32 = 30;

    /// Page size requested from PubMed (its maximum for `format=pubmed`).
    pub const MAX_ARTICLES: u32 = 200;

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Browser-like user agent; PubMed serves a reduced page to unknown clients.
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                                  (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
}

/// Telegram delivery constants.
pub mod telegram {
    /// Articles per listing message.
    pub const ARTICLES_PER_MESSAGE: usize = 5;

    /// Hard limit of a single Telegram message.
    pub const MAX_MESSAGE_LEN: usize = 4096;

    /// Abstract characters kept before truncation.
    pub const MAX_ABSTRACT_CHARS: usize = 3000;
}

/// Bot configuration.
#[derive(Clone)]
pub struct Config {
    /// Telegram bot token.
    pub bot_token: String,

    /// PubMed base URL (overridden with a mock server in tests).
    pub pubmed_base_url: String,

    /// PubMed journal search term.
    pub journal_term: String,

    /// Journal display name.
    pub journal_name: String,

    /// Days covered by `/articles`.
    pub days_back: u32,

    /// Maximum articles requested per listing.
    pub max_articles: u32,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Port of the health check server.
    pub health_port: u16,
}

impl Config {
    /// Create a configuration with PubMed defaults.
    #[must_use]
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            pubmed_base_url: pubmed::BASE_URL.to_string(),
            journal_term: pubmed::JOURNAL_TERM.to_string(),
            journal_name: pubmed::JOURNAL_NAME.to_string(),
            days_back: pubmed::DAYS_BACK,
            max_articles: pubmed::MAX_ARTICLES,
            request_timeout: pubmed::REQUEST_TIMEOUT,
            connect_timeout: pubmed::CONNECT_TIMEOUT,
            health_port: 5000,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            pubmed_base_url: format!("{}/", base_url.trim_end_matches('/')),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            health_port: 0,
            ..Self::new("test-token")
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("pubmed_base_url", &self.pubmed_base_url)
            .field("journal_term", &self.journal_term)
            .field("days_back", &self.days_back)
            .field("max_articles", &self.max_articles)
            .field("health_port", &self.health_port)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::new("token");
        assert_eq!(config.pubmed_base_url, pubmed::BASE_URL);
        assert_eq!(config.days_back, 30);
        assert_eq!(config.max_articles, 200);
        assert_eq!(config.health_port, 5000);
    }

    #[test]
    fn test_for_testing_normalizes_trailing_slash() {
        let config = Config::for_testing("http://127.0.0.1:1234");
        assert_eq!(config.pubmed_base_url, "http://127.0.0.1:1234/");

        let config = Config::for_testing("http://127.0.0.1:1234/");
        assert_eq!(config.pubmed_base_url, "http://127.0.0.1:1234/");
    }

    #[test]
    fn test_debug_hides_token() {
        let config = Config::new("123456:super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("journal_term"));
    }
}
