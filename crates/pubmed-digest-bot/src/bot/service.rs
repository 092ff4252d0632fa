//! Command logic, independent of the Telegram transport.
//!
//! Every method returns the MarkdownV2 messages to send. Fetch failures are
//! turned into chat messages here and never escape a single command.

use chrono::NaiveDate;
use teloxide::utils::markdown;
use tracing::{error, info};

use crate::config::Config;
use crate::error::{FetchError, FetchResult};
use crate::fetcher::ArticleFetcher;
use crate::formatters;
use crate::models::DateRange;

/// Which window a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Rolling default window ending today.
    PastMonth(DateRange),
    /// Range typed by the user.
    Custom(DateRange),
}

impl Period {
    /// The underlying date range.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        match self {
            Self::PastMonth(range) | Self::Custom(range) => *range,
        }
    }

    fn label(&self) -> String {
        match self {
            Self::PastMonth(_) => "Past Month".to_string(),
            Self::Custom(range) => range.to_string(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::PastMonth(_) => "the past month".to_string(),
            Self::Custom(range) => format!("the period {range}"),
        }
    }
}

/// Builds the replies for every bot command.
#[derive(Debug, Clone)]
pub struct DigestService {
    fetcher: ArticleFetcher,
    journal_name: String,
    days_back: u32,
}

impl DigestService {
    /// Create a service from configuration.
    pub fn new(config: &Config) -> FetchResult<Self> {
        Ok(Self::with_fetcher(ArticleFetcher::new(config)?, config))
    }

    /// Create a service around an existing fetcher.
    #[must_use]
    pub fn with_fetcher(fetcher: ArticleFetcher, config: &Config) -> Self {
        Self { fetcher, journal_name: config.journal_name.clone(), days_back: config.days_back }
    }

    /// Reply to `/start`.
    #[must_use]
    pub fn help(&self) -> String {
        formatters::help_text(&self.journal_name)
    }

    /// The `/articles` window for `today`.
    #[must_use]
    pub fn past_month(&self, today: NaiveDate) -> Period {
        Period::PastMonth(DateRange::past_days(today, self.days_back))
    }

    /// Interpret free text (or `/custom` arguments) as a date range.
    pub fn custom_period(&self, text: &str) -> FetchResult<Period> {
        DateRange::parse(text).map(Period::Custom)
    }

    /// Progress message sent before a listing fetch.
    #[must_use]
    pub fn listing_progress(&self, period: &Period) -> String {
        markdown::escape(&format!("🔄 Fetching articles from {}...", period.describe()))
    }

    /// Progress message sent before an abstract fetch.
    #[must_use]
    pub fn abstract_progress(&self, pmid: &str) -> String {
        markdown::escape(&format!("🔄 Fetching abstract for PMID {}...", pmid.trim()))
    }

    /// Fetch and format a listing.
    pub async fn listing(&self, period: &Period) -> Vec<String> {
        match self.fetcher.list_articles(period.range()).await {
            Ok(articles) if articles.is_empty() => {
                vec![markdown::escape(&format!("❌ No articles found for {}.", period.describe()))]
            }
            Ok(articles) => {
                info!(count = articles.len(), period = %period.label(), "Sending listing");
                let heading = format!("{} Articles ({})", self.journal_name, period.label());
                formatters::format_listing(&articles, &heading)
            }
            Err(err) => vec![error_reply(&err)],
        }
    }

    /// Fetch and format an abstract; an empty PMID yields usage help.
    pub async fn abstract_reply(&self, pmid: &str) -> String {
        let pmid = pmid.trim();
        if pmid.is_empty() {
            return formatters::abstract_usage();
        }

        match self.fetcher.get_abstract(pmid).await {
            Ok(article) => formatters::format_abstract(&article),
            Err(err) => error_reply(&err),
        }
    }
}

/// Chat text for a failed command.
#[must_use]
pub fn error_reply(err: &FetchError) -> String {
    match err {
        FetchError::SourceUnavailable(_) | FetchError::ParseFailure { .. } => {
            error!(error = %err, "Command failed");
        }
        _ => info!(error = %err, "Command rejected"),
    }
    markdown::escape(&format!("❌ {}", err.to_user_message()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> DigestService {
        DigestService::new(&Config::for_testing("http://127.0.0.1:9")).unwrap()
    }

    #[test]
    fn test_past_month_uses_days_back() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let period = service().past_month(today);
        assert_eq!(period.range().end(), today);
        assert_eq!(period.range().start(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(period.label(), "Past Month");
    }

    #[test]
    fn test_custom_period_label() {
        let period = service().custom_period("2025-01-01 to 2025-01-31").unwrap();
        assert_eq!(period.label(), "2025-01-01 to 2025-01-31");
        assert!(service().listing_progress(&period).contains("2025\\-01\\-01"));
    }

    #[test]
    fn test_custom_period_rejects_garbage() {
        assert!(matches!(
            service().custom_period("next week"),
            Err(FetchError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_error_reply_is_escaped() {
        let reply = error_reply(&FetchError::not_found("42"));
        assert!(reply.starts_with("❌"));
        assert!(reply.ends_with("\\."));
    }
}
