//! Article fetcher: the listing and abstract operations behind every command.
//!
//! Each call is a single request/parse/filter pass. The fetcher holds no state
//! between calls, so it is cheap to clone and safe to share between chats.

use std::collections::HashSet;

use tracing::{info, instrument, warn};

use crate::client::PubMedClient;
use crate::config::Config;
use crate::error::{ClientError, FetchError, FetchResult};
use crate::models::{Article, DateRange, sort_newest_first};
use crate::parser;

/// Retrieves articles of the configured journal from PubMed.
#[derive(Debug, Clone)]
pub struct ArticleFetcher {
    client: PubMedClient,
    max_articles: u32,
}

impl ArticleFetcher {
    /// Create a fetcher with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the PubMed client cannot be built.
    pub fn new(config: &Config) -> FetchResult<Self> {
        Ok(Self::with_client(PubMedClient::new(config)?, config.max_articles))
    }

    /// Create a fetcher around an existing client.
    #[must_use]
    pub fn with_client(client: PubMedClient, max_articles: u32) -> Self {
        Self { client, max_articles }
    }

    /// List articles published within `range`, newest first.
    ///
    /// Returned articles carry no abstract body, only `has_abstract`.
    #[instrument(skip(self, range), fields(start = %range.start(), end = %range.end()))]
    pub async fn list_articles(&self, range: DateRange) -> FetchResult<Vec<Article>> {
        let html = self.client.fetch_listing(&range).await?;
        let parsed = parser::parse_listing(&html)?;

        if parsed.len() >= self.max_articles as usize {
            warn!(
                count = parsed.len(),
                "Listing reached the page size limit; older articles may be missing"
            );
        }

        let articles = select_articles(parsed, &range);
        info!(count = articles.len(), "Listed articles");
        Ok(articles)
    }

    /// Retrieve a single article, including its abstract.
    ///
    /// Fails with [`FetchError::NotFound`] for unknown or non-numeric PMIDs and
    /// [`FetchError::AbstractUnavailable`] when the article has no abstract.
    #[instrument(skip(self))]
    pub async fn get_abstract(&self, pmid: &str) -> FetchResult<Article> {
        let pmid = pmid.trim();
        if !is_valid_pmid(pmid) {
            return Err(FetchError::not_found(pmid));
        }

        let html = match self.client.fetch_article(pmid).await {
            Ok(html) => html,
            Err(ClientError::NotFound { .. }) => return Err(FetchError::not_found(pmid)),
            Err(err) => return Err(err.into()),
        };

        let article = parser::parse_detail(&html, pmid)?;
        if article.r#abstract.is_none() {
            return Err(FetchError::AbstractUnavailable { pmid: pmid.to_string() });
        }

        info!(title = %article.title, "Fetched abstract");
        Ok(article)
    }
}

/// Keep articles inside `range` and order them newest first.
///
/// A PMID listed more than once keeps its first in-range occurrence.
#[must_use]
pub fn select_articles(articles: Vec<Article>, range: &DateRange) -> Vec<Article> {
    let mut seen = HashSet::new();
    let mut selected: Vec<Article> = articles
        .into_iter()
        .filter(|a| range.contains(a.publication_date))
        .filter(|a| seen.insert(a.pmid.clone()))
        .collect();
    sort_newest_first(&mut selected);
    selected
}

/// PMIDs are short decimal integers.
fn is_valid_pmid(pmid: &str) -> bool {
    !pmid.is_empty() && pmid.len() <= 10 && pmid.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn article(pmid: &str, y: i32, m: u32, d: u32) -> Article {
        Article {
            pmid: pmid.to_string(),
            title: pmid.to_string(),
            publication_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            published: String::new(),
            has_abstract: true,
            r#abstract: None,
            doi: None,
        }
    }

    #[test]
    fn test_select_articles_filters_and_sorts() {
        let range = DateRange::parse("2024-01-01 to 2024-01-31").unwrap();
        let articles = vec![
            article("1", 2024, 1, 5),
            article("2", 2023, 12, 31),
            article("3", 2024, 1, 31),
            article("4", 2024, 2, 1),
            article("5", 2024, 1, 1),
        ];

        let selected = select_articles(articles, &range);
        let pmids: Vec<_> = selected.iter().map(|a| a.pmid.as_str()).collect();
        assert_eq!(pmids, vec!["3", "1", "5"]);
    }

    #[test]
    fn test_select_articles_drops_duplicate_pmids() {
        let range = DateRange::parse("2024-01-01 to 2024-01-31").unwrap();
        let articles = vec![article("1", 2024, 1, 5), article("1", 2024, 1, 5)];
        assert_eq!(select_articles(articles, &range).len(), 1);
    }

    #[test]
    fn test_select_articles_keeps_first_occurrence_of_scattered_duplicates() {
        let range = DateRange::parse("2024-02-01 to 2024-02-29").unwrap();
        let articles = vec![
            article("7", 2024, 2, 24),
            article("8", 2024, 2, 23),
            article("7", 2024, 2, 22),
        ];

        let selected = select_articles(articles, &range);
        let picked: Vec<_> =
            selected.iter().map(|a| (a.pmid.as_str(), a.publication_date)).collect();
        assert_eq!(
            picked,
            vec![
                ("7", NaiveDate::from_ymd_opt(2024, 2, 24).unwrap()),
                ("8", NaiveDate::from_ymd_opt(2024, 2, 23).unwrap()),
            ]
        );
    }

    #[test]
    fn test_select_articles_out_of_range_duplicate_does_not_hide_in_range_one() {
        let range = DateRange::parse("2024-02-01 to 2024-02-29").unwrap();
        let articles = vec![article("7", 2024, 3, 1), article("7", 2024, 2, 22)];

        let selected = select_articles(articles, &range);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].publication_date, NaiveDate::from_ymd_opt(2024, 2, 22).unwrap());
    }

    #[test]
    fn test_pmid_validation() {
        assert!(is_valid_pmid("41014576"));
        assert!(!is_valid_pmid(""));
        assert!(!is_valid_pmid("abc"));
        assert!(!is_valid_pmid("123/../456"));
        assert!(!is_valid_pmid("12345678901234"));
    }
}
