//! Article data model built from PubMed MEDLINE records.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// PubMed article page prefix.
const PUBMED_ARTICLE_URL: &str = "https://pubmed.ncbi.nlm.nih.gov";

/// Publisher (Wiley / ASCPT) DOI resolver prefix.
const PUBLISHER_DOI_URL: &str = "https://ascpt.onlinelibrary.wiley.com/doi";

/// A journal article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// PubMed identifier.
    pub pmid: String,

    /// Full title.
    pub title: String,

    /// Calendar date used for filtering and ordering.
    pub publication_date: NaiveDate,

    /// Publication date as printed by PubMed (e.g. "2024 Jan 15").
    pub published: String,

    /// Whether PubMed holds an abstract for this article.
    pub has_abstract: bool,

    /// Abstract text; only populated by abstract lookups.
    #[serde(default)]
    pub r#abstract: Option<String>,

    /// Digital Object Identifier.
    #[serde(default)]
    pub doi: Option<String>,
}

/// Outbound links for an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleLinks {
    /// PubMed page.
    pub pubmed: String,

    /// Publisher full-text page, when a DOI is known.
    pub publisher: Option<String>,
}

impl Article {
    /// Links to PubMed and the publisher.
    #[must_use]
    pub fn links(&self) -> ArticleLinks {
        ArticleLinks {
            pubmed: format!("{PUBMED_ARTICLE_URL}/{}/", self.pmid),
            publisher: self.doi.as_ref().map(|doi| format!("{PUBLISHER_DOI_URL}/{doi}")),
        }
    }

    /// Drop the abstract body, keeping only its availability flag.
    #[must_use]
    pub fn into_summary(mut self) -> Self {
        self.has_abstract = self.r#abstract.is_some();
        self.r#abstract = None;
        self
    }

    /// Newest-first ordering; equal dates put the higher PMID first.
    #[must_use]
    pub fn newest_first(&self, other: &Self) -> Ordering {
        other
            .publication_date
            .cmp(&self.publication_date)
            .then_with(|| pmid_key(&other.pmid).cmp(&pmid_key(&self.pmid)))
    }
}

/// Sort articles newest first.
pub fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(Article::newest_first);
}

/// Numeric ordering key for PMIDs without parsing overflow concerns.
fn pmid_key(pmid: &str) -> (usize, &str) {
    let trimmed = pmid.trim_start_matches('0');
    (trimmed.len(), trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(pmid: &str, date: (i32, u32, u32)) -> Article {
        Article {
            pmid: pmid.to_string(),
            title: format!("Article {pmid}"),
            publication_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            published: String::new(),
            has_abstract: false,
            r#abstract: None,
            doi: None,
        }
    }

    #[test]
    fn test_links_without_doi() {
        let links = article("41014576", (2025, 9, 26)).links();
        assert_eq!(links.pubmed, "https://pubmed.ncbi.nlm.nih.gov/41014576/");
        assert!(links.publisher.is_none());
    }

    #[test]
    fn test_links_with_doi() {
        let mut a = article("41014576", (2025, 9, 26));
        a.doi = Some("10.1002/psp4.70100".to_string());
        assert_eq!(
            a.links().publisher.as_deref(),
            Some("https://ascpt.onlinelibrary.wiley.com/doi/10.1002/psp4.70100")
        );
    }

    #[test]
    fn test_sort_newest_first_breaks_ties_by_pmid() {
        let mut articles = vec![
            article("9", (2024, 1, 10)),
            article("100", (2024, 1, 10)),
            article("50", (2024, 1, 20)),
            article("7", (2023, 12, 31)),
        ];
        sort_newest_first(&mut articles);
        let order: Vec<_> = articles.iter().map(|a| a.pmid.as_str()).collect();
        assert_eq!(order, vec!["50", "100", "9", "7"]);
    }

    #[test]
    fn test_into_summary_keeps_availability() {
        let mut a = article("1", (2024, 1, 1));
        a.r#abstract = Some("Background: ...".to_string());
        let summary = a.into_summary();
        assert!(summary.has_abstract);
        assert!(summary.r#abstract.is_none());
    }
}
