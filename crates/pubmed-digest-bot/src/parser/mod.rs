//! PubMed page parsing.
//!
//! PubMed's `format=pubmed` pages embed MEDLINE text inside `<pre>` blocks:
//! `pre.search-results-chunk` on search listings and `pre#article-details`
//! on single article pages. Everything here is synchronous and free of I/O.

mod date;
mod medline;

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

pub use date::{parse_electronic_date, parse_publication_date};
pub use medline::{MedlineRecord, parse_records};

use crate::error::{FetchError, FetchResult};
use crate::models::Article;

static RESULTS_CHUNK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("pre.search-results-chunk").expect("valid selector"));

static ARTICLE_DETAILS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("pre#article-details, pre.article-details").expect("valid selector")
});

static RESULT_COUNT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="log_resultcount"]"#).expect("valid selector"));

static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("valid selector"));

/// Text PubMed shows when a search matches nothing.
const NO_RESULTS_TEXT: &str = "No results were found";

/// Parse a search listing page into articles (abstract bodies stripped).
///
/// Articles are returned in page order.
pub fn parse_listing(html: &str) -> FetchResult<Vec<Article>> {
    let document = Html::parse_document(html);
    let chunks: Vec<String> = document.select(&RESULTS_CHUNK).map(element_text).collect();

    if chunks.is_empty() {
        if is_empty_result_page(&document) {
            debug!("PubMed reported no results");
            return Ok(Vec::new());
        }
        return Err(FetchError::parse("listing page has no search results block"));
    }

    let records: Vec<MedlineRecord> = chunks.iter().flat_map(|c| parse_records(c)).collect();
    if records.is_empty() {
        if chunks.iter().all(|c| c.trim().is_empty()) {
            return Ok(Vec::new());
        }
        return Err(FetchError::parse("search results block contains no MEDLINE records"));
    }

    let articles: Vec<Article> =
        records.iter().filter_map(MedlineRecord::to_article).map(Article::into_summary).collect();
    if articles.is_empty() {
        return Err(FetchError::parse(format!(
            "none of {} MEDLINE records has a PMID, title and publication date",
            records.len()
        )));
    }

    info!(records = records.len(), count = articles.len(), "Parsed PubMed listing");
    Ok(articles)
}

/// Parse a single article page and return the article with its abstract.
pub fn parse_detail(html: &str, pmid: &str) -> FetchResult<Article> {
    let document = Html::parse_document(html);
    let Some(details) = document.select(&ARTICLE_DETAILS).next() else {
        return Err(FetchError::parse("article page has no details block"));
    };

    let record = parse_records(&element_text(details))
        .into_iter()
        .find(|r| r.pmid() == Some(pmid))
        .ok_or_else(|| FetchError::not_found(pmid))?;

    record
        .to_article()
        .ok_or_else(|| FetchError::parse(format!("record for PMID {pmid} is incomplete")))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn is_empty_result_page(document: &Html) -> bool {
    let zero_count = document
        .select(&RESULT_COUNT)
        .filter_map(|meta| meta.value().attr("content"))
        .any(|count| count.trim() == "0");

    zero_count
        || document.select(&BODY).any(|body| element_text(body).contains(NO_RESULTS_TEXT))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(body: &str) -> String {
        format!(
            "<html><head><title>PubMed</title></head><body>\
             <pre class=\"search-results-chunk\">{body}</pre></body></html>"
        )
    }

    #[test]
    fn test_listing_strips_abstracts() {
        let html = listing("PMID- 1\nTI  - A &amp; B\nDP  - 2024 Jan 2\nAB  - Text\n");
        let articles = parse_listing(&html).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "A & B");
        assert!(articles[0].has_abstract);
        assert!(articles[0].r#abstract.is_none());
    }

    #[test]
    fn test_listing_without_results_block_is_parse_failure() {
        let err = parse_listing("<html><body><p>Maintenance</p></body></html>").unwrap_err();
        assert!(matches!(err, FetchError::ParseFailure { .. }));
    }

    #[test]
    fn test_listing_empty_result_page() {
        let html = r#"<html><head><meta name="log_resultcount" content="0"></head>
            <body><div class="results-amount">No results</div></body></html>"#;
        assert!(parse_listing(html).unwrap().is_empty());

        let html = "<html><body><em>No results were found.</em></body></html>";
        assert!(parse_listing(html).unwrap().is_empty());
    }

    #[test]
    fn test_listing_with_only_garbage_is_parse_failure() {
        let err = parse_listing(&listing("<b>something else</b>")).unwrap_err();
        assert!(matches!(err, FetchError::ParseFailure { .. }));
    }

    #[test]
    fn test_detail_missing_pmid_is_not_found() {
        let html = "<html><body><pre id=\"article-details\" class=\"article-details\">\
                    PMID- 2\nTI  - T\nDP  - 2024\n</pre></body></html>";
        let err = parse_detail(html, "3").unwrap_err();
        assert!(matches!(err, FetchError::NotFound { ref pmid } if pmid == "3"));
    }

    #[test]
    fn test_detail_without_block_is_parse_failure() {
        let err = parse_detail("<html><body></body></html>", "3").unwrap_err();
        assert!(matches!(err, FetchError::ParseFailure { .. }));
    }
}
