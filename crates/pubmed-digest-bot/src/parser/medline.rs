//! MEDLINE tagged-text records.
//!
//! Each line is `TAG - value` with the tag left-aligned in a four character
//! column; wrapped values continue on lines indented by six spaces. A record
//! starts at its `PMID` line.

use tracing::warn;

use super::date::{parse_electronic_date, parse_publication_date};
use crate::models::Article;

/// Indentation of a continuation line.
const CONTINUATION: &str = "      ";

/// One MEDLINE record as an ordered list of `(tag, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedlineRecord {
    fields: Vec<(String, String)>,
}

impl MedlineRecord {
    /// First value of `tag`.
    #[must_use]
    pub fn first(&self, tag: &str) -> Option<&str> {
        self.fields.iter().find(|(t, _)| t == tag).map(|(_, v)| v.as_str())
    }

    /// Every value of `tag`, in document order.
    pub fn all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields.iter().filter(move |(t, _)| t == tag).map(|(_, v)| v.as_str())
    }

    /// The record's PMID.
    #[must_use]
    pub fn pmid(&self) -> Option<&str> {
        self.first("PMID")
    }

    /// DOI from the first `LID` or `AID` value tagged `[doi]`.
    #[must_use]
    pub fn doi(&self) -> Option<&str> {
        self.all("LID")
            .chain(self.all("AID"))
            .find_map(|v| v.strip_suffix("[doi]"))
            .map(str::trim)
            .filter(|doi| !doi.is_empty())
    }

    /// Build an article, including the abstract when present.
    ///
    /// Returns `None` when PMID, title or a usable publication date is missing.
    #[must_use]
    pub fn to_article(&self) -> Option<Article> {
        let pmid = self.pmid().filter(|p| !p.is_empty());
        let title = self.first("TI").filter(|t| !t.is_empty());
        let published = self.first("DP");

        let (Some(pmid), Some(title), Some(published)) = (pmid, title, published) else {
            warn!(pmid = ?pmid, title = ?title, date = ?published, "Incomplete MEDLINE record");
            return None;
        };

        let Some((mut publication_date, precise)) = parse_publication_date(published) else {
            warn!(pmid, date = published, "Unparseable publication date");
            return None;
        };
        if !precise {
            if let Some(epub) = self.first("DEP").and_then(parse_electronic_date) {
                publication_date = epub;
            }
        }

        let r#abstract = self.first("AB").filter(|a| !a.is_empty()).map(str::to_string);

        Some(Article {
            pmid: pmid.to_string(),
            title: title.to_string(),
            publication_date,
            published: published.to_string(),
            has_abstract: r#abstract.is_some(),
            r#abstract,
            doi: self.doi().map(str::to_string),
        })
    }

    fn push(&mut self, tag: &str, value: &str) {
        self.fields.push((tag.to_string(), value.trim().to_string()));
    }

    fn extend_last(&mut self, continuation: &str) {
        if let Some((_, value)) = self.fields.last_mut() {
            if !value.is_empty() {
                value.push(' ');
            }
            value.push_str(continuation.trim());
        }
    }

    fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Split MEDLINE text into records.
#[must_use]
pub fn parse_records(text: &str) -> Vec<MedlineRecord> {
    let mut records = Vec::new();
    let mut current = MedlineRecord::default();

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        if let Some((tag, value)) = split_tag(line) {
            if tag == "PMID" && !current.is_empty() {
                records.push(std::mem::take(&mut current));
            }
            current.push(tag, value);
        } else if line.starts_with(CONTINUATION) {
            current.extend_last(line);
        }
    }

    if !current.is_empty() {
        records.push(current);
    }

    // Anything before the first PMID line is not a record.
    records.retain(|r| r.pmid().is_some());
    records
}

/// `"TI  - Title"` -> `("TI", "Title")`.
fn split_tag(line: &str) -> Option<(&str, &str)> {
    let tag = line.get(..4)?.trim_end();
    if line.get(4..6)? != "- " || tag.is_empty() {
        return None;
    }
    if !tag.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return None;
    }
    Some((tag, line.get(6..).unwrap_or_default()))
}
