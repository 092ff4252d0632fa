//! Telegram MarkdownV2 output formatting.
//!
//! Every piece of scraped text goes through [`markdown::escape`]; MarkdownV2
//! rejects unescaped `.`, `-`, `(` and friends.

use teloxide::utils::markdown;

use crate::config::telegram::{ARTICLES_PER_MESSAGE, MAX_ABSTRACT_CHARS, MAX_MESSAGE_LEN};
use crate::models::Article;

/// Example PMID used in usage texts.
const EXAMPLE_PMID: &str = "41014576";

/// Help text for `/start`.
#[must_use]
pub fn help_text(journal_name: &str) -> String {
    markdown::escape(&format!(
        "🔬 {journal_name} Bot\n\n\
         Available Commands:\n\
         • /articles - Get articles from the past month\n\
         • /custom - Get articles from custom date range\n\
         • /abstract <PMID> - Get abstract for specific article\n\n\
         Example: /abstract {EXAMPLE_PMID}"
    ))
}

/// Prompt sent by `/custom` without arguments.
#[must_use]
pub fn custom_range_prompt() -> String {
    markdown::escape(
        "📅 Custom Date Range\n\n\
         Please send the date range in the format:\n\
         YYYY-MM-DD to YYYY-MM-DD\n\n\
         Example: 2025-01-01 to 2025-01-31",
    )
}

/// Usage text for `/abstract` without a PMID.
#[must_use]
pub fn abstract_usage() -> String {
    markdown::escape(&format!(
        "📄 Abstract Lookup\n\n\
         Please provide a PMID to get the abstract.\n\
         Usage: /abstract <PMID>\n\n\
         Example: /abstract {EXAMPLE_PMID}"
    ))
}

/// Format a listing as one or more messages of at most
/// [`ARTICLES_PER_MESSAGE`] articles each. The heading goes on the first one.
#[must_use]
pub fn format_listing(articles: &[Article], heading: &str) -> Vec<String> {
    articles
        .chunks(ARTICLES_PER_MESSAGE)
        .enumerate()
        .map(|(chunk_index, chunk)| {
            let mut output = String::new();
            if chunk_index == 0 {
                output.push_str(&markdown::bold(&markdown::escape(&format!("📚 {heading}"))));
                output.push_str("\n\n");
            }

            let first_number = chunk_index * ARTICLES_PER_MESSAGE + 1;
            for (number, article) in (first_number..).zip(chunk) {
                output.push_str(&format_listing_entry(article, number));
            }

            output.trim_end().to_string()
        })
        .collect()
}

fn format_listing_entry(article: &Article, number: usize) -> String {
    let mut entry = markdown::escape(&format!("{number}. PMID: {}\n", article.pmid));
    entry.push_str(&markdown::escape(&format!("Date: {}\n", article.published)));
    entry.push_str(&format!("Title: {}\n", markdown::italic(&markdown::escape(&article.title))));

    if article.has_abstract {
        entry.push_str(&format!("Abstract: /abstract {}\n\n", markdown::escape(&article.pmid)));
    } else {
        entry.push_str("Abstract: not available\n\n");
    }

    entry
}

/// Format an article with its abstract as a single message.
///
/// Long abstracts are shortened until the message fits Telegram's limit.
#[must_use]
pub fn format_abstract(article: &Article) -> String {
    let mut limit = MAX_ABSTRACT_CHARS;
    loop {
        let message = render_abstract(article, limit);
        if limit == 0 || message.chars().count() <= MAX_MESSAGE_LEN {
            return message;
        }
        limit /= 2;
    }
}

fn render_abstract(article: &Article, abstract_limit: usize) -> String {
    let links = article.links();
    let mut output = markdown::bold(&markdown::escape(&format!(
        "📄 Abstract for PMID {}",
        article.pmid
    )));
    output.push_str("\n\n");

    output.push_str(&format!(
        "{} {}\n\n",
        markdown::bold("Title:"),
        markdown::italic(&markdown::escape(&article.title))
    ));
    output.push_str(&format!(
        "{} {}\n\n",
        markdown::bold("Date:"),
        markdown::escape(&article.published)
    ));

    if let Some(text) = &article.r#abstract {
        output.push_str(&markdown::bold("Abstract:"));
        output.push('\n');
        output.push_str(&markdown::escape(&truncate_chars(text, abstract_limit)));
        output.push_str("\n\n");
    }

    output.push_str(&format!("🔗 {}", link(&links.pubmed, "View on PubMed")));
    if let Some(publisher) = &links.publisher {
        output.push_str(&format!("\n🔗 {}", link(publisher, "View Full Article")));
    }

    output
}

fn link(url: &str, text: &str) -> String {
    markdown::link(&markdown::escape_link_url(url), &markdown::escape(text))
}

/// Cut `text` to at most `max` characters, on a word boundary where possible.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let cut: String = text.chars().take(max).collect();
    let cut = match cut.rfind(char::is_whitespace) {
        Some(index) if index > 0 => &cut[..index],
        _ => cut.as_str(),
    };
    format!("{}…", cut.trim_end())
}
