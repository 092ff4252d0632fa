//! Data models for PubMed articles and date windows.
//!
//! Articles are transient: built fresh from every fetch and dropped once the
//! reply has been sent.

mod article;
mod range;

pub use article::{Article, ArticleLinks, sort_newest_first};
pub use range::DateRange;
