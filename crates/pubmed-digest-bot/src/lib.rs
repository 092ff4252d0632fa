//! PubMed Journal Digest Bot
//!
//! A Telegram bot that scrapes PubMed for the recently published articles of a
//! single journal and relays their metadata and abstracts to users on request.
//!
//! # Features
//!
//! - **Listings**: articles of the past month or of a custom date range, newest first
//! - **Abstracts**: on-demand abstract lookup by PMID
//! - **Stateless**: every command is one request/parse/filter pass, nothing is cached
//! - **Health endpoint**: small HTTP server for container liveness probes
//!
//! # Example
//!
//! ```no_run
//! use pubmed_digest_bot::{config::Config, fetcher::ArticleFetcher, models::DateRange};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::new(std::env::var("TELEGRAM_BOT_TOKEN")?);
//!     let fetcher = ArticleFetcher::new(&config)?;
//!
//!     let today = chrono::Local::now().date_naive();
//!     let articles = fetcher.list_articles(DateRange::past_days(today, 30)).await?;
//!     println!("{} articles", articles.len());
//!     Ok(())
//! }
//! ```

pub mod bot;
pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod formatters;
pub mod models;
pub mod parser;
pub mod server;

pub use client::PubMedClient;
pub use config::Config;
pub use error::{ClientError, FetchError};
pub use fetcher::ArticleFetcher;
