//! PubMed Digest Bot - Entry Point
//!
//! Runs the Telegram long-polling dispatcher alongside a health check server.

use clap::Parser;
use teloxide::Bot;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pubmed_digest_bot::{bot, bot::DigestService, config::Config, config::pubmed, server};

#[derive(Parser, Debug)]
#[command(name = "pubmed-digest-bot")]
#[command(about = "Telegram bot relaying recent PubMed articles of a journal")]
#[command(version)]
struct Cli {
    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    bot_token: String,

    /// Health check server port
    #[arg(long, default_value = "5000", env = "PORT")]
    port: u16,

    /// PubMed base URL
    #[arg(long, default_value = pubmed::BASE_URL, env = "PUBMED_BASE_URL")]
    pubmed_base_url: String,

    /// PubMed journal search term
    #[arg(long, default_value = pubmed::JOURNAL_TERM, env = "JOURNAL_TERM")]
    journal_term: String,

    /// Journal name shown in messages
    #[arg(long, default_value = pubmed::JOURNAL_NAME, env = "JOURNAL_NAME")]
    journal_name: String,

    /// Days covered by /articles
    #[arg(long, default_value_t = pubmed::DAYS_BACK, env = "DAYS_BACK")]
    days_back: u32,

    /// Maximum articles requested per listing
    #[arg(long, default_value_t = pubmed::MAX_ARTICLES, env = "MAX_ARTICLES")]
    max_articles: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            pubmed_base_url: self.pubmed_base_url,
            journal_term: self.journal_term,
            journal_name: self.journal_name,
            days_back: self.days_back,
            max_articles: self.max_articles,
            health_port: self.port,
            ..Config::new(self.bot_token)
        }
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let config = cli.into_config();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        journal = %config.journal_term,
        "Starting PubMed digest bot"
    );

    let service = DigestService::new(&config)?;
    let listener = server::bind(config.health_port).await?;
    let health = server::spawn_health_server(listener);

    bot::run(Bot::new(&config.bot_token), service).await;

    health.abort();
    Ok(())
}
