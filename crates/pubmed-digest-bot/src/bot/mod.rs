//! Telegram adapter.
//!
//! Routes commands and free-text range replies from teloxide's dispatcher to
//! [`DigestService`] and sends back whatever it produces.

mod commands;
mod service;

pub use commands::Command;
pub use service::{DigestService, Period, error_reply};

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{LinkPreviewOptions, ParseMode};
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

/// Run the long-polling dispatcher until Ctrl+C.
pub async fn run(bot: Bot, service: DigestService) {
    if let Err(err) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %err, "Failed to register bot commands");
    }

    let handler = Update::filter_message()
        .branch(dptree::entry().filter_command::<Command>().endpoint(handle_command))
        .branch(dptree::filter(is_plain_text).endpoint(handle_text));

    info!("Starting Telegram dispatcher");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![Arc::new(service)])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    info!("Telegram dispatcher stopped");
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    service: Arc<DigestService>,
) -> ResponseResult<()> {
    info!(chat_id = %msg.chat.id, command = ?cmd, "Command received");

    match cmd {
        Command::Start => {
            send(&bot, msg.chat.id, service.help()).await?;
        }
        Command::Articles => {
            let period = service.past_month(chrono::Local::now().date_naive());
            send_listing(&bot, msg.chat.id, &service, &period).await?;
        }
        Command::Custom(args) if args.trim().is_empty() => {
            send(&bot, msg.chat.id, crate::formatters::custom_range_prompt()).await?;
        }
        Command::Custom(args) => {
            send_custom_listing(&bot, msg.chat.id, &service, &args).await?;
        }
        Command::Abstract(pmid) => {
            if !pmid.trim().is_empty() {
                send(&bot, msg.chat.id, service.abstract_progress(&pmid)).await?;
            }
            send(&bot, msg.chat.id, service.abstract_reply(&pmid).await).await?;
        }
    }

    Ok(())
}

/// Any plain text message is read as a date range reply to `/custom`.
async fn handle_text(bot: Bot, msg: Message, service: Arc<DigestService>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    info!(chat_id = %msg.chat.id, "Date range received");
    send_custom_listing(&bot, msg.chat.id, &service, text).await
}

async fn send_custom_listing(
    bot: &Bot,
    chat_id: ChatId,
    service: &DigestService,
    text: &str,
) -> ResponseResult<()> {
    match service.custom_period(text) {
        Ok(period) => send_listing(bot, chat_id, service, &period).await,
        Err(err) => send(bot, chat_id, error_reply(&err)).await,
    }
}

async fn send_listing(
    bot: &Bot,
    chat_id: ChatId,
    service: &DigestService,
    period: &Period,
) -> ResponseResult<()> {
    send(bot, chat_id, service.listing_progress(period)).await?;
    for message in service.listing(period).await {
        send(bot, chat_id, message).await?;
    }
    Ok(())
}

async fn send(bot: &Bot, chat_id: ChatId, text: String) -> ResponseResult<()> {
    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::MarkdownV2)
        .link_preview_options(no_link_preview())
        .await?;
    Ok(())
}

fn is_plain_text(msg: Message) -> bool {
    msg.text().is_some_and(|text| !text.starts_with('/'))
}

fn no_link_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}
