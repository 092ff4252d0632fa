//! Bot command surface.

use teloxide::utils::command::BotCommands;

/// Commands understood by the bot.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    /// Static help text.
    #[command(description = "show help")]
    Start,

    /// Articles from the past month.
    #[command(description = "get articles from the past month")]
    Articles,

    /// Articles from a custom range; prompts when no range is given.
    #[command(description = "get articles from a custom date range")]
    Custom(String),

    /// Abstract lookup by PMID.
    #[command(description = "get the abstract for a PMID")]
    Abstract(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_commands() {
        assert_eq!(Command::parse("/start", "bot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/articles", "bot").unwrap(), Command::Articles);
    }

    #[test]
    fn test_parse_commands_with_arguments() {
        assert_eq!(
            Command::parse("/abstract 41014576", "bot").unwrap(),
            Command::Abstract("41014576".to_string())
        );
        assert_eq!(
            Command::parse("/custom 2025-01-01 to 2025-01-31", "bot").unwrap(),
            Command::Custom("2025-01-01 to 2025-01-31".to_string())
        );
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(Command::parse("/unsubscribe", "bot").is_err());
    }
}
