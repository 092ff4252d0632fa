//! Output formatting for chat messages.

pub mod markdown;

pub use markdown::{
    abstract_usage, custom_range_prompt, format_abstract, format_listing, help_text,
    truncate_chars,
};
