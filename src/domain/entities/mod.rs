//! Domain entity definitions.

mod chat_message;
mod emoji;
mod slash_command;
mod user;
mod view_params;

pub use chat_message::ChatMessage;
pub use emoji::{Emoji, EmojiSkin, FALLBACK_GLYPH};
pub use slash_command::{COMMANDS, SlashCommand};
pub use user::{UserId, UserRecord};
pub use view_params::{PAGE_SIZE, StatusFilter, ViewParams};
