//! Slash command entity.

/// A chat slash command. Commands are purely suggestible strings: the chat
/// panel offers them for completion but attaches no behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlashCommand {
    command: &'static str,
}

impl SlashCommand {
    #[must_use]
    pub const fn new(command: &'static str) -> Self {
        Self { command }
    }

    #[must_use]
    pub const fn command(&self) -> &'static str {
        self.command
    }

    /// Prefix match against a partial command including its leading slash.
    #[must_use]
    pub fn matches_prefix(&self, partial: &str) -> bool {
        self.command.starts_with(partial)
    }
}

impl std::fmt::Display for SlashCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.command)
    }
}

/// The fixed command set offered by the chat panel.
pub const COMMANDS: &[SlashCommand] = &[
    SlashCommand::new("/mute"),
    SlashCommand::new("/ban"),
    SlashCommand::new("/title"),
    SlashCommand::new("/description"),
];
