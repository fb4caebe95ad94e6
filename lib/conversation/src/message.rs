//! Inbound messages.

use studio_bot_core::UserId;

/// A text message received from a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Sender.
    pub user: UserId,
    /// Text body, untouched.
    pub text: String,
}

impl InboundMessage {
    /// Creates a message.
    #[must_use]
    pub fn new(user: UserId, text: impl Into<String>) -> Self {
        Self {
            user,
            text: text.into(),
        }
    }

    /// Returns the slash command this message carries, if any.
    #[must_use]
    pub fn command(&self) -> Option<SlashCommand> {
        SlashCommand::parse(&self.text)
    }
}

/// Informational commands handled outside the dialog state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashCommand {
    /// `/start`: greeting and main menu.
    Start,
    /// `/help`: list of what the bot can do.
    Help,
}

impl SlashCommand {
    /// Every command, in the order the client menu shows them.
    pub const ALL: [Self; 2] = [Self::Start, Self::Help];

    /// Command name without the leading slash.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Help => "help",
        }
    }

    /// Short description for the client's command menu.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Start => "начать работу с ботом",
            Self::Help => "что умеет бот",
        }
    }

    /// Parses `/start` or `/help`, tolerating a `@botname` suffix and
    /// trailing arguments.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split_once('@').map_or(name, |(name, _)| name);
        Self::ALL.into_iter().find(|command| command.name() == name)
    }
}
