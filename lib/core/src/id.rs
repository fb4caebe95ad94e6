//! Identity of a message sender.
//!
//! The messaging gateway hands us a stable numeric identifier per person.
//! It is opaque to the core: it only keys session state and per-user locks.

use std::fmt;

/// Opaque, stable identifier of a user talking to the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(u64);

impl UserId {
    const PREFIX: &'static str = "usr";

    /// Wraps a raw gateway identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", Self::PREFIX, self.0)
    }
}
