//! studio-bot: a Telegram assistant for a dance studio.
//!
//! Wires the dialog router from `studio-bot-conversation` to the Telegram
//! Bot API. Two binaries use this crate: `studio-bot`, the long-polling bot,
//! and `delete-webhook`, which clears a stale webhook registration so that
//! long polling can take over.

pub mod config;
pub mod telegram;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global tracing subscriber. `RUST_LOG` overrides the default
/// `info` filter.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
