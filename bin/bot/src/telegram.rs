//! Telegram transport.
//!
//! Long-polls the Bot API, feeds every text message to the dialog router and
//! sends back the rendered reply. Sessions are keyed by the sender, so members
//! of a group chat each get their own dialog; replies go to the chat. Failures are per message: a storage error
//! is logged and answered with a retry hint, and the dispatcher moves on.

use std::sync::Arc;
use studio_bot_conversation::{
    DialogRouter, InMemorySessionStore, InboundMessage, Keyboard, Reply, Schedule, SlashCommand,
};
use studio_bot_core::UserId;
use studio_bot_records::FileRecordStore;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, KeyboardButton, KeyboardMarkup, KeyboardRemove, ReplyMarkup};
use tracing::{debug, error, info, warn};

/// The router as wired for production.
pub type StudioRouter = DialogRouter<InMemorySessionStore, FileRecordStore>;

/// The client command menu, built from the commands the router answers.
#[must_use]
pub fn bot_commands() -> Vec<BotCommand> {
    SlashCommand::ALL
        .iter()
        .map(|command| BotCommand::new(command.name(), command.description()))
        .collect()
}

/// The sender of a message. Channel posts and other anonymous messages
/// have none.
#[must_use]
pub fn sender_id(msg: &Message) -> Option<UserId> {
    msg.from.as_ref().map(|user| UserId::new(user.id.0))
}

/// Builds the Telegram markup for a keyboard selector.
#[must_use]
pub fn reply_markup(keyboard: Keyboard, schedule: &Schedule) -> ReplyMarkup {
    match keyboard.buttons(schedule) {
        Some(labels) => ReplyMarkup::Keyboard(
            KeyboardMarkup::new(
                labels
                    .into_iter()
                    .map(|label| vec![KeyboardButton::new(label)]),
            )
            .resize_keyboard(),
        ),
        None => ReplyMarkup::KeyboardRemove(KeyboardRemove::new()),
    }
}

async fn handle_message(bot: Bot, msg: Message, router: Arc<StudioRouter>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        debug!(chat = %msg.chat.id, "ignoring non-text message");
        return Ok(());
    };

    let Some(user) = sender_id(&msg) else {
        debug!(chat = %msg.chat.id, "ignoring message without a sender");
        return Ok(());
    };

    let inbound = InboundMessage::new(user, text);
    let reply = match router.respond(&inbound).await {
        Ok(reply) => reply,
        Err(report) => {
            error!(user = %inbound.user, error = %report, "failed to handle message");
            Reply::storage_failure()
        }
    };

    let mut request = bot.send_message(msg.chat.id, reply.text);
    if let Some(keyboard) = reply.keyboard {
        request = request.reply_markup(reply_markup(keyboard, router.schedule()));
    }
    request.await?;
    Ok(())
}

/// Runs the long-polling dispatcher until Ctrl-C.
pub async fn run(bot: Bot, router: Arc<StudioRouter>) {
    if let Err(e) = bot.set_my_commands(bot_commands()).await {
        warn!(error = %e, "failed to register bot commands");
    }

    info!("starting dispatcher");
    let handler = Update::filter_message().endpoint(handle_message);
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![router])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    info!("dispatcher stopped");
}
