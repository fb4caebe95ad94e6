use std::sync::Arc;
use studio_bot::config::BotConfig;
use studio_bot::telegram;
use studio_bot_conversation::{DialogRouter, InMemorySessionStore};
use studio_bot_records::FileRecordStore;
use teloxide::Bot;

#[tokio::main]
async fn main() {
    studio_bot::init_tracing();

    let config = BotConfig::load().expect("failed to load configuration");
    tracing::info!(
        reservations = %config.storage.reservations_path.display(),
        feedback = %config.storage.feedback_path.display(),
        classes = config.schedule.classes().len(),
        "Loaded configuration"
    );

    let records = FileRecordStore::new(
        config.storage.reservations_path,
        config.storage.feedback_path,
    );
    let router = Arc::new(DialogRouter::new(
        InMemorySessionStore::new(),
        records,
        config.schedule,
    ));

    let bot = Bot::new(config.telegram_token);
    telegram::run(bot, router).await;
}
