//! Removes the bot's webhook registration.
//!
//! Telegram refuses long polling while a webhook is set. Run this once when
//! moving a token from a webhook deployment to `studio-bot`.

use studio_bot::config::BotConfig;
use teloxide::prelude::*;

#[tokio::main]
async fn main() {
    studio_bot::init_tracing();

    let config = BotConfig::load().expect("failed to load configuration");
    let bot = Bot::new(config.telegram_token);

    match bot.delete_webhook().await {
        Ok(_) => tracing::info!("Webhook deleted"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete webhook");
            std::process::exit(1);
        }
    }
}
