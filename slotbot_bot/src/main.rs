use std::sync::Arc;

use clap::Parser;
use rand::rngs::StdRng;
use teloxide::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use slotbot_bot::{reply, Command, Config, Game};
use slotbot_core::RandSource;
use slotbot_shared::SqliteLedger;

type LiveGame = Game<SqliteLedger, RandSource<StdRng>>;

async fn answer(bot: Bot, msg: Message, cmd: Command, game: Arc<LiveGame>) -> ResponseResult<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let Ok(user_id) = i64::try_from(user.id.0) else {
        warn!(user_id = user.id.0, "user id out of range, ignoring");
        return Ok(());
    };

    let text = match game.handle(user_id, cmd).await {
        Ok(text) => text,
        Err(e) => {
            error!(user_id, ?cmd, error = %e, "command failed");
            reply::STORE_FAILURE.to_string()
        }
    };
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    config.validate()?;

    let ledger = SqliteLedger::connect(&config.database_url, config.starting_balance).await?;
    info!(
        database_url = %config.database_url,
        spin_fee = config.spin_fee,
        win_payout = config.win_payout,
        "ledger ready"
    );

    let game: Arc<LiveGame> = Arc::new(Game::new(
        ledger,
        RandSource::from_entropy(),
        config.payout_policy(),
    ));

    let bot = Bot::new(config.bot_token);
    let handler = Update::filter_message()
        .filter_command::<Command>()
        .endpoint(answer);

    info!("polling for updates");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![game])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    Ok(())
}
