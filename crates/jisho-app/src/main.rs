use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use jisho_config::Config;
use jisho_discord::{DiscordApiClient, Gateway};
use jisho_lookup::JishoClient;
use tokio::signal;

pub mod controller;
pub mod events;
pub mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

/// Discord bot that looks words up on Jisho and pages through the results
#[derive(Parser, Debug)]
#[command(name = "jisho-bot", version)]
struct Cli {
    /// Bot token, overrides DISCORD_TOKEN
    #[arg(short, long)]
    token: Option<String>,

    /// Single-character command prefix, overrides COMMAND_PREFIX
    #[arg(short, long)]
    prefix: Option<String>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(verbose: bool, json: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let mut config = Config::new();
    if let Some(token) = cli.token {
        config.discord.token = token;
    }
    if let Some(prefix) = cli.prefix {
        config.command.prefix = prefix;
    }
    config.validate()?;

    let api = Arc::new(DiscordApiClient::new(
        config.discord.token.clone(),
        config.discord.api_base.clone(),
    ));
    let (owner, username) = api
        .current_user()
        .await
        .context("failed to resolve the bot's own identity")?;
    tracing::info!(
        bot = %username,
        invite_url = %jisho_discord::invite_url(owner.as_str()),
        "Invite the bot with this link"
    );

    let lookup = JishoClient::new(
        config.lookup.api_url.clone(),
        Duration::from_secs(config.lookup.timeout_seconds),
    )?;
    let activity = format!(
        "Try {}{} search house",
        config.command.prefix, config.command.namespace
    );
    let gateway = Arc::new(Gateway::new(config.discord.clone()).with_activity(activity));

    let state = Arc::new(AppState::new(config, owner, Arc::new(lookup), api));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(gateway);

    // Shutdown future (Ctrl+C)
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl+c: {e}");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("Shutdown requested"),
        _ = controller.cancelled() => {}
    }
    controller.shutdown();

    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("task exited with error: {e}"),
            Err(e) => tracing::error!("task panicked: {e}"),
        }
    }

    tracing::info!("Bye");
    Ok(())
}
