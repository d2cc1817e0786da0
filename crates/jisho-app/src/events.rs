use std::sync::Arc;

use jisho_core::{Command, parse_command};
use jisho_types::{BotEvent, IncomingMessage};
use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod reaction;
pub mod search;
pub mod shutdown;

use reaction::handle_reaction;
use search::handle_search;
use shutdown::handle_shutdown;

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    events_rx: AsyncReceiver<BotEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = events_rx.recv() => match event {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("[EVENT_LOOP] event channel closed: {e}");
                    break;
                }
            },
        };

        handle_events(state.clone(), &cancel, event).await;
    }

    state.router.clear().await;
    tracing::info!("[EVENT_LOOP] Stopped");
    Ok(())
}

/// Dispatch one event. Lookups and paging run in their own tasks so a slow
/// request never holds up unrelated events.
async fn handle_events(state: Arc<AppState>, cancel: &CancellationToken, event: BotEvent) {
    match event {
        BotEvent::Ready { user_id, username } => {
            if &user_id != state.router.owner() {
                tracing::warn!(
                    ready_id = %user_id,
                    owner_id = %state.router.owner(),
                    "gateway identity differs from the one resolved at startup"
                );
            }
            tracing::info!(bot = %username, "Bot is ready!");
        }
        BotEvent::Disconnected => {
            tracing::debug!("gateway disconnected, sessions kept");
        }
        BotEvent::Message(message) => {
            let Some(command) = command_of(&state, &message).await else {
                return;
            };
            tracing::info!(
                author_id = %message.author_id,
                channel_id = %message.channel_id,
                content = %message.content,
                "command received"
            );

            match command {
                Command::Search(keyword) => {
                    tokio::spawn(async move {
                        if let Err(e) = handle_search(state, message.channel_id, keyword).await {
                            tracing::error!(trace = "search command", error = %e, "search failed");
                        }
                    });
                }
                Command::Shutdown => handle_shutdown(cancel),
            }
        }
        BotEvent::Reaction(event) => {
            tokio::spawn(handle_reaction(state, event));
        }
    }
}

async fn command_of(state: &AppState, message: &IncomingMessage) -> Option<Command> {
    // Never answer bots, ourselves included
    if message.author_is_bot {
        return None;
    }

    let config = state.config.read().await;
    parse_command(
        &config.command.prefix,
        &config.command.namespace,
        &message.content,
    )
}
