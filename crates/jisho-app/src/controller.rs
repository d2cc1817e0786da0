use std::sync::Arc;

use jisho_discord::Gateway;
use jisho_types::BotEvent;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub bot_events: (AsyncSender<BotEvent>, AsyncReceiver<BotEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            // Reaction bursts from several users paging at once
            bot_events: kanal::bounded_async(256),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self, gateway: Arc<Gateway>) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop; owns the root token so `shutdown` can stop everything
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.bot_events.1.clone(),
            self.cancel_token.clone(),
        ));

        // Gateway
        let events_tx = self.channels.bot_events.0.clone();
        let cancel = self.cancel_token.child_token();
        tasks.spawn(async move {
            gateway.run(events_tx, cancel).await;
            Ok(())
        });

        tasks
    }

    /// Resolves once shutdown was requested from anywhere
    pub async fn cancelled(&self) {
        self.cancel_token.cancelled().await
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
