//! Gateway WebSocket client.
//!
//! Keeps one connection alive (Hello, Identify or Resume, heartbeats,
//! reconnect on drop) and forwards the dispatches the bot cares about as
//! [`BotEvent`]s over a kanal channel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use jisho_config::discord::DiscordConfig;
use jisho_types::{BotEvent, ReactionChange};
use kanal::AsyncSender;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;
use tokio_tungstenite::tungstenite::{self, Message as WsMessage};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::events::{
    ConnectionProperties, GatewayPayload, HelloData, IdentifyPayload, MessageCreate,
    MessageReaction, OP_DISPATCH, OP_HEARTBEAT, OP_HEARTBEAT_ACK, OP_HELLO, OP_IDENTIFY,
    OP_INVALID_SESSION, OP_RECONNECT, OP_RESUME, PresenceUpdate, ReadyEvent, ResumePayload,
};

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("failed to encode gateway payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("WebSocket error: {0}")]
    Socket(#[from] tungstenite::Error),
}

/// Why a single connection ended
#[derive(Debug, PartialEq, Eq)]
enum Disconnect {
    Cancelled,
    Reconnect,
    /// Nobody is listening for events anymore
    ReceiverClosed,
}

pub struct Gateway {
    config: DiscordConfig,
    activity: Option<String>,
    sequence: AtomicU64,
    session_id: RwLock<Option<String>>,
    resume_url: RwLock<Option<String>>,
}

impl Gateway {
    pub fn new(config: DiscordConfig) -> Self {
        Self {
            config,
            activity: None,
            sequence: AtomicU64::new(0),
            session_id: RwLock::new(None),
            resume_url: RwLock::new(None),
        }
    }

    /// "Playing ..." text announced with every Identify
    pub fn with_activity(mut self, text: impl Into<String>) -> Self {
        self.activity = Some(text.into());
        self
    }

    /// Run until cancelled or until the event receiver goes away
    pub async fn run(&self, events: AsyncSender<BotEvent>, cancel: CancellationToken) {
        info!("Discord gateway starting");
        let delay = Duration::from_secs(self.config.reconnect_delay_secs);

        loop {
            match self.connect_once(&events, &cancel).await {
                Disconnect::Cancelled | Disconnect::ReceiverClosed => break,
                Disconnect::Reconnect => {}
            }

            if events.send(BotEvent::Disconnected).await.is_err() {
                break;
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(delay) => info!("reconnecting Discord gateway"),
            }
        }

        info!("Discord gateway stopped");
    }

    async fn connect_once(
        &self,
        events: &AsyncSender<BotEvent>,
        cancel: &CancellationToken,
    ) -> Disconnect {
        let url = self.gateway_url().await;

        let (mut ws_write, mut ws_read) = match tokio_tungstenite::connect_async(&url).await {
            Ok((stream, _)) => stream.split(),
            Err(e) => {
                error!(error = %e, "failed to connect Discord gateway");
                return Disconnect::Reconnect;
            }
        };
        info!("Discord gateway connected");

        let heartbeat_interval = tokio::select! {
            _ = cancel.cancelled() => {
                let _ = ws_write.close().await;
                return Disconnect::Cancelled;
            }
            hello = wait_for_hello(&mut ws_read) => match hello {
                Some(interval) => interval,
                None => return Disconnect::Reconnect,
            },
        };
        debug!(interval_ms = heartbeat_interval, "received Hello");

        let auth = self.auth_payload().await;
        if let Err(e) = send_payload(&mut ws_write, &auth).await {
            error!(error = %e, "failed to send Identify/Resume");
            return Disconnect::Reconnect;
        }

        let mut heartbeat = tokio::time::interval(Duration::from_millis(heartbeat_interval));
        // First tick completes immediately
        heartbeat.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Discord gateway received cancellation");
                    let _ = ws_write.close().await;
                    return Disconnect::Cancelled;
                }
                _ = heartbeat.tick() => {
                    let beat = GatewayPayload::heartbeat(self.last_sequence());
                    if let Err(e) = send_payload(&mut ws_write, &beat).await {
                        warn!(error = %e, "failed to send heartbeat");
                        return Disconnect::Reconnect;
                    }
                    debug!("sent heartbeat");
                }
                msg = ws_read.next() => match msg {
                    Some(Ok(WsMessage::Text(text))) => {
                        let payload = match serde_json::from_str::<GatewayPayload>(&text) {
                            Ok(payload) => payload,
                            Err(e) => {
                                warn!(error = %e, "failed to parse gateway payload");
                                continue;
                            }
                        };

                        if let Some(seq) = payload.s {
                            self.sequence.store(seq, Ordering::SeqCst);
                        }

                        match payload.op {
                            OP_DISPATCH => {
                                if self.handle_dispatch(payload, events).await.is_err() {
                                    let _ = ws_write.close().await;
                                    return Disconnect::ReceiverClosed;
                                }
                            }
                            OP_HEARTBEAT => {
                                let beat = GatewayPayload::heartbeat(self.last_sequence());
                                let _ = send_payload(&mut ws_write, &beat).await;
                            }
                            OP_HEARTBEAT_ACK => debug!("heartbeat acknowledged"),
                            OP_RECONNECT => {
                                info!("server requested reconnect");
                                return Disconnect::Reconnect;
                            }
                            OP_INVALID_SESSION => {
                                let resumable = payload.d.as_ref().and_then(Value::as_bool).unwrap_or(false);
                                if !resumable {
                                    warn!("invalid session, clearing state for fresh Identify");
                                    self.reset_session().await;
                                } else {
                                    warn!("invalid session (resumable), retrying");
                                }
                                return Disconnect::Reconnect;
                            }
                            op => debug!(op, "unhandled opcode"),
                        }
                    }
                    Some(Ok(WsMessage::Close(frame))) => {
                        info!(frame = ?frame, "Discord gateway closed by server");
                        return Disconnect::Reconnect;
                    }
                    Some(Ok(WsMessage::Ping(data))) => {
                        let _ = ws_write.send(WsMessage::Pong(data)).await;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        error!(error = %e, "Discord gateway WebSocket error");
                        return Disconnect::Reconnect;
                    }
                    None => {
                        info!("Discord gateway stream ended");
                        return Disconnect::Reconnect;
                    }
                },
            }
        }
    }

    /// Forward one dispatch. Errs only when the receiver is gone.
    async fn handle_dispatch(
        &self,
        payload: GatewayPayload,
        events: &AsyncSender<BotEvent>,
    ) -> Result<(), kanal::SendError> {
        let Some(name) = payload.t else {
            return Ok(());
        };

        let event = match name.as_str() {
            "READY" => {
                let Some(ready) = decode::<ReadyEvent>(&name, payload.d) else {
                    return Ok(());
                };
                info!(
                    bot_id = %ready.user.id,
                    bot_name = %ready.user.username,
                    "Discord bot authenticated"
                );
                *self.session_id.write().await = Some(ready.session_id);
                *self.resume_url.write().await = ready.resume_gateway_url;

                BotEvent::Ready {
                    user_id: ready.user.id.into(),
                    username: ready.user.username,
                }
            }
            "RESUMED" => {
                info!("session resumed");
                return Ok(());
            }
            "MESSAGE_CREATE" => match decode::<MessageCreate>(&name, payload.d) {
                Some(msg) => BotEvent::Message(msg.into()),
                None => return Ok(()),
            },
            "MESSAGE_REACTION_ADD" => match decode::<MessageReaction>(&name, payload.d) {
                Some(reaction) => BotEvent::Reaction(reaction.into_navigation(ReactionChange::Added)),
                None => return Ok(()),
            },
            "MESSAGE_REACTION_REMOVE" => match decode::<MessageReaction>(&name, payload.d) {
                Some(reaction) => {
                    BotEvent::Reaction(reaction.into_navigation(ReactionChange::Removed))
                }
                None => return Ok(()),
            },
            _ => {
                debug!(event = %name, "unhandled dispatch event");
                return Ok(());
            }
        };

        events.send(event).await
    }

    async fn gateway_url(&self) -> String {
        match self.resume_url.read().await.as_deref() {
            Some(url) => format!("{}/?v=10&encoding=json", url.trim_end_matches('/')),
            None => self.config.gateway_url.clone(),
        }
    }

    /// Resume when a previous READY left a session behind, otherwise Identify
    async fn auth_payload(&self) -> GatewayPayload {
        let token = self.config.token.clone();

        let (op, d) = match self.session_id.read().await.clone() {
            Some(session_id) => {
                let seq = self.sequence.load(Ordering::SeqCst);
                info!(session_id = %session_id, seq, "attempting Resume");
                (
                    OP_RESUME,
                    serde_json::to_value(ResumePayload {
                        token,
                        session_id,
                        seq,
                    }),
                )
            }
            None => {
                debug!("sending Identify");
                (
                    OP_IDENTIFY,
                    serde_json::to_value(IdentifyPayload {
                        token,
                        intents: self.config.intents,
                        properties: ConnectionProperties {
                            os: std::env::consts::OS.to_owned(),
                            browser: "jisho-bot".into(),
                            device: "jisho-bot".into(),
                        },
                        presence: self.activity.clone().map(PresenceUpdate::playing),
                    }),
                )
            }
        };

        GatewayPayload {
            op,
            d: d.ok(),
            s: None,
            t: None,
        }
    }

    fn last_sequence(&self) -> Option<u64> {
        match self.sequence.load(Ordering::SeqCst) {
            0 => None,
            seq => Some(seq),
        }
    }

    async fn reset_session(&self) {
        *self.session_id.write().await = None;
        *self.resume_url.write().await = None;
        self.sequence.store(0, Ordering::SeqCst);
    }
}

fn decode<T: DeserializeOwned>(event: &str, data: Option<Value>) -> Option<T> {
    let data = data?;
    match serde_json::from_value(data) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(event = %event, error = %e, "failed to parse dispatch");
            None
        }
    }
}

async fn wait_for_hello<S>(read: &mut S) -> Option<u64>
where
    S: Stream<Item = Result<WsMessage, tungstenite::Error>> + Unpin,
{
    while let Some(msg) = read.next().await {
        match msg {
            Ok(WsMessage::Text(text)) => {
                if let Ok(payload) = serde_json::from_str::<GatewayPayload>(&text)
                    && payload.op == OP_HELLO
                    && let Some(d) = payload.d
                    && let Ok(hello) = serde_json::from_value::<HelloData>(d)
                {
                    return Some(hello.heartbeat_interval);
                }
            }
            Ok(WsMessage::Close(_)) => return None,
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, "WebSocket error waiting for Hello");
                return None;
            }
        }
    }
    None
}

async fn send_payload<S>(write: &mut S, payload: &GatewayPayload) -> Result<(), GatewayError>
where
    S: Sink<WsMessage, Error = tungstenite::Error> + Unpin,
{
    let json = serde_json::to_string(payload)?;
    write.send(WsMessage::Text(json.into())).await?;
    Ok(())
}
