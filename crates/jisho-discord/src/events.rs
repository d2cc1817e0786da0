//! Discord Gateway v10 payloads used by the bot.

use jisho_types::{IncomingMessage, MessageRef, NavigationEvent, ReactionChange};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const OP_DISPATCH: u8 = 0;
pub const OP_HEARTBEAT: u8 = 1;
pub const OP_IDENTIFY: u8 = 2;
pub const OP_RESUME: u8 = 6;
pub const OP_RECONNECT: u8 = 7;
pub const OP_INVALID_SESSION: u8 = 9;
pub const OP_HELLO: u8 = 10;
pub const OP_HEARTBEAT_ACK: u8 = 11;

pub const ACTIVITY_PLAYING: u8 = 0;

/// Envelope of every Gateway frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayPayload {
    pub op: u8,
    pub d: Option<Value>,
    /// Sequence number, dispatches only
    pub s: Option<u64>,
    /// Event name, dispatches only
    pub t: Option<String>,
}

impl GatewayPayload {
    pub fn heartbeat(seq: Option<u64>) -> Self {
        Self {
            op: OP_HEARTBEAT,
            d: seq.map(Value::from),
            s: None,
            t: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HelloData {
    pub heartbeat_interval: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdentifyPayload {
    pub token: String,
    pub intents: u32,
    pub properties: ConnectionProperties,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence: Option<PresenceUpdate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectionProperties {
    pub os: String,
    pub browser: String,
    pub device: String,
}

/// Status shown under the bot's name in the member list
#[derive(Debug, Clone, Serialize)]
pub struct PresenceUpdate {
    pub since: Option<u64>,
    pub activities: Vec<Activity>,
    pub status: String,
    pub afk: bool,
}

impl PresenceUpdate {
    pub fn playing(name: impl Into<String>) -> Self {
        Self {
            since: None,
            activities: vec![Activity {
                name: name.into(),
                kind: ACTIVITY_PLAYING,
            }],
            status: "online".into(),
            afk: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumePayload {
    pub token: String,
    pub session_id: String,
    pub seq: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub bot: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadyEvent {
    pub user: User,
    pub session_id: String,
    pub resume_gateway_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageCreate {
    pub id: String,
    pub channel_id: String,
    #[serde(default)]
    pub content: String,
    pub author: User,
}

impl From<MessageCreate> for IncomingMessage {
    fn from(msg: MessageCreate) -> Self {
        IncomingMessage {
            id: msg.id.into(),
            channel_id: msg.channel_id.into(),
            author_id: msg.author.id.into(),
            author_is_bot: msg.author.bot,
            content: msg.content,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartialEmoji {
    /// Unicode symbol, or the name of a custom emoji
    pub name: Option<String>,
}

/// `MESSAGE_REACTION_ADD` and `MESSAGE_REACTION_REMOVE` share this shape
#[derive(Debug, Clone, Deserialize)]
pub struct MessageReaction {
    pub user_id: String,
    pub channel_id: String,
    pub message_id: String,
    pub emoji: PartialEmoji,
}

impl MessageReaction {
    pub fn into_navigation(self, change: ReactionChange) -> NavigationEvent {
        NavigationEvent {
            message: MessageRef::new(self.channel_id, self.message_id),
            user_id: self.user_id.into(),
            emoji: self.emoji.name.unwrap_or_default(),
            change,
        }
    }
}
