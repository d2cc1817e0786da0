use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

snowflake!(
    /// Identity of a message on the display transport
    MessageId
);
snowflake!(ChannelId);
snowflake!(
    /// Identity of a user, including the bot's own account
    UserId
);

/// Full address of a posted message: edits and reactions need both parts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

impl MessageRef {
    pub fn new(channel_id: impl Into<ChannelId>, message_id: impl Into<MessageId>) -> Self {
        Self {
            channel_id: channel_id.into(),
            message_id: message_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionChange {
    Added,
    Removed,
}

/// A reaction toggled on some message. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    pub message: MessageRef,
    pub user_id: UserId,
    pub emoji: String,
    pub change: ReactionChange,
}

#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub author_id: UserId,
    pub author_is_bot: bool,
    pub content: String,
}

/// Events flowing from the transport into the app's event loop
#[derive(Debug, Clone)]
pub enum BotEvent {
    Ready { user_id: UserId, username: String },
    Message(IncomingMessage),
    Reaction(NavigationEvent),
    Disconnected,
}
