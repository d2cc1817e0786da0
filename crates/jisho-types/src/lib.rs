pub mod dictionary;
pub mod types;

pub use dictionary::{Entry, Meta, ResultSet, Sense, SenseLink, SenseSource, WordReading};
pub use types::{
    BotEvent, ChannelId, IncomingMessage, MessageId, MessageRef, NavigationEvent, ReactionChange,
    UserId,
};
