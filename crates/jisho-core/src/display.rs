use jisho_types::{ChannelId, MessageRef};

use crate::error::DisplayError;

/// Outbound display transport primitives
#[async_trait::async_trait]
pub trait MessageDisplay: Send + Sync {
    /// Post a new message, returning its address
    async fn create_message(
        &self,
        channel_id: &ChannelId,
        content: &str,
    ) -> Result<MessageRef, DisplayError>;

    /// Replace the whole content of an existing message
    async fn edit_message(&self, message: &MessageRef, content: &str) -> Result<(), DisplayError>;

    /// React to a message as the bot itself
    async fn add_reaction(&self, message: &MessageRef, emoji: &str) -> Result<(), DisplayError>;
}
