//! Discord as the display transport: REST for posting, editing and
//! reacting, the Gateway WebSocket for inbound events.

pub mod api;
pub mod events;
pub mod gateway;

pub use api::DiscordApiClient;
pub use gateway::Gateway;

/// Invite link for adding the bot to a server
pub fn invite_url(client_id: &str) -> String {
    format!("https://discord.com/oauth2/authorize?client_id={client_id}&scope=bot")
}
