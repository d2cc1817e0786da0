use std::env;

use serde::{Deserialize, Serialize};

/// GUILDS | GUILD_MESSAGES | GUILD_MESSAGE_REACTIONS | MESSAGE_CONTENT
pub const DEFAULT_INTENTS: u32 = (1 << 0) | (1 << 9) | (1 << 10) | (1 << 15);

fn default_gateway_url() -> String {
    "wss://gateway.discord.gg/?v=10&encoding=json".to_string()
}

fn default_api_base() -> String {
    "https://discord.com/api/v10".to_string()
}

fn default_intents() -> u32 {
    DEFAULT_INTENTS
}

fn default_reconnect_delay_secs() -> u64 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Bot token, never logged
    pub token: String,
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_intents")]
    pub intents: u32,
    #[serde(default = "default_reconnect_delay_secs")]
    pub reconnect_delay_secs: u64,
}

impl DiscordConfig {
    pub fn new() -> Self {
        let defaults = Self::default();

        Self {
            token: env::var("DISCORD_TOKEN").unwrap_or_default(),
            gateway_url: env::var("DISCORD_GATEWAY_URL").unwrap_or(defaults.gateway_url),
            api_base: env::var("DISCORD_API_BASE").unwrap_or(defaults.api_base),
            intents: env::var("DISCORD_INTENTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.intents),
            reconnect_delay_secs: env::var("DISCORD_RECONNECT_DELAY_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.reconnect_delay_secs),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            gateway_url: default_gateway_url(),
            api_base: default_api_base(),
            intents: default_intents(),
            reconnect_delay_secs: default_reconnect_delay_secs(),
        }
    }
}
