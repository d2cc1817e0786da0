use serde::{Deserialize, Serialize};

use self::command::CommandConfig;
use self::discord::DiscordConfig;
use self::lookup::LookupConfig;
use self::navigation::NavigationConfig;

pub mod command;
pub mod discord;
pub mod lookup;
pub mod navigation;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Bot token is missing (set DISCORD_TOKEN or pass --token)")]
    MissingToken,

    #[error("Bot command prefix should be only one character, got {0:?}")]
    InvalidPrefix(String),

    #[error("Navigation symbols must differ, both are {0:?}")]
    AmbiguousNavigation(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub discord: DiscordConfig,
    pub lookup: LookupConfig,
    pub command: CommandConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
}

impl Config {
    /// Build from environment variables, falling back to defaults
    pub fn new() -> Self {
        Config {
            discord: DiscordConfig::new(),
            lookup: LookupConfig::new(),
            command: CommandConfig::new(),
            navigation: NavigationConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.discord.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }

        if self.command.prefix.chars().count() != 1 {
            return Err(ConfigError::InvalidPrefix(self.command.prefix.clone()));
        }

        if self.navigation.forward == self.navigation.backward {
            return Err(ConfigError::AmbiguousNavigation(
                self.navigation.forward.clone(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
