use std::env;

use serde::{Deserialize, Serialize};

fn default_prefix() -> String {
    "!".to_string()
}

fn default_namespace() -> String {
    "jisho".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    /// Single character every command starts with
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// First word after the prefix, e.g. `!jisho search house`
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl CommandConfig {
    pub fn new() -> Self {
        Self {
            prefix: env::var("COMMAND_PREFIX").unwrap_or_else(|_| default_prefix()),
            namespace: env::var("COMMAND_NAMESPACE").unwrap_or_else(|_| default_namespace()),
        }
    }
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            namespace: default_namespace(),
        }
    }
}
