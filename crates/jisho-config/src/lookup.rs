use std::env;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://jisho.org/api/v1/search/words".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Word search endpoint, the keyword goes into `?keyword=`
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl LookupConfig {
    pub fn new() -> Self {
        let api_url = env::var("JISHO_API_URL").unwrap_or_else(|_| default_api_url());

        let timeout_seconds = env::var("LOOKUP_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_seconds);

        Self {
            api_url,
            timeout_seconds,
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
