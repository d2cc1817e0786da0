use serde::{Deserialize, Serialize};

fn default_forward() -> String {
    "\u{27A1}".to_string()
}

fn default_backward() -> String {
    "\u{2B05}".to_string()
}

/// Reaction symbols that page a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    #[serde(default = "default_forward")]
    pub forward: String,
    #[serde(default = "default_backward")]
    pub backward: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            forward: default_forward(),
            backward: default_backward(),
        }
    }
}
