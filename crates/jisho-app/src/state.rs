use std::sync::Arc;

use jisho_config::Config;
use jisho_core::{MessageDisplay, NavigationControls, NavigationRouter};
use jisho_lookup::DictionaryLookup;
use jisho_types::UserId;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub lookup: Arc<dyn DictionaryLookup>,
    pub display: Arc<dyn MessageDisplay>,
    pub router: Arc<NavigationRouter>,
}

impl AppState {
    /// `owner` is the bot's own user id, resolved once before any event arrives
    pub fn new(
        config: Config,
        owner: UserId,
        lookup: Arc<dyn DictionaryLookup>,
        display: Arc<dyn MessageDisplay>,
    ) -> Self {
        let controls = NavigationControls {
            forward: config.navigation.forward.clone(),
            backward: config.navigation.backward.clone(),
        };
        let router = NavigationRouter::new(owner, controls, display.clone());

        Self {
            config: Arc::new(RwLock::new(config)),
            lookup,
            display,
            router: Arc::new(router),
        }
    }
}
