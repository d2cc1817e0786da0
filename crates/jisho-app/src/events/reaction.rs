use std::sync::Arc;

use jisho_core::Dispatch;
use jisho_types::NavigationEvent;

use crate::state::AppState;

pub async fn handle_reaction(state: Arc<AppState>, event: NavigationEvent) {
    let outcome = state.router.on_reaction(&event).await;

    if let Dispatch::Moved { cursor } = outcome {
        tracing::debug!(
            message_id = %event.message.message_id,
            user_id = %event.user_id,
            cursor,
            "page turned"
        );
    }
}
