use std::sync::Arc;

use jisho_core::{Page, SessionError, format_entry};
use jisho_types::ChannelId;

use crate::state::AppState;

pub async fn handle_search(
    state: Arc<AppState>,
    channel_id: ChannelId,
    keyword: String,
) -> anyhow::Result<()> {
    let result = match state.lookup.search(&keyword).await {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(trace = "search command", keyword = %keyword, error = %e, "lookup failed");
            reply(&state, &channel_id, &e.to_string()).await;
            return Ok(());
        }
    };

    let pages: Vec<Page> = result.data.iter().map(format_entry).collect();
    let Some(first) = pages.first() else {
        reply(&state, &channel_id, &SessionError::EmptyResult.to_string()).await;
        return Ok(());
    };
    tracing::debug!(keyword = %keyword, pages = pages.len(), "formatted results");

    reply(
        &state,
        &channel_id,
        &format!("Total of results: {}\n", pages.len()),
    )
    .await;

    let bound = state
        .display
        .create_message(&channel_id, first.as_str())
        .await?;

    let controls = state.router.controls().clone();
    state.router.open_session(pages, bound.clone()).await?;

    for emoji in [&controls.backward, &controls.forward] {
        if let Err(e) = state.display.add_reaction(&bound, emoji).await {
            tracing::warn!(
                trace = "search command",
                message_id = %bound.message_id,
                error = %e,
                "failed to add navigation reaction"
            );
        }
    }

    Ok(())
}

async fn reply(state: &AppState, channel_id: &ChannelId, content: &str) {
    if let Err(e) = state.display.create_message(channel_id, content).await {
        tracing::error!(
            trace = "search command",
            channel_id = %channel_id,
            error = %e,
            "failed to reply"
        );
    }
}
