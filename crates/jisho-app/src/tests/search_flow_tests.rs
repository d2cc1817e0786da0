use std::sync::Arc;
use std::sync::atomic::Ordering;

use jisho_core::{Dispatch, format_entry};
use jisho_types::{ChannelId, MessageId, MessageRef, NavigationEvent, ReactionChange, UserId};

use super::fakes::{BOT, Canned, CannedLookup, Op, RecordingDisplay, house_results, state};
use crate::events::search::handle_search;

const FORWARD: &str = "\u{27A1}";
const BACKWARD: &str = "\u{2B05}";

fn reaction(message: &MessageRef, user: &str, emoji: &str) -> NavigationEvent {
    NavigationEvent {
        message: message.clone(),
        user_id: UserId::from(user),
        emoji: emoji.to_string(),
        change: ReactionChange::Added,
    }
}

#[tokio::test]
async fn house_search_pages_through_three_entries() {
    let display = Arc::new(RecordingDisplay::default());
    let results = house_results();
    let expected: Vec<String> = results
        .data
        .iter()
        .map(|e| format_entry(e).into_string())
        .collect();
    let state = state(
        CannedLookup::default().with("house", Canned::Found(results)),
        display.clone(),
    );

    handle_search(state.clone(), ChannelId::from("c1"), "house".to_string())
        .await
        .unwrap();

    let bound = MessageRef::new("c1", "msg-2");
    assert_eq!(
        display.ops(),
        vec![
            Op::Create(MessageRef::new("c1", "msg-1"), "Total of results: 3\n".to_string()),
            Op::Create(bound.clone(), expected[0].clone()),
            Op::React(bound.clone(), BACKWARD.to_string()),
            Op::React(bound.clone(), FORWARD.to_string()),
        ]
    );
    assert_eq!(state.router.session_count().await, 1);

    // Two forwards reach the last page, a third wraps to the first
    for _ in 0..3 {
        state.router.on_reaction(&reaction(&bound, "alice", FORWARD)).await;
    }
    assert_eq!(
        display.edits(),
        vec![
            expected[1].clone(),
            expected[2].clone(),
            expected[0].clone()
        ]
    );
    assert_eq!(state.router.cursor_of(&MessageId::from("msg-2")).await, Some(0));
}

#[tokio::test]
async fn own_bookkeeping_reactions_do_not_page() {
    let display = Arc::new(RecordingDisplay::default());
    let state = state(
        CannedLookup::default().with("house", Canned::Found(house_results())),
        display.clone(),
    );
    handle_search(state.clone(), ChannelId::from("c1"), "house".to_string())
        .await
        .unwrap();
    let bound = MessageRef::new("c1", "msg-2");

    let outcome = state.router.on_reaction(&reaction(&bound, BOT, FORWARD)).await;

    assert_eq!(outcome, Dispatch::IgnoredSelf);
    assert_eq!(state.router.cursor_of(&bound.message_id).await, Some(0));
    assert!(display.edits().is_empty());
}

#[tokio::test]
async fn backward_from_first_page_shows_last() {
    let display = Arc::new(RecordingDisplay::default());
    let results = house_results();
    let last = format_entry(&results.data[2]).into_string();
    let state = state(
        CannedLookup::default().with("house", Canned::Found(results)),
        display.clone(),
    );
    handle_search(state.clone(), ChannelId::from("c1"), "house".to_string())
        .await
        .unwrap();

    let bound = MessageRef::new("c1", "msg-2");
    state.router.on_reaction(&reaction(&bound, "alice", BACKWARD)).await;

    assert_eq!(display.edits(), vec![last]);
}

#[tokio::test]
async fn empty_result_replies_no_information_and_opens_nothing() {
    let display = Arc::new(RecordingDisplay::default());
    let state = state(CannedLookup::default(), display.clone());

    handle_search(state.clone(), ChannelId::from("c1"), "zzzz".to_string())
        .await
        .unwrap();

    assert_eq!(display.created(), vec!["No information found".to_string()]);
    assert_eq!(state.router.session_count().await, 0);
}

#[tokio::test]
async fn lookup_failure_is_reported_to_the_channel() {
    let display = Arc::new(RecordingDisplay::default());
    let state = state(
        CannedLookup::default().with("house", Canned::Malformed),
        display.clone(),
    );

    handle_search(state.clone(), ChannelId::from("c1"), "house".to_string())
        .await
        .unwrap();

    let replies = display.created();
    assert_eq!(replies.len(), 1);
    assert!(replies[0].starts_with("Malformed dictionary response"));
    assert_eq!(state.router.session_count().await, 0);
}

#[tokio::test]
async fn failed_push_leaves_cursor_advanced() {
    let display = Arc::new(RecordingDisplay::default());
    let state = state(
        CannedLookup::default().with("house", Canned::Found(house_results())),
        display.clone(),
    );
    handle_search(state.clone(), ChannelId::from("c1"), "house".to_string())
        .await
        .unwrap();
    let bound = MessageRef::new("c1", "msg-2");

    display.fail_edits.store(true, Ordering::SeqCst);
    state.router.on_reaction(&reaction(&bound, "alice", FORWARD)).await;

    assert_eq!(state.router.cursor_of(&bound.message_id).await, Some(1));
    assert!(display.edits().is_empty());
}

#[tokio::test]
async fn two_searches_keep_separate_sessions() {
    let display = Arc::new(RecordingDisplay::default());
    let state = state(
        CannedLookup::default().with("house", Canned::Found(house_results())),
        display.clone(),
    );

    handle_search(state.clone(), ChannelId::from("c1"), "house".to_string())
        .await
        .unwrap();
    handle_search(state.clone(), ChannelId::from("c2"), "house".to_string())
        .await
        .unwrap();
    assert_eq!(state.router.session_count().await, 2);

    let first = MessageRef::new("c1", "msg-2");
    let second = MessageRef::new("c2", "msg-4");
    state.router.on_reaction(&reaction(&second, "bob", FORWARD)).await;

    assert_eq!(state.router.cursor_of(&first.message_id).await, Some(0));
    assert_eq!(state.router.cursor_of(&second.message_id).await, Some(1));
}
