//! Routes reaction events to the pagination session bound to their message.
//!
//! One router lives for the whole process. Sessions are registered by the
//! search flow and looked up by message id; each session sits behind its
//! own mutex, held across the cursor move and the content push so pages
//! on one message never interleave. Different messages never contend.

use std::collections::HashMap;
use std::sync::Arc;

use jisho_types::{MessageId, MessageRef, NavigationEvent, UserId};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::display::MessageDisplay;
use crate::error::{NavigationError, SessionError};
use crate::formatter::Page;
use crate::pagination::PaginationSession;

/// Reaction symbols bound to paging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationControls {
    pub forward: String,
    pub backward: String,
}

impl Default for NavigationControls {
    fn default() -> Self {
        Self {
            forward: "\u{27A1}".to_string(),
            backward: "\u{2B05}".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// What the router did with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Emitted by the bot itself
    IgnoredSelf,
    /// No live session is bound to the message
    UnknownMessage,
    /// Not a navigation symbol
    UnboundSymbol,
    /// Cursor moved and the new page was pushed
    Moved { cursor: usize },
}

type SharedSession = Arc<Mutex<PaginationSession>>;

pub struct NavigationRouter {
    owner: UserId,
    controls: NavigationControls,
    display: Arc<dyn MessageDisplay>,
    sessions: RwLock<HashMap<MessageId, SharedSession>>,
}

impl NavigationRouter {
    /// `owner` is the bot's own identity, resolved once at startup
    pub fn new(
        owner: UserId,
        controls: NavigationControls,
        display: Arc<dyn MessageDisplay>,
    ) -> Self {
        Self {
            owner,
            controls,
            display,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn controls(&self) -> &NavigationControls {
        &self.controls
    }

    /// Bind `pages` to an already posted message showing the first page
    pub async fn open_session(
        &self,
        pages: Vec<Page>,
        message: MessageRef,
    ) -> Result<(), SessionError> {
        let message_id = message.message_id.clone();
        let session = PaginationSession::new(pages, message, self.owner.clone())?;
        let len = session.len();

        let replaced = self
            .sessions
            .write()
            .await
            .insert(message_id.clone(), Arc::new(Mutex::new(session)));

        if replaced.is_some() {
            warn!(message_id = %message_id, "replaced existing session on message");
        }
        debug!(message_id = %message_id, pages = len, "session opened");
        Ok(())
    }

    pub async fn close_session(&self, message_id: &MessageId) -> bool {
        self.sessions.write().await.remove(message_id).is_some()
    }

    /// Forget every session
    pub async fn clear(&self) {
        let mut sessions = self.sessions.write().await;
        debug!(count = sessions.len(), "dropping all sessions");
        sessions.clear();
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn cursor_of(&self, message_id: &MessageId) -> Option<usize> {
        let session = self.sessions.read().await.get(message_id).cloned()?;
        let cursor = session.lock().await.cursor();
        Some(cursor)
    }

    /// Handle a reaction, logging push failures instead of returning them.
    ///
    /// Additions and removals page alike: the transport only reports that
    /// the reaction set changed.
    pub async fn on_reaction(&self, event: &NavigationEvent) -> Dispatch {
        match self.dispatch(event).await {
            Ok(outcome) => outcome,
            Err(NavigationError::Dispatch { cursor, source }) => {
                warn!(
                    trace = "navigation",
                    message_id = %event.message.message_id,
                    cursor,
                    error = %source,
                    "failed to update bound message"
                );
                Dispatch::Moved { cursor }
            }
        }
    }

    pub async fn dispatch(&self, event: &NavigationEvent) -> Result<Dispatch, NavigationError> {
        if event.user_id == self.owner {
            return Ok(Dispatch::IgnoredSelf);
        }

        let Some(session) = self
            .sessions
            .read()
            .await
            .get(&event.message.message_id)
            .cloned()
        else {
            return Ok(Dispatch::UnknownMessage);
        };

        let Some(direction) = self.direction_of(&event.emoji) else {
            return Ok(Dispatch::UnboundSymbol);
        };

        let mut session = session.lock().await;
        let page = match direction {
            Direction::Forward => session.advance(),
            Direction::Backward => session.retreat(),
        }
        .clone();
        let cursor = session.cursor();

        debug!(
            message_id = %event.message.message_id,
            user_id = %event.user_id,
            change = ?event.change,
            cursor,
            "paging session"
        );

        // Cursor stays moved even if the push fails
        self.display
            .edit_message(session.message(), page.as_str())
            .await
            .map_err(|source| NavigationError::Dispatch { cursor, source })?;

        Ok(Dispatch::Moved { cursor })
    }

    fn direction_of(&self, emoji: &str) -> Option<Direction> {
        if emoji == self.controls.forward {
            Some(Direction::Forward)
        } else if emoji == self.controls.backward {
            Some(Direction::Backward)
        } else {
            None
        }
    }
}
