use jisho_types::{MessageRef, UserId};

use crate::error::SessionError;
use crate::formatter::Page;

/// Pages of one search, a cursor, and the message they are shown on.
///
/// The cursor is always a valid index and wraps in both directions.
#[derive(Debug, Clone)]
pub struct PaginationSession {
    message: MessageRef,
    owner: UserId,
    pages: Vec<Page>,
    cursor: usize,
}

impl PaginationSession {
    pub fn new(pages: Vec<Page>, message: MessageRef, owner: UserId) -> Result<Self, SessionError> {
        if pages.is_empty() {
            return Err(SessionError::EmptyResult);
        }

        Ok(Self {
            message,
            owner,
            pages,
            cursor: 0,
        })
    }

    pub fn current(&self) -> &Page {
        &self.pages[self.cursor]
    }

    pub fn advance(&mut self) -> &Page {
        self.cursor = (self.cursor + 1) % self.pages.len();
        self.current()
    }

    pub fn retreat(&mut self) -> &Page {
        self.cursor = (self.cursor + self.pages.len() - 1) % self.pages.len();
        self.current()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false, a session holds at least one page
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn message(&self) -> &MessageRef {
        &self.message
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }
}
