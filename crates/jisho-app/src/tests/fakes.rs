//! In-memory stand-ins for the dictionary service and the chat transport.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use jisho_config::Config;
use jisho_core::{DisplayError, MessageDisplay};
use jisho_lookup::{DictionaryLookup, LookupError};
use jisho_types::{ChannelId, Entry, MessageRef, ResultSet, Sense, UserId, WordReading};

use crate::state::AppState;

pub const BOT: &str = "bot-user";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Create(MessageRef, String),
    Edit(MessageRef, String),
    React(MessageRef, String),
}

#[derive(Default)]
pub struct RecordingDisplay {
    ops: Mutex<Vec<Op>>,
    next_id: AtomicU64,
    pub fail_edits: AtomicBool,
}

impl RecordingDisplay {
    pub fn ops(&self) -> Vec<Op> {
        self.ops.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::Create(_, content) => Some(content),
                _ => None,
            })
            .collect()
    }

    pub fn edits(&self) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::Edit(_, content) => Some(content),
                _ => None,
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl MessageDisplay for RecordingDisplay {
    async fn create_message(
        &self,
        channel_id: &ChannelId,
        content: &str,
    ) -> Result<MessageRef, DisplayError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let message = MessageRef::new(channel_id.clone(), format!("msg-{id}"));
        self.ops
            .lock()
            .unwrap()
            .push(Op::Create(message.clone(), content.to_string()));
        Ok(message)
    }

    async fn edit_message(&self, message: &MessageRef, content: &str) -> Result<(), DisplayError> {
        if self.fail_edits.load(Ordering::SeqCst) {
            return Err(DisplayError::Rejected {
                status: 500,
                body: "boom".to_string(),
            });
        }
        self.ops
            .lock()
            .unwrap()
            .push(Op::Edit(message.clone(), content.to_string()));
        Ok(())
    }

    async fn add_reaction(&self, message: &MessageRef, emoji: &str) -> Result<(), DisplayError> {
        self.ops
            .lock()
            .unwrap()
            .push(Op::React(message.clone(), emoji.to_string()));
        Ok(())
    }
}

pub enum Canned {
    Found(ResultSet),
    Malformed,
    /// The dictionary never answers
    Pending,
}

#[derive(Default)]
pub struct CannedLookup {
    answers: HashMap<String, Canned>,
}

impl CannedLookup {
    pub fn with(mut self, keyword: &str, answer: Canned) -> Self {
        self.answers.insert(keyword.to_string(), answer);
        self
    }
}

#[async_trait::async_trait]
impl DictionaryLookup for CannedLookup {
    async fn search(&self, keyword: &str) -> Result<ResultSet, LookupError> {
        match self.answers.get(keyword) {
            Some(Canned::Found(result)) => Ok(result.clone()),
            Some(Canned::Malformed) => {
                let err = serde_json_error();
                Err(LookupError::Decode(err))
            }
            Some(Canned::Pending) => std::future::pending().await,
            None => Ok(ResultSet::default()),
        }
    }
}

fn serde_json_error() -> serde_json::Error {
    serde_json::from_str::<ResultSet>("not json").unwrap_err()
}

pub fn entry(slug: &str, reading: &str, definitions: &[&str]) -> Entry {
    Entry {
        slug: slug.to_string(),
        japanese: vec![WordReading {
            word: slug.to_string(),
            reading: reading.to_string(),
        }],
        senses: vec![Sense {
            english_definitions: definitions.iter().map(|d| d.to_string()).collect(),
            parts_of_speech: vec!["Noun".to_string()],
            ..Sense::default()
        }],
        ..Entry::default()
    }
}

pub fn house_results() -> ResultSet {
    ResultSet {
        data: vec![
            entry("家", "いえ", &["house", "residence", "dwelling"]),
            entry("ハウス", "ハウス", &["house"]),
            entry("住宅", "じゅうたく", &["housing", "residence"]),
        ],
        ..ResultSet::default()
    }
}

pub fn state(lookup: CannedLookup, display: Arc<RecordingDisplay>) -> Arc<AppState> {
    let mut config = Config::default();
    config.discord.token = "token".to_string();
    config.command.prefix = "!".to_string();
    config.command.namespace = "jisho".to_string();

    Arc::new(AppState::new(
        config,
        UserId::from(BOT),
        Arc::new(lookup),
        display,
    ))
}
