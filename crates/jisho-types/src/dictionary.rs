//! Shapes of the dictionary service's search response.
//!
//! Every list defaults to empty so sparse entries decode cleanly.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub meta: Meta,
    #[serde(default)]
    pub data: Vec<Entry>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub status: u16,
}

/// One headword record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub slug: String,
    #[serde(default)]
    pub is_common: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub jlpt: Vec<String>,
    #[serde(default)]
    pub japanese: Vec<WordReading>,
    #[serde(default)]
    pub senses: Vec<Sense>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordReading {
    // Kana-only headwords come back without a word
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub reading: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sense {
    #[serde(default)]
    pub english_definitions: Vec<String>,
    #[serde(default)]
    pub parts_of_speech: Vec<String>,
    #[serde(default)]
    pub links: Vec<SenseLink>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub restrictions: Vec<String>,
    #[serde(default)]
    pub see_also: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
    #[serde(default)]
    pub source: Vec<SenseSource>,
    #[serde(default)]
    pub info: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SenseLink {
    pub text: String,
    pub url: String,
}

/// Source-language attribution for loanwords
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SenseSource {
    pub language: String,
    #[serde(default)]
    pub word: String,
}
