//! Renders one dictionary entry into one self-contained page.
//!
//! The layout is fixed and users recognise it, so it must stay stable:
//!
//! ```text
//! [ slug ]
//! [Readings]
//!     ╔ Word: ...
//!     ╚ Reading: ...
//!
//! [English Definitions]
//!     ■ part of speech
//!     f. tag
//!     ╔first definition
//!     ║middle definition
//!     ╚last definition
//!
//! [See Also]
//!     - reference
//! ```
//!
//! The whole page is wrapped in a code fence so the transport shows it
//! preformatted.

use std::fmt;

use jisho_types::{Entry, Sense};

const FENCE: &str = "```";

/// One display-ready rendering of a single entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page(String);

impl Page {
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn format_entry(entry: &Entry) -> Page {
    let mut out = String::from(FENCE);

    out.push_str(&format!("[ {} ]\n", entry.slug));
    out.push_str("[Readings]\n");
    for japanese in &entry.japanese {
        out.push_str(&format!("\t╔ Word: {}\n", japanese.word));
        out.push_str(&format!("\t╚ Reading: {}\n", japanese.reading));
        out.push('\n');
    }

    for sense in &entry.senses {
        push_sense(&mut out, sense);
    }

    out.push_str(FENCE);
    Page(out)
}

fn push_sense(out: &mut String, sense: &Sense) {
    out.push_str("[English Definitions]\n");
    for pos in &sense.parts_of_speech {
        out.push_str(&format!("\t■ {pos}\n"));
    }
    for tag in &sense.tags {
        out.push_str(&format!("\tf. {tag}\n"));
    }

    let last = sense.english_definitions.len().saturating_sub(1);
    for (i, definition) in sense.english_definitions.iter().enumerate() {
        let glyph = if i == 0 {
            '╔'
        } else if i < last {
            '║'
        } else {
            '╚'
        };
        out.push_str(&format!("\t{glyph}{definition}\n"));
    }
    out.push('\n');

    if !sense.see_also.is_empty() {
        // Extra gap only when the sense had no tags; kept as users know it
        if sense.tags.is_empty() {
            out.push('\n');
        }
        out.push_str("[See Also]\n");
        for reference in &sense.see_also {
            out.push_str(&format!("\t- {reference}\n"));
        }
        out.push('\n');
    }
}
