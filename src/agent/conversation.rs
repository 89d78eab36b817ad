//! Chat transcript kept by an interactive session.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Who said a line of the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Agent,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("User"),
            Self::Agent => f.write_str("Agent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub speaker: Speaker,
    pub text: String,
}

/// Ordered list of user and agent lines.
///
/// The main agent sees the whole transcript each turn, flattened as
/// `User: ...` / `Agent: ...` lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.push(Speaker::User, text.into());
    }

    pub fn push_agent(&mut self, text: impl Into<String>) {
        self.push(Speaker::Agent, text.into());
    }

    fn push(&mut self, speaker: Speaker, text: String) {
        self.entries.push(Entry { speaker, text });
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Flatten the transcript followed by a new user message.
    pub fn flatten_with(&self, input: &str) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&format!("{}: {}\n", entry.speaker, entry.text));
        }
        out.push_str(&format!("{}: {}", Speaker::User, input));
        out.trim().to_string()
    }
}
