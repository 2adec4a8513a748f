//! The conversation transcript shared with the assistant.
//!
//! A [`TurnLog`] is never changed in place: pushing a turn yields a new log,
//! so a caller can keep the transcript it sent alongside the one it got back.
//! Logs persist as JSON lines, one `{"role","content"}` object per turn.
//! Transcripts written by older front ends used `You: ` and `Gemini: `
//! prefixes instead; those lines are still read.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::AssistantError;

const LEGACY_USER: &str = "You: ";
const LEGACY_MODEL: &str = "Gemini: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Turn {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Turn {
            role: Role::Model,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnLog {
    turns: Arc<[Turn]>,
}

impl TurnLog {
    pub fn new() -> Self {
        TurnLog::default()
    }

    /// A new log with `turn` appended.
    pub fn push(&self, turn: Turn) -> TurnLog {
        let turns: Vec<Turn> = self.turns.iter().cloned().chain([turn]).collect();
        TurnLog {
            turns: turns.into(),
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn to_jsonl(&self) -> Result<String, AssistantError> {
        let mut out = String::new();
        for turn in self.turns.iter() {
            out.push_str(&serde_json::to_string(turn)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Read a transcript back. Blank lines are skipped.
    pub fn from_jsonl(text: &str) -> Result<TurnLog, AssistantError> {
        let mut turns = Vec::new();
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let turn = if let Some(content) = line.strip_prefix(LEGACY_USER) {
                Turn::user(content)
            } else if let Some(content) = line.strip_prefix(LEGACY_MODEL) {
                Turn::model(content)
            } else {
                serde_json::from_str(line).map_err(|_| AssistantError::HistoryLine {
                    line: index + 1,
                    content: line.to_string(),
                })?
            };
            turns.push(turn);
        }
        Ok(TurnLog {
            turns: turns.into(),
        })
    }
}

impl FromIterator<Turn> for TurnLog {
    fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
        TurnLog {
            turns: iter.into_iter().collect(),
        }
    }
}
