//! Per-agent conversation history.

use crate::types::{HistoryEntry, Mode};

/// Append-only, insertion-ordered record of an agent's past calls.
///
/// Owned by exactly one agent; callers receive copies, never a live view.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, mode: Mode, prompt: impl Into<String>, response_text: impl Into<String>) {
        self.entries.push(HistoryEntry {
            mode,
            prompt: prompt.into(),
            response_text: response_text.into(),
        });
    }

    /// Snapshot of the log in call order
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.clone()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
