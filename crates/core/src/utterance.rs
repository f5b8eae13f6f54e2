//! Utterance types produced by the recognition engine

use serde::{Deserialize, Serialize};

/// A transcript for one utterance
///
/// Interim results carry `is_final = false` and are display-only; command
/// processing happens once per finalized utterance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Utterance {
    /// Transcribed text
    pub text: String,
    /// Is this the final result for the utterance?
    pub is_final: bool,
}

impl Utterance {
    /// Create an interim (non-final) utterance
    pub fn partial(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }

    /// Create a finalized utterance
    pub fn final_result(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }

    /// Check if the transcript is empty after trimming
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Word count of the transcript
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
