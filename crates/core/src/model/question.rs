use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question must offer at least one option")]
    NoOptions,

    #[error("option key cannot be empty")]
    EmptyOptionKey,

    #[error("duplicate option key: {0}")]
    DuplicateOptionKey(String),

    #[error("correct key {0} is not one of the options")]
    UnknownCorrectKey(String),
}

//
// ─── OPTION ────────────────────────────────────────────────────────────────────
//

/// Short identifier distinguishing one answer choice from another (e.g. `A1`).
///
/// This is not the display label.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OptionKey(String);

impl OptionKey {
    /// Create a validated option key (trimmed, non-empty).
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyOptionKey` if the key is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, QuestionError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QuestionError::EmptyOptionKey);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionKey({})", self.0)
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One labeled answer choice of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    key: OptionKey,
    label: String,
}

impl AnswerOption {
    #[must_use]
    pub fn new(key: OptionKey, label: impl Into<String>) -> Self {
        Self {
            key,
            label: label.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &OptionKey {
        &self.key
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<AnswerOption>,
    correct_key: OptionKey,
}

impl Question {
    /// Build a question, checking that it is answerable.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, there are no options,
    /// option keys repeat, or `correct_key` does not name one of the options.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<AnswerOption>,
        correct_key: OptionKey,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }

        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            if !seen.insert(option.key()) {
                return Err(QuestionError::DuplicateOptionKey(
                    option.key().as_str().to_string(),
                ));
            }
        }
        if !seen.contains(&correct_key) {
            return Err(QuestionError::UnknownCorrectKey(
                correct_key.as_str().to_string(),
            ));
        }

        Ok(Self {
            id,
            prompt,
            options,
            correct_key,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn correct_key(&self) -> &OptionKey {
        &self.correct_key
    }

    #[must_use]
    pub fn has_option(&self, key: &OptionKey) -> bool {
        self.options.iter().any(|option| option.key() == key)
    }

    /// True when `selection` is the correct key. An unanswered question is never correct.
    #[must_use]
    pub fn is_correct(&self, selection: Option<&OptionKey>) -> bool {
        selection == Some(&self.correct_key)
    }
}
