use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::text::{capitalize, leading_sentence};

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Error type for parsing a difficulty from a string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown difficulty: {0}")]
pub struct ParseDifficultyError(pub String);

/// Seniority level a question targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Junior,
    Senior,
    Lead,
}

impl Difficulty {
    /// Wire/data-format spelling of the difficulty.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Junior => "junior",
            Difficulty::Senior => "senior",
            Difficulty::Lead => "lead",
        }
    }

    /// Capitalized display label, e.g. `"Senior"`.
    #[must_use]
    pub fn label(self) -> String {
        capitalize(self.as_str())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "junior" => Ok(Difficulty::Junior),
            "senior" => Ok(Difficulty::Senior),
            "lead" => Ok(Difficulty::Lead),
            other => Err(ParseDifficultyError(other.to_string())),
        }
    }
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated question fields, straight from a data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub category: String,
    pub difficulty: Difficulty,
    pub prompt: String,
    pub answer: String,
    pub analogy: String,
    pub code_example: Option<String>,
    pub key_phrase: String,
}

impl QuestionDraft {
    /// Validate the draft into an immutable [`Question`].
    ///
    /// A present-but-blank code example is normalized to `None`.
    ///
    /// # Errors
    ///
    /// Returns the first failing field as a `QuestionValidationError`.
    pub fn validate(self) -> Result<Question, QuestionValidationError> {
        let category = self.category.trim();
        if category.is_empty() {
            return Err(QuestionValidationError::EmptyCategory);
        }
        if self.prompt.trim().is_empty() {
            return Err(QuestionValidationError::EmptyPrompt);
        }
        if self.answer.trim().is_empty() {
            return Err(QuestionValidationError::EmptyAnswer);
        }
        if self.analogy.trim().is_empty() {
            return Err(QuestionValidationError::EmptyAnalogy);
        }
        if self.key_phrase.trim().is_empty() {
            return Err(QuestionValidationError::EmptyKeyPhrase);
        }

        let code_example = self
            .code_example
            .filter(|code| !code.trim().is_empty());

        Ok(Question {
            category: category.to_string(),
            difficulty: self.difficulty,
            prompt: self.prompt,
            answer: self.answer,
            analogy: self.analogy,
            code_example,
            key_phrase: self.key_phrase,
        })
    }
}

/// A single quiz question with its model answer.
///
/// Only constructed through [`QuestionDraft::validate`], so every instance
/// carries non-empty category, prompt, answer, analogy and key phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    category: String,
    difficulty: Difficulty,
    prompt: String,
    answer: String,
    analogy: String,
    code_example: Option<String>,
    key_phrase: String,
}

impl Question {
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Rich-text body of the model answer.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn analogy(&self) -> &str {
        &self.analogy
    }

    #[must_use]
    pub fn code_example(&self) -> Option<&str> {
        self.code_example.as_deref()
    }

    /// Closing remark shown alongside the answer.
    #[must_use]
    pub fn key_phrase(&self) -> &str {
        &self.key_phrase
    }

    /// Short hint: the analogy's leading sentence plus an ellipsis marker.
    ///
    /// Falls back to the full analogy when it has no sentence terminator.
    #[must_use]
    pub fn hint(&self) -> String {
        format!("{}...", leading_sentence(&self.analogy))
    }
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionValidationError {
    #[error("question category cannot be empty")]
    EmptyCategory,

    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("model answer cannot be empty")]
    EmptyAnswer,

    #[error("analogy text cannot be empty")]
    EmptyAnalogy,

    #[error("key phrase cannot be empty")]
    EmptyKeyPhrase,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
