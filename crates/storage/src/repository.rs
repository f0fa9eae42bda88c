use serde::Deserialize;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::info;

use quiz_core::model::{Difficulty, Question, QuestionDraft, QuestionValidationError};

use crate::source::QuestionSource;

/// Errors surfaced while loading a question set.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("question source returned status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed question payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid question record at index {index}: {source}")]
    Record {
        index: usize,
        source: QuestionValidationError,
    },
}

/// Payload shape of a question data source: a mapping with a single
/// `questions` field holding the ordered records.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionFile {
    pub questions: Vec<QuestionRecord>,
}

/// Serde shape for one question record.
///
/// This mirrors the domain `Question` so sources can deserialize without
/// leaking format concerns into the domain layer.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRecord {
    pub category: String,
    pub difficulty: Difficulty,
    pub prompt: String,
    pub answer: String,
    pub analogy: String,
    #[serde(default)]
    pub code_example: Option<String>,
    pub key_phrase: String,
}

impl QuestionRecord {
    /// Convert the record into a validated domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionValidationError` if any required field is blank.
    pub fn into_question(self) -> Result<Question, QuestionValidationError> {
        QuestionDraft {
            category: self.category,
            difficulty: self.difficulty,
            prompt: self.prompt,
            answer: self.answer,
            analogy: self.analogy,
            code_example: self.code_example,
            key_phrase: self.key_phrase,
        }
        .validate()
    }
}

/// Holds the immutable full set of questions, loaded once from a source.
///
/// Starts empty. `load` swaps in the whole set only after every record has
/// validated, so a failed load never exposes partial state.
#[derive(Debug, Clone, Default)]
pub struct QuestionRepository {
    questions: Vec<Question>,
    loaded: bool,
}

impl QuestionRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and parse the question collection from `source`.
    ///
    /// Returns the number of questions loaded. Retrying after a failure is
    /// just calling `load` again.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` when the source is unreachable or the payload
    /// does not parse into the expected shape. The repository is left
    /// unchanged on failure.
    pub async fn load(&mut self, source: &dyn QuestionSource) -> Result<usize, LoadError> {
        let payload = source.fetch().await?;
        let file: QuestionFile = serde_json::from_str(&payload)?;

        let mut questions = Vec::with_capacity(file.questions.len());
        for (index, record) in file.questions.into_iter().enumerate() {
            let question = record
                .into_question()
                .map_err(|source| LoadError::Record { index, source })?;
            questions.push(question);
        }

        self.questions = questions;
        self.loaded = true;
        info!(count = self.questions.len(), "loaded question set");
        Ok(self.questions.len())
    }

    /// True once a load has completed successfully.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Total number of loaded questions (0 before a successful load).
    #[must_use]
    pub fn count(&self) -> usize {
        self.questions.len()
    }

    /// Read-only view of the full loaded set, in source order.
    #[must_use]
    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    /// Sorted distinct category tags across the loaded set.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let tags: BTreeSet<&str> = self.questions.iter().map(Question::category).collect();
        tags.into_iter().map(str::to_string).collect()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
