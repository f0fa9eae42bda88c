use std::str::FromStr;
use thiserror::Error;

use crate::model::question::{Difficulty, Question};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("category filter cannot be empty")]
    EmptyCategory,

    #[error("unknown difficulty filter: {0}")]
    UnknownDifficulty(String),

    #[error("question count must be a positive number or \"unlimited\"")]
    InvalidCount,
}

//
// ─── FILTERS ───────────────────────────────────────────────────────────────────
//

/// Category predicate narrowing the repository to session candidates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    #[must_use]
    pub fn accepts(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(tag) => tag == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyCategory);
        }
        if trimmed.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(trimmed.to_string()))
        }
    }
}

/// Difficulty predicate narrowing the repository to session candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    #[must_use]
    pub fn accepts(self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Only(wanted) => wanted == difficulty,
        }
    }
}

impl FromStr for DifficultyFilter {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(DifficultyFilter::All);
        }
        trimmed
            .parse::<Difficulty>()
            .map(DifficultyFilter::Only)
            .map_err(|err| ConfigError::UnknownDifficulty(err.0))
    }
}

//
// ─── QUESTION COUNT ────────────────────────────────────────────────────────────
//

/// Default pool cap when the user has not picked a count.
pub const DEFAULT_QUESTION_COUNT: u32 = 10;

/// How many questions a session may hold. Explicitly tagged, no sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionCount {
    Limited(u32),
    Unlimited,
}

impl QuestionCount {
    /// Creates a finite count.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidCount` if `count` is zero.
    pub fn limited(count: u32) -> Result<Self, ConfigError> {
        if count == 0 {
            return Err(ConfigError::InvalidCount);
        }
        Ok(QuestionCount::Limited(count))
    }

    /// Pool cap as a `usize`, or `None` for unlimited sessions.
    #[must_use]
    pub fn cap(self) -> Option<usize> {
        match self {
            QuestionCount::Limited(count) => {
                Some(usize::try_from(count).unwrap_or(usize::MAX))
            }
            QuestionCount::Unlimited => None,
        }
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        QuestionCount::Limited(DEFAULT_QUESTION_COUNT)
    }
}

impl FromStr for QuestionCount {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("unlimited") {
            return Ok(QuestionCount::Unlimited);
        }
        let count = trimmed.parse::<u32>().map_err(|_| ConfigError::InvalidCount)?;
        QuestionCount::limited(count)
    }
}

//
// ─── SESSION CONFIG ────────────────────────────────────────────────────────────
//

/// User-selected filters and size for one session run.
///
/// The defaults mirror an untouched configuration panel: all categories,
/// all difficulties, ten questions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionConfig {
    pub category: CategoryFilter,
    pub difficulty: DifficultyFilter,
    pub count: QuestionCount,
}

impl SessionConfig {
    #[must_use]
    pub fn new(category: CategoryFilter, difficulty: DifficultyFilter, count: QuestionCount) -> Self {
        Self {
            category,
            difficulty,
            count,
        }
    }

    /// True when `question` passes both filter predicates.
    #[must_use]
    pub fn matches(&self, question: &Question) -> bool {
        self.category.accepts(question.category()) && self.difficulty.accepts(question.difficulty())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
