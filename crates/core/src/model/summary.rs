use chrono::{DateTime, Utc};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::question::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("finished_at is before started_at")]
    InvalidTimeRange,

    #[error("too many questions for a single session: {len}")]
    TooManyQuestions { len: usize },
}

/// Aggregate summary for a finished quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    viewed_count: u32,
    distinct_categories: u32,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
}

impl SessionSummary {
    /// Build a summary from the questions viewed during a session, in order.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if `finished_at` is
    /// before `started_at`, and `SessionSummaryError::TooManyQuestions` if
    /// the viewed count cannot fit in `u32`.
    pub fn from_viewed(
        viewed: &[Question],
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Result<Self, SessionSummaryError> {
        if finished_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }

        let viewed_count = u32::try_from(viewed.len())
            .map_err(|_| SessionSummaryError::TooManyQuestions { len: viewed.len() })?;

        let categories: HashSet<&str> = viewed.iter().map(Question::category).collect();
        let distinct_categories = u32::try_from(categories.len())
            .map_err(|_| SessionSummaryError::TooManyQuestions { len: viewed.len() })?;

        Ok(Self {
            viewed_count,
            distinct_categories,
            started_at,
            finished_at,
        })
    }

    /// Questions advanced past, inclusive of the one on screen at the end.
    #[must_use]
    pub fn viewed_count(&self) -> u32 {
        self.viewed_count
    }

    /// Unique category tags among the viewed questions.
    #[must_use]
    pub fn distinct_categories(&self) -> u32 {
        self.distinct_categories
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::{Difficulty, QuestionDraft};
    use crate::time::fixed_now;

    fn question(category: &str) -> Question {
        QuestionDraft {
            category: category.to_string(),
            difficulty: Difficulty::Junior,
            prompt: "P".to_string(),
            answer: "A".to_string(),
            analogy: "Like a thing. Extra.".to_string(),
            code_example: None,
            key_phrase: "K".to_string(),
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn summary_counts_viewed_and_distinct_categories() {
        let now = fixed_now();
        let viewed = vec![
            question("algorithms"),
            question("design"),
            question("algorithms"),
        ];

        let summary = SessionSummary::from_viewed(&viewed, now, now).unwrap();

        assert_eq!(summary.viewed_count(), 3);
        assert_eq!(summary.distinct_categories(), 2);
        assert_eq!(summary.started_at(), now);
    }

    #[test]
    fn inverted_time_range_is_rejected() {
        let now = fixed_now();
        let earlier = now - chrono::Duration::seconds(5);
        let err = SessionSummary::from_viewed(&[], now, earlier).unwrap_err();
        assert!(matches!(err, SessionSummaryError::InvalidTimeRange));
    }
}
