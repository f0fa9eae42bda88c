use quiz_core::model::{Question, SessionSummary};
use quiz_core::text::capitalize;

use super::service::EnginePhase;

/// Presentation-agnostic snapshot of the engine after a transition.
///
/// This is intentionally **not** a UI view-model:
/// - no widget state
/// - no pre-rendered markup
///
/// The presentation layer derives all rendering from these fields alone.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub phase: EnginePhase,
    /// The question on screen; `None` outside `Active`/`Reviewing`.
    pub question: Option<Question>,
    pub index: usize,
    pub total: usize,
    pub answer_visible: bool,
    /// Present only in `Finished`.
    pub summary: Option<SessionSummary>,
}

impl SessionView {
    /// 1-based position for "question X of Y" counters; 0 without a question.
    #[must_use]
    pub fn position(&self) -> usize {
        if self.question.is_some() {
            self.index + 1
        } else {
            0
        }
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.total > 0 && self.index + 1 == self.total
    }

    /// Capitalized category of the current question, for display.
    #[must_use]
    pub fn category_label(&self) -> Option<String> {
        self.question.as_ref().map(|q| capitalize(q.category()))
    }

    /// Capitalized difficulty of the current question, for display.
    #[must_use]
    pub fn difficulty_label(&self) -> Option<String> {
        self.question.as_ref().map(|q| q.difficulty().label())
    }
}
