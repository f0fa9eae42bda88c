use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use quiz_core::Clock;
use quiz_core::model::{Question, SessionConfig, SessionSummary};
use storage::QuestionRepository;

use super::plan::PoolBuilder;
use super::progress::SessionProgress;
use super::view::SessionView;
use crate::error::SessionError;

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Lifecycle phase of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    Idle,
    Active,
    Finished,
    Reviewing,
}

impl EnginePhase {
    /// True while a question is on screen and navigation applies.
    #[must_use]
    pub fn is_navigable(self) -> bool {
        matches!(self, EnginePhase::Active | EnginePhase::Reviewing)
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One run's mutable state. The pool is fixed for the session's lifetime.
struct Session {
    pool: Vec<Question>,
    index: usize,
    answer_visible: bool,
    started_at: DateTime<Utc>,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// State machine stepping through a filtered, shuffled question pool.
///
/// Owned by the presentation layer. Every mutating operation returns the
/// resulting [`SessionView`] so the caller can re-render from data alone;
/// on error the engine state is left untouched.
pub struct SessionEngine {
    repository: Option<Arc<QuestionRepository>>,
    clock: Clock,
    session: Option<Session>,
    summary: Option<SessionSummary>,
    phase: EnginePhase,
}

impl SessionEngine {
    /// Engine with no repository attached yet (load still pending).
    #[must_use]
    pub fn new() -> Self {
        Self {
            repository: None,
            clock: Clock::default(),
            session: None,
            summary: None,
            phase: EnginePhase::Idle,
        }
    }

    /// Engine over an already-loaded repository.
    #[must_use]
    pub fn with_repository(repository: Arc<QuestionRepository>) -> Self {
        Self {
            repository: Some(repository),
            ..Self::new()
        }
    }

    /// Replace the clock, mainly for deterministic tests.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Attach the repository once its load completes.
    pub fn attach_repository(&mut self, repository: Arc<QuestionRepository>) {
        self.repository = Some(repository);
    }

    #[must_use]
    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// Summary of the last finished session, if one exists.
    #[must_use]
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    /// True when `start` has a loaded repository to sample from.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.repository
            .as_ref()
            .is_some_and(|repository| repository.is_loaded())
    }

    /// Build a fresh pool from the repository and enter `Active`.
    ///
    /// A session already running is superseded, no merge.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotReady` while the repository load has not
    /// completed, and `SessionError::EmptyPool` when no question matches the
    /// filters; in both cases the prior state is kept.
    pub fn start(&mut self, config: &SessionConfig) -> Result<SessionView, SessionError> {
        let repository = match &self.repository {
            Some(repository) if repository.is_loaded() => Arc::clone(repository),
            _ => return Err(SessionError::NotReady),
        };

        let plan = PoolBuilder::new(config).build(repository.all().iter().cloned());
        if plan.is_empty() {
            return Err(SessionError::EmptyPool);
        }

        debug!(pool = plan.total(), matched = plan.matched, "session started");
        self.session = Some(Session {
            pool: plan.questions,
            index: 0,
            answer_visible: false,
            started_at: self.clock.now(),
        });
        self.summary = None;
        self.phase = EnginePhase::Active;
        Ok(self.snapshot())
    }

    /// The question at the current position.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` outside `Active`/`Reviewing`.
    pub fn current(&self) -> Result<&Question, SessionError> {
        let session = self.navigable()?;
        Ok(&session.pool[session.index])
    }

    /// Hint for the current question. Pure; does not mutate state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` outside `Active`/`Reviewing`.
    pub fn hint(&self) -> Result<String, SessionError> {
        Ok(self.current()?.hint())
    }

    /// Flip answer visibility and return the new value.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` outside `Active`/`Reviewing`.
    pub fn toggle_answer(&mut self) -> Result<bool, SessionError> {
        let session = self.navigable_mut()?;
        session.answer_visible = !session.answer_visible;
        Ok(session.answer_visible)
    }

    /// Step forward, hiding the answer; completes the session when already
    /// on the last question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` outside `Active`/`Reviewing`.
    pub fn next(&mut self) -> Result<SessionView, SessionError> {
        let at_end = {
            let session = self.navigable_mut()?;
            if session.index + 1 < session.pool.len() {
                session.index += 1;
                session.answer_visible = false;
                false
            } else {
                true
            }
        };

        if at_end {
            self.complete()?;
        }
        Ok(self.snapshot())
    }

    /// Step back, hiding the answer. No-op on the first question; the index
    /// never moves below zero.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` outside `Active`/`Reviewing`.
    pub fn previous(&mut self) -> Result<SessionView, SessionError> {
        let session = self.navigable_mut()?;
        if session.index > 0 {
            session.index -= 1;
            session.answer_visible = false;
        }
        Ok(self.snapshot())
    }

    /// End the session from wherever it stands and record the summary.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` outside `Active`/`Reviewing`.
    pub fn finish(&mut self) -> Result<SessionView, SessionError> {
        self.navigable()?;
        self.complete()?;
        Ok(self.snapshot())
    }

    /// Re-walk the just-finished pool from the start: same questions, same
    /// order, no resampling.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NothingToReview` without a finished session.
    pub fn review(&mut self) -> Result<SessionView, SessionError> {
        if self.phase != EnginePhase::Finished {
            return Err(SessionError::NothingToReview);
        }
        let Some(session) = self.session.as_mut() else {
            return Err(SessionError::NothingToReview);
        };

        session.index = 0;
        session.answer_visible = false;
        self.phase = EnginePhase::Reviewing;
        Ok(self.snapshot())
    }

    /// Return to `Idle`, discarding pool, position and summary. The
    /// repository is untouched.
    pub fn reset(&mut self) {
        self.session = None;
        self.summary = None;
        self.phase = EnginePhase::Idle;
    }

    /// Data the presentation layer renders after every transition.
    #[must_use]
    pub fn snapshot(&self) -> SessionView {
        let question = if self.phase.is_navigable() {
            self.session
                .as_ref()
                .map(|session| session.pool[session.index].clone())
        } else {
            None
        };

        SessionView {
            phase: self.phase,
            question,
            index: self.session.as_ref().map_or(0, |session| session.index),
            total: self.session.as_ref().map_or(0, |session| session.pool.len()),
            answer_visible: self.phase.is_navigable()
                && self
                    .session
                    .as_ref()
                    .is_some_and(|session| session.answer_visible),
            summary: match self.phase {
                EnginePhase::Finished => self.summary.clone(),
                _ => None,
            },
        }
    }

    /// Position bookkeeping for progress bars and counters.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.session.as_ref().map_or(0, |session| session.pool.len());
        let position = match (&self.session, self.phase) {
            (Some(session), phase) if phase != EnginePhase::Idle => session.index + 1,
            _ => 0,
        };
        SessionProgress {
            position,
            total,
            remaining: total.saturating_sub(position),
            is_complete: self.phase == EnginePhase::Finished,
        }
    }

    fn navigable(&self) -> Result<&Session, SessionError> {
        if !self.phase.is_navigable() {
            return Err(SessionError::NoActiveSession);
        }
        self.session.as_ref().ok_or(SessionError::NoActiveSession)
    }

    fn navigable_mut(&mut self) -> Result<&mut Session, SessionError> {
        if !self.phase.is_navigable() {
            return Err(SessionError::NoActiveSession);
        }
        self.session.as_mut().ok_or(SessionError::NoActiveSession)
    }

    fn complete(&mut self) -> Result<(), SessionError> {
        let Some(session) = self.session.as_ref() else {
            return Err(SessionError::NoActiveSession);
        };

        let finished_at = self.clock.now();
        let viewed = &session.pool[..=session.index];
        let summary = SessionSummary::from_viewed(viewed, session.started_at, finished_at)?;

        debug!(
            viewed = summary.viewed_count(),
            categories = summary.distinct_categories(),
            "session finished"
        );
        self.summary = Some(summary);
        self.phase = EnginePhase::Finished;
        Ok(())
    }
}

impl Default for SessionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEngine")
            .field("phase", &self.phase)
            .field(
                "pool_len",
                &self.session.as_ref().map_or(0, |session| session.pool.len()),
            )
            .field("index", &self.session.as_ref().map(|session| session.index))
            .field(
                "answer_visible",
                &self.session.as_ref().map(|session| session.answer_visible),
            )
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
