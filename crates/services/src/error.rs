//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::SessionSummaryError;

/// Errors emitted by the session engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("question repository is not ready")]
    NotReady,
    #[error("no questions match the selected filters")]
    EmptyPool,
    #[error("no active session")]
    NoActiveSession,
    #[error("no finished session to review")]
    NothingToReview,
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
}
