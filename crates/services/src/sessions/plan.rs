use rand::rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Question, SessionConfig};

/// Selection result for a session pool build.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolPlan {
    pub questions: Vec<Question>,
    /// How many candidates passed the filters before truncation.
    pub matched: usize,
}

impl PoolPlan {
    /// Pool size after truncation.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Returns true when no candidate matched the filters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Builds a session pool by filtering, shuffling and capping candidates.
pub struct PoolBuilder<'a> {
    config: &'a SessionConfig,
    shuffle: bool,
}

impl<'a> PoolBuilder<'a> {
    #[must_use]
    pub fn new(config: &'a SessionConfig) -> Self {
        Self {
            config,
            shuffle: true,
        }
    }

    /// Enable or disable shuffling, mainly for order-sensitive tests.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Build the pool from the repository's candidates.
    ///
    /// Candidates failing either filter predicate are dropped, the rest get
    /// an unbiased uniform permutation, and the result is truncated to the
    /// configured count. Sampling is without replacement.
    #[must_use]
    pub fn build(self, candidates: impl IntoIterator<Item = Question>) -> PoolPlan {
        let mut questions: Vec<Question> = candidates
            .into_iter()
            .filter(|question| self.config.matches(question))
            .collect();
        let matched = questions.len();

        if self.shuffle {
            let mut rng = rng();
            questions.as_mut_slice().shuffle(&mut rng);
        }

        if let Some(cap) = self.config.count.cap() {
            questions.truncate(cap);
        }

        PoolPlan { questions, matched }
    }
}
