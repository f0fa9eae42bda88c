use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{CategoryFilter, DifficultyFilter, QuestionCount, SessionConfig};
use quiz_core::time::fixed_now;
use services::{EnginePhase, SessionEngine, SessionError};
use storage::{QuestionRepository, StaticQuestionSource};

const PAYLOAD: &str = r#"{
    "questions": [
        {
            "category": "algorithms",
            "difficulty": "junior",
            "prompt": "What does Big-O describe?",
            "answer": "<p>How cost grows with input size.</p>",
            "analogy": "Like a commute. What matters is how it scales on a bad day.",
            "key_phrase": "Growth, not absolute speed."
        },
        {
            "category": "algorithms",
            "difficulty": "senior",
            "prompt": "Why prefer a heap for top-k?",
            "answer": "<p>It keeps only k elements ordered.</p>",
            "analogy": "Like a podium. Only the best three spots exist.",
            "code_example": "use std::collections::BinaryHeap;",
            "key_phrase": "Bound the working set."
        },
        {
            "category": "design",
            "difficulty": "lead",
            "prompt": "What makes an API boundary good?",
            "answer": "<p>It hides decisions likely to change.</p>",
            "analogy": "Like a restaurant menu. Diners never see the kitchen layout.",
            "key_phrase": "Hide what changes."
        }
    ]
}"#;

#[tokio::test]
async fn full_session_flow_reaches_summary_and_review() {
    let mut repository = QuestionRepository::new();
    repository
        .load(&StaticQuestionSource::new(PAYLOAD))
        .await
        .unwrap();
    assert_eq!(repository.count(), 3);

    let mut engine = SessionEngine::with_repository(Arc::new(repository))
        .with_clock(Clock::fixed(fixed_now()));
    let config = SessionConfig {
        category: CategoryFilter::All,
        difficulty: DifficultyFilter::All,
        count: QuestionCount::Unlimited,
    };

    let view = engine.start(&config).unwrap();
    assert_eq!(view.phase, EnginePhase::Active);
    assert_eq!(view.total, 3);
    assert_eq!(view.position(), 1);
    assert!(view.is_first());

    assert!(engine.toggle_answer().unwrap());
    assert!(engine.hint().unwrap().ends_with("..."));

    let view = engine.next().unwrap();
    assert!(!view.answer_visible);
    assert_eq!(view.position(), 2);

    engine.next().unwrap();
    let view = engine.next().unwrap();
    assert_eq!(view.phase, EnginePhase::Finished);
    let summary = view.summary.expect("summary on finish");
    assert_eq!(summary.viewed_count(), 3);
    assert_eq!(summary.distinct_categories(), 2);
    assert_eq!(summary.started_at(), fixed_now());

    let view = engine.review().unwrap();
    assert_eq!(view.phase, EnginePhase::Reviewing);
    assert_eq!(view.position(), 1);
    assert_eq!(view.total, 3);

    engine.reset();
    assert_eq!(engine.phase(), EnginePhase::Idle);
}

#[tokio::test]
async fn start_is_rejected_until_the_repository_loads() {
    let repository = Arc::new(QuestionRepository::new());
    let mut engine = SessionEngine::with_repository(Arc::clone(&repository));

    assert!(matches!(
        engine.start(&SessionConfig::default()),
        Err(SessionError::NotReady)
    ));

    let mut loaded = QuestionRepository::new();
    loaded
        .load(&StaticQuestionSource::new(PAYLOAD))
        .await
        .unwrap();
    engine.attach_repository(Arc::new(loaded));

    assert!(engine.is_ready());
    assert!(engine.start(&SessionConfig::default()).is_ok());
}
