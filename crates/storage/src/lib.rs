#![forbid(unsafe_code)]

pub mod repository;
pub mod source;

pub use repository::{LoadError, QuestionFile, QuestionRecord, QuestionRepository};
pub use source::{FileQuestionSource, HttpQuestionSource, QuestionSource, StaticQuestionSource};
