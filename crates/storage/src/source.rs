use async_trait::async_trait;
use std::path::PathBuf;

use crate::repository::LoadError;

/// One-shot provider of the raw question payload.
///
/// Implementations only move bytes; parsing and validation stay in
/// [`crate::repository::QuestionRepository`].
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch the raw payload text.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` when the source is unreachable.
    async fn fetch(&self) -> Result<String, LoadError>;
}

/// Fetches the question payload over HTTP.
pub struct HttpQuestionSource {
    client: reqwest::Client,
    url: String,
}

impl HttpQuestionSource {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    async fn fetch(&self) -> Result<String, LoadError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus(status));
        }
        Ok(response.text().await?)
    }
}

/// Reads the question payload from a local file (e.g. a bundled
/// `questions.json` next to the app).
pub struct FileQuestionSource {
    path: PathBuf,
}

impl FileQuestionSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl QuestionSource for FileQuestionSource {
    async fn fetch(&self) -> Result<String, LoadError> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }
}

/// Serves a payload held in memory. Intended for tests.
pub struct StaticQuestionSource {
    payload: String,
}

impl StaticQuestionSource {
    #[must_use]
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    async fn fetch(&self) -> Result<String, LoadError> {
        Ok(self.payload.clone())
    }
}
