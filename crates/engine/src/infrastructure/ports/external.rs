//! External service port traits (inference backend, sentiment classifier).

use async_trait::async_trait;
use pitlane_domain::Sentiment;

use super::error::InferenceError;

/// Text generation backend.
///
/// Returns the raw response body of a successful call; parsing the body is
/// the caller's job because the backend does not always honour its format.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InferencePort: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, InferenceError>;
}

/// Opaque sentiment model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SentimentPort: Send + Sync {
    async fn classify(&self, text: &str) -> Sentiment;
}
