use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("not found: {0}")]
    NotFound(&'static str),
    #[error("vocabulary source error: {0}")]
    Source(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
