use thiserror::Error;

#[derive(Debug, Error)]
pub enum RagError {
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("vector store error: {0}")]
    Store(String),
    #[error("llm error: {0}")]
    Llm(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl RagError {
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        RagError::Internal(err.to_string())
    }

    pub fn store<E: std::fmt::Display>(err: E) -> Self {
        RagError::Store(err.to_string())
    }

    pub fn llm<E: std::fmt::Display>(err: E) -> Self {
        RagError::Llm(err.to_string())
    }
}
